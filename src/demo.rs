//! The whole simulation without a window: world, stage and the glue between them.

use cgmath::Vector2;

use crate::boundary::BoundaryManager;
use crate::bridge;
use crate::config::SceneConfig;
use crate::input::PointerConstraint;
use crate::physics::PhysicsWorld;
use crate::runner::{Runner, Ticker};
use crate::scene::{SceneRegistry, create_scene_object};
use crate::stage::Stage;

pub struct Demo {
    world: PhysicsWorld,
    stage: Stage,
    registry: SceneRegistry,
    boundary: BoundaryManager,
    pointer: PointerConstraint,
    runner: Runner,
    ticker: Ticker,
}

impl Demo {
    /// Build walls, one scene object per configured asset and the pointer
    /// constraint, then start both frame drivers.
    pub fn new(config: &SceneConfig, width: f32, height: f32) -> Self {
        let mut world = PhysicsWorld::new(config.gravity, config.timestep);
        let boundary = BoundaryManager::new(&mut world, width, height, config.wall_thickness);

        let mut stage = Stage::new();
        let mut registry = SceneRegistry::new();
        for asset in &config.assets {
            create_scene_object(&mut world, &mut stage, &mut registry, asset, config.material);
        }
        log::info!("scene ready with {} objects", registry.len());

        let mut demo = Self {
            world,
            stage,
            registry,
            boundary,
            pointer: PointerConstraint::new(),
            runner: Runner::new(config.timestep),
            ticker: Ticker::new(),
        };
        demo.start();
        demo
    }

    pub fn start(&mut self) {
        self.runner.start();
        self.ticker.start();
    }

    pub fn stop(&mut self) {
        self.runner.stop();
        self.ticker.stop();
    }

    /// Advance by `elapsed` seconds: owed physics steps, then the render bridge.
    pub fn frame(&mut self, elapsed: f32) {
        for _ in 0..self.runner.advance(elapsed) {
            self.step_physics();
        }
        if self.ticker.tick(elapsed) {
            self.render_frame();
        }
    }

    /// One fixed physics step with the pointer applied first.
    pub fn step_physics(&mut self) {
        self.pointer.update(&mut self.world);
        self.world.step();
    }

    /// Copy body transforms onto sprites.
    pub fn render_frame(&mut self) -> usize {
        bridge::sync_sprites(&self.world, &self.registry, &mut self.stage)
    }

    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        self.boundary.resize(&mut self.world, width, height)
    }

    pub fn pointer_moved(&mut self, position: Vector2<f32>) {
        self.pointer.pointer_mut().move_to(position);
    }

    pub fn pointer_pressed(&mut self) {
        self.pointer.pointer_mut().press();
    }

    pub fn pointer_released(&mut self) {
        self.pointer.pointer_mut().release();
    }

    /// The pointer left the surface; drop whatever it was holding.
    pub fn pointer_left(&mut self) {
        self.pointer.pointer_mut().release();
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn boundary(&self) -> &BoundaryManager {
        &self.boundary
    }

    pub fn pointer(&self) -> &PointerConstraint {
        &self.pointer
    }

    pub fn runner(&self) -> &Runner {
        &self.runner
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }
}
