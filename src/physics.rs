use cgmath::Vector2;
use rapier2d::parry::query::PointQuery;
use rapier2d::prelude::*;

use crate::config::BodyMaterial;

pub type BodyHandle = RigidBodyHandle;

/// Fastest a dragged body is pulled toward the pointer, in px/s.
const MAX_DRAG_SPEED: f32 = 6000.0;

#[derive(Debug, Clone, Copy)]
struct Drag {
    body: BodyHandle,
    gravity_scale: f32,
}

/// Position and rotation of a body, in pixels and radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPose {
    pub position: Vector2<f32>,
    pub angle: f32,
}

/// Physics body data that can be easily extracted for rendering
#[derive(Debug, Clone)]
pub struct PhysicsBody {
    pub position: Vector2<f32>,
    pub angle: f32,
    pub linear_velocity: Vector2<f32>,
    pub angular_velocity: f32,
    pub is_dynamic: bool,
}

/// Wrapper around Rapier2D physics world in screen space (pixels, y down)
pub struct PhysicsWorld {
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    gravity: Vector<f32>,
    integration_parameters: IntegrationParameters,
    drag: Option<Drag>,
}

impl PhysicsWorld {
    /// Create a new physics world stepping `dt` seconds at a time
    pub fn new(gravity: Vector2<f32>, dt: f32) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = dt;

        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            gravity: vector![gravity.x, gravity.y],
            integration_parameters,
            drag: None,
        }
    }

    /// Add a fixed rectangle centered at `center`
    pub fn add_static_rect(&mut self, center: Vector2<f32>, width: f32, height: f32) -> BodyHandle {
        let rigid_body = RigidBodyBuilder::fixed()
            .translation(vector![center.x, center.y])
            .build();
        let handle = self.rigid_body_set.insert(rigid_body);

        let collider = ColliderBuilder::cuboid(width / 2.0, height / 2.0).build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);

        handle
    }

    /// Add a dynamic rectangle centered at `center`
    pub fn add_dynamic_rect(
        &mut self,
        center: Vector2<f32>,
        width: f32,
        height: f32,
        material: BodyMaterial,
    ) -> BodyHandle {
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(vector![center.x, center.y])
            .ccd_enabled(true)
            .build();
        let handle = self.rigid_body_set.insert(rigid_body);

        // Walls carry no restitution of their own, so take the bouncier side.
        let collider = ColliderBuilder::cuboid(width / 2.0, height / 2.0)
            .restitution(material.restitution)
            .restitution_combine_rule(CoefficientCombineRule::Max)
            .friction(material.friction)
            .build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);

        handle
    }

    /// Teleport a body. Returns false for unknown handles.
    pub fn set_position(&mut self, handle: BodyHandle, position: Vector2<f32>) -> bool {
        match self.rigid_body_set.get_mut(handle) {
            Some(rigid_body) => {
                rigid_body.set_translation(vector![position.x, position.y], true);
                true
            }
            None => false,
        }
    }

    /// Scale every rectangle collider of a body about its centre and
    /// return the new size of the first one.
    pub fn scale(&mut self, handle: BodyHandle, sx: f32, sy: f32) -> Option<(f32, f32)> {
        let colliders = self.rigid_body_set.get(handle)?.colliders().to_vec();
        for collider_handle in colliders {
            let Some(collider) = self.collider_set.get_mut(collider_handle) else {
                continue;
            };
            let half_extents = collider.shape().as_cuboid().map(|c| c.half_extents);
            if let Some(he) = half_extents {
                collider.set_shape(SharedShape::cuboid(he.x * sx, he.y * sy));
            }
        }
        self.rect_size(handle)
    }

    /// Full width and height of the body's first rectangle collider
    pub fn rect_size(&self, handle: BodyHandle) -> Option<(f32, f32)> {
        let rigid_body = self.rigid_body_set.get(handle)?;
        rigid_body.colliders().iter().find_map(|&collider_handle| {
            let cuboid = self.collider_set.get(collider_handle)?.shape().as_cuboid()?;
            Some((cuboid.half_extents.x * 2.0, cuboid.half_extents.y * 2.0))
        })
    }

    pub fn pose(&self, handle: BodyHandle) -> Option<BodyPose> {
        let rigid_body = self.rigid_body_set.get(handle)?;
        let translation = rigid_body.translation();
        Some(BodyPose {
            position: Vector2::new(translation.x, translation.y),
            angle: rigid_body.rotation().angle(),
        })
    }

    /// Get a snapshot of a specific physics body by handle
    pub fn body(&self, handle: BodyHandle) -> Option<PhysicsBody> {
        let rigid_body = self.rigid_body_set.get(handle)?;
        let translation = rigid_body.translation();
        let linvel = rigid_body.linvel();
        Some(PhysicsBody {
            position: Vector2::new(translation.x, translation.y),
            angle: rigid_body.rotation().angle(),
            linear_velocity: Vector2::new(linvel.x, linvel.y),
            angular_velocity: rigid_body.angvel(),
            is_dynamic: rigid_body.is_dynamic(),
        })
    }

    /// Most recently added dynamic body whose shape contains `point`
    pub fn dynamic_body_at(&self, point: Vector2<f32>) -> Option<BodyHandle> {
        let point = point![point.x, point.y];
        self.collider_set
            .iter()
            .filter_map(|(_, collider)| {
                let parent = collider.parent()?;
                if !self.rigid_body_set.get(parent)?.is_dynamic() {
                    return None;
                }
                collider
                    .shape()
                    .contains_point(collider.position(), &point)
                    .then_some(parent)
            })
            .last()
    }

    /// Hand a dynamic body over to pointer control. The body stays dynamic
    /// so it keeps colliding with walls and other bodies.
    pub fn begin_drag(&mut self, handle: BodyHandle) -> bool {
        match self.drag {
            Some(drag) if drag.body == handle => return true,
            Some(drag) => self.end_drag(drag.body),
            None => {}
        }
        let Some(rigid_body) = self.rigid_body_set.get_mut(handle) else {
            return false;
        };
        if !rigid_body.is_dynamic() {
            return false;
        }

        let gravity_scale = rigid_body.gravity_scale();
        rigid_body.set_gravity_scale(0.0, true);
        rigid_body.wake_up(true);
        self.drag = Some(Drag { body: handle, gravity_scale });
        true
    }

    /// Steer a dragged body so the next step lands it on `target`.
    pub fn drag_to(&mut self, handle: BodyHandle, target: Vector2<f32>) {
        if !self.drag.is_some_and(|drag| drag.body == handle) {
            return;
        }
        let dt = self.integration_parameters.dt;
        let Some(rigid_body) = self.rigid_body_set.get_mut(handle) else {
            return;
        };

        let translation = rigid_body.translation();
        let mut velocity = vector![target.x - translation.x, target.y - translation.y] / dt;
        let speed = velocity.norm();
        if speed > MAX_DRAG_SPEED {
            velocity *= MAX_DRAG_SPEED / speed;
        }
        rigid_body.set_linvel(velocity, true);
        rigid_body.wake_up(true);
    }

    /// Return a dragged body to the simulation, keeping its drag velocity.
    pub fn end_drag(&mut self, handle: BodyHandle) {
        let Some(drag) = self.drag.filter(|drag| drag.body == handle) else {
            return;
        };
        self.drag = None;
        if let Some(rigid_body) = self.rigid_body_set.get_mut(handle) {
            rigid_body.set_gravity_scale(drag.gravity_scale, true);
            rigid_body.wake_up(true);
        }
    }

    pub fn dragged_body(&self) -> Option<BodyHandle> {
        self.drag.map(|drag| drag.body)
    }

    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    /// Step the physics simulation by one fixed timestep
    pub fn step(&mut self) {
        let physics_hooks = ();
        let event_handler = ();

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &physics_hooks,
            &event_handler,
        );
    }
}
