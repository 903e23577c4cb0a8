//! Pointer dragging: a pointer source plus a constraint that lets it grab bodies.

use cgmath::Vector2;

use crate::physics::{BodyHandle, PhysicsWorld};

/// Pointer state in viewport coordinates, fed from window cursor events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    position: Vector2<f32>,
    pressed: bool,
}

impl Default for Pointer {
    fn default() -> Self {
        Self {
            position: Vector2::new(0.0, 0.0),
            pressed: false,
        }
    }
}

impl Pointer {
    pub fn move_to(&mut self, position: Vector2<f32>) {
        self.position = position;
    }

    pub fn press(&mut self) {
        self.pressed = true;
    }

    pub fn release(&mut self) {
        self.pressed = false;
    }

    pub fn position(&self) -> Vector2<f32> {
        self.position
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Grab {
    body: BodyHandle,
    /// Body centre relative to the pointer at the moment of capture.
    offset: Vector2<f32>,
}

/// Attaches a [`Pointer`] to the physics world.
///
/// While the button is held over a dynamic body that body follows the
/// pointer. Releasing hands it back to the simulation.
#[derive(Debug, Default)]
pub struct PointerConstraint {
    pointer: Pointer,
    grab: Option<Grab>,
}

impl PointerConstraint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    pub fn pointer_mut(&mut self) -> &mut Pointer {
        &mut self.pointer
    }

    pub fn held_body(&self) -> Option<BodyHandle> {
        self.grab.map(|grab| grab.body)
    }

    /// Apply the pointer to the world. Call before every physics step.
    pub fn update(&mut self, world: &mut PhysicsWorld) {
        let position = self.pointer.position();

        if !self.pointer.is_pressed() {
            if let Some(grab) = self.grab.take() {
                world.end_drag(grab.body);
                log::debug!("released body {:?}", grab.body);
            }
            return;
        }

        if self.grab.is_none() {
            self.grab = world.dynamic_body_at(position).and_then(|body| {
                let center = world.pose(body)?.position;
                world.begin_drag(body).then(|| {
                    log::debug!("captured body {:?}", body);
                    Grab { body, offset: center - position }
                })
            });
        }

        if let Some(grab) = self.grab {
            world.drag_to(grab.body, position + grab.offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BodyMaterial;

    fn world_with_box() -> (PhysicsWorld, BodyHandle) {
        let mut world = PhysicsWorld::new(Vector2::new(0.0, 1000.0), 1.0 / 60.0);
        let body = world.add_dynamic_rect(Vector2::new(300.0, 180.0), 200.0, 100.0, BodyMaterial::default());
        (world, body)
    }

    #[test]
    fn press_over_body_keeps_grab_offset() {
        let (mut world, body) = world_with_box();
        let mut constraint = PointerConstraint::new();

        constraint.pointer_mut().move_to(Vector2::new(320.0, 190.0));
        constraint.pointer_mut().press();
        constraint.update(&mut world);
        assert_eq!(constraint.held_body(), Some(body));

        constraint.pointer_mut().move_to(Vector2::new(370.0, 140.0));
        constraint.update(&mut world);
        world.step();

        let position = world.pose(body).unwrap().position;
        assert!((position.x - 350.0).abs() < 1e-3, "x = {}", position.x);
        assert!((position.y - 130.0).abs() < 1e-3, "y = {}", position.y);
    }

    #[test]
    fn dragging_onto_a_body_while_pressed_captures_it() {
        let (mut world, body) = world_with_box();
        let mut constraint = PointerConstraint::new();

        constraint.pointer_mut().move_to(Vector2::new(20.0, 20.0));
        constraint.pointer_mut().press();
        constraint.update(&mut world);
        assert_eq!(constraint.held_body(), None);

        constraint.pointer_mut().move_to(Vector2::new(300.0, 180.0));
        constraint.update(&mut world);
        assert_eq!(constraint.held_body(), Some(body));
    }

    #[test]
    fn release_returns_body_to_the_simulation() {
        let (mut world, body) = world_with_box();
        let mut constraint = PointerConstraint::new();

        constraint.pointer_mut().move_to(Vector2::new(300.0, 180.0));
        constraint.pointer_mut().press();
        constraint.update(&mut world);
        assert_eq!(world.dragged_body(), Some(body));
        assert!(world.body(body).unwrap().is_dynamic);
        for _ in 0..3 {
            constraint.update(&mut world);
            world.step();
        }

        constraint.pointer_mut().release();
        constraint.update(&mut world);
        assert_eq!(constraint.held_body(), None);
        assert_eq!(world.dragged_body(), None);
        for _ in 0..30 {
            constraint.update(&mut world);
            world.step();
        }
        assert!(world.pose(body).unwrap().position.y > 190.0);
    }
}
