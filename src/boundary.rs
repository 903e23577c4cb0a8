//! The four static walls that keep bodies inside the viewport.

use cgmath::Vector2;

use crate::physics::{BodyHandle, PhysicsWorld};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl WallSide {
    pub const ALL: [WallSide; 4] = [WallSide::Top, WallSide::Bottom, WallSide::Left, WallSide::Right];

    /// Midpoint of this edge for a viewport of the given size.
    pub fn center(self, width: f32, height: f32) -> Vector2<f32> {
        match self {
            WallSide::Top => Vector2::new(width / 2.0, 0.0),
            WallSide::Bottom => Vector2::new(width / 2.0, height),
            WallSide::Left => Vector2::new(0.0, height / 2.0),
            WallSide::Right => Vector2::new(width, height / 2.0),
        }
    }

    fn is_horizontal(self) -> bool {
        matches!(self, WallSide::Top | WallSide::Bottom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub side: WallSide,
    pub body: BodyHandle,
    pub width: f32,
    pub height: f32,
}

/// Owns the walls and the viewport size they were last fitted to.
#[derive(Debug)]
pub struct BoundaryManager {
    walls: [Wall; 4],
    prev_width: f32,
    prev_height: f32,
}

impl BoundaryManager {
    /// Build the walls around a `width` x `height` viewport and add them to the world.
    pub fn new(world: &mut PhysicsWorld, width: f32, height: f32, thickness: f32) -> Self {
        let walls = WallSide::ALL.map(|side| {
            let (w, h) = if side.is_horizontal() {
                (width, thickness)
            } else {
                (thickness, height)
            };
            let body = world.add_static_rect(side.center(width, height), w, h);
            Wall { side, body, width: w, height: h }
        });
        log::info!("walls fitted to {}x{}", width, height);

        Self {
            walls,
            prev_width: width,
            prev_height: height,
        }
    }

    /// Move the walls onto the new edges and stretch them by the change in size.
    ///
    /// Returns false, leaving the walls untouched, when either dimension is
    /// not a positive number.
    pub fn resize(&mut self, world: &mut PhysicsWorld, width: f32, height: f32) -> bool {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            log::warn!("ignoring resize to {}x{}", width, height);
            return false;
        }

        let width_ratio = width / self.prev_width;
        let height_ratio = height / self.prev_height;

        for wall in &mut self.walls {
            world.set_position(wall.body, wall.side.center(width, height));
            let (sx, sy) = if wall.side.is_horizontal() {
                (width_ratio, 1.0)
            } else {
                (1.0, height_ratio)
            };
            match world.scale(wall.body, sx, sy) {
                Some((w, h)) => {
                    wall.width = w;
                    wall.height = h;
                }
                None => log::warn!("{:?} wall is missing from the physics world", wall.side),
            }
        }

        log::debug!(
            "walls resized {}x{} -> {}x{}",
            self.prev_width,
            self.prev_height,
            width,
            height
        );
        self.prev_width = width;
        self.prev_height = height;
        true
    }

    pub fn wall(&self, side: WallSide) -> &Wall {
        &self.walls[side as usize]
    }

    /// Viewport size the walls currently fit.
    pub fn viewport(&self) -> (f32, f32) {
        (self.prev_width, self.prev_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(width: f32, height: f32) -> (PhysicsWorld, BoundaryManager) {
        let mut world = PhysicsWorld::new(Vector2::new(0.0, 1000.0), 1.0 / 60.0);
        let walls = BoundaryManager::new(&mut world, width, height, 10.0);
        (world, walls)
    }

    #[test]
    fn startup_walls_line_the_viewport() {
        let (world, walls) = setup(800.0, 600.0);

        assert_eq!(world.body_count(), 4);
        let top = walls.wall(WallSide::Top);
        assert_eq!((top.width, top.height), (800.0, 10.0));
        let left = walls.wall(WallSide::Left);
        assert_eq!((left.width, left.height), (10.0, 600.0));
        assert_eq!(world.pose(left.body).unwrap().position, Vector2::new(0.0, 300.0));
    }

    #[test]
    fn resize_stretches_only_the_matching_axis() {
        let (mut world, mut walls) = setup(800.0, 600.0);

        assert!(walls.resize(&mut world, 400.0, 900.0));

        let bottom = walls.wall(WallSide::Bottom);
        assert!((bottom.width - 400.0).abs() < 1e-3);
        assert!((bottom.height - 10.0).abs() < 1e-3);
        let right = walls.wall(WallSide::Right);
        assert!((right.width - 10.0).abs() < 1e-3);
        assert!((right.height - 900.0).abs() < 1e-3);
        assert_eq!(world.rect_size(right.body), Some((right.width, right.height)));
        assert_eq!(walls.viewport(), (400.0, 900.0));
    }

    #[test]
    fn collapsed_viewport_is_ignored() {
        let (mut world, mut walls) = setup(800.0, 600.0);

        assert!(!walls.resize(&mut world, 0.0, 600.0));
        assert!(!walls.resize(&mut world, 800.0, f32::NAN));

        assert_eq!(walls.viewport(), (800.0, 600.0));
        assert_eq!(walls.wall(WallSide::Top).width, 800.0);
    }
}
