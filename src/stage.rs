//! CPU-side scene graph of sprites. The renderer draws whatever is here.

use cgmath::{Matrix4, Rad, Vector2, Vector3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteHandle(pub(crate) usize);

impl SpriteHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A textured rectangle placed in screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub position: Vector2<f32>,
    /// Radians, clockwise on screen since y points down.
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
    /// Pivot in normalized sprite coordinates, (0.5, 0.5) is the centre.
    pub anchor: Vector2<f32>,
    /// Image locator the texture is loaded from.
    pub source: String,
    pub tint: [f32; 4],
}

impl Sprite {
    pub fn new(source: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            position: Vector2::new(0.0, 0.0),
            rotation: 0.0,
            width,
            height,
            anchor: Vector2::new(0.0, 0.0),
            source: source.into(),
            tint: [1.0, 1.0, 1.0, 1.0],
        }
    }

    pub fn with_anchor(mut self, x: f32, y: f32) -> Self {
        self.anchor = Vector2::new(x, y);
        self
    }

    /// Maps the unit quad (0..1, 0..1) onto this sprite's screen rectangle.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        let pivot = Vector3::new(-self.anchor.x * self.width, -self.anchor.y * self.height, 0.0);
        Matrix4::from_translation(Vector3::new(self.position.x, self.position.y, 0.0))
            * Matrix4::from_angle_z(Rad(self.rotation))
            * Matrix4::from_translation(pivot)
            * Matrix4::from_nonuniform_scale(self.width, self.height, 1.0)
    }
}

/// Ordered sprite container; later children draw on top.
#[derive(Debug, Default)]
pub struct Stage {
    children: Vec<Sprite>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_child(&mut self, sprite: Sprite) -> SpriteHandle {
        self.children.push(sprite);
        SpriteHandle(self.children.len() - 1)
    }

    pub fn get(&self, handle: SpriteHandle) -> Option<&Sprite> {
        self.children.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: SpriteHandle) -> Option<&mut Sprite> {
        self.children.get_mut(handle.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpriteHandle, &Sprite)> {
        self.children
            .iter()
            .enumerate()
            .map(|(index, sprite)| (SpriteHandle(index), sprite))
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
