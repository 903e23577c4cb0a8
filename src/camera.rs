use cgmath::{self, SquareMatrix};
use bytemuck;

//webgpu depth ranges from 0 to 1 whereas opengl is -1 to 1
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::from_cols(
    cgmath::Vector4::new(1.0, 0.0, 0.0, 0.0),
    cgmath::Vector4::new(0.0, 1.0, 0.0, 0.0),
    cgmath::Vector4::new(0.0, 0.0, 0.5, 0.0),
    cgmath::Vector4::new(0.0, 0.0, 0.5, 1.0),
);

/// Screen-space camera: one unit is one logical pixel, origin at the top
/// left, y pointing down. Matches the physics world's coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Camera2d {
    width: f32,
    height: f32,
}

impl Camera2d {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn build_view_projection_matrix(&self) -> cgmath::Matrix4<f32> {
        //bottom and top are swapped so y grows downward like the page
        let proj = cgmath::ortho(0.0, self.width, self.height, 0.0, -1.0, 1.0);
        OPENGL_TO_WGPU_MATRIX * proj
    }

    pub fn update_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.width = width;
            self.height = height;
        } else {
            log::warn!("keeping camera viewport {}x{}, got {}x{}", self.width, self.height, width, height);
        }
    }

    pub fn viewport(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

// We need this for Rust to store our data correctly for the shaders
#[repr(C)]
// This is so we can store this in a buffer
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    // We can't use cgmath with bytemuck directly, so we'll have
    // to convert the Matrix4 into a 4x4 f32 array
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: cgmath::Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera2d) {
        self.view_proj = camera.build_view_projection_matrix().into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    fn to_clip(camera: &Camera2d, x: f32, y: f32) -> (f32, f32) {
        let p = camera.build_view_projection_matrix() * Vector4::new(x, y, 0.0, 1.0);
        (p.x / p.w, p.y / p.w)
    }

    #[test]
    fn corners_map_to_clip_space() {
        let camera = Camera2d::new(800.0, 600.0);

        let (x, y) = to_clip(&camera, 0.0, 0.0);
        assert!((x + 1.0).abs() < 1e-5 && (y - 1.0).abs() < 1e-5);
        let (x, y) = to_clip(&camera, 800.0, 600.0);
        assert!((x - 1.0).abs() < 1e-5 && (y + 1.0).abs() < 1e-5);
        let (x, y) = to_clip(&camera, 400.0, 300.0);
        assert!(x.abs() < 1e-5 && y.abs() < 1e-5);
    }

    #[test]
    fn zero_sized_viewport_is_ignored() {
        let mut camera = Camera2d::new(800.0, 600.0);
        camera.update_viewport(0.0, 600.0);
        assert_eq!(camera.viewport(), (800.0, 600.0));
        camera.update_viewport(1024.0, 768.0);
        assert_eq!(camera.viewport(), (1024.0, 768.0));
    }
}
