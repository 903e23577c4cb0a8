use bytemuck;
use wgpu;

use crate::stage::Sprite;

#[repr(C)] //layout the struct in memory how a C compiler would
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    position: [f32; 2], //corner of the unit quad, scaled per sprite by the instance matrix
    tex_coords: [f32; 2],
}

impl QuadVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress, //how far to skip to reach the next vertex
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

//unit quad with its origin at the top-left so the anchor math in Sprite works in 0..1
//texture v runs down the image, same as y on screen
pub const QUAD_VERTICES: &[QuadVertex] = &[
    QuadVertex { position: [0.0, 0.0], tex_coords: [0.0, 0.0] },
    QuadVertex { position: [0.0, 1.0], tex_coords: [0.0, 1.0] },
    QuadVertex { position: [1.0, 1.0], tex_coords: [1.0, 1.0] },
    QuadVertex { position: [1.0, 0.0], tex_coords: [1.0, 0.0] },
];

pub const QUAD_INDICES: &[u16] = &[
    0, 1, 2,
    0, 2, 3,
];

// Raw per-sprite data that goes into the GPU instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteInstanceRaw {
    model: [[f32; 4]; 4],
    tint: [f32; 4],
}

impl SpriteInstanceRaw {
    pub fn from_sprite(sprite: &Sprite) -> Self {
        Self {
            model: sprite.model_matrix().into(),
            tint: sprite.tint,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<SpriteInstanceRaw>() as wgpu::BufferAddress,
            // Advance once per sprite rather than once per vertex
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                // A mat4 takes up 4 vertex slots as it is technically 4 vec4s.
                // We'll reassemble the mat4 in the shader.
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 7,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 12]>() as wgpu::BufferAddress,
                    shader_location: 8,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 16]>() as wgpu::BufferAddress,
                    shader_location: 9,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_layout_covers_the_whole_struct() {
        let layout = SpriteInstanceRaw::desc();
        let last = layout.attributes.last().unwrap();
        assert_eq!(last.offset + 16, layout.array_stride);
        assert_eq!(layout.array_stride as usize, std::mem::size_of::<SpriteInstanceRaw>());
    }

    #[test]
    fn texture_coordinates_follow_screen_orientation() {
        for vertex in QUAD_VERTICES {
            assert_eq!(vertex.position, vertex.tex_coords);
        }
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < QUAD_VERTICES.len()));
    }
}
