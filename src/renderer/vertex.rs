//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
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
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    /// Water column gradient, surface to depth
    pub const WATER_TOP: [f32; 4] = [0.0, 0.267, 0.4, 1.0];
    pub const WATER_MID: [f32; 4] = [0.133, 0.4, 0.533, 1.0];
    pub const WATER_BOTTOM: [f32; 4] = [0.267, 0.667, 0.8, 1.0];
    pub const SEABED: [f32; 4] = [0.545, 0.42, 0.302, 1.0];
    pub const PLANT: [f32; 4] = [0.176, 0.353, 0.153, 1.0];
    pub const ROCK: [f32; 4] = [0.42, 0.31, 0.227, 1.0];

    pub const DIVER_BODY: [f32; 4] = [0.2, 0.4, 0.8, 1.0];
    pub const DIVER_FIN: [f32; 4] = [0.133, 0.333, 0.667, 1.0];
    pub const TANK: [f32; 4] = [0.4, 0.4, 0.4, 1.0];
    pub const MASK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const MASK_GLASS: [f32; 4] = [0.667, 1.0, 1.0, 1.0];

    pub const PEARL: [f32; 4] = [1.0, 0.667, 1.0, 1.0];
    pub const PEARL_SHINE: [f32; 4] = [1.0, 0.533, 1.0, 1.0];
    pub const CHEST_WOOD: [f32; 4] = [0.545, 0.271, 0.075, 1.0];
    pub const CHEST_TRIM: [f32; 4] = [0.396, 0.263, 0.129, 1.0];
    pub const GOLD: [f32; 4] = [1.0, 0.843, 0.0, 1.0];
    pub const SILVER: [f32; 4] = [0.753, 0.753, 0.753, 1.0];
    pub const GEM: [f32; 4] = [1.0, 0.412, 0.706, 1.0];

    pub const JELLYFISH: [f32; 3] = [1.0, 0.392, 0.784];
    pub const TENTACLE: [f32; 4] = [1.0, 0.588, 0.784, 0.8];
    pub const PREDATOR: [f32; 3] = [0.392, 0.392, 1.0];
    pub const PREDATOR_FIN: [f32; 4] = [0.4, 0.4, 1.0, 1.0];

    pub const VIGNETTE: [f32; 4] = [0.0, 0.118, 0.235, 0.5];
    /// Deep-water fade used for win/loss transitions and the initial reveal
    pub const FADE: [f32; 3] = [0.0, 0.078, 0.157];
}
