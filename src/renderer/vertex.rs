//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
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
    pub const SNAKE_HEAD: [f32; 4] = [0.1, 0.35, 0.1, 1.0];
    pub const SNAKE_BODY: [f32; 4] = [0.2, 0.55, 0.2, 1.0];
    pub const SNAKE_DEAD: [f32; 4] = [0.45, 0.45, 0.45, 1.0];
    pub const FOOD: [f32; 4] = [0.9, 0.15, 0.15, 1.0];
    pub const FOOD_LEAF: [f32; 4] = [0.2, 0.7, 0.2, 1.0];
    pub const POISON: [f32; 4] = [0.5, 0.1, 0.6, 1.0];
    pub const POWERUP: [f32; 4] = [1.0, 0.85, 0.2, 1.0];
    pub const POWERUP_CORE: [f32; 4] = [1.0, 1.0, 0.9, 1.0];
    pub const BOARD_EDGE: [f32; 4] = [0.0, 0.0, 0.0, 0.25];
    /// Start of the background cycle (#bfcc00)
    pub const BACKGROUND: [f32; 4] = [0.749, 0.8, 0.0, 1.0];
}
