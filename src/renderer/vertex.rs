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
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const OBSTACLE: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const ENTITY: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const HUD_TEXT: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    /// Jumps-left readout once the budget is nearly spent
    pub const HUD_WARNING: [f32; 4] = [1.0, 0.2, 0.2, 1.0];
    pub const GAME_OVER_SHADE: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
    pub const GAME_OVER_TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// Letterbox clear color outside the field
    pub const CLEAR: wgpu::Color = wgpu::Color {
        r: 0.02,
        g: 0.02,
        b: 0.05,
        a: 1.0,
    };
}
