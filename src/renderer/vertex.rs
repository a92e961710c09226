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

/// Textured 2D vertex with position, texture coordinate and opacity
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TexVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub alpha: f32,
}

impl TexVertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32, alpha: f32) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
            alpha,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TexVertex>() as wgpu::BufferAddress,
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
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

/// Colors for scene elements
pub mod colors {
    pub const CLEAR: [f32; 4] = [0.4, 0.7, 0.9, 1.0];
    pub const SKY: [f32; 4] = [0.5, 0.75, 0.95, 1.0];
    pub const CLOUD: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const GRASS: [f32; 4] = [0.4, 0.7, 0.3, 1.0];
    pub const GRASS_FRONT: [f32; 4] = [0.3, 0.6, 0.2, 1.0];

    pub const SUPPORT: [f32; 4] = [0.5, 0.5, 0.55, 1.0];
    pub const BRACE: [f32; 4] = [0.45, 0.45, 0.5, 1.0];
    pub const RAIL_UPPER: [f32; 4] = [0.8, 0.15, 0.1, 1.0];
    pub const RAIL_LOWER: [f32; 4] = [0.6, 0.1, 0.08, 1.0];
    pub const TIE: [f32; 4] = [0.3, 0.3, 0.35, 1.0];

    pub const SEAT_EMPTY: [f32; 4] = [0.3, 0.3, 0.3, 1.0];
    pub const SEAT_UNBELTED: [f32; 4] = [1.0, 0.3, 0.3, 1.0];
    pub const SEAT_BELTED: [f32; 4] = [0.2, 0.6, 1.0, 1.0];
    pub const SEAT_SICK: [f32; 4] = [0.0, 0.8, 0.0, 1.0];

    pub const PHASE_LOADING: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const PHASE_RUNNING: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const PHASE_STOPPED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const PHASE_RETURNING: [f32; 4] = [1.0, 0.5, 0.0, 1.0];
    pub const PHASE_UNLOADING: [f32; 4] = [0.5, 0.5, 1.0, 1.0];

    pub const HUD_PANEL: [f32; 4] = [0.0, 0.0, 0.0, 0.35];
    pub const SPEED_FILL: [f32; 4] = [0.2, 0.8, 0.2, 1.0];
    pub const SPEED_TRACK: [f32; 4] = [0.3, 0.3, 0.3, 0.3];
    pub const GRADE_DOWN: [f32; 4] = [0.2, 0.9, 0.3, 1.0];
    pub const GRADE_UP: [f32; 4] = [1.0, 0.75, 0.1, 1.0];
    pub const GRADE_LEVEL: [f32; 4] = [0.6, 0.6, 0.6, 1.0];

    /// Same color with alpha scaled
    pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
        [color[0], color[1], color[2], color[3] * alpha]
    }
}
