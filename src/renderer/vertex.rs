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

    /// Size in bytes of one vertex in a GPU buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Raw bytes for uploading a vertex list
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Scale a color's alpha
pub fn faded(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}

/// Colors for game elements
pub mod colors {
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const SHIP: [f32; 4] = WHITE;
    pub const ASTEROID: [f32; 4] = WHITE;
    pub const UFO: [f32; 4] = WHITE;
    pub const PLAYER_SHOT: [f32; 4] = WHITE;
    pub const UFO_SHOT: [f32; 4] = [1.0, 0.3, 0.3, 1.0];
    pub const SHIELD: [f32; 4] = [0.0, 0.4, 1.0, 1.0];
    pub const FLAME_OUTER: [f32; 4] = [1.0, 0.65, 0.0, 1.0];
    pub const FLAME_INNER: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const POWERUP_SHIELD: [f32; 4] = SHIELD;
    pub const POWERUP_RAPID_FIRE: [f32; 4] = FLAME_INNER;
    pub const POWERUP_SPREAD_SHOT: [f32; 4] = FLAME_OUTER;
    pub const POWERUP_EXTRA_LIFE: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const DEBRIS: [f32; 4] = WHITE;
    pub const EXHAUST: [f32; 4] = FLAME_OUTER;
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}
