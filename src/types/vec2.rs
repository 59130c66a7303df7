use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A 2D vector type with a fixed memory layout, usable both as a field of
/// the flat simulation buffer and in serialized form
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec2Data {
    pub x: f32,
    pub y: f32,
}

impl From<Vec2> for Vec2Data {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Vec2Data> for Vec2 {
    fn from(v: Vec2Data) -> Self {
        Vec2::new(v.x, v.y)
    }
}

impl From<[f32; 2]> for Vec2Data {
    fn from(arr: [f32; 2]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
        }
    }
}

impl From<Vec2Data> for [f32; 2] {
    fn from(v: Vec2Data) -> Self {
        [v.x, v.y]
    }
}

impl Vec2Data {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn as_array(&self) -> [f32; 2] {
        [self.x, self.y]
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}
