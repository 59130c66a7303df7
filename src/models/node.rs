use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::types::vec2::Vec2Data;

/// Node categories understood by the layout engine.
///
/// The category decides the display radius: structurally significant nodes
/// (the root entity of a chart) render larger than leaf evidence items.
/// Radius is a rendering and collision hint, not a physical mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Root,
    Organization,
    Party,
    Evidence,
}

impl NodeKind {
    /// Display radius in layout units.
    pub fn radius(self) -> f32 {
        match self {
            NodeKind::Root => 26.0,
            NodeKind::Organization => 18.0,
            NodeKind::Party => 14.0,
            NodeKind::Evidence => 10.0,
        }
    }

    /// Numeric tag stored in the slot buffer.
    pub fn tag(self) -> f32 {
        match self {
            NodeKind::Root => 0.0,
            NodeKind::Organization => 1.0,
            NodeKind::Party => 2.0,
            NodeKind::Evidence => 3.0,
        }
    }

    /// Inverse of [`NodeKind::tag`]. Unknown tags read as `Evidence`.
    pub fn from_tag(tag: f32) -> Self {
        match tag as i32 {
            0 => NodeKind::Root,
            1 => NodeKind::Organization,
            2 => NodeKind::Party,
            _ => NodeKind::Evidence,
        }
    }
}

/// Caller-supplied node description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSpec {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

/// Immutable per-slot metadata republished to the rendering collaborator.
/// Index-aligned with the position buffer for the lifetime of the instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMeta {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

/// Number of f32 fields per node slot in the flat buffer.
pub const STRIDE: usize = 6;

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable, Serialize, Deserialize)]
/// One mutable simulation slot in the flat buffer.
///
/// Buffer layout (6 floats per node, [`STRIDE`]):
/// - position: Vec2Data (2 floats)
/// - velocity: Vec2Data (2 floats)
/// - radius: f32
/// - kind tag: f32 (see [`NodeKind::tag`])
///
/// Slot `i`'s fields live at offset `i * STRIDE` in the buffer; the typed
/// view is obtained with `bytemuck::cast_slice` so no per-field indexing
/// arithmetic appears anywhere else.
pub struct NodeSlot {
    pub position: Vec2Data,
    pub velocity: Vec2Data,
    pub radius: f32,
    pub kind_tag: f32,
}

impl NodeSlot {
    pub fn kind(&self) -> NodeKind {
        NodeKind::from_tag(self.kind_tag)
    }
}
