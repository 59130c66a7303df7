use std::collections::HashMap;

use log::info;
use rand::Rng;

use crate::models::node::{NodeMeta, NodeSlot, NodeSpec, STRIDE};
use crate::types::vec2::Vec2Data;
use crate::types::viewport::Viewport;

/// Contiguous fixed-stride simulation buffer plus the immutable lookup
/// tables built alongside it.
///
/// The buffer holds all mutable per-node simulation state; the metadata
/// list and identity map are built in the same pass and never mutated
/// afterward. A new graph means a new store; stores are never diffed.
pub struct NodeStore {
    buffer: Vec<f32>,
    meta: Vec<NodeMeta>,
    index: HashMap<String, u32>,
}

impl NodeStore {
    /// Allocate and populate the buffer for the given nodes.
    ///
    /// Positions are drawn from the middle half of the viewport so the
    /// starting configuration is neither degenerate (nodes stacked on one
    /// point) nor pressed against the bounds. Velocity starts at zero and
    /// radius comes from the node kind.
    pub fn build(specs: &[NodeSpec], viewport: Viewport) -> Self {
        let mut buffer = vec![0.0f32; specs.len() * STRIDE];
        let mut meta = Vec::with_capacity(specs.len());
        let mut index = HashMap::with_capacity(specs.len());
        let center = viewport.center();
        let mut rng = rand::thread_rng();

        {
            let slots: &mut [NodeSlot] = bytemuck::cast_slice_mut(&mut buffer);
            for (slot, spec) in slots.iter_mut().zip(specs) {
                slot.position = Vec2Data::new(
                    center.x + (rng.gen::<f32>() - 0.5) * viewport.width * 0.5,
                    center.y + (rng.gen::<f32>() - 0.5) * viewport.height * 0.5,
                );
                slot.velocity = Vec2Data::zero();
                slot.radius = spec.kind.radius();
                slot.kind_tag = spec.kind.tag();
            }
        }

        for (i, spec) in specs.iter().enumerate() {
            index.insert(spec.id.clone(), i as u32);
            meta.push(NodeMeta {
                id: spec.id.clone(),
                label: spec.label.clone(),
                kind: spec.kind,
            });
        }

        info!("Built node store with {} slots", specs.len());
        Self {
            buffer,
            meta,
            index,
        }
    }

    pub fn node_count(&self) -> usize {
        self.buffer.len() / STRIDE
    }

    pub fn slots(&self) -> &[NodeSlot] {
        bytemuck::cast_slice(&self.buffer)
    }

    pub fn slots_mut(&mut self) -> &mut [NodeSlot] {
        bytemuck::cast_slice_mut(&mut self.buffer)
    }

    /// Slot index for an external identity, if present.
    pub fn slot_of(&self, id: &str) -> Option<u32> {
        self.index.get(id).copied()
    }

    pub fn meta(&self) -> &[NodeMeta] {
        &self.meta
    }

    /// Decompose into the raw buffer and the immutable side tables.
    pub fn into_parts(self) -> (Vec<f32>, Vec<NodeMeta>, HashMap<String, u32>) {
        (self.buffer, self.meta, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::node::NodeKind;

    fn spec(id: &str, kind: NodeKind) -> NodeSpec {
        NodeSpec {
            id: id.to_string(),
            label: id.to_string(),
            kind,
        }
    }

    #[test]
    fn test_buffer_is_stride_sized() {
        let viewport = Viewport::new(800.0, 600.0);
        let store = NodeStore::build(
            &[spec("a", NodeKind::Root), spec("b", NodeKind::Evidence)],
            viewport,
        );
        assert_eq!(store.node_count(), 2);
        assert_eq!(store.buffer.len(), 2 * STRIDE);
    }

    #[test]
    fn test_initial_positions_biased_toward_center() {
        let viewport = Viewport::new(800.0, 600.0);
        let specs: Vec<NodeSpec> = (0..50)
            .map(|i| spec(&format!("n{}", i), NodeKind::Party))
            .collect();
        let store = NodeStore::build(&specs, viewport);

        for slot in store.slots() {
            assert!(slot.position.x >= 200.0 && slot.position.x <= 600.0);
            assert!(slot.position.y >= 150.0 && slot.position.y <= 450.0);
            assert_eq!(slot.velocity.x, 0.0);
            assert_eq!(slot.velocity.y, 0.0);
        }
    }

    #[test]
    fn test_radius_and_tag_follow_kind() {
        let viewport = Viewport::new(800.0, 600.0);
        let store = NodeStore::build(
            &[spec("root", NodeKind::Root), spec("doc", NodeKind::Evidence)],
            viewport,
        );
        let slots = store.slots();
        assert_eq!(slots[0].radius, NodeKind::Root.radius());
        assert_eq!(slots[0].kind(), NodeKind::Root);
        assert_eq!(slots[1].radius, NodeKind::Evidence.radius());
        assert_eq!(slots[1].kind(), NodeKind::Evidence);
    }

    #[test]
    fn test_identity_map() {
        let viewport = Viewport::new(800.0, 600.0);
        let store = NodeStore::build(
            &[spec("a", NodeKind::Root), spec("b", NodeKind::Party)],
            viewport,
        );
        assert_eq!(store.slot_of("a"), Some(0));
        assert_eq!(store.slot_of("b"), Some(1));
        assert_eq!(store.slot_of("zzz"), None);
    }
}
