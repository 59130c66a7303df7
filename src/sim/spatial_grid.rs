use std::collections::HashMap;

use crate::models::node::NodeSlot;

/// Uniform grid over the plane, rebuilt from scratch every frame.
///
/// Nodes are bucketed by cell so repulsion only examines a small
/// neighborhood of cells; pairs further apart than roughly one cell width
/// are ignored by construction. That locality cut is intentional, not a
/// bug. Positions move every tick, so no incremental maintenance is
/// attempted; bucket vectors are cleared rather than dropped between
/// rebuilds so steady-state frames do not allocate.
pub struct SpatialGrid {
    cell_size: f32,
    cells: HashMap<i64, Vec<u32>>,
}

/// Collision-free packing of signed cell coordinates into one map key.
fn cell_key(cx: i32, cy: i32) -> i64 {
    ((cx as i64) << 32) | (cy as u32 as i64)
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        debug_assert!(cell_size > 0.0);
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell coordinates containing the given position.
    pub fn cell_of(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x / self.cell_size).floor() as i32,
            (y / self.cell_size).floor() as i32,
        )
    }

    /// Re-bucket every slot index by its current position.
    pub fn rebuild(&mut self, slots: &[NodeSlot]) {
        for bucket in self.cells.values_mut() {
            bucket.clear();
        }
        for (i, slot) in slots.iter().enumerate() {
            let (cx, cy) = self.cell_of(slot.position.x, slot.position.y);
            self.cells.entry(cell_key(cx, cy)).or_default().push(i as u32);
        }
    }

    /// Slot indices bucketed in the given cell, if any.
    pub fn bucket(&self, cx: i32, cy: i32) -> Option<&[u32]> {
        self.cells.get(&cell_key(cx, cy)).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::vec2::Vec2Data;

    fn slot_at(x: f32, y: f32) -> NodeSlot {
        NodeSlot {
            position: Vec2Data::new(x, y),
            velocity: Vec2Data::zero(),
            radius: 10.0,
            kind_tag: 3.0,
        }
    }

    #[test]
    fn test_key_packing_distinguishes_negative_cells() {
        assert_ne!(cell_key(-1, 0), cell_key(0, -1));
        assert_ne!(cell_key(-1, -1), cell_key(1, 1));
        assert_ne!(cell_key(0, 1), cell_key(1, 0));
        assert_eq!(cell_key(-3, 7), cell_key(-3, 7));
    }

    #[test]
    fn test_nodes_bucketed_by_cell() {
        let mut grid = SpatialGrid::new(100.0);
        let slots = vec![slot_at(10.0, 10.0), slot_at(90.0, 90.0), slot_at(150.0, 10.0)];
        grid.rebuild(&slots);

        let home = grid.bucket(0, 0).unwrap();
        assert_eq!(home, &[0, 1]);
        let east = grid.bucket(1, 0).unwrap();
        assert_eq!(east, &[2]);
        assert!(grid.bucket(5, 5).is_none());
    }

    #[test]
    fn test_negative_positions_land_in_negative_cells() {
        let mut grid = SpatialGrid::new(100.0);
        let slots = vec![slot_at(-10.0, -10.0)];
        grid.rebuild(&slots);

        assert_eq!(grid.cell_of(-10.0, -10.0), (-1, -1));
        assert_eq!(grid.bucket(-1, -1).unwrap(), &[0]);
    }

    #[test]
    fn test_rebuild_clears_previous_frame() {
        let mut grid = SpatialGrid::new(100.0);
        let mut slots = vec![slot_at(10.0, 10.0)];
        grid.rebuild(&slots);
        assert!(grid.bucket(0, 0).is_some());

        slots[0].position = Vec2Data::new(250.0, 10.0);
        grid.rebuild(&slots);
        assert!(grid.bucket(0, 0).map(|b| b.is_empty()).unwrap_or(true));
        assert_eq!(grid.bucket(2, 0).unwrap(), &[0]);
    }
}
