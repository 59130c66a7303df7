//! Pairwise force computation.
//!
//! Three additive contributions, each scaled by the current alpha:
//! grid-bounded inverse-square repulsion, Hookean spring attraction along
//! links, and a weak pull toward the viewport center. Forces accumulate
//! directly into slot velocities; no separate force buffer is allocated.

use crate::models::link::Link;
use crate::models::node::NodeSlot;
use crate::models::simulation_params::SimulationParams;
use crate::sim::spatial_grid::SpatialGrid;
use crate::types::viewport::Viewport;

/// Floor for squared pair distance. Coincident nodes repel as if this far
/// apart instead of dividing by zero; nothing here can produce NaN.
pub const MIN_DISTANCE_SQ: f32 = 0.01;

/// Inverse-square repulsion between grid-near pairs.
///
/// Each unordered pair is visited once and receives equal and opposite
/// impulses. Pairs beyond `max_repulsion_distance` are skipped, matching
/// the locality guarantee of the grid neighborhood.
pub fn apply_repulsion(
    slots: &mut [NodeSlot],
    grid: &SpatialGrid,
    params: &SimulationParams,
    alpha: f32,
) {
    let cutoff_sq = params.max_repulsion_distance * params.max_repulsion_distance;
    for i in 0..slots.len() {
        let pos_i = slots[i].position.as_vec2();
        let (cx, cy) = grid.cell_of(pos_i.x, pos_i.y);
        for dy in -params.neighbor_range..=params.neighbor_range {
            for dx in -params.neighbor_range..=params.neighbor_range {
                let Some(bucket) = grid.bucket(cx + dx, cy + dy) else {
                    continue;
                };
                for &j in bucket {
                    let j = j as usize;
                    // each unordered pair handled exactly once
                    if j <= i {
                        continue;
                    }
                    let delta = slots[j].position.as_vec2() - pos_i;
                    let dist_sq = delta.length_squared().max(MIN_DISTANCE_SQ);
                    if dist_sq > cutoff_sq {
                        continue;
                    }
                    let dist = dist_sq.sqrt();
                    let force = params.repulsion * alpha / dist_sq;
                    let fx = delta.x / dist * force;
                    let fy = delta.y / dist * force;

                    slots[i].velocity.x -= fx;
                    slots[i].velocity.y -= fy;
                    slots[j].velocity.x += fx;
                    slots[j].velocity.y += fy;
                }
            }
        }
    }
}

/// Hookean attraction along links toward the rest length, scaled by each
/// link's strength. Equal and opposite on the two endpoints.
pub fn apply_springs(
    slots: &mut [NodeSlot],
    links: &[Link],
    params: &SimulationParams,
    alpha: f32,
) {
    for link in links {
        let (si, ti) = (link.source as usize, link.target as usize);
        let delta = slots[ti].position.as_vec2() - slots[si].position.as_vec2();
        let dist = delta.length_squared().max(MIN_DISTANCE_SQ).sqrt();
        let force = params.spring_strength * (dist - params.rest_length) * link.strength * alpha;
        let fx = delta.x / dist * force;
        let fy = delta.y / dist * force;

        slots[si].velocity.x += fx;
        slots[si].velocity.y += fy;
        slots[ti].velocity.x -= fx;
        slots[ti].velocity.y -= fy;
    }
}

/// Weak pull toward the viewport center. Keeps disconnected components on
/// screen when repulsion dominates.
pub fn apply_center_gravity(
    slots: &mut [NodeSlot],
    viewport: Viewport,
    params: &SimulationParams,
    alpha: f32,
) {
    let center = viewport.center();
    for slot in slots.iter_mut() {
        slot.velocity.x += (center.x - slot.position.x) * params.center_gravity * alpha;
        slot.velocity.y += (center.y - slot.position.y) * params.center_gravity * alpha;
    }
}
