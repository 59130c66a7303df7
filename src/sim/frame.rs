use crate::models::link::Link;
use crate::models::node::{NodeSlot, STRIDE};
use crate::models::simulation_params::SimulationParams;
use crate::sim::cooling::CoolingSchedule;
use crate::sim::spatial_grid::SpatialGrid;
use crate::sim::{forces, integrator};
use crate::types::viewport::Viewport;

/// Everything that travels between the facade and the compute context:
/// the flat slot buffer and the cooling state.
///
/// Exactly one holder exists at any instant. Transfer is by move, so a
/// second usable reference cannot exist while a frame is in flight.
#[derive(Debug)]
pub struct FrameState {
    pub buffer: Vec<f32>,
    pub cooling: CoolingSchedule,
}

impl FrameState {
    pub fn new(buffer: Vec<f32>) -> Self {
        Self {
            buffer,
            cooling: CoolingSchedule::new(),
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
}

/// One simulation frame: rebuild the spatial index, accumulate forces,
/// integrate, decay alpha. Both execution strategies call exactly this
/// function, so their outputs cannot drift apart.
pub fn step(
    frame: &mut FrameState,
    links: &[Link],
    grid: &mut SpatialGrid,
    params: &SimulationParams,
    viewport: Viewport,
) {
    let alpha = frame.cooling.alpha();
    let slots: &mut [NodeSlot] = bytemuck::cast_slice_mut(&mut frame.buffer);

    grid.rebuild(slots);
    forces::apply_repulsion(slots, grid, params, alpha);
    forces::apply_springs(slots, links, params, alpha);
    forces::apply_center_gravity(slots, viewport, params, alpha);
    integrator::integrate(slots, viewport, params);

    frame.cooling.step(params);
}
