pub mod cooling;
pub mod forces;
pub mod frame;
pub mod integrator;
pub mod spatial_grid;

pub use cooling::{CoolingPhase, CoolingSchedule};
pub use frame::FrameState;
pub use spatial_grid::SpatialGrid;
