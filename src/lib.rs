// Declare modules
pub mod compute;
pub mod models;
pub mod services;
pub mod sim;
pub mod types;
pub mod utils;

// Re-export standard logging if needed
pub use log::{debug, error, info, warn};

// Public re-exports
pub use compute::{ComputeHost, ComputeMode};
pub use models::link::{Link, LinkSpec};
pub use models::node::{NodeKind, NodeMeta, NodeSlot, NodeSpec, STRIDE};
pub use models::node_store::NodeStore;
pub use models::simulation_params::SimulationParams;
pub use services::layout_service::{LayoutError, LayoutService};
pub use sim::cooling::{CoolingPhase, CoolingSchedule};
pub use sim::frame::FrameState;
pub use sim::spatial_grid::SpatialGrid;
pub use types::vec2::Vec2Data;
pub use types::viewport::Viewport;
