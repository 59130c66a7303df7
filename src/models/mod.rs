pub mod link;
pub mod node;
pub mod node_store;
pub mod simulation_params;

pub use link::{Link, LinkSpec};
pub use node::{NodeKind, NodeMeta, NodeSlot, NodeSpec, STRIDE};
pub use node_store::NodeStore;
pub use simulation_params::SimulationParams;
