pub mod layout_service;

pub use layout_service::{LayoutError, LayoutService};
