use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

/// Caller-supplied relationship between two node identities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSpec {
    pub source_id: String,
    pub target_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<f32>,
}

/// Spring strength assumed when the caller supplies none.
pub const DEFAULT_STRENGTH: f32 = 1.0;

/// Resolved edge referencing node store slots, never string identities.
/// Both slots are valid indices into the node store by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub source: u32,
    pub target: u32,
    pub strength: f32,
}

impl Link {
    pub fn new(source: u32, target: u32, strength: f32) -> Self {
        Self {
            source,
            target,
            strength,
        }
    }
}

/// Resolve raw links against the identity map, once, at load time.
///
/// Links with an endpoint missing from the map are dropped rather than
/// stored unresolved; partial graphs are an expected input shape, not an
/// error.
pub fn resolve_links(specs: &[LinkSpec], index: &HashMap<String, u32>) -> Vec<Link> {
    let mut links = Vec::with_capacity(specs.len());
    for spec in specs {
        match (index.get(&spec.source_id), index.get(&spec.target_id)) {
            (Some(&source), Some(&target)) => {
                links.push(Link::new(
                    source,
                    target,
                    spec.strength.unwrap_or(DEFAULT_STRENGTH),
                ));
            }
            _ => {
                debug!(
                    "Dropping link with unresolved endpoint: {} -> {}",
                    spec.source_id, spec.target_id
                );
            }
        }
    }
    links
}
