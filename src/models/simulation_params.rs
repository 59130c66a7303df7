use serde::{Deserialize, Serialize};

/// Tunable force, integration and cooling parameters.
///
/// One instance is fixed at layout construction and copied to the compute
/// context; there is no per-frame renegotiation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationParams {
    // Force parameters
    pub repulsion: f32,              // Range: 1-2000, Default: 600
    pub max_repulsion_distance: f32, // Cutoff; also the grid cell size. Range: 50-500, Default: 150
    pub neighbor_range: i32,         // Grid cells searched on each side. Default: 1 (the 3x3 neighborhood)
    pub spring_strength: f32,        // Range: 0.01-1, Default: 0.06
    pub rest_length: f32,            // Natural link length. Default: 90
    pub center_gravity: f32,         // Range: 0-0.2, Default: 0.02

    // Damping
    pub damping: f32,          // Velocity kept per frame. Range: 0-1, Default: 0.85
    pub boundary_damping: f32, // Velocity kept after a wall bounce. Range: 0-1, Default: 0.5

    // Cooling
    pub alpha_decay: f32,  // Multiplicative decay per frame. Default: 0.02
    pub alpha_min: f32,    // Stability floor. Default: 0.001
    pub reheat_alpha: f32, // Alpha restored by reheat; gentler than the 1.0 initial. Default: 0.3
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            repulsion: 600.0,
            max_repulsion_distance: 150.0,
            neighbor_range: 1,
            spring_strength: 0.06,
            rest_length: 90.0,
            center_gravity: 0.02,
            damping: 0.85,
            boundary_damping: 0.5,
            alpha_decay: 0.02,
            alpha_min: 0.001,
            reheat_alpha: 0.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let params = SimulationParams::default();
        assert!(params.damping > 0.0 && params.damping < 1.0);
        assert!(params.alpha_decay > 0.0 && params.alpha_decay < 1.0);
        assert!(params.alpha_min > 0.0 && params.alpha_min < params.reheat_alpha);
        assert!(params.reheat_alpha < 1.0);
        assert!(params.neighbor_range >= 1);
    }
}
