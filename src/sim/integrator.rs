use crate::models::node::NodeSlot;
use crate::models::simulation_params::SimulationParams;
use crate::types::viewport::Viewport;

/// Damped semi-implicit Euler step with an inelastic viewport bounce.
///
/// Every node ends the tick fully inside the viewport accounting for its
/// radius; the velocity component normal to a wall is inverted and
/// attenuated on contact. Viewports smaller than a node diameter clamp to
/// the lower bound.
pub fn integrate(slots: &mut [NodeSlot], viewport: Viewport, params: &SimulationParams) {
    for slot in slots.iter_mut() {
        slot.velocity.x *= params.damping;
        slot.velocity.y *= params.damping;
        slot.position.x += slot.velocity.x;
        slot.position.y += slot.velocity.y;

        let r = slot.radius;
        let max_x = (viewport.width - r).max(r);
        let max_y = (viewport.height - r).max(r);

        if slot.position.x < r {
            slot.position.x = r;
            slot.velocity.x = -slot.velocity.x * params.boundary_damping;
        } else if slot.position.x > max_x {
            slot.position.x = max_x;
            slot.velocity.x = -slot.velocity.x * params.boundary_damping;
        }
        if slot.position.y < r {
            slot.position.y = r;
            slot.velocity.y = -slot.velocity.y * params.boundary_damping;
        } else if slot.position.y > max_y {
            slot.position.y = max_y;
            slot.velocity.y = -slot.velocity.y * params.boundary_damping;
        }
    }
}
