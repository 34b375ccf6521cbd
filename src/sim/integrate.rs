//! Position integration and friction
//!
//! Velocity is a per-tick displacement, so integration uses a fixed logical
//! step of one tick rather than elapsed wall-clock time.

use super::state::Node;
use crate::consts::DELTA_TIME;

/// Advance every node by its velocity, then apply friction.
///
/// Positions may leave the arena here; the wall pass corrects them.
pub fn integrate(nodes: &mut [Node], friction_coefficient: f32) {
    for node in nodes.iter_mut() {
        node.position += node.velocity * DELTA_TIME;

        if friction_coefficient < 1.0 {
            node.velocity *= friction_coefficient;
        }
    }
}
