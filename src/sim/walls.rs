//! Wall collision against the rectangular arena
//!
//! Each axis is clamped and reflected independently. A corner hit corrects
//! both axes but reports the node once.

use super::state::Node;
use crate::settings::PhysicsSettings;

/// Clamp nodes back inside the arena and reflect their velocity outward.
///
/// Returns the indices of nodes that touched any wall, ascending, one entry
/// per node.
pub fn resolve_walls(nodes: &mut [Node], settings: &PhysicsSettings) -> Vec<usize> {
    let r = settings.radius;
    let restitution = settings.wall_restitution;
    let mut hits = Vec::new();

    for (idx, node) in nodes.iter_mut().enumerate() {
        let pos = &mut node.position;
        let vel = &mut node.velocity;
        let mut hit = false;

        if pos.x - r < 0.0 {
            pos.x = r;
            vel.x = vel.x.abs() * restitution;
            hit = true;
        } else if pos.x + r > settings.width {
            pos.x = settings.width - r;
            vel.x = -vel.x.abs() * restitution;
            hit = true;
        }

        if pos.y - r < 0.0 {
            pos.y = r;
            vel.y = vel.y.abs() * restitution;
            hit = true;
        } else if pos.y + r > settings.height {
            pos.y = settings.height - r;
            vel.y = -vel.y.abs() * restitution;
            hit = true;
        }

        if hit {
            hits.push(idx);
        }
    }

    hits
}
