//! One simulation tick
//!
//! Runs integrate → wall → detect → resolve over the store. A tick either
//! runs all four phases or is not started.

use super::collision::{detect_collisions, resolve_collisions};
use super::integrate::integrate;
use super::state::NodeStore;
use super::walls::resolve_walls;

/// Everything a tick reports to the audio and render collaborators
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// Nodes that touched a wall, ascending, once per node
    pub wall_hits: Vec<usize>,
    /// Pair memberships in resolution order, `i` then `j` per pair
    pub node_hits: Vec<usize>,
    /// Number of colliding pairs detected
    pub contacts: usize,
}

impl TickEvents {
    pub fn is_empty(&self) -> bool {
        self.wall_hits.is_empty() && self.node_hits.is_empty()
    }

    /// Trigger order for the tick: wall hits, then pair memberships
    pub fn triggers(&self) -> impl Iterator<Item = usize> + '_ {
        self.wall_hits.iter().chain(self.node_hits.iter()).copied()
    }

    /// Nodes that took part in at least one node-node collision, ascending
    pub fn collided_nodes(&self) -> Vec<usize> {
        let mut nodes = self.node_hits.clone();
        nodes.sort_unstable();
        nodes.dedup();
        nodes
    }
}

/// Advance the store by one tick
pub fn tick(store: &mut NodeStore) -> TickEvents {
    let NodeStore {
        nodes, settings, ..
    } = store;

    integrate(nodes, settings.friction_coefficient);

    let wall_hits = resolve_walls(nodes, settings);

    let contacts = detect_collisions(nodes, settings.radius);
    let node_hits = resolve_collisions(nodes, &contacts, settings.radius, settings.node_restitution);

    if !contacts.is_empty() {
        log::debug!(
            "tick: {} wall hits, {} contacts",
            wall_hits.len(),
            contacts.len()
        );
    }

    TickEvents {
        wall_hits,
        node_hits,
        contacts: contacts.len(),
    }
}
