//! Node-node collision detection and response
//!
//! Detection and resolution are two separate passes. Every overlapping pair is
//! collected against the post-wall state first, then the batch is resolved in
//! order against mutating state without re-detecting. A node in two pairs is
//! resolved against its second partner using the velocity left by the first.

use glam::Vec2;

use super::state::Node;

/// Unit normal used when two centers coincide exactly
pub const FALLBACK_NORMAL: Vec2 = Vec2::X;

/// An overlapping pair found by [`detect_collisions`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Lower node index
    pub i: usize,
    /// Higher node index
    pub j: usize,
    /// Center distance at detection time
    pub distance: f32,
    /// `position[i] - position[j]` at detection time
    pub delta: Vec2,
}

impl Contact {
    /// Unit normal pointing from `j` toward `i`
    pub fn normal(&self) -> Vec2 {
        if self.distance == 0.0 {
            return FALLBACK_NORMAL;
        }
        let angle = self.delta.y.atan2(self.delta.x);
        Vec2::new(angle.cos(), angle.sin())
    }

    /// How far the pair must separate to just touch
    #[inline]
    pub fn overlap(&self, radius: f32) -> f32 {
        2.0 * radius - self.distance
    }
}

/// Find every unordered pair closer than `2 * radius`.
///
/// Brute-force O(n²) scan in ascending `(i, j)` order.
pub fn detect_collisions(nodes: &[Node], radius: f32) -> Vec<Contact> {
    let min_distance = 2.0 * radius;
    let mut contacts = Vec::new();

    for (i, a) in nodes.iter().enumerate() {
        for (j, b) in nodes.iter().enumerate().skip(i + 1) {
            let delta = a.position - b.position;
            let distance = delta.length();
            if distance < min_distance {
                contacts.push(Contact {
                    i,
                    j,
                    distance,
                    delta,
                });
            }
        }
    }

    contacts
}

/// Borrow two distinct nodes mutably (`i < j`)
fn pair_mut(nodes: &mut [Node], i: usize, j: usize) -> (&mut Node, &mut Node) {
    debug_assert!(i < j);
    let (head, tail) = nodes.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

/// Separate and bounce one pair. Returns `true` if an impulse was applied.
///
/// Position correction always runs. The impulse is skipped when the pair is
/// already separating along the normal.
pub fn resolve_contact(nodes: &mut [Node], contact: &Contact, radius: f32, restitution: f32) -> bool {
    let normal = contact.normal();
    let correction = normal * (contact.overlap(radius) / 2.0);
    let (a, b) = pair_mut(nodes, contact.i, contact.j);

    a.position += correction;
    b.position -= correction;

    let relative = a.velocity - b.velocity;
    let vn = relative.dot(normal);
    if vn > 0.0 {
        return false;
    }

    // Equal masses split the impulse evenly
    let impulse = -(1.0 + restitution) * vn;
    let change = normal * (impulse / 2.0);
    a.velocity += change;
    b.velocity -= change;
    true
}

/// Resolve a detected batch in order.
///
/// Returns node indices in pair-membership order (`i` then `j` for each
/// pair). A node in several pairs appears once per pair.
pub fn resolve_collisions(
    nodes: &mut [Node],
    contacts: &[Contact],
    radius: f32,
    restitution: f32,
) -> Vec<usize> {
    let mut members = Vec::with_capacity(contacts.len() * 2);
    for contact in contacts {
        resolve_contact(nodes, contact, radius, restitution);
        members.push(contact.i);
        members.push(contact.j);
    }
    members
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-4;

    fn node(x: f32, y: f32, vx: f32, vy: f32) -> Node {
        Node::new(60, Vec2::new(x, y), Vec2::new(vx, vy))
    }

    #[test]
    fn test_detect_orders_pairs() {
        let nodes = vec![
            node(100.0, 100.0, 0.0, 0.0),
            node(300.0, 300.0, 0.0, 0.0),
            node(110.0, 100.0, 0.0, 0.0),
            node(105.0, 105.0, 0.0, 0.0),
        ];
        let contacts = detect_collisions(&nodes, 10.0);
        let pairs: Vec<_> = contacts.iter().map(|c| (c.i, c.j)).collect();
        assert_eq!(pairs, vec![(0, 2), (0, 3), (2, 3)]);
        assert!((contacts[0].distance - 10.0).abs() < EPS);
        assert_eq!(contacts[0].delta, Vec2::new(-10.0, 0.0));
    }

    #[test]
    fn test_touching_is_not_colliding() {
        let nodes = vec![node(100.0, 100.0, 0.0, 0.0), node(120.0, 100.0, 0.0, 0.0)];
        assert!(detect_collisions(&nodes, 10.0).is_empty());
    }

    #[test]
    fn test_head_on_elastic_swap() {
        let mut nodes = vec![node(95.0, 100.0, 2.0, 0.0), node(105.0, 100.0, -2.0, 0.0)];
        let energy_before: f32 = nodes.iter().map(Node::kinetic_energy).sum();

        let contacts = detect_collisions(&nodes, 10.0);
        assert_eq!(contacts.len(), 1);
        let members = resolve_collisions(&mut nodes, &contacts, 10.0, 1.0);
        assert_eq!(members, vec![0, 1]);

        assert!((nodes[0].velocity - Vec2::new(-2.0, 0.0)).length() < EPS);
        assert!((nodes[1].velocity - Vec2::new(2.0, 0.0)).length() < EPS);
        assert!((nodes[0].position.distance(nodes[1].position) - 20.0).abs() < EPS);

        let energy_after: f32 = nodes.iter().map(Node::kinetic_energy).sum();
        assert!((energy_before - energy_after).abs() < EPS);
    }

    #[test]
    fn test_inelastic_pair_moves_together() {
        let mut nodes = vec![node(95.0, 100.0, 2.0, 0.0), node(105.0, 100.0, -2.0, 0.0)];
        let contacts = detect_collisions(&nodes, 10.0);
        resolve_collisions(&mut nodes, &contacts, 10.0, 0.0);
        assert!(nodes[0].velocity.length() < EPS);
        assert!(nodes[1].velocity.length() < EPS);
    }

    #[test]
    fn test_separating_pair_keeps_velocity() {
        let mut nodes = vec![node(95.0, 100.0, -1.0, 0.5), node(105.0, 100.0, 1.0, 0.0)];
        let contacts = detect_collisions(&nodes, 10.0);
        let applied = resolve_contact(&mut nodes, &contacts[0], 10.0, 1.0);

        assert!(!applied);
        assert_eq!(nodes[0].velocity, Vec2::new(-1.0, 0.5));
        assert_eq!(nodes[1].velocity, Vec2::new(1.0, 0.0));
        // Still pushed apart
        assert!((nodes[0].position.distance(nodes[1].position) - 20.0).abs() < EPS);
    }

    #[test]
    fn test_coincident_nodes_use_fallback_normal() {
        let mut nodes = vec![node(50.0, 50.0, 0.0, 0.0), node(50.0, 50.0, 0.0, 0.0)];
        let contacts = detect_collisions(&nodes, 10.0);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].normal(), FALLBACK_NORMAL);

        resolve_collisions(&mut nodes, &contacts, 10.0, 1.0);
        for n in &nodes {
            assert!(n.position.is_finite());
            assert!(n.velocity.is_finite());
        }
        assert_eq!(nodes[0].position, Vec2::new(60.0, 50.0));
        assert_eq!(nodes[1].position, Vec2::new(40.0, 50.0));
    }

    #[test]
    fn test_pileup_resolves_sequentially() {
        // Middle node collides with both neighbours; the second pair sees
        // the velocity left by the first.
        let mut nodes = vec![
            node(85.0, 100.0, 1.0, 0.0),
            node(100.0, 100.0, 0.0, 0.0),
            node(115.0, 100.0, -1.0, 0.0),
        ];
        let contacts = detect_collisions(&nodes, 10.0);
        let pairs: Vec<_> = contacts.iter().map(|c| (c.i, c.j)).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 2)]);

        let members = resolve_collisions(&mut nodes, &contacts, 10.0, 1.0);
        assert_eq!(members, vec![0, 1, 1, 2]);

        // Pair (0,1) swaps: node 0 stops, node 1 moves right at 1.
        // Pair (1,2) then swaps 1 and -1.
        assert!((nodes[0].velocity - Vec2::ZERO).length() < EPS);
        assert!((nodes[1].velocity - Vec2::new(-1.0, 0.0)).length() < EPS);
        assert!((nodes[2].velocity - Vec2::new(1.0, 0.0)).length() < EPS);
    }

    proptest! {
        #[test]
        fn correction_restores_contact_distance(
            dx in -19.0f32..19.0,
            dy in -19.0f32..19.0,
            v in proptest::array::uniform4(-10.0f32..10.0),
            restitution in 0.0f32..=1.0,
        ) {
            prop_assume!(dx * dx + dy * dy < 19.0 * 19.0);
            prop_assume!(dx.abs() + dy.abs() > 1e-3);
            let mut nodes = vec![node(200.0 + dx, 200.0 + dy, v[0], v[1]), node(200.0, 200.0, v[2], v[3])];
            let contacts = detect_collisions(&nodes, 10.0);
            prop_assert_eq!(contacts.len(), 1);
            resolve_collisions(&mut nodes, &contacts, 10.0, restitution);
            let d = nodes[0].position.distance(nodes[1].position);
            prop_assert!((d - 20.0).abs() < 1e-3);
        }

        #[test]
        fn impulse_never_adds_energy(
            dx in -19.0f32..19.0,
            dy in -19.0f32..19.0,
            v in proptest::array::uniform4(-10.0f32..10.0),
            restitution in 0.0f32..=1.0,
        ) {
            prop_assume!(dx * dx + dy * dy < 19.0 * 19.0);
            prop_assume!(dx.abs() + dy.abs() > 1e-3);
            let mut nodes = vec![node(200.0 + dx, 200.0 + dy, v[0], v[1]), node(200.0, 200.0, v[2], v[3])];
            let before: f32 = nodes.iter().map(Node::kinetic_energy).sum();
            let contacts = detect_collisions(&nodes, 10.0);
            resolve_collisions(&mut nodes, &contacts, 10.0, restitution);
            let after: f32 = nodes.iter().map(Node::kinetic_energy).sum();
            prop_assert!(after <= before + 1e-3);
        }
    }
}
