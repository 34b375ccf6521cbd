//! Node store and core simulation types
//!
//! Owns the node list and the physics settings for one simulation instance.
//! Node creation is the only place randomness enters the simulation.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::settings::PhysicsSettings;

/// A circular particle carrying an opaque note number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Passed through to the audio collaborator on collision
    pub note: i32,
    /// Center of the node
    pub position: Vec2,
    /// Displacement per tick (`x` = dX, `y` = dY)
    pub velocity: Vec2,
    /// Presentation only, never read by the physics
    #[serde(default)]
    pub color: Option<String>,
}

impl Node {
    pub fn new(note: i32, position: Vec2, velocity: Vec2) -> Self {
        Self {
            note,
            position,
            velocity,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Kinetic energy with unit mass
    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.velocity.length_squared()
    }
}

/// Vector of magnitude `speed` pointing at a uniformly random angle
pub fn random_velocity<R: Rng>(rng: &mut R, speed: f32) -> Vec2 {
    let angle = rng.random::<f32>() * std::f32::consts::TAU;
    Vec2::from_angle(angle) * speed
}

/// Random `#RRGGBB` color
pub fn random_color<R: Rng>(rng: &mut R) -> String {
    format!("#{:06X}", rng.random_range(0..0x0100_0000u32))
}

/// The node list plus the settings every phase of a tick reads
#[derive(Debug, Clone)]
pub struct NodeStore {
    /// Simulated nodes; index is identity for the duration of a tick
    pub nodes: Vec<Node>,
    pub(crate) settings: PhysicsSettings,
    /// Seed the placement RNG was created from
    pub seed: u64,
    rng: Pcg32,
}

impl NodeStore {
    /// Create an empty store. Fails if `settings` is invalid.
    pub fn new(settings: PhysicsSettings, seed: u64) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            nodes: Vec::new(),
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    #[inline]
    pub fn settings(&self) -> &PhysicsSettings {
        &self.settings
    }

    /// Replace all settings at once (validated as a whole)
    pub fn set_settings(&mut self, settings: PhysicsSettings) -> Result<()> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub(crate) fn settings_mut(&mut self) -> &mut PhysicsSettings {
        &mut self.settings
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Random center that keeps a node of the current radius inside the arena
    pub fn random_position(&mut self) -> Vec2 {
        let r = self.settings.radius;
        let x = self.rng.random::<f32>() * (self.settings.width - 2.0 * r) + r;
        let y = self.rng.random::<f32>() * (self.settings.height - 2.0 * r) + r;
        Vec2::new(x, y)
    }

    /// Add a node at a random valid position, returning its index
    pub fn add_node(&mut self, note: i32, velocity: Vec2, color: Option<String>) -> usize {
        let position = self.random_position();
        self.nodes.push(Node {
            note,
            position,
            velocity,
            color,
        });
        self.nodes.len() - 1
    }

    /// Add a node with a random heading at `speed` and a random color
    pub fn add_random_node(&mut self, note: i32, speed: f32) -> usize {
        let velocity = random_velocity(&mut self.rng, speed);
        let color = random_color(&mut self.rng);
        self.add_node(note, velocity, Some(color))
    }

    /// Insert a fully specified node, bypassing random placement
    pub fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Transpose every node by `steps` semitones
    pub fn shift_notes(&mut self, steps: i32) {
        for node in &mut self.nodes {
            node.note = node.note.saturating_add(steps);
        }
    }

    /// Total kinetic energy of all nodes (unit mass)
    pub fn kinetic_energy(&self) -> f32 {
        self.nodes.iter().map(Node::kinetic_energy).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(seed: u64) -> NodeStore {
        NodeStore::new(PhysicsSettings::default(), seed).unwrap()
    }

    #[test]
    fn test_add_node_inside_arena() {
        let mut store = store(7);
        for note in 0..200 {
            store.add_node(note, Vec2::ZERO, None);
        }
        let s = store.settings().clone();
        for node in &store.nodes {
            assert!(node.position.x >= s.radius && node.position.x <= s.width - s.radius);
            assert!(node.position.y >= s.radius && node.position.y <= s.height - s.radius);
        }
    }

    #[test]
    fn test_seeded_placement_is_reproducible() {
        let mut a = store(42);
        let mut b = store(42);
        for note in 60..70 {
            a.add_random_node(note, 3.0);
            b.add_random_node(note, 3.0);
        }
        assert_eq!(a.nodes, b.nodes);
    }

    #[test]
    fn test_random_velocity_has_requested_speed() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..50 {
            let v = random_velocity(&mut rng, 4.0);
            assert!((v.length() - 4.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_random_color_format() {
        let mut rng = Pcg32::seed_from_u64(3);
        let color = random_color(&mut rng);
        assert_eq!(color.len(), 7);
        assert!(color.starts_with('#'));
        assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn test_clear_and_shift() {
        let mut store = store(9);
        store.add_node(60, Vec2::new(1.0, 2.0), Some("red".into()));
        store.add_node(64, Vec2::ZERO, None);
        let before: Vec<_> = store.nodes.iter().map(|n| (n.position, n.velocity)).collect();

        store.shift_notes(-12);
        assert_eq!(store.nodes[0].note, 48);
        assert_eq!(store.nodes[1].note, 52);
        let after: Vec<_> = store.nodes.iter().map(|n| (n.position, n.velocity)).collect();
        assert_eq!(before, after);

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = PhysicsSettings {
            radius: 0.0,
            ..Default::default()
        };
        assert!(NodeStore::new(settings, 0).is_err());
    }
}
