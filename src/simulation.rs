//! Simulation instance
//!
//! Owns the node store, the settings and the tick scheduler. Hosts talk to
//! the simulation only through this type: the frame hook drives ticks and
//! fans events out to the audio and render collaborators, the setters form
//! the configuration surface.

use glam::Vec2;

use crate::audio::{NoteSink, note_name};
use crate::error::Result;
use crate::render::{Frame, Renderer};
use crate::settings::PhysicsSettings;
use crate::sim::{Node, NodeStore, RunState, TickEvents, TickScheduler, tick};

#[derive(Debug, Clone)]
pub struct Simulation {
    store: NodeStore,
    scheduler: TickScheduler,
    /// Ticks run since creation
    pub tick_count: u64,
}

impl Simulation {
    /// New paused simulation. Fails if `settings` is invalid.
    pub fn new(settings: PhysicsSettings, seed: u64) -> Result<Self> {
        Ok(Self {
            store: NodeStore::new(settings, seed)?,
            scheduler: TickScheduler::default(),
            tick_count: 0,
        })
    }

    /// Use a custom tick interval instead of the default
    pub fn with_interval(mut self, interval_ms: f64) -> Self {
        self.scheduler = TickScheduler::new(interval_ms);
        self
    }

    // === Nodes ===

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.store.nodes
    }

    #[inline]
    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    /// Add a node at a random position inside the arena
    pub fn add_node(&mut self, note: i32, velocity: Vec2, color: Option<String>) -> usize {
        let idx = self.store.add_node(note, velocity, color);
        log::info!("Added node {} ({}) at {:?}", idx, note_name(note, true), self.store.nodes[idx].position);
        idx
    }

    /// Add a node with random heading and color
    pub fn add_random_node(&mut self, note: i32, speed: f32) -> usize {
        let idx = self.store.add_random_node(note, speed);
        log::info!("Added node {} ({}) at {:?}", idx, note_name(note, true), self.store.nodes[idx].position);
        idx
    }

    /// Insert a node exactly as given
    pub fn insert_node(&mut self, node: Node) -> usize {
        self.store.push(node)
    }

    pub fn clear_nodes(&mut self) {
        log::info!("Cleared {} nodes", self.store.len());
        self.store.clear();
    }

    pub fn shift_notes(&mut self, steps: i32) {
        self.store.shift_notes(steps);
    }

    // === Configuration surface ===

    #[inline]
    pub fn settings(&self) -> &PhysicsSettings {
        self.store.settings()
    }

    pub fn set_settings(&mut self, settings: PhysicsSettings) -> Result<()> {
        self.store.set_settings(settings)
    }

    pub fn radius(&self) -> f32 {
        self.settings().radius
    }

    pub fn set_radius(&mut self, radius: f32) -> Result<()> {
        self.store.settings_mut().set_radius(radius)
    }

    pub fn friction_coefficient(&self) -> f32 {
        self.settings().friction_coefficient
    }

    pub fn set_friction_coefficient(&mut self, friction: f32) -> Result<()> {
        self.store.settings_mut().set_friction_coefficient(friction)
    }

    pub fn wall_restitution(&self) -> f32 {
        self.settings().wall_restitution
    }

    pub fn set_wall_restitution(&mut self, restitution: f32) -> Result<()> {
        self.store.settings_mut().set_wall_restitution(restitution)
    }

    pub fn node_restitution(&self) -> f32 {
        self.settings().node_restitution
    }

    pub fn set_node_restitution(&mut self, restitution: f32) -> Result<()> {
        self.store.settings_mut().set_node_restitution(restitution)
    }

    pub fn set_background_color(&mut self, color: impl Into<String>) {
        self.store.settings_mut().set_background_color(color);
    }

    pub fn width(&self) -> f32 {
        self.settings().width
    }

    pub fn height(&self) -> f32 {
        self.settings().height
    }

    /// Change the arena size and redraw. Nodes left outside are clamped by
    /// the next wall pass, not here.
    pub fn resize(&mut self, width: f32, height: f32, renderer: &mut dyn Renderer) -> Result<()> {
        self.store.settings_mut().set_arena(width, height)?;
        log::info!("Arena resized to {}x{}", width, height);
        renderer.draw(&self.frame());
        Ok(())
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.scheduler.is_paused()
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.scheduler.set_paused(paused);
    }

    pub fn toggle_pause(&mut self) -> RunState {
        let state = self.scheduler.toggle();
        log::info!("Simulation {:?}", state);
        state
    }

    /// Clear nodes, restore lossless dynamics, pause, and restart interval
    /// measurement from `now_ms`
    pub fn reset(&mut self, now_ms: f64) {
        self.store.clear();
        self.store.settings_mut().reset_dynamics();
        self.scheduler.set_paused(true);
        self.scheduler.rearm(now_ms);
        log::info!("Simulation reset");
    }

    // === Frame loop ===

    /// Read-only snapshot for the renderer
    pub fn frame(&self) -> Frame<'_> {
        let settings = self.store.settings();
        Frame {
            nodes: &self.store.nodes,
            radius: settings.radius,
            width: settings.width,
            height: settings.height,
            background: &settings.background_color,
        }
    }

    /// Per-frame hook. Runs at most one tick, then plays every hit and
    /// redraws. Returns `None` when the scheduler did not admit a tick.
    pub fn on_frame(
        &mut self,
        now_ms: f64,
        audio: &mut dyn NoteSink,
        renderer: &mut dyn Renderer,
    ) -> Option<TickEvents> {
        if !self.scheduler.admit(now_ms) {
            return None;
        }
        let events = self.step(audio);
        renderer.draw(&self.frame());
        Some(events)
    }

    /// Run one tick immediately, ignoring the scheduler, and play its hits
    pub fn step(&mut self, audio: &mut dyn NoteSink) -> TickEvents {
        let events = tick(&mut self.store);
        self.tick_count += 1;
        for idx in events.triggers() {
            audio.play(self.store.nodes[idx].note);
        }
        events
    }
}
