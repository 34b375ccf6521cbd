//! Note Bounce - circular note nodes bouncing around a rectangular arena
//!
//! Every wall bounce and node collision triggers the node's note.
//!
//! Core modules:
//! - `sim`: Deterministic physics (integration, wall and pairwise collisions, tick gating)
//! - `simulation`: The owning instance that hosts drive once per display frame
//! - `settings`: Validated configuration surface
//! - `audio` / `render`: Contracts for the sound and drawing collaborators

pub mod audio;
pub mod error;
pub mod render;
pub mod settings;
pub mod sim;
pub mod simulation;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use audio::{NoteSink, note_name};
pub use error::{ConfigError, Result};
pub use render::{Frame, Renderer};
pub use settings::PhysicsSettings;
pub use simulation::Simulation;

/// Simulation configuration constants
pub mod consts {
    /// Logical timestep; velocity is displacement per tick
    pub const DELTA_TIME: f32 = 1.0;
    /// Minimum host time between ticks (ms)
    pub const TICK_INTERVAL_MS: f64 = 10.0;

    /// Arena defaults
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Node defaults
    pub const DEFAULT_RADIUS: f32 = 10.0;
    /// Smallest radius `PhysicsSettings::clamped` produces
    pub const MIN_RADIUS: f32 = 0.5;
    /// Smallest friction coefficient `PhysicsSettings::clamped` produces
    pub const MIN_FRICTION: f32 = 0.01;

    /// Colors
    pub const DEFAULT_COLOR: &str = "black";
    pub const DEFAULT_BACKGROUND: &str = "white";
}
