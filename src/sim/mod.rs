//! Deterministic simulation module
//!
//! All physics lives here. This module must stay pure and deterministic:
//! - Fixed logical timestep only
//! - Seeded RNG only, and only for node creation
//! - Stable iteration order (by node index)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod integrate;
pub mod scheduler;
pub mod state;
pub mod tick;
pub mod walls;

pub use collision::{Contact, FALLBACK_NORMAL, detect_collisions, resolve_collisions, resolve_contact};
pub use integrate::integrate;
pub use scheduler::{RunState, TickScheduler};
pub use state::{Node, NodeStore, random_color, random_velocity};
pub use tick::{TickEvents, tick};
pub use walls::resolve_walls;
