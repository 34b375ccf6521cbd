//! Tick gating
//!
//! The host calls [`TickScheduler::admit`] once per display frame. The
//! scheduler decides whether that frame runs a simulation tick, so the
//! simulation rate does not follow the display refresh rate.

use serde::{Deserialize, Serialize};

use crate::consts::TICK_INTERVAL_MS;

/// Scheduler run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    /// No ticks are admitted
    #[default]
    Paused,
    /// Ticks are admitted at most once per interval
    Running,
}

#[derive(Debug, Clone)]
pub struct TickScheduler {
    state: RunState,
    /// Minimum time between admitted ticks (ms)
    interval_ms: f64,
    /// Host timestamp of the last admitted tick (ms)
    last_tick_ms: f64,
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(TICK_INTERVAL_MS)
    }
}

impl TickScheduler {
    /// New scheduler, paused
    pub fn new(interval_ms: f64) -> Self {
        Self {
            state: RunState::Paused,
            interval_ms: interval_ms.max(0.0),
            last_tick_ms: 0.0,
        }
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    #[inline]
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.state = if paused {
            RunState::Paused
        } else {
            RunState::Running
        };
    }

    /// Flip between paused and running, returning the new state
    pub fn toggle(&mut self) -> RunState {
        self.set_paused(!self.is_paused());
        self.state
    }

    /// Restart interval measurement from `now_ms`
    pub fn rearm(&mut self, now_ms: f64) {
        self.last_tick_ms = now_ms;
    }

    /// Frame hook. Returns `true` if a tick should run for this frame.
    pub fn admit(&mut self, now_ms: f64) -> bool {
        if self.is_paused() {
            return false;
        }
        if now_ms - self.last_tick_ms < self.interval_ms {
            return false;
        }
        self.last_tick_ms = now_ms;
        true
    }
}
