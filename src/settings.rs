//! Physics settings and the configuration surface
//!
//! Every value is validated here, at the boundary. The per-tick code assumes
//! settings are already valid and never checks them again.

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, Result};

/// Shared simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Radius shared by every node
    pub radius: f32,
    /// Arena width
    pub width: f32,
    /// Arena height
    pub height: f32,
    /// Per-tick velocity multiplier, (0, 1]. 1.0 = no friction
    pub friction_coefficient: f32,
    /// Speed kept on a wall bounce, [0, 1]
    pub wall_restitution: f32,
    /// Closing speed turned into separating speed on a node bounce, [0, 1]
    pub node_restitution: f32,
    /// Arena fill color, forwarded to the renderer
    pub background_color: String,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            friction_coefficient: 1.0,
            wall_restitution: 1.0,
            node_restitution: 1.0,
            background_color: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

fn finite(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

fn unit_interval(which: &'static str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RestitutionOutOfRange { which, value })
    }
}

impl PhysicsSettings {
    /// Settings for an arena of the given size, everything else default
    pub fn with_arena(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Check every documented constraint
    pub fn validate(&self) -> Result<()> {
        finite("radius", self.radius)?;
        finite("width", self.width)?;
        finite("height", self.height)?;
        finite("friction_coefficient", self.friction_coefficient)?;
        finite("wall_restitution", self.wall_restitution)?;
        finite("node_restitution", self.node_restitution)?;

        if self.radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius(self.radius));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ConfigError::NonPositiveArena {
                width: self.width,
                height: self.height,
            });
        }
        if self.width < 2.0 * self.radius || self.height < 2.0 * self.radius {
            return Err(ConfigError::ArenaTooSmall {
                width: self.width,
                height: self.height,
                radius: self.radius,
            });
        }
        if !(self.friction_coefficient > 0.0 && self.friction_coefficient <= 1.0) {
            return Err(ConfigError::FrictionOutOfRange(self.friction_coefficient));
        }
        unit_interval("wall", self.wall_restitution)?;
        unit_interval("node", self.node_restitution)?;
        Ok(())
    }

    /// Nearest valid settings. Non-finite values fall back to defaults.
    ///
    /// The arena is fixed first; the radius then shrinks to fit it.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let pick = |value: f32, default: f32| if value.is_finite() { value } else { default };

        let min_side = 2.0 * MIN_RADIUS;
        let width = pick(self.width, defaults.width).max(min_side);
        let height = pick(self.height, defaults.height).max(min_side);
        let max_radius = width.min(height) / 2.0;
        Self {
            radius: pick(self.radius, defaults.radius).clamp(MIN_RADIUS, max_radius),
            width,
            height,
            friction_coefficient: pick(self.friction_coefficient, 1.0).clamp(MIN_FRICTION, 1.0),
            wall_restitution: pick(self.wall_restitution, 1.0).clamp(0.0, 1.0),
            node_restitution: pick(self.node_restitution, 1.0).clamp(0.0, 1.0),
            background_color: self.background_color.clone(),
        }
    }

    /// Apply `change` to a copy, keep it only if the result is valid
    fn update(&mut self, change: impl FnOnce(&mut Self)) -> Result<()> {
        let mut candidate = self.clone();
        change(&mut candidate);
        if let Err(e) = candidate.validate() {
            log::warn!("Rejected settings change: {}", e);
            return Err(e);
        }
        *self = candidate;
        Ok(())
    }

    pub fn set_radius(&mut self, radius: f32) -> Result<()> {
        self.update(|s| s.radius = radius)
    }

    pub fn set_arena(&mut self, width: f32, height: f32) -> Result<()> {
        self.update(|s| {
            s.width = width;
            s.height = height;
        })
    }

    pub fn set_friction_coefficient(&mut self, friction: f32) -> Result<()> {
        self.update(|s| s.friction_coefficient = friction)
    }

    pub fn set_wall_restitution(&mut self, restitution: f32) -> Result<()> {
        self.update(|s| s.wall_restitution = restitution)
    }

    pub fn set_node_restitution(&mut self, restitution: f32) -> Result<()> {
        self.update(|s| s.node_restitution = restitution)
    }

    pub fn set_background_color(&mut self, color: impl Into<String>) {
        self.background_color = color.into();
    }

    /// Restore friction and both restitutions to lossless
    pub fn reset_dynamics(&mut self) {
        self.friction_coefficient = 1.0;
        self.wall_restitution = 1.0;
        self.node_restitution = 1.0;
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file, falling back to defaults if it is
    /// missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}. Using defaults.", path.display(), e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("Settings file {} not found. Using defaults.", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to read settings file {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
