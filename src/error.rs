//! Error types for note-bounce.

use thiserror::Error;

/// Invalid configuration, or a failure reading/writing saved settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f32),

    #[error("arena must have positive size, got {width}x{height}")]
    NonPositiveArena { width: f32, height: f32 },

    #[error("arena {width}x{height} cannot hold a node of radius {radius}")]
    ArenaTooSmall { width: f32, height: f32, radius: f32 },

    #[error("friction coefficient must be in (0, 1], got {0}")]
    FrictionOutOfRange(f32),

    #[error("{which} restitution must be in [0, 1], got {value}")]
    RestitutionOutOfRange { which: &'static str, value: f32 },

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
