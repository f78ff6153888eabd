//! Error types for Runner.
//!
//! The per-frame simulation has no recoverable failures; these errors belong to
//! the outer surfaces (configuration files, engine startup).

use thiserror::Error;

/// Top-level error type for Runner operations.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Problems with world or player tunables.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A dimension that must be strictly positive was not
    #[error("{field} must be positive, got {value}")]
    NonPositive {
        /// Name of the offending field
        field: &'static str,
        /// Value found
        value: f32,
    },

    /// The player sprite does not fit inside the world
    #[error("player ({player_width}x{player_height}) does not fit world ({world_width}x{world_height}) with ground margin {ground_margin}")]
    PlayerDoesNotFit {
        /// Player width
        player_width: f32,
        /// Player height
        player_height: f32,
        /// World width
        world_width: f32,
        /// World height
        world_height: f32,
        /// Ground margin
        ground_margin: f32,
    },
}

/// Result type alias for Runner operations.
pub type RunnerResult<T> = Result<T, RunnerError>;
