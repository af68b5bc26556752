//! Error types for car-crossings.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the engine, the points parser and config loading.
///
/// Degenerate geometry (empty shapes, zero-length segments, segments
/// off the canvas) is never an error.
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration can't produce correct answers.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not enough points: found {found}, need at least {min}")]
    TooFewPoints { found: usize, min: usize },

    #[error("Too many points: found {found}, allowed at most {max}")]
    TooManyPoints { found: usize, max: usize },

    #[error("Unknown shape id: {0}")]
    UnknownShape(u32),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
