//! Load-time errors
//!
//! The simulation itself is total; only loading and validating a
//! configuration or a set of policy weights can fail.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field}: min ({min}) is greater than max ({max})")]
    InvalidRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("agent width {agent_width} does not fit in arena width {arena_width}")]
    AgentTooWide { agent_width: f32, arena_width: f32 },

    #[error("object size {size} does not fit in arena width {arena_width}")]
    ObjectTooWide { size: u32, arena_width: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be at least {min}, got {value}")]
    TooSmall {
        field: &'static str,
        value: f64,
        min: f64,
    },

    #[error("{field} {x} is outside the agent track [0, {max_x}]")]
    StartOutOfBounds { field: &'static str, x: f32, max_x: f32 },

    #[error("steering damping must be in (0, 1], got {0}")]
    Damping(f32),
}

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("failed to read policy weights {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse policy weights: {0}")]
    Parse(#[from] serde_json::Error),
}
