//! Dodge Arena - a falling-object avoidance game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (falling objects, agents, collisions, game state)
//! - `ai`: Decision sources (human input, heuristic dodger, learned policy)
//! - `config`: Immutable game configuration with load-time validation
//! - `error`: Configuration and policy loading errors

pub mod ai;
pub mod config;
pub mod error;
pub mod sim;

pub use config::GameConfig;
pub use error::{ConfigError, PolicyError};

/// Default game constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Agent defaults
    pub const AGENT_WIDTH: f32 = 50.0;
    pub const AGENT_HEIGHT: f32 = 50.0;
    pub const AGENT_SPEED: f32 = 5.0;
    /// Agents stand this far above the bottom edge
    pub const AGENT_GROUND_OFFSET: f32 = 100.0;
    pub const HUMAN_START_X: f32 = 100.0;
    /// Autonomous agent starts this far from the right edge
    pub const AUTONOMOUS_START_INSET: f32 = 150.0;

    /// Falling object defaults
    pub const OBJECT_MIN_SIZE: u32 = 20;
    pub const OBJECT_MAX_SIZE: u32 = 50;
    pub const OBJECT_MIN_SPEED: f32 = 3.0;
    pub const OBJECT_MAX_SPEED: f32 = 7.0;
    /// One object spawns every N ticks
    pub const SPAWN_INTERVAL: u32 = 30;

    /// Heuristic dodger tuning
    pub const REACTION_DISTANCE: f32 = 400.0;
    pub const LOOKAHEAD_TICKS: f32 = 80.0;
    pub const SAFE_ZONE_LOOKAHEAD_TICKS: f32 = 60.0;
    pub const DECISION_COOLDOWN_TICKS: u32 = 5;
    pub const ZONE_WIDTH: f32 = 50.0;
    /// Narrower lanes are rejected at load time
    pub const MIN_ZONE_WIDTH: f32 = 1.0;
    pub const RECENTER_SLACK: f32 = 100.0;
    pub const STEERING_DEADBAND: f32 = 5.0;
    pub const STEERING_DAMPING: f32 = 0.8;
    /// Horizontal margin used to classify a threat as left/center/right
    pub const SIDE_MARGIN: f32 = 20.0;

    /// Safe-zone danger numerator
    pub const ZONE_DANGER_WEIGHT: f64 = 100.0;
}
