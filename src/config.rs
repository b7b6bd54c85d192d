//! Game configuration
//!
//! One immutable struct handed to every component at construction. Loaded
//! from JSON (missing fields fall back to defaults) and validated up front so
//! the simulation never has to second-guess its inputs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    /// Simulation ticks per second (consumed by the driving clock)
    pub tick_rate: u32,

    // === Agents ===
    pub agent_width: f32,
    pub agent_height: f32,
    /// Horizontal distance covered by a full-strength move command
    pub agent_speed: f32,
    /// Distance between the agents' top edge and the bottom of the arena
    pub agent_ground_offset: f32,
    pub human_start_x: f32,
    /// Unset means a fixed inset from the configured right edge
    pub autonomous_start_x: Option<f32>,

    // === Falling objects ===
    pub object_min_size: u32,
    pub object_max_size: u32,
    pub object_min_speed: f32,
    pub object_max_speed: f32,
    /// Spawn one object every N ticks
    pub spawn_interval: u32,

    // === Heuristic dodger ===
    /// Objects lower than this (larger y) are too close to react to
    pub reaction_distance: f32,
    pub lookahead_ticks: f32,
    pub safe_zone_lookahead_ticks: f32,
    pub decision_cooldown_ticks: u32,
    pub zone_width: f32,
    pub recenter_slack: f32,
    pub steering_deadband: f32,
    /// Fraction of a full step taken while steering (0, 1]
    pub steering_damping: f32,
    pub side_margin: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            tick_rate: TICK_RATE,

            agent_width: AGENT_WIDTH,
            agent_height: AGENT_HEIGHT,
            agent_speed: AGENT_SPEED,
            agent_ground_offset: AGENT_GROUND_OFFSET,
            human_start_x: HUMAN_START_X,
            autonomous_start_x: None,

            object_min_size: OBJECT_MIN_SIZE,
            object_max_size: OBJECT_MAX_SIZE,
            object_min_speed: OBJECT_MIN_SPEED,
            object_max_speed: OBJECT_MAX_SPEED,
            spawn_interval: SPAWN_INTERVAL,

            reaction_distance: REACTION_DISTANCE,
            lookahead_ticks: LOOKAHEAD_TICKS,
            safe_zone_lookahead_ticks: SAFE_ZONE_LOOKAHEAD_TICKS,
            decision_cooldown_ticks: DECISION_COOLDOWN_TICKS,
            zone_width: ZONE_WIDTH,
            recenter_slack: RECENTER_SLACK,
            steering_deadband: STEERING_DEADBAND,
            steering_damping: STEERING_DAMPING,
            side_margin: SIDE_MARGIN,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("arena_width", self.arena_width)?;
        positive("arena_height", self.arena_height)?;
        positive("tick_rate", self.tick_rate as f32)?;
        positive("agent_width", self.agent_width)?;
        positive("agent_height", self.agent_height)?;
        positive("agent_speed", self.agent_speed)?;
        positive("object_min_size", self.object_min_size as f32)?;
        positive("object_max_speed", self.object_max_speed)?;
        positive("spawn_interval", self.spawn_interval as f32)?;
        positive("zone_width", self.zone_width)?;
        if self.zone_width < MIN_ZONE_WIDTH {
            return Err(ConfigError::TooSmall {
                field: "zone_width",
                value: self.zone_width as f64,
                min: MIN_ZONE_WIDTH as f64,
            });
        }

        non_negative("reaction_distance", self.reaction_distance)?;
        non_negative("lookahead_ticks", self.lookahead_ticks)?;
        non_negative("safe_zone_lookahead_ticks", self.safe_zone_lookahead_ticks)?;
        non_negative("recenter_slack", self.recenter_slack)?;
        non_negative("steering_deadband", self.steering_deadband)?;
        non_negative("side_margin", self.side_margin)?;

        if self.object_min_size > self.object_max_size {
            return Err(ConfigError::InvalidRange {
                field: "object_size",
                min: self.object_min_size as f64,
                max: self.object_max_size as f64,
            });
        }
        // Zero is tolerated: such objects simply never reach the agents
        if self.object_min_speed < 0.0 || self.object_min_speed > self.object_max_speed {
            return Err(ConfigError::InvalidRange {
                field: "object_speed",
                min: self.object_min_speed as f64,
                max: self.object_max_speed as f64,
            });
        }
        if self.agent_width >= self.arena_width {
            return Err(ConfigError::AgentTooWide {
                agent_width: self.agent_width,
                arena_width: self.arena_width,
            });
        }
        let max_x = self.agent_max_x();
        for (field, x) in [
            ("human_start_x", self.human_start_x),
            ("autonomous_start_x", self.autonomous_start_x()),
        ] {
            if !(0.0..=max_x).contains(&x) {
                return Err(ConfigError::StartOutOfBounds { field, x, max_x });
            }
        }
        if self.object_max_size as f32 > self.arena_width {
            return Err(ConfigError::ObjectTooWide {
                size: self.object_max_size,
                arena_width: self.arena_width,
            });
        }
        if !(self.steering_damping > 0.0 && self.steering_damping <= 1.0) {
            return Err(ConfigError::Damping(self.steering_damping));
        }
        Ok(())
    }

    /// Starting x of the autonomous agent
    pub fn autonomous_start_x(&self) -> f32 {
        self.autonomous_start_x
            .unwrap_or(self.arena_width - AUTONOMOUS_START_INSET)
    }

    /// Fixed y of the ground-bound agents
    pub fn agent_y(&self) -> f32 {
        self.arena_height - self.agent_ground_offset
    }

    /// Rightmost x an agent may occupy
    pub fn agent_max_x(&self) -> f32 {
        self.arena_width - self.agent_width
    }

    /// Agent x that centers it in the arena
    pub fn agent_center_x(&self) -> f32 {
        self.arena_width / 2.0 - self.agent_width / 2.0
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    // NaN fails this check too
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive {
            field,
            value: value as f64,
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative {
            field,
            value: value as f64,
        })
    }
}
