//! Ground-bound agents
//!
//! Both the human and the autonomous player are plain `Agent`s; what sets
//! them apart is the decision source steering them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::GameConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Top-left corner (y stays fixed)
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Distance moved by a unit move command
    pub speed: f32,
    pub alive: bool,
}

impl Agent {
    pub fn new(x: f32, y: f32, width: f32, height: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            width,
            height,
            speed,
            alive: true,
        }
    }

    /// Agent standing on the configured ground line at `x`
    pub fn from_config(config: &GameConfig, x: f32) -> Self {
        Self::new(
            x,
            config.agent_y(),
            config.agent_width,
            config.agent_height,
            config.agent_speed,
        )
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    /// Move horizontally by `direction * speed`, staying inside the arena
    pub fn move_by(&mut self, direction: f32, arena_width: f32) {
        let max_x = arena_width - self.width;
        self.pos.x = (self.pos.x + direction * self.speed).min(max_x).max(0.0);
    }
}
