//! Falling objects
//!
//! Objects spawn fully above the visible arena, fall straight down at a
//! constant speed and are pruned once they pass the bottom edge.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::GameConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: u32,
    /// Edge length of the square object
    pub size: u32,
    /// Top-left corner
    pub pos: Vec2,
    /// Pixels per tick, constant for the object's lifetime
    pub speed: f32,
}

impl FallingObject {
    pub fn new(id: u32, size: u32, pos: Vec2, speed: f32) -> Self {
        Self {
            id,
            size,
            pos,
            speed,
        }
    }

    /// Spawn an object with size, x and speed drawn from the configured ranges
    pub fn spawn<R: Rng + ?Sized>(id: u32, config: &GameConfig, rng: &mut R) -> Self {
        let size = rng.random_range(config.object_min_size..=config.object_max_size);
        let max_x = (config.arena_width - size as f32).max(0.0) as u32;
        let x = rng.random_range(0..=max_x) as f32;
        let speed = rng.random_range(config.object_min_speed..=config.object_max_speed);
        Self::new(id, size, Vec2::new(x, -(size as f32)), speed)
    }

    /// Fall one tick
    #[inline]
    pub fn advance(&mut self) {
        self.pos.y += self.speed;
    }

    #[inline]
    pub fn is_off_screen(&self, arena_height: f32) -> bool {
        self.pos.y > arena_height
    }

    #[inline]
    pub fn size_f(&self) -> f32 {
        self.size as f32
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size_f() / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size_f(), self.size_f())
    }
}

/// Advance every object one tick, then drop the ones that left the arena.
/// Spawn order is preserved.
pub fn advance_objects(objects: &mut Vec<FallingObject>, arena_height: f32) {
    for object in objects.iter_mut() {
        object.advance();
    }
    objects.retain(|o| !o.is_off_screen(arena_height));
}
