//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (objects kept in spawn order)
//! - No rendering, input or platform dependencies

pub mod agent;
pub mod collision;
pub mod object;
pub mod rect;
pub mod state;
pub mod tick;

pub use agent::Agent;
pub use collision::{CollisionEvent, check_collisions};
pub use object::{FallingObject, advance_objects};
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, GameState, Outcome, Player, Slot};
pub use tick::{TickInput, tick};
