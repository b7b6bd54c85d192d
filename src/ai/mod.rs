//! Decision sources
//!
//! Every agent is steered by a `DecisionSource`: something that looks at a
//! read-only snapshot of the world once per tick and answers with a move
//! command. The human player, the heuristic dodger and a learned policy all
//! satisfy the same contract, so the tick loop never knows which one it is
//! driving.

pub mod heuristic;
pub mod learned;
pub mod threat;
pub mod zones;

pub use heuristic::{Decision, HeuristicEngine, ThreatSide};
pub use learned::{Action, LearnedPolicy, LinearPolicy, Observation, ObservationParams, Policy};
pub use threat::{Threat, ThreatParams, analyze_threats};
pub use zones::{Zone, ZoneParams, find_safe_zone, partition_zones};

use serde::{Deserialize, Serialize};

use crate::sim::{Agent, FallingObject};

/// Signed horizontal velocity command, in units of the agent's speed
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MoveCommand {
    pub direction: f32,
}

impl MoveCommand {
    pub const STAY: Self = Self { direction: 0.0 };
    pub const LEFT: Self = Self { direction: -1.0 };
    pub const RIGHT: Self = Self { direction: 1.0 };

    pub fn new(direction: f32) -> Self {
        Self { direction }
    }
}

/// What a decision source gets to see each tick
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// The agent being steered
    pub agent: &'a Agent,
    /// Live falling objects, in spawn order
    pub objects: &'a [FallingObject],
    /// Externally supplied command (only meaningful for human input)
    pub requested: MoveCommand,
}

/// Shared per-tick contract for anything that steers an agent
pub trait DecisionSource: std::fmt::Debug {
    /// Short identifier for logs
    fn kind(&self) -> &'static str;

    /// Produce this tick's move command
    fn decide_move(&mut self, snapshot: &Snapshot<'_>) -> MoveCommand;

    /// Forget any per-session state (called when the session resets)
    fn reset(&mut self, _agent: &Agent) {}
}

/// Passes through the debounced command from the input collaborator
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanInput;

impl DecisionSource for HumanInput {
    fn kind(&self) -> &'static str {
        "human"
    }

    fn decide_move(&mut self, snapshot: &Snapshot<'_>) -> MoveCommand {
        MoveCommand::new(snapshot.requested.direction.clamp(-1.0, 1.0))
    }
}
