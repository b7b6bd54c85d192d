//! Game state and session lifecycle
//!
//! Owns everything that changes from tick to tick: the live object set, both
//! players and the seeded RNG that drives spawning.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::collision::CollisionEvent;
use super::object::FallingObject;
use crate::ai::{DecisionSource, HeuristicEngine, HumanInput};
use crate::config::GameConfig;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a start trigger
    Menu,
    /// Objects falling, agents dodging
    Playing,
    /// Someone was struck
    GameOver,
}

/// Which of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Human,
    Autonomous,
}

impl Slot {
    pub fn label(self) -> &'static str {
        match self {
            Slot::Human => "Human Player",
            Slot::Autonomous => "AI Player",
        }
    }
}

/// How a finished session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(Slot),
    /// Both agents were struck on the same tick
    Draw,
}

/// Things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Spawned { object_id: u32 },
    Collision(CollisionEvent),
    GameOver(Outcome),
    ReturnedToMenu,
}

/// An agent plus whatever is steering it
#[derive(Debug)]
pub struct Player {
    pub agent: Agent,
    pub controller: Box<dyn DecisionSource>,
    start_x: f32,
}

impl Player {
    fn new(config: &GameConfig, start_x: f32, mut controller: Box<dyn DecisionSource>) -> Self {
        let agent = Agent::from_config(config, start_x);
        controller.reset(&agent);
        Self {
            agent,
            controller,
            start_x,
        }
    }

    fn reset(&mut self, config: &GameConfig) {
        self.agent = Agent::from_config(config, self.start_x);
        self.controller.reset(&self.agent);
    }
}

#[derive(Debug)]
pub struct GameState {
    pub config: GameConfig,
    /// Session seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    /// Ticks spent playing since the last reset
    pub frame_count: u64,
    /// Live objects, in spawn order
    pub objects: Vec<FallingObject>,
    pub human: Player,
    pub autonomous: Player,
    pub outcome: Option<Outcome>,
    next_id: u32,
}

impl GameState {
    /// New session in the menu phase. `config` must already be validated.
    pub fn new(
        config: GameConfig,
        seed: u64,
        human: Box<dyn DecisionSource>,
        autonomous: Box<dyn DecisionSource>,
    ) -> Self {
        let human = Player::new(&config, config.human_start_x, human);
        let autonomous = Player::new(&config, config.autonomous_start_x(), autonomous);
        log::info!(
            "New session (seed {}): {} vs {}",
            seed,
            human.controller.kind(),
            autonomous.controller.kind()
        );
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            frame_count: 0,
            objects: Vec::new(),
            human,
            autonomous,
            outcome: None,
            next_id: 1,
        }
    }

    /// Human input against the heuristic dodger
    pub fn with_heuristic(config: GameConfig, seed: u64) -> Self {
        let engine = HeuristicEngine::new(&config);
        Self::new(config, seed, Box::new(HumanInput), Box::new(engine))
    }

    /// Put both players back at their start positions and clear the arena.
    /// The RNG keeps its stream so consecutive rounds differ.
    pub fn reset(&mut self) {
        self.frame_count = 0;
        self.objects.clear();
        self.outcome = None;
        self.human.reset(&self.config);
        self.autonomous.reset(&self.config);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn one object above the arena
    pub fn spawn_object(&mut self) -> u32 {
        let id = self.next_entity_id();
        let object = FallingObject::spawn(id, &self.config, &mut self.rng);
        log::trace!(
            "Spawned object {} at x={} (size {}, speed {:.2})",
            id,
            object.pos.x,
            object.size,
            object.speed
        );
        self.objects.push(object);
        id
    }

    pub fn player(&self, slot: Slot) -> &Player {
        match slot {
            Slot::Human => &self.human,
            Slot::Autonomous => &self.autonomous,
        }
    }

    pub fn player_mut(&mut self, slot: Slot) -> &mut Player {
        match slot {
            Slot::Human => &mut self.human,
            Slot::Autonomous => &mut self.autonomous,
        }
    }
}
