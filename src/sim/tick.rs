//! Fixed-step simulation tick
//!
//! One call advances the session by exactly one tick. While playing, the
//! order is fixed: spawn, steer both players, advance and prune objects,
//! then resolve collisions.

use super::collision::check_collisions;
use super::object::{FallingObject, advance_objects};
use super::state::{GameEvent, GamePhase, GameState, Outcome, Player, Slot};
use crate::ai::{MoveCommand, Snapshot};

/// Input collected from the outside world for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Debounced human direction in {-1, 0, +1}
    pub human_direction: f32,
    /// Leave the menu and start playing
    pub start: bool,
    /// Leave the game-over screen for the menu
    pub restart: bool,
}

/// Ask the player's decision source for a command and apply it
fn steer_player(
    player: &mut Player,
    objects: &[FallingObject],
    requested: MoveCommand,
    arena_width: f32,
) {
    let command = player.controller.decide_move(&Snapshot {
        agent: &player.agent,
        objects,
        requested,
    });
    player.agent.move_by(command.direction, arena_width);
}

/// Advance the game state by one tick, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        GamePhase::Menu => {
            if input.start {
                state.reset();
                state.phase = GamePhase::Playing;
                log::info!("Round started (seed {})", state.seed);
                events.push(GameEvent::Started);
            }
            return events;
        }
        GamePhase::GameOver => {
            if input.restart {
                state.reset();
                state.phase = GamePhase::Menu;
                log::info!("Back to menu");
                events.push(GameEvent::ReturnedToMenu);
            }
            return events;
        }
        GamePhase::Playing => {}
    }

    state.frame_count += 1;
    if state.frame_count % u64::from(state.config.spawn_interval) == 0 {
        let object_id = state.spawn_object();
        events.push(GameEvent::Spawned { object_id });
    }

    let arena_width = state.config.arena_width;
    steer_player(
        &mut state.human,
        &state.objects,
        MoveCommand::new(input.human_direction),
        arena_width,
    );
    steer_player(&mut state.autonomous, &state.objects, MoveCommand::STAY, arena_width);

    advance_objects(&mut state.objects, state.config.arena_height);

    let collisions = check_collisions(
        &[
            (Slot::Human, &state.human.agent),
            (Slot::Autonomous, &state.autonomous.agent),
        ],
        &state.objects,
    );
    for collision in &collisions {
        state.player_mut(collision.slot).agent.alive = false;
        events.push(GameEvent::Collision(*collision));
    }

    let outcome = match (state.human.agent.alive, state.autonomous.agent.alive) {
        (true, true) => None,
        // A strict first-hit rule would let object order pick the winner
        (false, false) => Some(Outcome::Draw),
        (false, true) => Some(Outcome::Winner(Slot::Autonomous)),
        (true, false) => Some(Outcome::Winner(Slot::Human)),
    };
    if let Some(outcome) = outcome {
        state.outcome = Some(outcome);
        state.phase = GamePhase::GameOver;
        match outcome {
            Outcome::Winner(slot) => log::info!(
                "{} wins after {} ticks",
                slot.label(),
                state.frame_count
            ),
            Outcome::Draw => log::info!("Draw after {} ticks", state.frame_count),
        }
        events.push(GameEvent::GameOver(outcome));
    }

    events
}
