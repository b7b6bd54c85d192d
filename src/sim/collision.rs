//! Agent vs falling-object collision detection
//!
//! Plain AABB overlap. Every overlapping (agent, object) pair is reported
//! once per call; dead agents are ignored.

use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::object::FallingObject;
use super::state::Slot;

/// An agent was struck by an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub slot: Slot,
    pub object_id: u32,
}

/// Check every alive agent against every live object
pub fn check_collisions(
    agents: &[(Slot, &Agent)],
    objects: &[FallingObject],
) -> Vec<CollisionEvent> {
    let mut events = Vec::new();
    for &(slot, agent) in agents {
        if !agent.alive {
            continue;
        }
        let agent_rect = agent.rect();
        for object in objects {
            if agent_rect.intersects(&object.rect()) {
                events.push(CollisionEvent {
                    slot,
                    object_id: object.id,
                });
            }
        }
    }
    events
}
