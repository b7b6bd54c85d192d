//! Safe-zone selection
//!
//! Splits the reachable strip of the arena into fixed-width lanes and scores
//! each lane by how much incoming danger lands near its center.

use crate::config::GameConfig;
use crate::consts::ZONE_DANGER_WEIGHT;
use crate::sim::{Agent, FallingObject};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneParams {
    pub arena_width: f32,
    pub arena_height: f32,
    pub zone_width: f32,
    /// How far ahead an object must reach agent height to count as danger
    pub lookahead_ticks: f32,
}

impl ZoneParams {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            arena_width: config.arena_width,
            arena_height: config.arena_height,
            zone_width: config.zone_width,
            lookahead_ticks: config.safe_zone_lookahead_ticks,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    /// Agent x that would occupy this zone
    pub x: f32,
    pub center_x: f32,
    pub danger_score: f64,
}

/// Objects still in the upper half that will have reached the agent by the lookahead
fn is_incoming(object: &FallingObject, agent: &Agent, params: &ZoneParams) -> bool {
    let future_y = object.pos.y + object.speed * params.lookahead_ticks;
    object.pos.y < params.arena_height / 2.0 && future_y > agent.y()
}

/// Score every zone in `[0, arena_width - agent.width)`, left to right
pub fn partition_zones(agent: &Agent, objects: &[FallingObject], params: &ZoneParams) -> Vec<Zone> {
    let limit = params.arena_width - agent.width;
    let incoming: Vec<&FallingObject> = objects
        .iter()
        .filter(|o| is_incoming(o, agent, params))
        .collect();

    let mut zones = Vec::new();
    // Per-zone contributions, summed in sorted order so the score does not
    // depend on the order objects were handed in
    let mut contributions: Vec<f64> = Vec::with_capacity(incoming.len());

    let mut index = 0u32;
    loop {
        let x = index as f32 * params.zone_width;
        if x >= limit {
            break;
        }
        let center_x = x + agent.width / 2.0;

        contributions.clear();
        for object in &incoming {
            let distance = (center_x - object.center_x()).abs();
            if distance < object.size_f() + agent.width {
                contributions.push(ZONE_DANGER_WEIGHT / (distance as f64 + 1.0));
            }
        }
        contributions.sort_by(f64::total_cmp);

        zones.push(Zone {
            x,
            center_x,
            danger_score: contributions.iter().sum(),
        });
        index += 1;
    }
    zones
}

/// x of the least dangerous zone; the leftmost zone wins ties
pub fn find_safe_zone(agent: &Agent, objects: &[FallingObject], params: &ZoneParams) -> f32 {
    let zones = partition_zones(agent, objects, params);
    let mut best: Option<&Zone> = None;
    for zone in &zones {
        if best.is_none_or(|b| zone.danger_score < b.danger_score) {
            best = Some(zone);
        }
    }
    best.map(|z| z.x).unwrap_or(0.0)
}
