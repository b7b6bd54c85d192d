//! Threat assessment
//!
//! Projects each falling object a fixed number of ticks ahead and flags the
//! ones that will land on the agent while there is still time to react.
//! Objects never move sideways, so the projection only touches y.

use crate::config::GameConfig;
use crate::sim::{Agent, FallingObject};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreatParams {
    pub arena_height: f32,
    /// Only objects above this y are worth reacting to
    pub reaction_distance: f32,
    pub lookahead_ticks: f32,
}

impl ThreatParams {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            arena_height: config.arena_height,
            reaction_distance: config.reaction_distance,
            lookahead_ticks: config.lookahead_ticks,
        }
    }
}

/// An object predicted to hit the agent, valid for one decision cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threat<'a> {
    pub object: &'a FallingObject,
    /// In (0, 1], larger for sooner impacts
    pub threat_level: f32,
    /// Ticks until the object reaches agent height (infinite if it never will)
    pub time_to_impact: f32,
    pub center_x: f32,
}

/// Ticks until `object` falls to the agent's height; infinite when it is not falling
pub fn time_to_impact(object: &FallingObject, agent: &Agent, arena_height: f32) -> f32 {
    if object.speed <= 0.0 {
        return f32::INFINITY;
    }
    let distance = arena_height - object.pos.y - agent.height;
    distance / object.speed
}

/// Center-plus-half-width proximity test on the projected object
fn will_collide(object: &FallingObject, agent: &Agent, lookahead_ticks: f32) -> bool {
    let future_y = object.pos.y + object.speed * lookahead_ticks;
    let horizontal_distance = (agent.center_x() - object.center_x()).abs();

    future_y + object.size_f() >= agent.y()
        && future_y <= agent.y() + agent.height
        && horizontal_distance < (agent.width + object.size_f()) / 2.0
}

/// Rank the objects that threaten `agent`, most urgent first.
///
/// Equal scores keep the input order.
pub fn analyze_threats<'a>(
    agent: &Agent,
    objects: &'a [FallingObject],
    params: &ThreatParams,
) -> Vec<Threat<'a>> {
    let mut threats: Vec<Threat<'a>> = objects
        .iter()
        .filter(|o| o.pos.y < params.reaction_distance)
        .filter(|o| will_collide(o, agent, params.lookahead_ticks))
        .map(|object| {
            let tti = time_to_impact(object, agent, params.arena_height);
            let threat_level = if tti.is_finite() {
                // Objects already level with the agent score as imminent
                1.0 / (tti.max(0.0) + 1.0)
            } else {
                0.0
            };
            Threat {
                object,
                threat_level,
                time_to_impact: tti,
                center_x: object.center_x(),
            }
        })
        .collect();

    // sort_by is stable
    threats.sort_by(|a, b| {
        b.threat_level
            .partial_cmp(&a.threat_level)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    threats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use glam::Vec2;
    use proptest::prelude::*;

    fn params() -> ThreatParams {
        ThreatParams::from_config(&GameConfig::default())
    }

    fn agent_at(x: f32) -> Agent {
        Agent::new(x, 500.0, 50.0, 50.0, 5.0)
    }

    #[test]
    fn test_single_object_straight_overhead() {
        let agent = agent_at(375.0);
        let objects = vec![FallingObject::new(1, 50, Vec2::new(375.0, 100.0), 5.0)];

        let threats = analyze_threats(&agent, &objects, &params());
        assert_eq!(threats.len(), 1);
        let threat = threats[0];
        assert_eq!(threat.object.id, 1);
        assert_eq!(threat.center_x, 400.0);
        // (600 - 100 - 50) / 5
        assert_eq!(threat.time_to_impact, 90.0);
        assert!(threat.threat_level > 0.0);
        assert!((threat.threat_level - 1.0 / 91.0).abs() < 1e-6);
    }

    #[test]
    fn test_default_config_sees_overhead_object() {
        let config = GameConfig::default();
        let agent = Agent::from_config(&config, 375.0);
        let objects = vec![FallingObject::new(1, 50, Vec2::new(375.0, 100.0), 5.0)];
        let threats = analyze_threats(&agent, &objects, &ThreatParams::from_config(&config));
        assert_eq!(threats.len(), 1);
        assert_eq!(threats[0].object.id, 1);
    }

    #[test]
    fn test_empty_world_has_no_threats() {
        assert!(analyze_threats(&agent_at(375.0), &[], &params()).is_empty());
    }

    #[test]
    fn test_object_too_low_to_react_is_ignored() {
        let agent = agent_at(375.0);
        // Below the reaction line, even though it is right overhead
        let objects = vec![FallingObject::new(1, 50, Vec2::new(375.0, 420.0), 1.0)];
        assert!(analyze_threats(&agent, &objects, &params()).is_empty());
    }

    #[test]
    fn test_object_off_to_the_side_is_ignored() {
        let agent = agent_at(375.0);
        // Centers 50 apart, half-widths sum to 50: not strictly closer
        let objects = vec![FallingObject::new(1, 50, Vec2::new(425.0, 100.0), 5.0)];
        assert!(analyze_threats(&agent, &objects, &params()).is_empty());
    }

    #[test]
    fn test_object_that_will_not_arrive_in_time_is_ignored() {
        let agent = agent_at(375.0);
        // 100 + 1 * 80 = 180, nowhere near the agent at 500
        let objects = vec![FallingObject::new(1, 50, Vec2::new(375.0, 100.0), 1.0)];
        assert!(analyze_threats(&agent, &objects, &params()).is_empty());
    }

    #[test]
    fn test_sooner_impact_ranks_first() {
        let agent = agent_at(375.0);
        let objects = vec![
            FallingObject::new(1, 50, Vec2::new(375.0, 100.0), 5.0),
            FallingObject::new(2, 50, Vec2::new(380.0, 200.0), 4.0),
        ];
        let threats = analyze_threats(&agent, &objects, &params());
        assert_eq!(threats.len(), 2);
        // id 2: (600 - 200 - 50) / 4 = 87.5 ticks, sooner than id 1's 90
        assert_eq!(threats[0].object.id, 2);
        assert_eq!(threats[1].object.id, 1);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let agent = agent_at(375.0);
        let objects = vec![
            FallingObject::new(9, 50, Vec2::new(370.0, 100.0), 5.0),
            FallingObject::new(3, 50, Vec2::new(380.0, 100.0), 5.0),
        ];
        let threats = analyze_threats(&agent, &objects, &params());
        let ids: Vec<u32> = threats.iter().map(|t| t.object.id).collect();
        assert_eq!(ids, vec![9, 3]);
    }

    #[test]
    fn test_stationary_object_never_divides_by_zero() {
        let agent = agent_at(375.0);
        let object = FallingObject::new(1, 50, Vec2::new(375.0, 480.0), 0.0);
        assert_eq!(time_to_impact(&object, &agent, 600.0), f32::INFINITY);

        let params = ThreatParams {
            reaction_distance: 600.0,
            ..params()
        };
        let objects = [object];
        let threats = analyze_threats(&agent, &objects, &params);
        // Already overlapping the agent's band, so it is flagged but not urgent
        assert_eq!(threats.len(), 1);
        assert_eq!(threats[0].threat_level, 0.0);
        assert!(threats[0].time_to_impact.is_infinite());
    }

    #[test]
    fn test_negative_speed_is_unbounded() {
        let agent = agent_at(375.0);
        let object = FallingObject::new(1, 50, Vec2::new(375.0, 100.0), -3.0);
        assert!(time_to_impact(&object, &agent, 600.0).is_infinite());
    }

    fn arb_object() -> impl Strategy<Value = FallingObject> {
        (0u32..1000, 20u32..=50, 0.0f32..750.0, -60.0f32..600.0, -2.0f32..10.0)
            .prop_map(|(id, size, x, y, speed)| {
                FallingObject::new(id, size, Vec2::new(x, y), speed)
            })
    }

    proptest! {
        #[test]
        fn prop_threats_sorted_non_increasing(
            objects in prop::collection::vec(arb_object(), 0..40),
            agent_x in 0.0f32..750.0,
        ) {
            let agent = agent_at(agent_x);
            let threats = analyze_threats(&agent, &objects, &params());
            for pair in threats.windows(2) {
                prop_assert!(pair[0].threat_level >= pair[1].threat_level);
            }
            for threat in &threats {
                prop_assert!(threat.threat_level >= 0.0 && threat.threat_level <= 1.0);
            }
        }
    }
}
