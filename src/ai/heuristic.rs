//! Heuristic dodger
//!
//! Re-evaluates on a short cooldown: when something is about to land on the
//! agent it heads for the safest lane, otherwise it drifts back toward the
//! middle of the arena. Movement toward the chosen target is damped so the
//! agent settles instead of oscillating around it.

use serde::{Deserialize, Serialize};

use super::threat::{ThreatParams, analyze_threats};
use super::zones::{ZoneParams, find_safe_zone};
use super::{DecisionSource, MoveCommand, Snapshot};
use crate::config::GameConfig;
use crate::sim::{Agent, FallingObject};

/// Where the most urgent threat sits relative to the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreatSide {
    Left,
    Center,
    Right,
}

/// Outcome of one decision step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// Still cooling down from the previous evasion
    CoolingDown,
    /// Heading for the safest lane
    Evade {
        target_x: f32,
        side: ThreatSide,
        object_id: u32,
    },
    /// Nothing incoming, drifting back to the middle
    Recenter { target_x: f32 },
    /// Nothing incoming and already close enough to the middle
    Hold,
}

#[derive(Debug, Clone)]
pub struct HeuristicEngine {
    threat_params: ThreatParams,
    zone_params: ZoneParams,
    arena_width: f32,
    cooldown_ticks: u32,
    recenter_slack: f32,
    deadband: f32,
    damping: f32,
    side_margin: f32,

    /// Ticks left before the next re-evaluation
    cooldown: u32,
    target_x: f32,
}

impl HeuristicEngine {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            threat_params: ThreatParams::from_config(config),
            zone_params: ZoneParams::from_config(config),
            arena_width: config.arena_width,
            cooldown_ticks: config.decision_cooldown_ticks,
            recenter_slack: config.recenter_slack,
            deadband: config.steering_deadband,
            damping: config.steering_damping,
            side_margin: config.side_margin,
            cooldown: 0,
            target_x: config.autonomous_start_x(),
        }
    }

    pub fn target_x(&self) -> f32 {
        self.target_x
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    /// Override the current target (the next decision may replace it)
    pub fn set_target_x(&mut self, target_x: f32) {
        self.target_x = target_x;
    }

    fn classify(&self, agent: &Agent, object_center_x: f32) -> ThreatSide {
        let agent_center = agent.center_x();
        if object_center_x < agent_center - self.side_margin {
            ThreatSide::Left
        } else if object_center_x > agent_center + self.side_margin {
            ThreatSide::Right
        } else {
            ThreatSide::Center
        }
    }

    /// Pick a new target, unless still cooling down
    pub fn decide(&mut self, agent: &Agent, objects: &[FallingObject]) -> Decision {
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return Decision::CoolingDown;
        }

        let threats = analyze_threats(agent, objects, &self.threat_params);
        if let Some(top) = threats.first() {
            let side = self.classify(agent, top.center_x);
            // All three sides resolve to the same lane query
            let target_x = match side {
                ThreatSide::Left => find_safe_zone(agent, objects, &self.zone_params),
                ThreatSide::Right => find_safe_zone(agent, objects, &self.zone_params),
                ThreatSide::Center => find_safe_zone(agent, objects, &self.zone_params),
            };
            self.target_x = target_x;
            self.cooldown = self.cooldown_ticks;
            log::debug!(
                "Evading object {} ({:?}, level {:.3}) -> x={}",
                top.object.id,
                side,
                top.threat_level,
                target_x
            );
            return Decision::Evade {
                target_x,
                side,
                object_id: top.object.id,
            };
        }

        let center_x = self.arena_width / 2.0 - agent.width / 2.0;
        if (agent.x() - center_x).abs() > self.recenter_slack {
            self.target_x = center_x;
            log::debug!("No threats, recentering to x={}", center_x);
            Decision::Recenter { target_x: center_x }
        } else {
            Decision::Hold
        }
    }

    /// Damped step toward the current target
    pub fn steer(&self, agent: &Agent) -> MoveCommand {
        let current = agent.center_x();
        let target = self.target_x + agent.width / 2.0;
        let delta = target - current;
        if delta.abs() > self.deadband {
            MoveCommand::new(delta.signum() * self.damping)
        } else {
            MoveCommand::STAY
        }
    }
}

impl DecisionSource for HeuristicEngine {
    fn kind(&self) -> &'static str {
        "heuristic"
    }

    fn decide_move(&mut self, snapshot: &Snapshot<'_>) -> MoveCommand {
        self.decide(snapshot.agent, snapshot.objects);
        self.steer(snapshot.agent)
    }

    fn reset(&mut self, agent: &Agent) {
        self.cooldown = 0;
        self.target_x = agent.x();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    fn agent_at(x: f32) -> Agent {
        Agent::from_config(&config(), x)
    }

    fn engine_for(agent: &Agent) -> HeuristicEngine {
        let mut engine = HeuristicEngine::new(&config());
        engine.reset(agent);
        engine
    }

    fn overhead_object() -> FallingObject {
        FallingObject::new(1, 50, Vec2::new(375.0, 100.0), 5.0)
    }

    #[test]
    fn test_evades_object_overhead() {
        let agent = agent_at(375.0);
        let mut engine = engine_for(&agent);
        let objects = vec![overhead_object()];

        let threats = analyze_threats(&agent, &objects, &ThreatParams::from_config(&config()));
        assert_eq!(threats.len(), 1);
        assert!(threats[0].threat_level > 0.0);

        let decision = engine.decide(&agent, &objects);
        let Decision::Evade {
            target_x,
            side,
            object_id,
        } = decision
        else {
            panic!("expected an evasion, got {decision:?}");
        };
        assert_eq!(object_id, 1);
        assert_eq!(side, ThreatSide::Center);
        let zone_center = target_x + agent.width / 2.0;
        assert!((zone_center - 400.0).abs() > 80.0);
        assert_eq!(engine.cooldown(), config().decision_cooldown_ticks);
    }

    #[test]
    fn test_every_side_uses_the_same_lane_query() {
        // The left/center/right split does not change the chosen lane; this
        // pins the current behavior rather than a per-side strategy.
        let objects = vec![FallingObject::new(1, 50, Vec2::new(375.0, 100.0), 5.0)];
        let zone_params = ZoneParams::from_config(&config());
        for (agent_x, expected_side) in [
            (340.0, ThreatSide::Right),
            (375.0, ThreatSide::Center),
            (410.0, ThreatSide::Left),
        ] {
            let agent = agent_at(agent_x);
            let mut engine = engine_for(&agent);
            match engine.decide(&agent, &objects) {
                Decision::Evade { target_x, side, .. } => {
                    assert_eq!(side, expected_side);
                    assert_eq!(target_x, find_safe_zone(&agent, &objects, &zone_params));
                }
                other => panic!("expected an evasion at x={agent_x}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_cooldown_blocks_exactly_k_ticks() {
        let agent = agent_at(375.0);
        let mut engine = engine_for(&agent);
        let objects = vec![overhead_object()];

        assert!(matches!(engine.decide(&agent, &objects), Decision::Evade { .. }));
        let target = engine.target_x();

        // A new, different threat shows up but the engine keeps its target
        let other = vec![
            overhead_object(),
            FallingObject::new(2, 50, Vec2::new(0.0, 150.0), 5.0),
        ];
        let k = config().decision_cooldown_ticks;
        for _ in 0..k {
            assert_eq!(engine.decide(&agent, &other), Decision::CoolingDown);
            assert_eq!(engine.target_x(), target);
        }
        assert!(matches!(engine.decide(&agent, &other), Decision::Evade { .. }));
    }

    #[test]
    fn test_recenters_from_far_edge() {
        let agent = agent_at(0.0);
        let mut engine = engine_for(&agent);
        assert_eq!(engine.decide(&agent, &[]), Decision::Recenter { target_x: 375.0 });
        assert_eq!(engine.target_x(), 375.0);
        // Recentering does not start a cooldown
        assert_eq!(engine.cooldown(), 0);
    }

    #[test]
    fn test_holds_within_slack() {
        let agent = agent_at(300.0);
        let mut engine = engine_for(&agent);
        assert_eq!(engine.decide(&agent, &[]), Decision::Hold);
        assert_eq!(engine.target_x(), 300.0);
    }

    #[test]
    fn test_steer_deadband_and_damping() {
        let agent = agent_at(100.0);
        let mut engine = engine_for(&agent);

        engine.set_target_x(104.0);
        assert_eq!(engine.steer(&agent), MoveCommand::STAY);

        engine.set_target_x(200.0);
        assert_eq!(engine.steer(&agent), MoveCommand::new(0.8));

        engine.set_target_x(0.0);
        assert_eq!(engine.steer(&agent), MoveCommand::new(-0.8));
    }

    #[test]
    fn test_decide_move_steers_toward_center() {
        let agent = agent_at(0.0);
        let mut engine = engine_for(&agent);
        let snapshot = Snapshot {
            agent: &agent,
            objects: &[],
            requested: MoveCommand::STAY,
        };
        assert_eq!(engine.decide_move(&snapshot), MoveCommand::new(0.8));
    }

    proptest! {
        #[test]
        fn prop_steering_converges_without_overshoot(
            start in 0.0f32..750.0,
            target in 0.0f32..750.0,
        ) {
            let config = config();
            let mut agent = agent_at(start);
            let mut engine = engine_for(&agent);
            engine.set_target_x(target);
            let step = config.agent_speed * config.steering_damping;

            let mut offset = target - agent.x();
            for _ in 0..2000 {
                let command = engine.steer(&agent);
                if command == MoveCommand::STAY {
                    break;
                }
                agent.move_by(command.direction, config.arena_width);
                let next = target - agent.x();
                prop_assert!(next.abs() < offset.abs());
                if next.signum() != offset.signum() {
                    prop_assert!(next.abs() <= step);
                }
                offset = next;
            }
            prop_assert!(offset.abs() <= config.steering_deadband);
        }
    }
}
