//! Learned-policy decision source
//!
//! Training happens elsewhere; this module only turns the world into the
//! fixed-size observation the policy was trained on and maps the chosen
//! discrete action back onto a move command.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DecisionSource, MoveCommand, Snapshot};
use crate::config::GameConfig;
use crate::error::PolicyError;
use crate::sim::{Agent, FallingObject};

/// Number of objects encoded in an observation
pub const OBSERVED_OBJECTS: usize = 3;
/// Observation length: 3 agent features + 3 per observed object
pub const OBSERVATION_LEN: usize = 3 + 3 * OBSERVED_OBJECTS;
/// Objects below this fraction of the arena height are not observed
const OBSERVED_HEIGHT_FRACTION: f32 = 0.6;
/// Filler for missing objects: centered, at the bottom, not moving
const EMPTY_SLOT: [f32; 3] = [0.0, 1.0, 0.0];

/// Discrete policy output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Action {
    #[default]
    Stay,
    Left,
    Right,
}

impl Action {
    /// Map a policy output index (0 = stay, 1 = left, 2 = right)
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Action::Stay),
            1 => Some(Action::Left),
            2 => Some(Action::Right),
            _ => None,
        }
    }

    pub fn command(self) -> MoveCommand {
        match self {
            Action::Stay => MoveCommand::STAY,
            Action::Left => MoveCommand::LEFT,
            Action::Right => MoveCommand::RIGHT,
        }
    }
}

/// Normalized view of the world as seen by a learned policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation(pub [f32; OBSERVATION_LEN]);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservationParams {
    pub arena_width: f32,
    pub arena_height: f32,
    pub object_max_speed: f32,
}

impl ObservationParams {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            arena_width: config.arena_width,
            arena_height: config.arena_height,
            object_max_speed: config.object_max_speed,
        }
    }
}

impl Observation {
    /// Agent position features followed by the nearest upper-arena objects
    pub fn build(agent: &Agent, objects: &[FallingObject], params: &ObservationParams) -> Self {
        let w = params.arena_width;
        let h = params.arena_height;
        let agent_center = agent.center_x();

        let mut nearby: Vec<[f32; 3]> = objects
            .iter()
            .filter(|o| o.pos.y < h * OBSERVED_HEIGHT_FRACTION)
            .map(|o| {
                [
                    (o.center_x() - agent_center) / w,
                    (h - o.pos.y) / h,
                    o.speed / params.object_max_speed,
                ]
            })
            .collect();
        // Lowest objects first
        nearby.sort_by(|a, b| a[1].partial_cmp(&b[1]).unwrap_or(std::cmp::Ordering::Equal));

        let mut values = [0.0; OBSERVATION_LEN];
        values[0] = agent_center / w;
        values[1] = (w - agent.x()) / w;
        values[2] = agent.x() / w;
        for slot in 0..OBSERVED_OBJECTS {
            let features = nearby.get(slot).copied().unwrap_or(EMPTY_SLOT);
            values[3 + slot * 3..6 + slot * 3].copy_from_slice(&features);
        }
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

/// Anything that can pick an action from an observation
pub trait Policy {
    fn predict(&mut self, observation: &Observation) -> Action;
}

impl<F> Policy for F
where
    F: FnMut(&Observation) -> Action,
{
    fn predict(&mut self, observation: &Observation) -> Action {
        self(observation)
    }
}

/// Single-layer policy: one score per action, highest wins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearPolicy {
    pub weights: [[f32; OBSERVATION_LEN]; 3],
    pub bias: [f32; 3],
}

impl LinearPolicy {
    pub fn from_json_str(json: &str) -> Result<Self, PolicyError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load exported weights from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let policy = Self::from_json_str(&json)?;
        log::info!("Loaded policy weights from {}", path.display());
        Ok(policy)
    }

    pub fn scores(&self, observation: &Observation) -> [f32; 3] {
        let mut scores = self.bias;
        for (score, row) in scores.iter_mut().zip(&self.weights) {
            *score += row
                .iter()
                .zip(observation.as_slice())
                .map(|(w, x)| w * x)
                .sum::<f32>();
        }
        scores
    }
}

impl Policy for LinearPolicy {
    fn predict(&mut self, observation: &Observation) -> Action {
        let scores = self.scores(observation);
        let mut best = 0;
        for (i, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = i;
            }
        }
        Action::from_index(best).unwrap_or_default()
    }
}

/// Decision source backed by an external policy
pub struct LearnedPolicy<P> {
    policy: P,
    params: ObservationParams,
    last_action: Action,
}

impl<P: Policy> LearnedPolicy<P> {
    pub fn new(policy: P, config: &GameConfig) -> Self {
        Self {
            policy,
            params: ObservationParams::from_config(config),
            last_action: Action::Stay,
        }
    }

    pub fn last_action(&self) -> Action {
        self.last_action
    }
}

impl<P> std::fmt::Debug for LearnedPolicy<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LearnedPolicy")
            .field("params", &self.params)
            .field("last_action", &self.last_action)
            .finish_non_exhaustive()
    }
}

impl<P: Policy> DecisionSource for LearnedPolicy<P> {
    fn kind(&self) -> &'static str {
        "learned"
    }

    fn decide_move(&mut self, snapshot: &Snapshot<'_>) -> MoveCommand {
        let observation = Observation::build(snapshot.agent, snapshot.objects, &self.params);
        let action = self.policy.predict(&observation);
        if action != self.last_action {
            log::debug!("Policy switched to {:?}", action);
        }
        self.last_action = action;
        action.command()
    }

    fn reset(&mut self, _agent: &Agent) {
        self.last_action = Action::Stay;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn params() -> ObservationParams {
        ObservationParams {
            arena_width: 800.0,
            arena_height: 600.0,
            object_max_speed: 8.0,
        }
    }

    fn agent_at(x: f32) -> Agent {
        Agent::new(x, 500.0, 50.0, 50.0, 5.0)
    }

    #[test]
    fn test_empty_observation_layout() {
        let obs = Observation::build(&agent_at(375.0), &[], &params());
        assert_eq!(
            obs.0,
            [0.5, 0.53125, 0.46875, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0]
        );
    }

    #[test]
    fn test_lowest_objects_come_first() {
        let objects = vec![
            FallingObject::new(1, 50, Vec2::new(375.0, 60.0), 4.0),
            FallingObject::new(2, 50, Vec2::new(775.0, 300.0), 8.0),
            // Below 60% of the arena: not observed
            FallingObject::new(3, 50, Vec2::new(0.0, 400.0), 2.0),
        ];
        let obs = Observation::build(&agent_at(375.0), &objects, &params());
        // Object 2 first: center 800, 400 right of the agent, halfway down
        assert_eq!(&obs.0[3..6], &[0.5, 0.5, 1.0]);
        assert_eq!(&obs.0[6..9], &[0.0, 0.9, 0.5]);
        assert_eq!(&obs.0[9..12], &EMPTY_SLOT);
    }

    #[test]
    fn test_action_mapping() {
        assert_eq!(Action::from_index(0), Some(Action::Stay));
        assert_eq!(Action::from_index(1), Some(Action::Left));
        assert_eq!(Action::from_index(2), Some(Action::Right));
        assert_eq!(Action::from_index(3), None);
        assert_eq!(Action::Left.command(), MoveCommand::LEFT);
    }

    #[test]
    fn test_closure_policy_drives_agent() {
        let config = GameConfig::default();
        let mut source = LearnedPolicy::new(|_: &Observation| Action::Right, &config);
        let agent = agent_at(100.0);
        let snapshot = Snapshot {
            agent: &agent,
            objects: &[],
            requested: MoveCommand::LEFT,
        };
        // Requested input is ignored by learned policies
        assert_eq!(source.decide_move(&snapshot), MoveCommand::RIGHT);
        assert_eq!(source.last_action(), Action::Right);
    }

    #[test]
    fn test_linear_policy_argmax() {
        let mut weights = [[0.0; OBSERVATION_LEN]; 3];
        // Favor moving left the further right the agent is
        weights[1][2] = 10.0;
        let mut policy = LinearPolicy {
            weights,
            bias: [1.0, 0.0, 0.5],
        };
        let left_side = Observation::build(&agent_at(0.0), &[], &params());
        let right_side = Observation::build(&agent_at(700.0), &[], &params());
        assert_eq!(policy.predict(&left_side), Action::Stay);
        assert_eq!(policy.predict(&right_side), Action::Left);
    }

    #[test]
    fn test_linear_policy_from_json() {
        let row = vec![0.0f32; OBSERVATION_LEN];
        let json = serde_json::json!({
            "weights": [row.clone(), row.clone(), row],
            "bias": [0.0, 0.0, 1.0],
        })
        .to_string();
        let mut policy = LinearPolicy::from_json_str(&json).unwrap();
        let obs = Observation::build(&agent_at(0.0), &[], &params());
        assert_eq!(policy.predict(&obs), Action::Right);
    }

    #[test]
    fn test_linear_policy_rejects_wrong_shape() {
        let json = r#"{ "weights": [[1.0]], "bias": [0.0, 0.0, 0.0] }"#;
        assert!(matches!(
            LinearPolicy::from_json_str(json),
            Err(PolicyError::Parse(_))
        ));
    }
}
