//! Stand-in decision makers for headless runs.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use soccer_core::engine::agent::{AgentProfile, SoccerAgent, MOVE_AXIS_MAX};
use soccer_core::engine::physics::PhysicsBackend;
use soccer_core::engine::types::{Pose, Vec3};
use soccer_core::ActionTuple;

pub trait Policy {
    fn act(&mut self, profile: &AgentProfile, pose: &Pose, ball: Vec3) -> ActionTuple;
}

/// Uniform over every valid code, including the auxiliary axis.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl Policy for RandomPolicy {
    fn act(&mut self, profile: &AgentProfile, _pose: &Pose, _ball: Vec3) -> ActionTuple {
        ActionTuple::new(
            self.rng.gen_range(0..=MOVE_AXIS_MAX),
            self.rng.gen_range(0..=MOVE_AXIS_MAX),
            self.rng.gen_range(0..=MOVE_AXIS_MAX),
        )
        .with_aux(self.rng.gen_range(0..=profile.aux_action.max_code()))
    }
}

/// Turns toward the ball and runs at it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChaseBallPolicy {
    /// Heading error in degrees tolerated before turning
    pub tolerance_deg: f32,
}

impl Policy for ChaseBallPolicy {
    fn act(&mut self, _profile: &AgentProfile, pose: &Pose, ball: Vec3) -> ActionTuple {
        let to_ball = ball - pose.position;
        if to_ball.x == 0.0 && to_ball.z == 0.0 {
            return ActionTuple::IDLE;
        }
        let target = to_ball.x.atan2(to_ball.z).to_degrees();
        let mut error = target - pose.heading_deg();
        if error > 180.0 {
            error -= 360.0;
        } else if error < -180.0 {
            error += 360.0;
        }
        let rotate = if error > self.tolerance_deg {
            2
        } else if error < -self.tolerance_deg {
            1
        } else {
            0
        };
        ActionTuple::new(1, 0, rotate)
    }
}

/// Which policy drives every agent in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    #[default]
    Random,
    Chase,
}

impl PolicyKind {
    pub fn build(self, seed: u64) -> Box<dyn Policy> {
        match self {
            PolicyKind::Random => Box::new(RandomPolicy::new(seed)),
            PolicyKind::Chase => Box::new(ChaseBallPolicy { tolerance_deg: 5.0 }),
        }
    }
}

/// Actions for every agent in roster order.
pub fn roster_actions<P: PhysicsBackend>(
    policy: &mut dyn Policy,
    agents: &[SoccerAgent],
    physics: &P,
    ball: Vec3,
) -> Vec<ActionTuple> {
    agents
        .iter()
        .map(|agent| {
            let pose = physics.pose(agent.profile.body).unwrap_or_default();
            policy.act(&agent.profile, &pose, ball)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use soccer_core::engine::agent::{AuxAction, SpeedProfile};
    use soccer_core::{AgentId, BodyHandle, Role, Team};

    fn profile() -> AgentProfile {
        AgentProfile {
            id: AgentId(0),
            name: "g".to_string(),
            body: BodyHandle(1),
            team: Team::Blue,
            role: Role::Goalie,
            speed: SpeedProfile::for_role(Role::Goalie),
            aux_action: AuxAction::Vision,
            spawn_position: Vec3::zeros(),
            opponent_goal: Vec3::new(16.0, 0.0, 0.0),
        }
    }

    #[test]
    fn test_random_actions_stay_in_range() {
        let mut policy = RandomPolicy::new(3);
        for _ in 0..200 {
            let a = policy.act(&profile(), &Pose::default(), Vec3::zeros());
            assert!(a.forward <= 2 && a.lateral <= 2 && a.rotate <= 2);
            assert!(a.aux.unwrap() <= 2);
        }
    }

    #[test]
    fn test_chase_turns_toward_ball() {
        let mut policy = ChaseBallPolicy { tolerance_deg: 5.0 };
        let pose = Pose::from_yaw_deg(Vec3::zeros(), 0.0);

        let ahead = policy.act(&profile(), &pose, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(ahead, ActionTuple::new(1, 0, 0));

        let right = policy.act(&profile(), &pose, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(right.rotate, 2);

        let left = policy.act(&profile(), &pose, Vec3::new(-5.0, 0.0, 0.0));
        assert_eq!(left.rotate, 1);
    }
}
