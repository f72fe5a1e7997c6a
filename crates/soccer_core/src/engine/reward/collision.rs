//! CollisionRewardRule - Agent/ball contact
//!
//! - reward: `touch_scale × ball_touch`
//! - impulse: `base_power × kick_power`; goalies always kick at `base_power`
//! - direction: from the agent toward the contact point, normalized

use crate::engine::observation::normalize_or_zero;
use crate::engine::types::{Role, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactOutcome {
    /// Immediate reward for the touching agent
    pub reward: f32,
    /// Force to apply to the ball; zero when the direction is degenerate
    pub impulse: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionRewardRule {
    base_power: f32,
    touch_scale: f32,
}

impl CollisionRewardRule {
    pub const DEFAULT_BASE_POWER: f32 = 2000.0;
    pub const DEFAULT_TOUCH_SCALE: f32 = 0.2;

    pub fn new(base_power: f32, touch_scale: f32) -> Self {
        Self { base_power, touch_scale }
    }

    pub fn kick_force(&self, role: Role, kick_power: f32) -> f32 {
        match role {
            Role::Goalie => self.base_power,
            Role::Striker | Role::Generic => self.base_power * kick_power,
        }
    }

    pub fn evaluate(
        &self,
        role: Role,
        kick_power: f32,
        ball_touch: f32,
        contact_point: Vec3,
        agent_position: Vec3,
    ) -> ContactOutcome {
        let dir = normalize_or_zero(contact_point - agent_position);
        ContactOutcome {
            reward: self.touch_scale * ball_touch,
            impulse: dir * self.kick_force(role, kick_power),
        }
    }
}

impl Default for CollisionRewardRule {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_POWER, Self::DEFAULT_TOUCH_SCALE)
    }
}
