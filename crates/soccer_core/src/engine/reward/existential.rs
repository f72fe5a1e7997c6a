//! Per-action time pressure: goalies are paid to hold, strikers to hurry.

use crate::engine::types::Role;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExistentialReward {
    step: f32,
    enabled: bool,
}

impl ExistentialReward {
    /// `step` is `1 / max_environment_steps`, or 0 without a budget.
    pub fn new(step: f32, enabled: bool) -> Self {
        Self { step, enabled }
    }

    pub fn for_role(&self, role: Role) -> f32 {
        if !self.enabled {
            return 0.0;
        }
        match role {
            Role::Goalie => self.step,
            Role::Striker => -self.step,
            Role::Generic => 0.0,
        }
    }
}
