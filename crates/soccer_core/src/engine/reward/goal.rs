//! GoalReward - Time-shaped goal reward
//!
//! - 득점: `1 - reset_timer / max_environment_steps`
//! - 실점: -1.0
//!
//! Faster goals earn more; a goal on the last step still earns 0.

/// Remaining share of the step budget, in [0, 1].
///
/// Without a budget (`max_steps == 0`) every goal is worth the full 1.0.
#[inline]
pub fn time_shaping(reset_timer: u32, max_steps: u32) -> f32 {
    if max_steps == 0 {
        return 1.0;
    }
    (1.0 - reset_timer as f32 / max_steps as f32).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalRewardSplit {
    pub scorer: f32,
    pub conceder: f32,
}

/// Sparse group reward applied once per goal event.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalReward;

impl GoalReward {
    pub const CONCEDE_PENALTY: f32 = -1.0;

    pub fn split(&self, reset_timer: u32, max_steps: u32) -> GoalRewardSplit {
        GoalRewardSplit { scorer: time_shaping(reset_timer, max_steps), conceder: Self::CONCEDE_PENALTY }
    }
}
