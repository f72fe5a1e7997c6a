//! Reward rules for the two-team episode
//!
//! ## 구성 요소
//!
//! - `GoalReward`: time-shaped group reward for the scorer, -1 for the conceder
//! - `CollisionRewardRule`: ball-touch reward and kick impulse on agent/ball contact
//! - `ExistentialReward`: per-action time pressure by role
//! - `PossessionTracker`: possession time keyed by simulation time
//! - `EpisodeMetrics`: per-episode statistics for telemetry
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! let split = GoalReward.split(reset_timer, max_environment_steps);
//! blue_group.add_group_reward(split.scorer);
//! purple_group.add_group_reward(split.conceder);
//! ```

mod collision;
mod episode;
mod existential;
mod goal;
mod possession;

pub use collision::{CollisionRewardRule, ContactOutcome};
pub use episode::{EpisodeMetrics, TerminationReason};
pub use existential::ExistentialReward;
pub use goal::{time_shaping, GoalReward, GoalRewardSplit};
pub use possession::PossessionTracker;
