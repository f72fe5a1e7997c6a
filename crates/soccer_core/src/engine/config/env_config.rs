//! Environment tuning parameters

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::ConfigError;

/// Per-environment knobs shared by every agent of the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(default)]
pub struct EnvConfig {
    // === Episode ===
    /// Fixed steps before the episode is interrupted, 0 disables the limit (기본: 25000)
    pub max_environment_steps: u32,
    /// Seed for spawn randomization; entropy when absent
    pub seed: Option<u64>,

    // === Observation ===
    /// Temporal memory capacity in snapshots (기본: 5)
    #[validate(range(max = 64))]
    pub memory_size: usize,
    /// Sound cue radius (기본: 10.0)
    #[validate(range(min = 0.0))]
    pub hearing_radius: f32,
    /// Nearby-object search radius (기본: 10.0)
    #[validate(range(min = 0.0))]
    pub proximity_radius: f32,
    /// Append the running heading offset to observations and snapshots
    pub observe_heading_offset: bool,

    // === Movement ===
    /// Scale on the role speed profile (기본: 2.0)
    #[validate(range(min = 0.0))]
    pub agent_run_speed: f32,
    /// Turn rate in degrees per second of frame time (기본: 100.0)
    #[validate(range(min = 0.0))]
    pub rotation_rate_deg: f32,
    /// Heading offset increment for the vision action (기본: 10.0)
    #[validate(range(min = 0.0, max = 180.0))]
    pub vision_step_deg: f32,

    // === Ball contact ===
    /// Kick force at full kick power (기본: 2000.0)
    #[validate(range(min = 0.0))]
    pub kick_base_power: f32,
    /// Reward per touch, multiplied by the ball-touch coefficient (기본: 0.2)
    pub ball_touch_reward_scale: f32,

    // === Reset ===
    /// Ball respawn half-extent on both horizontal axes (기본: 2.5)
    #[validate(range(min = 0.0))]
    pub ball_spawn_jitter: f32,
    /// Agent respawn half-extent on the x axis (기본: 5.0)
    #[validate(range(min = 0.0))]
    pub agent_spawn_jitter: f32,
    /// Kickoff heading magnitude range in degrees (기본: [80, 100])
    #[validate(custom = "validate_heading_range")]
    pub heading_range_deg: [f32; 2],

    // === Rewards / telemetry ===
    /// Per-action time reward: goalie +1/steps, striker -1/steps
    pub existential_reward: bool,
    /// Accumulate possession time from ball contacts
    pub track_possession: bool,
    /// Log cross-episode stats every N finished episodes (기본: 100)
    #[validate(range(min = 1))]
    pub stats_log_interval: u32,
}

fn validate_heading_range(range: &[f32; 2]) -> Result<(), ValidationError> {
    let [lo, hi] = *range;
    if lo.is_finite() && hi.is_finite() && 0.0 <= lo && lo <= hi && hi <= 180.0 {
        Ok(())
    } else {
        Err(ValidationError::new("heading_range_deg"))
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            max_environment_steps: 25_000,
            seed: None,

            memory_size: 5,
            hearing_radius: 10.0,
            proximity_radius: 10.0,
            observe_heading_offset: false,

            agent_run_speed: 2.0,
            rotation_rate_deg: 100.0,
            vision_step_deg: 10.0,

            kick_base_power: 2000.0,
            ball_touch_reward_scale: 0.2,

            ball_spawn_jitter: 2.5,
            agent_spawn_jitter: 5.0,
            heading_range_deg: [80.0, 100.0],

            existential_reward: true,
            track_possession: true,
            stats_log_interval: 100,
        }
    }
}

impl EnvConfig {
    /// Short episodes for smoke runs
    pub fn fast_episodes() -> Self {
        let mut cfg = Self::default();
        cfg.max_environment_steps = 1_000;
        cfg.stats_log_interval = 10;
        cfg
    }

    /// Seeded spawns for reproducible tests
    pub fn deterministic(seed: u64) -> Self {
        let mut cfg = Self::default();
        cfg.seed = Some(seed);
        cfg
    }

    /// Rejects NaN and infinite tunables, which range bounds let through.
    pub fn check_finite(&self) -> Result<(), ConfigError> {
        let fields = [
            ("hearing_radius", self.hearing_radius),
            ("proximity_radius", self.proximity_radius),
            ("agent_run_speed", self.agent_run_speed),
            ("rotation_rate_deg", self.rotation_rate_deg),
            ("vision_step_deg", self.vision_step_deg),
            ("kick_base_power", self.kick_base_power),
            ("ball_touch_reward_scale", self.ball_touch_reward_scale),
            ("ball_spawn_jitter", self.ball_spawn_jitter),
            ("agent_spawn_jitter", self.agent_spawn_jitter),
        ];
        match fields.iter().find(|(_, v)| !v.is_finite()) {
            Some((name, v)) => Err(ConfigError::Bounds(format!("{name} must be finite, got {v}"))),
            None => Ok(()),
        }
    }

    /// Time-based reward per applied action; zero without a step budget.
    pub fn existential_step(&self) -> f32 {
        if self.max_environment_steps == 0 {
            0.0
        } else {
            1.0 / self.max_environment_steps as f32
        }
    }
}
