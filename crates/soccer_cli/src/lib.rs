//! Soccer CLI Library
//!
//! 헤드리스 에피소드 실행기 (headless episode runner)
//! Kinematic pitch + stand-in policies driving `soccer_core`

pub mod kinematic;
pub mod policy;

use std::path::Path;

use anyhow::{Context, Result};
use soccer_core::engine::physics::PhysicsBackend;
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use soccer_core::engine::reward::TerminationReason;
use soccer_core::{AgentId, EpisodeController, EpisodeEnd, SceneConfig, Team, Vec3};

pub use kinematic::{KinematicPhysics, PitchDimensions};
pub use policy::{ChaseBallPolicy, Policy, PolicyKind, RandomPolicy};

/// Run options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Stop after this many finished episodes
    pub episodes: u64,
    /// Fixed step length in seconds
    pub dt: f32,
    /// Hard cap on total steps (guards against a zero step budget)
    pub step_limit: u64,
    pub policy: PolicyKind,
    /// Policy RNG seed
    pub policy_seed: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { episodes: 10, dt: 0.02, step_limit: 1_000_000, policy: PolicyKind::Random, policy_seed: 0 }
    }
}

/// 실행 요약 (run summary)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub episodes: u64,
    pub goals_blue: u64,
    pub goals_purple: u64,
    pub interrupted: u64,
    pub total_steps: u64,
    /// Blue wins over goal-ended episodes
    pub blue_win_rate: f32,
    /// Summed individual reward per agent name
    pub agent_rewards: Vec<(String, f32)>,
}

impl RunSummary {
    fn record(&mut self, end: &EpisodeEnd) {
        self.episodes += 1;
        match (end.reason, end.scoring_team) {
            (TerminationReason::GoalScored, Some(Team::Blue)) => self.goals_blue += 1,
            (TerminationReason::GoalScored, Some(Team::Purple)) => self.goals_purple += 1,
            _ => self.interrupted += 1,
        }
    }
}

/// 씬 파일 로드 (YAML/JSON by extension)
pub fn load_scene(path: &Path) -> Result<SceneConfig> {
    SceneConfig::load(path).with_context(|| format!("Failed to load scene: {}", path.display()))
}

/// Runs episodes on the kinematic pitch until `options.episodes` have ended.
pub fn run_episodes(scene: SceneConfig, options: &RunOptions) -> Result<RunSummary> {
    let physics = KinematicPhysics::from_scene(&scene, PitchDimensions::default());
    let mut env = EpisodeController::new(scene, physics).context("Failed to build episode controller")?;
    let mut policy = options.policy.build(options.policy_seed);
    let mut summary = RunSummary::default();
    let mut rewards = vec![0.0_f32; env.agents().len()];

    info!(episodes = options.episodes, dt = options.dt, policy = ?options.policy, "run started");

    while summary.episodes < options.episodes && summary.total_steps < options.step_limit {
        let ball = env.physics().pose(env.ball_body()).map(|p| p.position).unwrap_or_else(Vec3::zeros);
        let actions = policy::roster_actions(policy.as_mut(), env.agents(), env.physics(), ball);
        let result = env.step(&actions, options.dt)?;
        summary.total_steps += 1;

        for (idx, reward) in rewards.iter_mut().enumerate() {
            *reward += env.take_agent_reward(AgentId(idx))?;
        }
        for end in &result.episode_ends {
            info!(episode = end.episode, reason = ?end.reason, steps = end.steps, "episode ended");
            summary.record(end);
        }
        for team in Team::ALL {
            env.drain_group_summaries(team);
        }
    }

    summary.blue_win_rate = env.stats().blue_win_rate();
    summary.agent_rewards = env
        .agents()
        .iter()
        .zip(rewards)
        .map(|(agent, reward)| (agent.profile.name.clone(), reward))
        .collect();

    info!(
        episodes = summary.episodes,
        goals_blue = summary.goals_blue,
        goals_purple = summary.goals_purple,
        interrupted = summary.interrupted,
        steps = summary.total_steps,
        "run finished"
    );
    Ok(summary)
}

/// Installs the global `tracing` subscriber; `RUST_LOG` overrides `default_filter`.
pub fn init_tracing(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")
}
