//! # soccer_core - Two-Team Soccer Training Environment Core
//!
//! Episode lifecycle, rewards and observations for a 2-vs-2 soccer
//! reinforcement-learning scene. Rigid-body simulation lives behind the
//! [`engine::physics::PhysicsBackend`] trait; the core only reads poses,
//! writes impulses and reacts to contact and goal-trigger events.
//!
//! ## Features
//! - Seeded, reproducible kickoff jitter (ChaCha8)
//! - Time-shaped goal reward with group-level terminal/interrupted ends
//! - Bounded observation memory with proximity and sound cues
//! - YAML/JSON scene configuration with JSON Schema export
//!
//! ## 사용 예시 (Usage)
//!
//! ```
//! use soccer_core::engine::config::{EnvConfig, SceneConfig};
//! use soccer_core::engine::physics::MockPhysics;
//! use soccer_core::engine::types::BodyHandle;
//! use soccer_core::{ActionTuple, EpisodeController};
//!
//! let scene = SceneConfig::two_vs_two(EnvConfig::deterministic(42));
//! let physics = MockPhysics::with_bodies((0..=4).map(BodyHandle));
//! let mut env = EpisodeController::new(scene, physics).unwrap();
//!
//! let result = env.step(&[ActionTuple::IDLE; 4], 0.02).unwrap();
//! assert_eq!(result.observations.len(), 4);
//! ```

// Physics-facing helpers take positions, rotations and tuning as separate arguments
#![allow(clippy::too_many_arguments)]
#![allow(clippy::field_reassign_with_default)]

pub mod engine;
pub mod error;

pub use engine::agent::{ActionTuple, AuxAction, AuxEvent};
pub use engine::config::{EnvConfig, SceneConfig};
pub use engine::team_group::{GroupEpisodeSummary, GroupOutcome};
pub use engine::types::{AgentId, BodyHandle, Pose, Role, Team, Vec3, ZoneHandle};
pub use engine::{EpisodeController, EpisodeEnd, EpisodeState, StepResult};
pub use error::{ConfigError, ObservationError, Result, SoccerError};
