//! Soccer episode engine
//!
//! ## 구성 요소 (Components)
//!
//! - `controller`: episode state machine, reset timer, step orchestration
//! - `agent`: roster entries, action decoding, per-agent reward
//! - `team_group`: shared group reward and synchronized episode end
//! - `reward`: goal, contact and existential reward rules, episode metrics
//! - `observation` / `sensors` / `memory`: per-agent observation assembly
//! - `physics`: collaborator boundary plus an in-memory backend
//! - `telemetry`: named scalar metric sinks
//! - `config`: environment and scene settings

pub mod agent;
pub mod config;
pub mod controller;
pub mod memory;
pub mod observation;
pub mod physics;
pub mod reward;
pub mod sensors;
pub mod team_group;
pub mod telemetry;
pub mod types;

pub use controller::{EpisodeController, EpisodeEnd, EpisodeState, EpisodeStats, StepResult};
