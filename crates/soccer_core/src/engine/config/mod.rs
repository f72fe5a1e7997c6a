//! # Scene Configuration
//!
//! Static settings handed to the episode controller at construction.
//!
//! ## 사용법
//! ```rust
//! use soccer_core::engine::config::{EnvConfig, SceneConfig};
//!
//! let scene = SceneConfig::two_vs_two(EnvConfig::fast_episodes());
//! assert!(scene.validate().is_ok());
//! ```

mod env_config;
mod reset_params;
mod scene_config;

pub use env_config::EnvConfig;
pub use reset_params::{ResetParameters, BALL_TOUCH_KEY};
pub use scene_config::{AgentConfig, BallConfig, GoalConfig, SceneConfig};

/// JSON schema of the scene file, for editor tooling.
pub fn scene_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(SceneConfig)
}
