//! Observation Module - Per-agent feature vectors
//!
//! One observation per agent per decision step, assembled from the agent's
//! own state, its temporal memory and the two sensors.
//!
//! ## Flat layout
//!
//! ```text
//! [0-2]    position relative to the training area
//! [3-5]    velocity
//! [6]      ball-touch coefficient
//! [7-9]    opponent goal - agent position
//! [10]     heading offset (only with observe_heading_offset)
//! [..]     memory snapshots, oldest first (≤ memory_size × snapshot width)
//! [..]     nearby-object offsets, 3 floats each
//! [-3..]   sound flags (ball, ally, enemy)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let assembler = ObservationAssembler::new(false);
//! let obs = assembler.assemble(&inputs, &mut agent.runtime.memory)?;
//! let flat = obs.to_flat_vector();
//! ```

mod agent_vector;
mod builder;
mod common;

pub use agent_vector::AgentObservation;
pub use builder::{ObservationAssembler, ObservationInputs};
pub use common::normalize_or_zero;
