//! Per-agent observation and its flat layout.

use serde::{Deserialize, Serialize};

use crate::engine::memory::MemorySnapshot;
use crate::engine::sensors::SoundCues;
use crate::engine::types::Vec3;

/// Observation of one agent at one decision step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentObservation {
    /// Position relative to the training area origin
    pub position: Vec3,
    pub velocity: Vec3,
    pub ball_touch: f32,
    /// Opponent goal minus agent position (world frame)
    pub goal_offset: Vec3,
    pub heading_offset: Option<f32>,
    /// Earlier snapshots, oldest first; never includes this step
    pub history: Vec<MemorySnapshot>,
    pub nearby: Vec<Vec3>,
    pub sound: SoundCues,
}

impl AgentObservation {
    /// Self-state width without the heading offset.
    pub const SELF_WIDTH: usize = 10;

    pub fn self_width(&self) -> usize {
        Self::SELF_WIDTH + usize::from(self.heading_offset.is_some())
    }

    /// Number of floats produced by `to_flat_vector`.
    pub fn flat_len(&self) -> usize {
        self.self_width()
            + self.history.iter().map(MemorySnapshot::width).sum::<usize>()
            + self.nearby.len() * 3
            + SoundCues::WIDTH
    }

    /// Snapshot of the current step, as it will be remembered.
    pub fn current_snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            position: self.position,
            velocity: self.velocity,
            ball_touch: self.ball_touch,
            goal_offset: self.goal_offset,
            heading_offset: self.heading_offset,
        }
    }

    /// Convert to flat f32 vector for ML pipelines
    pub fn to_flat_vector(&self) -> Vec<f32> {
        let mut v = Vec::with_capacity(self.flat_len());

        // [0-9] self state (+ heading)
        self.current_snapshot().write_to(&mut v);

        // history, oldest first
        for snap in &self.history {
            snap.write_to(&mut v);
        }

        // nearby offsets
        for offset in &self.nearby {
            v.extend_from_slice(offset.as_slice());
        }

        // sound flags
        v.extend_from_slice(&self.sound.to_array());

        debug_assert_eq!(v.len(), self.flat_len());
        v
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
