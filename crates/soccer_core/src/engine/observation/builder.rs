//! Observation assembly
//!
//! Reads the agent's memory as it was before this step, then remembers
//! this step. The returned observation therefore never contains its own
//! snapshot in `history`.

use super::AgentObservation;
use crate::engine::memory::{MemorySnapshot, TemporalMemory};
use crate::engine::sensors::SoundCues;
use crate::engine::types::Vec3;
use crate::error::ObservationError;

/// Everything the assembler needs for one agent at one step.
#[derive(Debug, Clone)]
pub struct ObservationInputs {
    /// World-frame position
    pub position: Vec3,
    pub velocity: Vec3,
    /// Training area origin; observed position is `position - area_origin`
    pub area_origin: Vec3,
    pub ball_touch: f32,
    pub opponent_goal: Option<Vec3>,
    pub heading_offset: f32,
    pub nearby: Vec<Vec3>,
    pub sound: SoundCues,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObservationAssembler {
    include_heading: bool,
}

impl ObservationAssembler {
    pub fn new(include_heading: bool) -> Self {
        Self { include_heading }
    }

    pub fn includes_heading(&self) -> bool {
        self.include_heading
    }

    /// Builds the observation and pushes this step's snapshot into `memory`.
    ///
    /// Fails without touching `memory` when the opponent goal is unset.
    pub fn assemble(
        &self,
        inputs: ObservationInputs,
        memory: &mut TemporalMemory<MemorySnapshot>,
    ) -> Result<AgentObservation, ObservationError> {
        let goal = inputs.opponent_goal.ok_or(ObservationError::MissingOpponentGoal)?;

        let obs = AgentObservation {
            position: inputs.position - inputs.area_origin,
            velocity: inputs.velocity,
            ball_touch: inputs.ball_touch,
            goal_offset: goal - inputs.position,
            heading_offset: self.include_heading.then_some(inputs.heading_offset),
            history: memory.iter().copied().collect(),
            nearby: inputs.nearby,
            sound: inputs.sound,
        };

        memory.push(obs.current_snapshot());
        Ok(obs)
    }
}
