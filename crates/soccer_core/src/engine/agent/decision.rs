//! Discrete action → movement intent.

use serde::{Deserialize, Serialize};

use super::{AgentProfile, AuxAction};
use crate::engine::types::{Pose, Vec3};
use crate::error::{Result, SoccerError};

/// Largest code on the forward, lateral and rotate axes.
pub const MOVE_AXIS_MAX: u8 = 2;

/// One decision: forward, lateral, rotate and the optional auxiliary axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionTuple {
    pub forward: u8,
    pub lateral: u8,
    pub rotate: u8,
    pub aux: Option<u8>,
}

impl ActionTuple {
    pub const IDLE: ActionTuple = ActionTuple { forward: 0, lateral: 0, rotate: 0, aux: None };

    pub fn new(forward: u8, lateral: u8, rotate: u8) -> Self {
        Self { forward, lateral, rotate, aux: None }
    }

    pub fn with_aux(mut self, aux: u8) -> Self {
        self.aux = Some(aux);
        self
    }

    /// Parses raw policy output, checking arity and every axis range.
    pub fn from_codes(codes: &[i32], aux_action: AuxAction) -> Result<Self> {
        if codes.len() != 3 && codes.len() != 4 {
            return Err(SoccerError::InvalidActionArity(codes.len()));
        }
        let check = |axis: usize, max: u8| -> Result<u8> {
            let code = codes[axis];
            if (0..=max as i32).contains(&code) {
                Ok(code as u8)
            } else {
                Err(SoccerError::InvalidActionCode { axis, code, max: max as i32 })
            }
        };
        Ok(Self {
            forward: check(0, MOVE_AXIS_MAX)?,
            lateral: check(1, MOVE_AXIS_MAX)?,
            rotate: check(2, MOVE_AXIS_MAX)?,
            aux: if codes.len() == 4 { Some(check(3, aux_action.max_code())?) } else { None },
        })
    }
}

/// Side effect of the auxiliary axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AuxEvent {
    PassAttempted,
    HeadingAdjusted { delta_deg: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionOutcome {
    /// Velocity change to submit to physics, already scaled by run speed
    pub velocity_change: Vec3,
    /// Turn to apply to the body this frame
    pub yaw_delta_deg: f32,
    /// Kick power for the next contact evaluation
    pub kick_power: f32,
    pub aux: Option<AuxEvent>,
}

/// Maps an action to the agent's movement intent.
///
/// Directions come from the pose before this frame's turn is applied.
pub fn decide(
    profile: &AgentProfile,
    pose: &Pose,
    action: ActionTuple,
    run_speed: f32,
    rotation_rate_deg: f32,
    vision_step_deg: f32,
    dt: f32,
) -> DecisionOutcome {
    let forward = pose.forward();
    let right = pose.right();
    let mut dir = Vec3::zeros();
    let mut kick_power = 0.0;

    match action.forward {
        1 => {
            dir += forward * profile.speed.forward;
            kick_power = 1.0;
        }
        2 => dir -= forward * profile.speed.forward,
        _ => {}
    }

    match action.lateral {
        1 => dir += right * profile.speed.lateral,
        2 => dir -= right * profile.speed.lateral,
        _ => {}
    }

    let yaw_delta_deg = match action.rotate {
        1 => -rotation_rate_deg * dt,
        2 => rotation_rate_deg * dt,
        _ => 0.0,
    };

    let aux = match (profile.aux_action, action.aux) {
        (AuxAction::Pass, Some(1)) => Some(AuxEvent::PassAttempted),
        (AuxAction::Vision, Some(1)) => Some(AuxEvent::HeadingAdjusted { delta_deg: -vision_step_deg }),
        (AuxAction::Vision, Some(2)) => Some(AuxEvent::HeadingAdjusted { delta_deg: vision_step_deg }),
        _ => None,
    };

    DecisionOutcome { velocity_change: dir * run_speed, yaw_delta_deg, kick_power, aux }
}
