//! Engine Types
//!
//! Identity enums and handles shared by every module of the episode core.

use nalgebra::{UnitQuaternion, Vector3};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type Vec3 = Vector3<f32>;

/// Builds a vector from the `[x, y, z]` form used in config files.
#[inline]
pub fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::new(v[0], v[1], v[2])
}

// ===========================================
// Team / Role
// ===========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Blue,
    Purple,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::Blue, Team::Purple];

    pub fn opponent(self) -> Team {
        match self {
            Team::Blue => Team::Purple,
            Team::Purple => Team::Blue,
        }
    }

    /// Blue faces +yaw at kickoff, Purple the mirrored heading.
    pub fn rotation_sign(self) -> f32 {
        match self {
            Team::Blue => 1.0,
            Team::Purple => -1.0,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Team::Blue => 0,
            Team::Purple => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Team::Blue => "Blue",
            Team::Purple => "Purple",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Striker,
    Goalie,
    Generic,
}

// ===========================================
// Handles
// ===========================================

/// Index of an agent in the controller roster (registration order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub usize);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Rigid body handle owned by the physics collaborator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct BodyHandle(pub u32);

/// Trigger volume handle owned by the physics collaborator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct ZoneHandle(pub u32);

// ===========================================
// Pose
// ===========================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: UnitQuaternion<f32>,
}

impl Pose {
    pub fn new(position: Vec3, rotation: UnitQuaternion<f32>) -> Self {
        Self { position, rotation }
    }

    pub fn from_yaw_deg(position: Vec3, yaw_deg: f32) -> Self {
        Self { position, rotation: yaw_rotation(yaw_deg) }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::z()
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::x()
    }

    /// Heading around the vertical axis, in degrees within (-180, 180].
    pub fn heading_deg(&self) -> f32 {
        let f = self.forward();
        f.x.atan2(f.z).to_degrees()
    }

    /// Turns the pose around the vertical axis.
    pub fn rotated_yaw(&self, delta_deg: f32) -> Self {
        Self { position: self.position, rotation: yaw_rotation(delta_deg) * self.rotation }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self { position: Vec3::zeros(), rotation: UnitQuaternion::identity() }
    }
}

#[inline]
pub fn yaw_rotation(deg: f32) -> UnitQuaternion<f32> {
    UnitQuaternion::from_axis_angle(&Vec3::y_axis(), deg.to_radians())
}
