//! Physics collaborator boundary
//!
//! The episode core never integrates motion itself. It reads poses,
//! writes poses and impulses, and consumes the contact/trigger events the
//! backend reports after each step.

mod mock;

pub use mock::MockPhysics;

use crate::engine::types::{BodyHandle, Pose, Vec3, ZoneHandle};

/// How an impulse vector is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceMode {
    /// Instant velocity change, ignoring mass
    VelocityChange,
    /// Continuous force over the next step, mass-dependent
    Force,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhysicsEvent {
    /// Two bodies started touching at `point`
    Contact { a: BodyHandle, b: BodyHandle, point: Vec3 },
    /// `body` entered trigger volume `zone`
    TriggerEnter { body: BodyHandle, zone: ZoneHandle },
}

pub trait PhysicsBackend {
    fn contains(&self, body: BodyHandle) -> bool;

    fn pose(&self, body: BodyHandle) -> Option<Pose>;

    fn velocity(&self, body: BodyHandle) -> Option<Vec3>;

    fn set_pose(&mut self, body: BodyHandle, pose: Pose);

    fn zero_velocities(&mut self, body: BodyHandle);

    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec3, mode: ForceMode);

    /// Advances the simulation by `dt` seconds and reports what happened,
    /// in the order the backend detected it.
    fn step(&mut self, dt: f32) -> Vec<PhysicsEvent>;
}
