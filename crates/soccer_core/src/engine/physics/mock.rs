//! In-memory backend without dynamics.
//!
//! Stores poses and velocities, records every impulse, and returns
//! scripted events from `step`. Drives unit tests and offline replays.

use std::collections::{BTreeMap, VecDeque};

use super::{ForceMode, PhysicsBackend, PhysicsEvent};
use crate::engine::types::{BodyHandle, Pose, Vec3};

#[derive(Debug, Clone)]
struct MockBody {
    pose: Pose,
    velocity: Vec3,
    angular_velocity: Vec3,
}

impl MockBody {
    fn at(pose: Pose) -> Self {
        Self { pose, velocity: Vec3::zeros(), angular_velocity: Vec3::zeros() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockPhysics {
    bodies: BTreeMap<BodyHandle, MockBody>,
    impulses: Vec<(BodyHandle, Vec3, ForceMode)>,
    scripted: VecDeque<Vec<PhysicsEvent>>,
    steps: u64,
}

impl MockPhysics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bodies(handles: impl IntoIterator<Item = BodyHandle>) -> Self {
        let mut physics = Self::new();
        for h in handles {
            physics.add_body(h, Pose::default());
        }
        physics
    }

    pub fn add_body(&mut self, body: BodyHandle, pose: Pose) {
        self.bodies.insert(body, MockBody::at(pose));
    }

    pub fn set_velocity(&mut self, body: BodyHandle, velocity: Vec3, angular: Vec3) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.velocity = velocity;
            b.angular_velocity = angular;
        }
    }

    pub fn angular_velocity(&self, body: BodyHandle) -> Option<Vec3> {
        self.bodies.get(&body).map(|b| b.angular_velocity)
    }

    /// Events returned by the next `step` call; later calls queue behind it.
    pub fn script_step(&mut self, events: Vec<PhysicsEvent>) {
        self.scripted.push_back(events);
    }

    pub fn impulses(&self) -> &[(BodyHandle, Vec3, ForceMode)] {
        &self.impulses
    }

    pub fn impulses_on(&self, body: BodyHandle) -> impl Iterator<Item = &(BodyHandle, Vec3, ForceMode)> {
        self.impulses.iter().filter(move |(b, _, _)| *b == body)
    }

    pub fn clear_impulses(&mut self) {
        self.impulses.clear();
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl PhysicsBackend for MockPhysics {
    fn contains(&self, body: BodyHandle) -> bool {
        self.bodies.contains_key(&body)
    }

    fn pose(&self, body: BodyHandle) -> Option<Pose> {
        self.bodies.get(&body).map(|b| b.pose)
    }

    fn velocity(&self, body: BodyHandle) -> Option<Vec3> {
        self.bodies.get(&body).map(|b| b.velocity)
    }

    fn set_pose(&mut self, body: BodyHandle, pose: Pose) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.pose = pose;
        }
    }

    fn zero_velocities(&mut self, body: BodyHandle) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.velocity = Vec3::zeros();
            b.angular_velocity = Vec3::zeros();
        }
    }

    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec3, mode: ForceMode) {
        self.impulses.push((body, impulse, mode));
    }

    fn step(&mut self, _dt: f32) -> Vec<PhysicsEvent> {
        self.steps += 1;
        self.scripted.pop_front().unwrap_or_default()
    }
}
