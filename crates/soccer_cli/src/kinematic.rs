//! Kinematic pitch used by the headless runner.
//!
//! Point-mass bodies on a flat, walled pitch. No rotation dynamics, no
//! body/body separation. Enough to exercise the episode core end to end:
//! agents push themselves around, the ball takes kicks, and goal volumes
//! fire when the ball centre enters them.

use std::collections::{BTreeMap, BTreeSet};

use soccer_core::engine::config::SceneConfig;
use soccer_core::engine::physics::{ForceMode, PhysicsBackend, PhysicsEvent};
use soccer_core::engine::types::{vec3, BodyHandle, Pose, Vec3, ZoneHandle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchDimensions {
    /// Half length along x; goals sit inside this
    pub half_length: f32,
    /// Half width along z
    pub half_width: f32,
    /// Goal volume half extents (x, y, z) around each goal position
    pub goal_half_extents: Vec3,
    /// Velocity kept after bouncing off a wall
    pub restitution: f32,
}

impl Default for PitchDimensions {
    fn default() -> Self {
        Self {
            half_length: 17.0,
            half_width: 10.0,
            goal_half_extents: Vec3::new(1.0, 2.0, 3.0),
            restitution: 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct KinematicBody {
    pose: Pose,
    velocity: Vec3,
    pending_force: Vec3,
    radius: f32,
    mass: f32,
    /// Fraction of velocity lost per second
    drag: f32,
}

impl KinematicBody {
    fn new(pose: Pose, radius: f32, mass: f32, drag: f32) -> Self {
        Self { pose, velocity: Vec3::zeros(), pending_force: Vec3::zeros(), radius, mass, drag }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct GoalVolume {
    zone: ZoneHandle,
    center: Vec3,
}

#[derive(Debug, Clone)]
pub struct KinematicPhysics {
    pitch: PitchDimensions,
    bodies: BTreeMap<BodyHandle, KinematicBody>,
    ball: BodyHandle,
    goals: Vec<GoalVolume>,
    touching: BTreeSet<BodyHandle>,
    ball_in_goal: Option<ZoneHandle>,
}

impl KinematicPhysics {
    pub const BALL_RADIUS: f32 = 0.5;
    pub const BALL_MASS: f32 = 4.0;
    pub const AGENT_RADIUS: f32 = 0.5;
    pub const AGENT_MASS: f32 = 1.0;

    /// Builds one body per scene entity at its configured spawn.
    pub fn from_scene(scene: &SceneConfig, pitch: PitchDimensions) -> Self {
        let mut bodies = BTreeMap::new();
        let ball_pose = Pose::from_yaw_deg(vec3(scene.ball.start_position), 0.0);
        bodies.insert(scene.ball.body, KinematicBody::new(ball_pose, Self::BALL_RADIUS, Self::BALL_MASS, 0.5));
        for agent in &scene.agents {
            let pose = Pose::from_yaw_deg(vec3(agent.spawn_position), 0.0);
            bodies.insert(agent.body, KinematicBody::new(pose, Self::AGENT_RADIUS, Self::AGENT_MASS, 20.0));
        }
        let goals = scene
            .goals
            .iter()
            .map(|g| GoalVolume { zone: g.zone, center: vec3(g.position) })
            .collect();

        Self {
            pitch,
            bodies,
            ball: scene.ball.body,
            goals,
            touching: BTreeSet::new(),
            ball_in_goal: None,
        }
    }

    pub fn pitch(&self) -> &PitchDimensions {
        &self.pitch
    }

    fn integrate(&mut self, dt: f32) {
        let pitch = self.pitch;
        for body in self.bodies.values_mut() {
            body.velocity += body.pending_force / body.mass * dt;
            body.pending_force = Vec3::zeros();
            body.velocity *= (1.0 - body.drag * dt).max(0.0);
            body.velocity.y = 0.0;
            body.pose.position += body.velocity * dt;

            let limit_x = pitch.half_length - body.radius;
            let limit_z = pitch.half_width - body.radius;
            if body.pose.position.x.abs() > limit_x {
                body.pose.position.x = limit_x.copysign(body.pose.position.x);
                body.velocity.x = -body.velocity.x * pitch.restitution;
            }
            if body.pose.position.z.abs() > limit_z {
                body.pose.position.z = limit_z.copysign(body.pose.position.z);
                body.velocity.z = -body.velocity.z * pitch.restitution;
            }
        }
    }

    fn contacts(&mut self, events: &mut Vec<PhysicsEvent>) {
        let Some(ball) = self.bodies.get(&self.ball).copied() else {
            return;
        };
        for (&handle, body) in &self.bodies {
            if handle == self.ball {
                continue;
            }
            let offset = ball.pose.position - body.pose.position;
            let overlapping = offset.norm() <= ball.radius + body.radius;
            if overlapping && self.touching.insert(handle) {
                let dir = offset.try_normalize(1e-6).unwrap_or_else(Vec3::zeros);
                let point = body.pose.position + dir * body.radius;
                events.push(PhysicsEvent::Contact { a: handle, b: self.ball, point });
            } else if !overlapping {
                self.touching.remove(&handle);
            }
        }
    }

    fn goal_triggers(&mut self, events: &mut Vec<PhysicsEvent>) {
        let Some(ball) = self.bodies.get(&self.ball) else {
            return;
        };
        let half = self.pitch.goal_half_extents;
        let inside = self.goals.iter().find(|g| {
            let d = ball.pose.position - g.center;
            d.x.abs() <= half.x && d.y.abs() <= half.y && d.z.abs() <= half.z
        });
        match inside {
            Some(goal) if self.ball_in_goal != Some(goal.zone) => {
                self.ball_in_goal = Some(goal.zone);
                events.push(PhysicsEvent::TriggerEnter { body: self.ball, zone: goal.zone });
            }
            Some(_) => {}
            None => self.ball_in_goal = None,
        }
    }
}

impl PhysicsBackend for KinematicPhysics {
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
        if body == self.ball {
            self.ball_in_goal = None;
        }
    }

    fn zero_velocities(&mut self, body: BodyHandle) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.velocity = Vec3::zeros();
            b.pending_force = Vec3::zeros();
        }
    }

    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec3, mode: ForceMode) {
        let Some(b) = self.bodies.get_mut(&body) else {
            return;
        };
        match mode {
            ForceMode::VelocityChange => b.velocity += impulse,
            ForceMode::Force => b.pending_force += impulse,
        }
    }

    fn step(&mut self, dt: f32) -> Vec<PhysicsEvent> {
        self.integrate(dt);
        let mut events = Vec::new();
        self.contacts(&mut events);
        self.goal_triggers(&mut events);
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soccer_core::engine::config::EnvConfig;

    fn pitch() -> KinematicPhysics {
        KinematicPhysics::from_scene(&SceneConfig::two_vs_two(EnvConfig::default()), PitchDimensions::default())
    }

    #[test]
    fn test_bodies_from_scene() {
        let physics = pitch();
        for handle in 0..=4 {
            assert!(physics.contains(BodyHandle(handle)));
        }
        assert!(!physics.contains(BodyHandle(5)));
    }

    #[test]
    fn test_force_moves_ball() {
        let mut physics = pitch();
        physics.apply_impulse(BodyHandle(0), Vec3::new(200.0, 0.0, 0.0), ForceMode::Force);
        physics.step(0.02);
        let v = physics.velocity(BodyHandle(0)).unwrap();
        assert!(v.x > 0.0);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn test_contact_reported_once_per_touch() {
        let mut physics = pitch();
        let ball = physics.pose(BodyHandle(0)).unwrap().position;
        physics.set_pose(BodyHandle(1), Pose::from_yaw_deg(ball - Vec3::new(0.8, 0.0, 0.0), 0.0));

        let events = physics.step(0.02);
        assert!(events
            .iter()
            .any(|e| matches!(e, PhysicsEvent::Contact { a: BodyHandle(1), b: BodyHandle(0), .. })));
        assert!(physics.step(0.02).is_empty());
    }

    #[test]
    fn test_ball_in_goal_triggers_once() {
        let mut physics = pitch();
        physics.set_pose(BodyHandle(0), Pose::from_yaw_deg(Vec3::new(15.8, 0.5, 0.0), 0.0));

        let events = physics.step(0.02);
        assert_eq!(events, vec![PhysicsEvent::TriggerEnter { body: BodyHandle(0), zone: ZoneHandle(1) }]);
        assert!(physics.step(0.02).is_empty());
    }

    #[test]
    fn test_walls_keep_bodies_on_pitch() {
        let mut physics = pitch();
        physics.apply_impulse(BodyHandle(3), Vec3::new(0.0, 0.0, 500.0), ForceMode::VelocityChange);
        for _ in 0..50 {
            physics.step(0.02);
        }
        let z = physics.pose(BodyHandle(3)).unwrap().position.z;
        assert!(z.abs() <= 10.0);
    }
}
