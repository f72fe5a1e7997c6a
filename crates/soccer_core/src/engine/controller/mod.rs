//! EpisodeController - episode lifecycle for one training area
//!
//! Owns the reset timer, both team groups, the roster and the ball, and
//! drives the `Running → Resetting → Running` cycle.
//!
//! ## Step order
//!
//! 1. advance the reset timer (may interrupt and reset)
//! 2. apply every agent's action
//! 3. advance the physics collaborator
//! 4. dispatch its contact/trigger events (may score and reset)
//! 5. assemble one observation per agent
//!
//! Everything runs on the caller's thread; there are no locks and no
//! suspension points.

mod stats;

#[cfg(test)]
mod tests;

pub use stats::EpisodeStats;

use std::collections::HashMap;

use nalgebra::UnitQuaternion;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::engine::agent::{
    decide, ActionTuple, AgentProfile, AuxEvent, SoccerAgent, MOVE_AXIS_MAX,
};
use crate::engine::config::{EnvConfig, ResetParameters, SceneConfig};
use crate::engine::observation::{AgentObservation, ObservationAssembler, ObservationInputs};
use crate::engine::physics::{ForceMode, PhysicsBackend, PhysicsEvent};
use crate::engine::reward::{
    CollisionRewardRule, EpisodeMetrics, ExistentialReward, GoalReward, PossessionTracker,
    TerminationReason,
};
use crate::engine::sensors::{EntityKind, ProximityDetector, SoundDetector, WorldEntity, WorldView};
use crate::engine::team_group::{GroupEpisodeSummary, TeamGroup};
use crate::engine::telemetry::{keys, TelemetrySink, TracingTelemetry};
use crate::engine::types::{vec3, AgentId, BodyHandle, Pose, Team, Vec3, ZoneHandle};
use crate::error::{ConfigError, Result, SoccerError};

// ============================================================================
// State / results
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeState {
    Running,
    /// Transient: only observable from inside a reset
    Resetting,
}

/// How and when an episode finished.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeEnd {
    /// 1-based index of the finished episode
    pub episode: u64,
    pub reason: TerminationReason,
    pub scoring_team: Option<Team>,
    /// Reset timer value when the episode ended
    pub steps: u32,
}

#[derive(Debug, Clone)]
pub struct StepResult {
    /// One observation per agent, in roster order
    pub observations: Vec<AgentObservation>,
    /// Episodes finished during this step (at most one per cause)
    pub episode_ends: Vec<EpisodeEnd>,
    pub aux_events: Vec<(AgentId, AuxEvent)>,
}

#[derive(Debug, Clone, Copy)]
struct GoalZone {
    zone: ZoneHandle,
    defended_by: Team,
    position: Vec3,
}

// ============================================================================
// EpisodeController
// ============================================================================

pub struct EpisodeController<P: PhysicsBackend, T: TelemetrySink = TracingTelemetry> {
    config: EnvConfig,
    area_origin: Vec3,
    physics: P,
    telemetry: T,

    ball_body: BodyHandle,
    ball_start: Vec3,
    goals: Vec<GoalZone>,
    agents: Vec<SoccerAgent>,
    agent_by_body: HashMap<BodyHandle, AgentId>,
    groups: [TeamGroup; 2],
    reset_parameters: ResetParameters,

    state: EpisodeState,
    reset_timer: u32,
    episode: u64,
    sim_time: f64,
    rng: ChaCha8Rng,

    goal_reward: GoalReward,
    collision: CollisionRewardRule,
    existential: ExistentialReward,
    assembler: ObservationAssembler,
    proximity: ProximityDetector,
    sound: SoundDetector,

    possession: PossessionTracker,
    metrics: EpisodeMetrics,
    stats: EpisodeStats,
}

impl<P: PhysicsBackend> EpisodeController<P, TracingTelemetry> {
    /// Controller that reports metrics through `tracing`.
    pub fn new(scene: SceneConfig, physics: P) -> std::result::Result<Self, ConfigError> {
        Self::with_telemetry(scene, physics, TracingTelemetry)
    }
}

impl<P: PhysicsBackend, T: TelemetrySink> EpisodeController<P, T> {
    /// Validates the scene against the physics backend, registers both
    /// groups and performs the first reset.
    ///
    /// Any missing body or goal is fatal; the controller is never built.
    pub fn with_telemetry(
        scene: SceneConfig,
        physics: P,
        telemetry: T,
    ) -> std::result::Result<Self, ConfigError> {
        scene.validate()?;

        if !physics.contains(scene.ball.body) {
            return Err(ConfigError::MissingBallBody(scene.ball.body));
        }

        let goals: Vec<GoalZone> = scene
            .goals
            .iter()
            .map(|g| GoalZone { zone: g.zone, defended_by: g.defended_by, position: vec3(g.position) })
            .collect();

        let mut agents = Vec::with_capacity(scene.agents.len());
        let mut agent_by_body = HashMap::new();
        let mut groups = [TeamGroup::new(Team::Blue), TeamGroup::new(Team::Purple)];

        for (idx, cfg) in scene.agents.iter().enumerate() {
            if !physics.contains(cfg.body) {
                return Err(ConfigError::MissingAgentBody { name: cfg.name.clone(), body: cfg.body });
            }
            let attacked = cfg.team.opponent();
            let opponent_goal = goals
                .iter()
                .find(|g| g.defended_by == attacked)
                .map(|g| g.position)
                .ok_or(ConfigError::MissingGoal(attacked))?;

            let id = AgentId(idx);
            let profile = AgentProfile::from_config(id, cfg, opponent_goal);
            groups[cfg.team.index()].register(id, cfg.team)?;
            agent_by_body.insert(cfg.body, id);
            agents.push(SoccerAgent::new(profile, scene.env.memory_size));
        }

        let config = scene.env;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut controller = Self {
            area_origin: vec3(scene.area_origin),
            physics,
            telemetry,
            ball_body: scene.ball.body,
            ball_start: vec3(scene.ball.start_position),
            goals,
            agents,
            agent_by_body,
            groups,
            reset_parameters: ResetParameters::new(scene.reset_parameters),
            state: EpisodeState::Resetting,
            reset_timer: 0,
            episode: 0,
            sim_time: 0.0,
            rng,
            goal_reward: GoalReward,
            collision: CollisionRewardRule::new(config.kick_base_power, config.ball_touch_reward_scale),
            existential: ExistentialReward::new(config.existential_step(), config.existential_reward),
            assembler: ObservationAssembler::new(config.observe_heading_offset),
            proximity: ProximityDetector::new(config.proximity_radius),
            sound: SoundDetector::new(config.hearing_radius),
            possession: PossessionTracker::new(),
            metrics: EpisodeMetrics::new(),
            stats: EpisodeStats::default(),
            config,
        };

        info!(
            agents = controller.agents.len(),
            blue = controller.groups[0].members().len(),
            purple = controller.groups[1].members().len(),
            max_steps = controller.config.max_environment_steps,
            "episode controller ready"
        );

        controller.reset_episode();
        Ok(controller)
    }

    // ========================================================================
    // Episode state machine
    // ========================================================================

    /// Advances the reset timer by one fixed step.
    ///
    /// When the budget is exhausted both groups are interrupted and the
    /// scene resets.
    pub fn tick(&mut self) -> Option<EpisodeEnd> {
        self.reset_timer += 1;
        self.metrics.record_step();

        let max = self.config.max_environment_steps;
        if max > 0 && self.reset_timer >= max {
            let steps = self.reset_timer;
            for group in &mut self.groups {
                group.group_episode_interrupted(steps);
            }
            let end = self.finish_episode(TerminationReason::MaxStepsReached, None);
            self.reset_episode();
            return Some(end);
        }
        None
    }

    /// Applies the goal reward, ends both group episodes and resets.
    pub fn on_goal(&mut self, scoring: Team) -> EpisodeEnd {
        let split = self.goal_reward.split(self.reset_timer, self.config.max_environment_steps);
        let conceding = scoring.opponent();

        self.groups[scoring.index()].add_group_reward(split.scorer);
        self.groups[conceding.index()].add_group_reward(split.conceder);
        self.metrics.record_group_reward(scoring, split.scorer);
        self.metrics.record_group_reward(conceding, split.conceder);
        self.metrics.record_goal(scoring);
        self.telemetry.record(keys::GOALS_SCORED, 1.0);

        let steps = self.reset_timer;
        for group in &mut self.groups {
            group.end_group_episode(steps);
        }

        let end = self.finish_episode(TerminationReason::GoalScored, Some(scoring));
        self.reset_episode();
        end
    }

    /// Puts the ball and every agent back at kickoff with fresh jitter.
    ///
    /// Group rewards are untouched; only `on_goal` and the step budget end
    /// a group episode.
    pub fn reset_episode(&mut self) {
        self.state = EpisodeState::Resetting;
        self.reset_timer = 0;
        self.episode += 1;

        let ball_touch = self.reset_parameters.ball_touch();
        let [heading_lo, heading_hi] = self.config.heading_range_deg;
        let agent_jitter = self.config.agent_spawn_jitter;

        for agent in &mut self.agents {
            let dx = self.rng.gen_range(-agent_jitter..=agent_jitter);
            let position = agent.profile.spawn_position + Vec3::new(dx, 0.0, 0.0);
            let heading = agent.profile.rotation_sign() * self.rng.gen_range(heading_lo..=heading_hi);

            self.physics.set_pose(agent.profile.body, Pose::from_yaw_deg(position, heading));
            self.physics.zero_velocities(agent.profile.body);
            agent.runtime.begin_episode(ball_touch);
        }

        let ball_jitter = self.config.ball_spawn_jitter;
        let offset = Vec3::new(
            self.rng.gen_range(-ball_jitter..=ball_jitter),
            0.0,
            self.rng.gen_range(-ball_jitter..=ball_jitter),
        );
        self.physics
            .set_pose(self.ball_body, Pose::new(self.ball_start + offset, UnitQuaternion::identity()));
        self.physics.zero_velocities(self.ball_body);

        self.possession.reset(self.sim_time);
        self.metrics.reset();
        self.state = EpisodeState::Running;

        debug!(episode = self.episode, "episode reset");
    }

    fn finish_episode(&mut self, reason: TerminationReason, scoring_team: Option<Team>) -> EpisodeEnd {
        self.state = EpisodeState::Resetting;
        self.metrics.set_termination(reason);

        self.possession.credit(self.sim_time);
        for team in Team::ALL {
            self.metrics.possession_seconds[team.index()] = self.possession.seconds(team);
        }
        self.metrics.possession_changes = self.possession.changes();

        if self.config.track_possession {
            self.telemetry
                .record(keys::POSSESSION_TIME_BLUE, self.possession.seconds(Team::Blue) as f32);
            self.telemetry
                .record(keys::POSSESSION_TIME_PURPLE, self.possession.seconds(Team::Purple) as f32);
        }
        self.telemetry.record(keys::EPISODE_LENGTH, self.reset_timer as f32);

        if reason.is_goal() {
            self.stats.record(&self.metrics);
            self.telemetry.record(keys::BLUE_WIN_RATE, self.stats.blue_win_rate());
            self.telemetry.record(keys::AVG_BLUE_GOALS, self.stats.avg_goals(Team::Blue));
            self.telemetry.record(keys::AVG_PURPLE_GOALS, self.stats.avg_goals(Team::Purple));

            if self.stats.episodes % u64::from(self.config.stats_log_interval) == 0 {
                info!(
                    episodes = self.stats.episodes,
                    blue_win_rate = self.stats.blue_win_rate(),
                    avg_blue_goals = self.stats.avg_goals(Team::Blue),
                    avg_purple_goals = self.stats.avg_goals(Team::Purple),
                    "episode stats"
                );
            }
        }

        let end = EpisodeEnd { episode: self.episode, reason, scoring_team, steps: self.reset_timer };
        debug!(?end, "episode finished");
        end
    }

    // ========================================================================
    // Agent decisions
    // ========================================================================

    /// Range-checks every axis of `action` against the agent's action space.
    pub fn check_action(&self, id: AgentId, action: &ActionTuple) -> Result<()> {
        let agent = self.agents.get(id.0).ok_or(SoccerError::UnknownAgent(id))?;

        for (axis, code) in [action.forward, action.lateral, action.rotate].into_iter().enumerate() {
            if code > MOVE_AXIS_MAX {
                return Err(SoccerError::InvalidActionCode { axis, code: code as i32, max: MOVE_AXIS_MAX as i32 });
            }
        }
        if let Some(code) = action.aux {
            let max = agent.profile.aux_action.max_code();
            if code > max {
                return Err(SoccerError::InvalidActionCode { axis: 3, code: code as i32, max: max as i32 });
            }
        }
        Ok(())
    }

    /// Turns one action into a velocity change and turn on the agent body.
    pub fn apply_action(&mut self, id: AgentId, action: ActionTuple, dt: f32) -> Result<Option<AuxEvent>> {
        self.check_action(id, &action)?;
        let agent = self.agents.get_mut(id.0).ok_or(SoccerError::UnknownAgent(id))?;

        let body = agent.profile.body;
        let pose = self.physics.pose(body).ok_or(SoccerError::BodyUnavailable(body))?;
        let out = decide(
            &agent.profile,
            &pose,
            action,
            self.config.agent_run_speed,
            self.config.rotation_rate_deg,
            self.config.vision_step_deg,
            dt,
        );

        agent.runtime.kick_power = out.kick_power;
        if out.yaw_delta_deg != 0.0 {
            self.physics.set_pose(body, pose.rotated_yaw(out.yaw_delta_deg));
        }
        if out.velocity_change != Vec3::zeros() {
            self.physics.apply_impulse(body, out.velocity_change, ForceMode::VelocityChange);
        }

        match out.aux {
            Some(AuxEvent::PassAttempted) => self.metrics.record_pass_attempt(agent.profile.team),
            Some(AuxEvent::HeadingAdjusted { delta_deg }) => agent.runtime.adjust_heading(delta_deg),
            None => {}
        }

        agent.runtime.add_reward(self.existential.for_role(agent.profile.role));
        Ok(out.aux)
    }

    // ========================================================================
    // Physics callbacks
    // ========================================================================

    /// Contact between two bodies. Only agent/ball pairs matter.
    pub fn on_contact(&mut self, a: BodyHandle, b: BodyHandle, point: Vec3) -> Result<()> {
        let other = if a == self.ball_body {
            b
        } else if b == self.ball_body {
            a
        } else {
            return Ok(());
        };
        let Some(&id) = self.agent_by_body.get(&other) else {
            return Ok(());
        };

        let agent = &mut self.agents[id.0];
        let body = agent.profile.body;
        let pose = self.physics.pose(body).ok_or(SoccerError::BodyUnavailable(body))?;
        let out = self.collision.evaluate(
            agent.profile.role,
            agent.runtime.kick_power,
            agent.runtime.ball_touch,
            point,
            pose.position,
        );

        agent.runtime.add_reward(out.reward);
        if out.impulse != Vec3::zeros() {
            self.physics.apply_impulse(self.ball_body, out.impulse, ForceMode::Force);
        }

        let team = agent.profile.team;
        self.metrics.record_touch(team);
        if self.config.track_possession && self.possession.on_touch(team, self.sim_time) {
            debug!(team = team.name(), at = self.sim_time, "possession changed");
        }
        Ok(())
    }

    /// Trigger entry. The ball entering a goal scores for the attackers.
    pub fn on_trigger(&mut self, body: BodyHandle, zone: ZoneHandle) -> Option<EpisodeEnd> {
        if body != self.ball_body {
            return None;
        }
        let goal = self.goals.iter().find(|g| g.zone == zone)?;
        let scoring = goal.defended_by.opponent();
        Some(self.on_goal(scoring))
    }

    /// Dispatches one step's events in delivery order.
    ///
    /// Events after an episode boundary belong to the finished episode and
    /// are dropped.
    pub fn handle_events(&mut self, events: Vec<PhysicsEvent>) -> Result<Option<EpisodeEnd>> {
        let total = events.len();
        for (idx, event) in events.into_iter().enumerate() {
            let end = match event {
                PhysicsEvent::Contact { a, b, point } => {
                    self.on_contact(a, b, point)?;
                    None
                }
                PhysicsEvent::TriggerEnter { body, zone } => self.on_trigger(body, zone),
            };
            if let Some(end) = end {
                let dropped = total - idx - 1;
                if dropped > 0 {
                    warn!(dropped, episode = end.episode, "dropping events after episode end");
                }
                return Ok(Some(end));
            }
        }
        Ok(None)
    }

    // ========================================================================
    // Observations
    // ========================================================================

    /// Positions of ball, agents and goals as the sensors see them.
    pub fn world_view(&self) -> WorldView {
        let mut world = WorldView::default();
        if let Some(pose) = self.physics.pose(self.ball_body) {
            world.push(WorldEntity { body: Some(self.ball_body), kind: EntityKind::Ball, position: pose.position });
        }
        for agent in &self.agents {
            if let Some(pose) = self.physics.pose(agent.profile.body) {
                world.push(WorldEntity {
                    body: Some(agent.profile.body),
                    kind: EntityKind::Agent(agent.profile.team),
                    position: pose.position,
                });
            }
        }
        for goal in &self.goals {
            world.push(WorldEntity { body: None, kind: EntityKind::Goal(goal.defended_by), position: goal.position });
        }
        world
    }

    /// Builds this step's observation for `id` and remembers it.
    pub fn collect_observation(&mut self, id: AgentId) -> Result<AgentObservation> {
        let world = self.world_view();
        let agent = self.agents.get_mut(id.0).ok_or(SoccerError::UnknownAgent(id))?;
        let body = agent.profile.body;
        let pose = self.physics.pose(body).ok_or(SoccerError::BodyUnavailable(body))?;
        let velocity = self.physics.velocity(body).unwrap_or_else(Vec3::zeros);

        let inputs = ObservationInputs {
            position: pose.position,
            velocity,
            area_origin: self.area_origin,
            ball_touch: agent.runtime.ball_touch,
            opponent_goal: Some(agent.profile.opponent_goal),
            heading_offset: agent.runtime.heading_offset,
            nearby: self.proximity.detect(&world, body, pose.position),
            sound: self.sound.detect(&world, body, agent.profile.team, pose.position),
        };
        Ok(self.assembler.assemble(inputs, &mut agent.runtime.memory)?)
    }

    // ========================================================================
    // Full step
    // ========================================================================

    /// One fixed step in the documented order. `actions[i]` belongs to `AgentId(i)`.
    pub fn step(&mut self, actions: &[ActionTuple], dt: f32) -> Result<StepResult> {
        if actions.len() != self.agents.len() {
            return Err(SoccerError::ActionCount { expected: self.agents.len(), found: actions.len() });
        }
        for (idx, action) in actions.iter().enumerate() {
            self.check_action(AgentId(idx), action)?;
        }

        let mut episode_ends = Vec::new();
        if let Some(end) = self.tick() {
            episode_ends.push(end);
        }
        self.sim_time += f64::from(dt);

        let mut aux_events = Vec::new();
        for (idx, action) in actions.iter().enumerate() {
            let id = AgentId(idx);
            if let Some(aux) = self.apply_action(id, *action, dt)? {
                aux_events.push((id, aux));
            }
        }

        let events = self.physics.step(dt);
        if let Some(end) = self.handle_events(events)? {
            episode_ends.push(end);
        }

        let observations = (0..self.agents.len())
            .map(|idx| self.collect_observation(AgentId(idx)))
            .collect::<Result<Vec<_>>>()?;

        Ok(StepResult { observations, episode_ends, aux_events })
    }

    // ========================================================================
    // Trainer-facing accessors
    // ========================================================================

    pub fn take_agent_reward(&mut self, id: AgentId) -> Result<f32> {
        let agent = self.agents.get_mut(id.0).ok_or(SoccerError::UnknownAgent(id))?;
        Ok(agent.runtime.take_reward())
    }

    pub fn drain_group_summaries(&mut self, team: Team) -> Vec<GroupEpisodeSummary> {
        self.groups[team.index()].drain_summaries()
    }

    /// Takes effect at the next reset.
    pub fn set_reset_parameter(&mut self, key: impl Into<String>, value: f32) {
        self.reset_parameters.set(key, value);
    }

    pub fn group(&self, team: Team) -> &TeamGroup {
        &self.groups[team.index()]
    }

    pub fn agent(&self, id: AgentId) -> Option<&SoccerAgent> {
        self.agents.get(id.0)
    }

    pub fn agents(&self) -> &[SoccerAgent] {
        &self.agents
    }

    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agents.iter().map(SoccerAgent::id)
    }

    pub fn state(&self) -> EpisodeState {
        self.state
    }

    pub fn reset_timer(&self) -> u32 {
        self.reset_timer
    }

    /// 1-based index of the running episode.
    pub fn episode(&self) -> u64 {
        self.episode
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn ball_body(&self) -> BodyHandle {
        self.ball_body
    }

    pub fn ball_start(&self) -> Vec3 {
        self.ball_start
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn metrics(&self) -> &EpisodeMetrics {
        &self.metrics
    }

    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    pub fn possession(&self) -> &PossessionTracker {
        &self.possession
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut P {
        &mut self.physics
    }

    pub fn telemetry(&self) -> &T {
        &self.telemetry
    }
}
