use super::*;
use crate::engine::config::{EnvConfig, BALL_TOUCH_KEY};
use crate::engine::physics::MockPhysics;
use crate::engine::team_group::GroupOutcome;
use crate::engine::telemetry::RecordingTelemetry;
use crate::engine::types::Role;

const DT: f32 = 0.02;

const BLUE_STRIKER: AgentId = AgentId(0);
const BLUE_GOALIE: AgentId = AgentId(1);
const PURPLE_STRIKER: AgentId = AgentId(2);

fn scene(max_steps: u32) -> SceneConfig {
    let mut env = EnvConfig::deterministic(7);
    env.max_environment_steps = max_steps;
    SceneConfig::two_vs_two(env)
}

fn physics() -> MockPhysics {
    MockPhysics::with_bodies((0..=4).map(BodyHandle))
}

fn controller(scene: SceneConfig) -> EpisodeController<MockPhysics, RecordingTelemetry> {
    EpisodeController::with_telemetry(scene, physics(), RecordingTelemetry::new()).unwrap()
}

fn idle(ctrl: &EpisodeController<MockPhysics, RecordingTelemetry>) -> Vec<ActionTuple> {
    vec![ActionTuple::IDLE; ctrl.agents().len()]
}

fn blue_goal_event() -> PhysicsEvent {
    // Purple defends zone 1
    PhysicsEvent::TriggerEnter { body: BodyHandle(0), zone: ZoneHandle(1) }
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_missing_ball_body_is_fatal() {
    let physics = MockPhysics::with_bodies((1..=4).map(BodyHandle));
    let err = EpisodeController::new(scene(100), physics).err().unwrap();
    assert!(matches!(err, ConfigError::MissingBallBody(BodyHandle(0))));
}

#[test]
fn test_missing_agent_body_is_fatal() {
    let physics = MockPhysics::with_bodies([0, 1, 2, 4].map(BodyHandle));
    let err = EpisodeController::new(scene(100), physics).err().unwrap();
    match err {
        ConfigError::MissingAgentBody { name, body } => {
            assert_eq!(name, "PurpleStriker");
            assert_eq!(body, BodyHandle(3));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_goal_is_fatal() {
    let mut scene = scene(100);
    scene.goals.retain(|g| g.defended_by == Team::Blue);
    assert!(EpisodeController::new(scene, physics()).is_err());
}

#[test]
fn test_infinite_spawn_jitter_is_fatal() {
    let mut infinite = scene(100);
    infinite.env.agent_spawn_jitter = f32::INFINITY;
    let err = EpisodeController::new(infinite, physics()).err().unwrap();
    assert!(matches!(err, ConfigError::Bounds(_)));

    let mut nan = scene(100);
    nan.env.ball_spawn_jitter = f32::NAN;
    assert!(EpisodeController::new(nan, physics()).is_err());
}

#[test]
fn test_new_controller_is_running_with_groups() {
    let ctrl = controller(scene(100));
    assert_eq!(ctrl.state(), EpisodeState::Running);
    assert_eq!(ctrl.reset_timer(), 0);
    assert_eq!(ctrl.episode(), 1);
    assert_eq!(ctrl.group(Team::Blue).members(), &[AgentId(0), AgentId(1)]);
    assert_eq!(ctrl.group(Team::Purple).members(), &[AgentId(2), AgentId(3)]);

    let blue = ctrl.agent(BLUE_STRIKER).unwrap();
    assert_eq!(blue.profile.opponent_goal, Vec3::new(16.0, 0.5, 0.0));
    let purple = ctrl.agent(PURPLE_STRIKER).unwrap();
    assert_eq!(purple.profile.opponent_goal, Vec3::new(-16.0, 0.5, 0.0));
}

// ============================================================================
// Episode lifecycle
// ============================================================================

#[test]
fn test_step_budget_interrupts_both_groups() {
    let mut ctrl = controller(scene(100));
    let actions = idle(&ctrl);

    for _ in 0..99 {
        let result = ctrl.step(&actions, DT).unwrap();
        assert!(result.episode_ends.is_empty());
    }
    assert_eq!(ctrl.reset_timer(), 99);

    let result = ctrl.step(&actions, DT).unwrap();
    assert_eq!(result.episode_ends.len(), 1);
    let end = result.episode_ends[0];
    assert_eq!(end.reason, TerminationReason::MaxStepsReached);
    assert_eq!(end.scoring_team, None);
    assert_eq!(end.steps, 100);
    assert_eq!(end.episode, 1);

    for team in Team::ALL {
        let summaries = ctrl.drain_group_summaries(team);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].outcome, GroupOutcome::Interrupted);
        assert_eq!(summaries[0].reward, 0.0);
    }

    assert_eq!(ctrl.reset_timer(), 0);
    assert_eq!(ctrl.episode(), 2);
    let ball = ctrl.physics().pose(ctrl.ball_body()).unwrap().position;
    let offset = ball - ctrl.ball_start();
    assert!(offset.x.abs() <= 2.5 && offset.z.abs() <= 2.5);
    assert_eq!(offset.y, 0.0);
}

#[test]
fn test_zero_budget_never_interrupts() {
    let mut ctrl = controller(scene(0));
    let actions = idle(&ctrl);
    for _ in 0..500 {
        assert!(ctrl.step(&actions, DT).unwrap().episode_ends.is_empty());
    }
    assert_eq!(ctrl.reset_timer(), 500);
}

#[test]
fn test_blue_goal_at_step_twenty() {
    let mut ctrl = controller(scene(100));
    let actions = idle(&ctrl);
    for _ in 0..19 {
        ctrl.step(&actions, DT).unwrap();
    }
    ctrl.physics_mut().script_step(vec![blue_goal_event()]);
    let result = ctrl.step(&actions, DT).unwrap();

    assert_eq!(result.episode_ends.len(), 1);
    let end = result.episode_ends[0];
    assert_eq!(end.reason, TerminationReason::GoalScored);
    assert_eq!(end.scoring_team, Some(Team::Blue));
    assert_eq!(end.steps, 20);

    let blue = ctrl.drain_group_summaries(Team::Blue);
    assert_eq!(blue.len(), 1);
    assert_eq!(blue[0].outcome, GroupOutcome::Terminal);
    assert!((blue[0].reward - 0.8).abs() < 1e-6);

    let purple = ctrl.drain_group_summaries(Team::Purple);
    assert_eq!(purple[0].outcome, GroupOutcome::Terminal);
    assert_eq!(purple[0].reward, -1.0);

    assert_eq!(ctrl.reset_timer(), 0);
    assert_eq!(ctrl.state(), EpisodeState::Running);
    assert_eq!(ctrl.group(Team::Blue).group_reward(), 0.0);
}

#[test]
fn test_ball_entering_own_goal_scores_for_opponent() {
    let mut ctrl = controller(scene(100));
    let end = ctrl.on_trigger(BodyHandle(0), ZoneHandle(0)).unwrap();
    assert_eq!(end.scoring_team, Some(Team::Purple));
}

#[test]
fn test_agent_in_goal_zone_is_ignored() {
    let mut ctrl = controller(scene(100));
    assert!(ctrl.on_trigger(BodyHandle(1), ZoneHandle(1)).is_none());
    assert!(ctrl.on_trigger(BodyHandle(0), ZoneHandle(9)).is_none());
    assert_eq!(ctrl.episode(), 1);
}

#[test]
fn test_events_after_goal_are_dropped() {
    let mut ctrl = controller(scene(100));
    let ball = ctrl.ball_body();
    let agent_pos = ctrl.physics().pose(BodyHandle(2)).unwrap().position;
    ctrl.physics_mut().script_step(vec![
        blue_goal_event(),
        PhysicsEvent::Contact { a: BodyHandle(2), b: ball, point: agent_pos + Vec3::x() },
        PhysicsEvent::TriggerEnter { body: ball, zone: ZoneHandle(0) },
    ]);

    let result = ctrl.step(&idle(&ctrl), DT).unwrap();
    assert_eq!(result.episode_ends.len(), 1);
    assert_eq!(ctrl.stats().episodes, 1);
    assert_eq!(ctrl.physics().impulses_on(ball).count(), 0);
}

#[test]
fn test_reset_spawn_bounds() {
    let mut ctrl = controller(scene(100));
    for _ in 0..50 {
        ctrl.on_goal(Team::Blue);
        for agent in ctrl.agents() {
            let pose = ctrl.physics().pose(agent.profile.body).unwrap();
            let offset = pose.position - agent.profile.spawn_position;
            assert!(offset.x.abs() <= 5.0);
            assert_eq!(offset.y, 0.0);
            assert_eq!(offset.z, 0.0);

            let heading = pose.heading_deg();
            assert!((80.0 - 1e-3..=100.0 + 1e-3).contains(&heading.abs()), "heading {heading}");
            assert_eq!(heading.signum(), agent.profile.rotation_sign());
            assert_eq!(ctrl.physics().velocity(agent.profile.body), Some(Vec3::zeros()));
        }
        let ball = ctrl.physics().pose(ctrl.ball_body()).unwrap().position - ctrl.ball_start();
        assert!(ball.x.abs() <= 2.5 && ball.z.abs() <= 2.5);
    }
}

#[test]
fn test_same_seed_same_spawns() {
    let a = controller(scene(100));
    let b = controller(scene(100));
    for body in (0..=4).map(BodyHandle) {
        assert_eq!(a.physics().pose(body), b.physics().pose(body));
    }
}

#[test]
fn test_ball_touch_reread_at_reset() {
    let mut scene = scene(100);
    scene.reset_parameters.insert(BALL_TOUCH_KEY.to_string(), 0.5);
    let mut ctrl = controller(scene);
    assert_eq!(ctrl.agent(BLUE_STRIKER).unwrap().runtime.ball_touch, 0.5);

    ctrl.set_reset_parameter(BALL_TOUCH_KEY, 1.0);
    assert_eq!(ctrl.agent(BLUE_STRIKER).unwrap().runtime.ball_touch, 0.5);
    ctrl.on_goal(Team::Purple);
    assert_eq!(ctrl.agent(BLUE_STRIKER).unwrap().runtime.ball_touch, 1.0);
}

// ============================================================================
// Actions and rewards
// ============================================================================

#[test]
fn test_action_count_mismatch() {
    let mut ctrl = controller(scene(100));
    let err = ctrl.step(&[ActionTuple::IDLE], DT).unwrap_err();
    assert!(matches!(err, SoccerError::ActionCount { expected: 4, found: 1 }));
    assert_eq!(ctrl.reset_timer(), 0);
}

#[test]
fn test_invalid_action_code_rejected() {
    let mut ctrl = controller(scene(100));
    let err = ctrl.apply_action(BLUE_STRIKER, ActionTuple::new(3, 0, 0), DT).unwrap_err();
    assert!(matches!(err, SoccerError::InvalidActionCode { axis: 0, code: 3, max: 2 }));

    let err = ctrl.apply_action(BLUE_STRIKER, ActionTuple::IDLE.with_aux(2), DT).unwrap_err();
    assert!(matches!(err, SoccerError::InvalidActionCode { axis: 3, .. }));

    assert!(matches!(
        ctrl.apply_action(AgentId(9), ActionTuple::IDLE, DT),
        Err(SoccerError::UnknownAgent(AgentId(9)))
    ));
}

#[test]
fn test_bad_code_on_last_agent_changes_nothing() {
    let mut ctrl = controller(scene(100));
    let actions = [ActionTuple::new(1, 0, 0), ActionTuple::IDLE, ActionTuple::IDLE, ActionTuple::new(3, 0, 0)];

    let err = ctrl.step(&actions, DT).unwrap_err();
    assert!(matches!(err, SoccerError::InvalidActionCode { axis: 0, code: 3, max: 2 }));
    assert_eq!(ctrl.reset_timer(), 0);
    assert_eq!(ctrl.sim_time(), 0.0);
    assert!(ctrl.physics().impulses().is_empty());
    assert_eq!(ctrl.agent(BLUE_STRIKER).unwrap().runtime.kick_power, 0.0);
    assert_eq!(ctrl.take_agent_reward(BLUE_STRIKER).unwrap(), 0.0);

    // Goalies take vision codes 0..=2
    let mut actions = idle(&ctrl);
    actions[0] = ActionTuple::new(1, 0, 0);
    actions[3] = ActionTuple::IDLE.with_aux(3);
    let err = ctrl.step(&actions, DT).unwrap_err();
    assert!(matches!(err, SoccerError::InvalidActionCode { axis: 3, code: 3, max: 2 }));
    assert_eq!(ctrl.reset_timer(), 0);
    assert!(ctrl.physics().impulses().is_empty());
}

#[test]
fn test_existential_reward_by_role() {
    let mut ctrl = controller(scene(100));
    ctrl.apply_action(BLUE_STRIKER, ActionTuple::IDLE, DT).unwrap();
    ctrl.apply_action(BLUE_GOALIE, ActionTuple::IDLE, DT).unwrap();

    assert!((ctrl.take_agent_reward(BLUE_STRIKER).unwrap() + 0.01).abs() < 1e-6);
    assert!((ctrl.take_agent_reward(BLUE_GOALIE).unwrap() - 0.01).abs() < 1e-6);
    assert_eq!(ctrl.take_agent_reward(BLUE_GOALIE).unwrap(), 0.0);
}

#[test]
fn test_forward_action_pushes_body_and_arms_kick() {
    let mut ctrl = controller(scene(100));
    let body = BodyHandle(1);
    let pose = ctrl.physics().pose(body).unwrap();

    ctrl.apply_action(BLUE_STRIKER, ActionTuple::new(1, 0, 0), DT).unwrap();

    assert_eq!(ctrl.agent(BLUE_STRIKER).unwrap().runtime.kick_power, 1.0);
    let (_, impulse, mode) = *ctrl.physics().impulses_on(body).next().unwrap();
    assert_eq!(mode, ForceMode::VelocityChange);
    assert!((impulse - pose.forward() * 1.3 * 2.0).norm() < 1e-4);
}

#[test]
fn test_rotation_turns_body() {
    let mut ctrl = controller(scene(100));
    let body = BodyHandle(1);
    let before = ctrl.physics().pose(body).unwrap().heading_deg();
    ctrl.apply_action(BLUE_STRIKER, ActionTuple::new(0, 0, 2), DT).unwrap();
    let after = ctrl.physics().pose(body).unwrap().heading_deg();
    assert!((after - before - 2.0).abs() < 1e-3);
}

#[test]
fn test_contact_rewards_and_kicks_ball() {
    let mut scene = scene(100);
    scene.reset_parameters.insert(BALL_TOUCH_KEY.to_string(), 1.0);
    let mut ctrl = controller(scene);
    let ball = ctrl.ball_body();
    let agent_pos = ctrl.physics().pose(BodyHandle(1)).unwrap().position;

    ctrl.apply_action(BLUE_STRIKER, ActionTuple::new(1, 0, 0), DT).unwrap();
    ctrl.take_agent_reward(BLUE_STRIKER).unwrap();

    ctrl.on_contact(ball, BodyHandle(1), agent_pos + Vec3::new(0.0, 0.0, 0.5)).unwrap();

    assert!((ctrl.take_agent_reward(BLUE_STRIKER).unwrap() - 0.2).abs() < 1e-6);
    let (_, impulse, mode) = *ctrl.physics().impulses_on(ball).next().unwrap();
    assert_eq!(mode, ForceMode::Force);
    assert!((impulse - Vec3::new(0.0, 0.0, 2000.0)).norm() < 1e-2);
    assert_eq!(ctrl.metrics().ball_touches, [1, 0]);
    assert_eq!(ctrl.possession().holder(), Some(Team::Blue));
}

#[test]
fn test_goalie_kicks_without_forward_action() {
    let mut ctrl = controller(scene(100));
    let ball = ctrl.ball_body();
    let agent_pos = ctrl.physics().pose(BodyHandle(2)).unwrap().position;
    ctrl.on_contact(BodyHandle(2), ball, agent_pos - Vec3::x()).unwrap();

    let (_, impulse, _) = *ctrl.physics().impulses_on(ball).next().unwrap();
    assert!((impulse - Vec3::new(-2000.0, 0.0, 0.0)).norm() < 1e-2);
}

#[test]
fn test_contact_at_agent_center_is_finite() {
    let mut ctrl = controller(scene(100));
    let ball = ctrl.ball_body();
    let agent_pos = ctrl.physics().pose(BodyHandle(2)).unwrap().position;
    ctrl.on_contact(BodyHandle(2), ball, agent_pos).unwrap();

    assert_eq!(ctrl.physics().impulses_on(ball).count(), 0);
    assert!(ctrl.take_agent_reward(BLUE_GOALIE).unwrap().is_finite());
}

#[test]
fn test_agent_agent_contact_ignored() {
    let mut ctrl = controller(scene(100));
    ctrl.on_contact(BodyHandle(1), BodyHandle(3), Vec3::zeros()).unwrap();
    assert!(ctrl.physics().impulses().is_empty());
    assert_eq!(ctrl.metrics().ball_touches, [0, 0]);
}

#[test]
fn test_pass_and_vision_aux_events() {
    let mut scene = scene(100);
    scene.env.observe_heading_offset = true;
    let mut ctrl = controller(scene);

    let mut actions = vec![ActionTuple::IDLE; 4];
    actions[0] = ActionTuple::IDLE.with_aux(1);
    actions[1] = ActionTuple::IDLE.with_aux(2);
    let result = ctrl.step(&actions, DT).unwrap();

    assert_eq!(
        result.aux_events,
        vec![
            (BLUE_STRIKER, AuxEvent::PassAttempted),
            (BLUE_GOALIE, AuxEvent::HeadingAdjusted { delta_deg: 10.0 }),
        ]
    );
    assert_eq!(ctrl.metrics().pass_attempts, [1, 0]);
    assert_eq!(result.observations[1].heading_offset, Some(10.0));
    assert_eq!(result.observations[0].heading_offset, Some(0.0));
}

// ============================================================================
// Observations and telemetry
// ============================================================================

#[test]
fn test_observations_per_agent_with_history() {
    let mut ctrl = controller(scene(100));
    let actions = idle(&ctrl);

    let first = ctrl.step(&actions, DT).unwrap();
    assert_eq!(first.observations.len(), 4);
    assert!(first.observations.iter().all(|o| o.history.is_empty()));

    for _ in 0..10 {
        ctrl.step(&actions, DT).unwrap();
    }
    let later = ctrl.step(&actions, DT).unwrap();
    for obs in &later.observations {
        assert_eq!(obs.history.len(), 5);
        assert_eq!(obs.to_flat_vector().len(), obs.flat_len());
    }
}

#[test]
fn test_observation_at_opponent_goal_is_finite() {
    let mut ctrl = controller(scene(100));
    let body = BodyHandle(1);
    let goal = ctrl.agent(BLUE_STRIKER).unwrap().profile.opponent_goal;
    ctrl.physics_mut().set_pose(body, Pose::from_yaw_deg(goal, 90.0));

    let obs = ctrl.collect_observation(BLUE_STRIKER).unwrap();
    assert_eq!(obs.goal_offset, Vec3::zeros());
    assert!(obs.to_flat_vector().iter().all(|v| v.is_finite()));
}

#[test]
fn test_sound_and_proximity_use_their_own_radius() {
    let mut scene = scene(100);
    scene.env.proximity_radius = 10.0;
    scene.env.hearing_radius = 3.0;
    let mut ctrl = controller(scene);

    // Striker alone in a corner, everything else out of both ranges
    let origin = Vec3::new(0.0, 0.5, 20.0);
    let far = [
        (BodyHandle(0), Vec3::new(30.0, 0.5, 30.0)),
        (BodyHandle(3), Vec3::new(0.0, 0.5, -40.0)),
        (BodyHandle(4), Vec3::new(-30.0, 0.5, -30.0)),
    ];
    ctrl.physics_mut().set_pose(BodyHandle(1), Pose::from_yaw_deg(origin, 0.0));
    for (body, position) in far {
        ctrl.physics_mut().set_pose(body, Pose::from_yaw_deg(position, 0.0));
    }

    // Seen but not heard
    ctrl.physics_mut().set_pose(BodyHandle(2), Pose::from_yaw_deg(origin + Vec3::new(5.0, 0.0, 0.0), 0.0));
    let obs = ctrl.collect_observation(BLUE_STRIKER).unwrap();
    assert_eq!(obs.nearby.len(), 1);
    assert!((obs.nearby[0] - Vec3::new(5.0, 0.0, 0.0)).norm() < 1e-4);
    assert!(!obs.sound.ally);

    // Seen and heard
    ctrl.physics_mut().set_pose(BodyHandle(2), Pose::from_yaw_deg(origin + Vec3::new(0.0, 0.0, 2.0), 0.0));
    let obs = ctrl.collect_observation(BLUE_STRIKER).unwrap();
    assert_eq!(obs.nearby.len(), 1);
    assert!((obs.nearby[0] - Vec3::new(0.0, 0.0, 2.0)).norm() < 1e-4);
    assert!(obs.sound.ally);
    assert!(!obs.sound.ball && !obs.sound.enemy);
}

#[test]
fn test_goal_telemetry_and_stats() {
    let mut ctrl = controller(scene(100));
    ctrl.on_goal(Team::Blue);
    ctrl.on_goal(Team::Blue);
    ctrl.on_goal(Team::Purple);

    let t = ctrl.telemetry();
    assert_eq!(t.series(keys::GOALS_SCORED).len(), 3);
    assert!((t.last(keys::BLUE_WIN_RATE).unwrap() - 2.0 / 3.0).abs() < 1e-6);
    assert!((t.last(keys::AVG_BLUE_GOALS).unwrap() - 2.0 / 3.0).abs() < 1e-6);
    assert!((t.last(keys::AVG_PURPLE_GOALS).unwrap() - 1.0 / 3.0).abs() < 1e-6);
    assert_eq!(t.series(keys::EPISODE_LENGTH).len(), 3);
    assert_eq!(ctrl.stats().episodes, 3);
}

#[test]
fn test_interrupt_does_not_count_in_stats() {
    let mut ctrl = controller(scene(3));
    let actions = idle(&ctrl);
    for _ in 0..3 {
        ctrl.step(&actions, DT).unwrap();
    }
    assert_eq!(ctrl.episode(), 2);
    assert_eq!(ctrl.stats().episodes, 0);
    assert!(ctrl.telemetry().last(keys::BLUE_WIN_RATE).is_none());
    assert_eq!(ctrl.telemetry().last(keys::EPISODE_LENGTH), Some(3.0));
}

#[test]
fn test_roles_in_preset() {
    let ctrl = controller(scene(100));
    let roles: Vec<Role> = ctrl.agents().iter().map(|a| a.profile.role).collect();
    assert_eq!(roles, vec![Role::Striker, Role::Goalie, Role::Striker, Role::Goalie]);
}
