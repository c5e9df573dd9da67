mod support;

use gridbots::adapters::outbound::init_noop_logger;
use gridbots::domains::simulation::*;
use support::*;

fn assign(state: &mut SimulationState, kind: StrategyKind) -> usize {
    let logger = init_noop_logger();
    kind.strategy().assign(state, logger.as_ref())
}

#[test]
fn nearest_robot_takes_the_closest_idle_robot() {
    let mut state = board(10, 10);
    let far = add_robot(&mut state, 5, 0);
    let near = add_robot(&mut state, 5, 3);
    let task = add_item(&mut state, TaskType::Garbage, 5, 5);

    assert_eq!(assign(&mut state, StrategyKind::NearestRobot), 1);

    assert_eq!(robot(&state, &near).assigned_task_id.as_deref(), Some(task.as_str()));
    assert_eq!(robot(&state, &near).status, RobotStatus::MovingToTask);
    assert_eq!(robot(&state, &far).assigned_task_id, None);
    assert_eq!(robot(&state, &far).status, RobotStatus::Idle);

    let task = state.task(&task).unwrap();
    assert_eq!(task.status, TaskStatus::Assigned);
    assert_eq!(task.assigned_to_robot_id.as_deref(), Some(near.as_str()));
}

#[test]
fn nearest_robot_ties_go_to_the_first_robot_in_the_list() {
    let mut state = board(10, 10);
    let first = add_robot(&mut state, 3, 5);
    let second = add_robot(&mut state, 7, 5);
    add_item(&mut state, TaskType::Garbage, 5, 5);

    assign(&mut state, StrategyKind::NearestRobot);

    assert!(robot(&state, &first).assigned_task_id.is_some());
    assert!(robot(&state, &second).assigned_task_id.is_none());
}

#[test]
fn nearest_robot_gives_each_robot_at_most_one_task_per_pass() {
    let mut state = board(10, 10);
    let only = add_robot(&mut state, 0, 0);
    let first = add_item(&mut state, TaskType::Garbage, 0, 4);
    let second = add_item(&mut state, TaskType::Garbage, 0, 2);

    assert_eq!(assign(&mut state, StrategyKind::NearestRobot), 1);

    // Tasks are visited in list order, so the first task wins the robot.
    assert_eq!(robot(&state, &only).assigned_task_id.as_deref(), Some(first.as_str()));
    assert!(state.task(&second).unwrap().is_unassigned());
}

#[test]
fn nearest_robot_spreads_tasks_over_several_robots() {
    let mut state = board(10, 10);
    let left = add_robot(&mut state, 0, 0);
    let right = add_robot(&mut state, 9, 9);
    let near_right = add_item(&mut state, TaskType::Garbage, 8, 8);
    let near_left = add_item(&mut state, TaskType::HealthPack, 1, 1);

    assert_eq!(assign(&mut state, StrategyKind::NearestRobot), 2);

    assert_eq!(robot(&state, &right).assigned_task_id.as_deref(), Some(near_right.as_str()));
    assert_eq!(robot(&state, &left).assigned_task_id.as_deref(), Some(near_left.as_str()));
}

#[test]
fn busy_and_dead_robots_are_never_selected() {
    let mut state = board(10, 10);
    let busy = add_robot(&mut state, 4, 4);
    let dead = add_robot(&mut state, 5, 4);
    let idle = add_robot(&mut state, 0, 0);
    let first = add_item(&mut state, TaskType::Garbage, 4, 6);
    let second = add_item(&mut state, TaskType::Garbage, 5, 6);

    assign(&mut state, StrategyKind::NearestRobot);
    assert_eq!(robot(&state, &busy).assigned_task_id.as_deref(), Some(first.as_str()));
    assert_eq!(robot(&state, &dead).assigned_task_id.as_deref(), Some(second.as_str()));

    // Free the second task again and kill its robot.
    let dead_robot = state.robots.iter_mut().find(|r| r.id == dead).unwrap();
    dead_robot.assigned_task_id = None;
    dead_robot.status = RobotStatus::Dead;
    dead_robot.hp = 0;
    let task = state.tasks.iter_mut().find(|t| t.id == second).unwrap();
    task.status = TaskStatus::Unassigned;
    task.assigned_to_robot_id = None;

    assign(&mut state, StrategyKind::NearestRobot);
    assert_eq!(robot(&state, &idle).assigned_task_id.as_deref(), Some(second.as_str()));
    assert_eq!(robot(&state, &dead).assigned_task_id, None);
}

#[test]
fn zoned_robots_ignore_tasks_outside_their_zone() {
    let mut state = board(12, 12);
    let zoned = state
        .place_robot(RobotType::JesusOfSuburbia, Coordinate::new(0, 0), &SetupRules::default())
        .unwrap()
        .id;
    let roaming = add_robot(&mut state, 11, 0);
    let task = add_item(&mut state, TaskType::Garbage, 8, 8);

    assign(&mut state, StrategyKind::NearestRobot);

    assert_eq!(robot(&state, &zoned).assigned_task_id, None);
    assert_eq!(robot(&state, &roaming).assigned_task_id.as_deref(), Some(task.as_str()));
}

#[test]
fn round_robin_assigns_once_and_advances_the_cursor() {
    let mut state = board(10, 10);
    let first = add_robot(&mut state, 0, 0);
    let second = add_robot(&mut state, 9, 9);
    add_item(&mut state, TaskType::Garbage, 8, 9);

    assert_eq!(assign(&mut state, StrategyKind::RoundRobin), 1);

    // The cursor starts at 0, so the far robot still gets the task.
    assert!(robot(&state, &first).assigned_task_id.is_some());
    assert!(robot(&state, &second).assigned_task_id.is_none());
    assert_eq!(state.round_robin_cursor, 1);
}

#[test]
fn round_robin_makes_one_assignment_per_call_and_wraps() {
    let mut state = board(10, 10);
    let first = add_robot(&mut state, 0, 0);
    let second = add_robot(&mut state, 9, 9);
    add_item(&mut state, TaskType::Garbage, 0, 5);
    add_item(&mut state, TaskType::Garbage, 9, 5);

    assert_eq!(assign(&mut state, StrategyKind::RoundRobin), 1);
    assert!(robot(&state, &second).assigned_task_id.is_none());

    assert_eq!(assign(&mut state, StrategyKind::RoundRobin), 1);
    assert!(robot(&state, &first).assigned_task_id.is_some());
    assert!(robot(&state, &second).assigned_task_id.is_some());
    assert_eq!(state.round_robin_cursor, 0);

    assert_eq!(assign(&mut state, StrategyKind::RoundRobin), 0);
}

#[test]
fn round_robin_gives_the_robot_its_closest_task() {
    let mut state = board(10, 10);
    let only = add_robot(&mut state, 0, 0);
    add_item(&mut state, TaskType::Garbage, 9, 9);
    let close = add_item(&mut state, TaskType::Garbage, 1, 1);

    assign(&mut state, StrategyKind::RoundRobin);

    assert_eq!(robot(&state, &only).assigned_task_id.as_deref(), Some(close.as_str()));
}

#[test]
fn round_robin_skips_busy_robots_from_the_cursor() {
    let mut state = board(10, 10);
    let first = add_robot(&mut state, 0, 0);
    let second = add_robot(&mut state, 1, 0);
    let third = add_robot(&mut state, 2, 0);
    add_item(&mut state, TaskType::Garbage, 5, 5);
    add_item(&mut state, TaskType::Garbage, 6, 6);

    state.round_robin_cursor = 1;
    assign(&mut state, StrategyKind::RoundRobin);
    assert!(robot(&state, &second).assigned_task_id.is_some());
    assert_eq!(state.round_robin_cursor, 2);

    state.round_robin_cursor = 1;
    assign(&mut state, StrategyKind::RoundRobin);
    assert!(robot(&state, &third).assigned_task_id.is_some());
    assert!(robot(&state, &first).assigned_task_id.is_none());
    assert_eq!(state.round_robin_cursor, 0);
}

#[test]
fn packages_are_skipped_by_both_strategies() {
    for kind in [StrategyKind::NearestRobot, StrategyKind::RoundRobin] {
        let mut state = board(10, 10);
        let id = add_robot(&mut state, 0, 0);
        state
            .tasks
            .push(Task::new("task-p".to_string(), TaskType::Package, Coordinate::new(0, 1)));
        let garbage = add_item(&mut state, TaskType::Garbage, 5, 5);

        assert_eq!(assign(&mut state, kind), 1);
        assert_eq!(robot(&state, &id).assigned_task_id.as_deref(), Some(garbage.as_str()));
        assert!(state.task("task-p").unwrap().is_unassigned());
    }
}

#[test]
fn empty_lists_assign_nothing() {
    let mut state = board(10, 10);
    assert_eq!(assign(&mut state, StrategyKind::NearestRobot), 0);
    assert_eq!(assign(&mut state, StrategyKind::RoundRobin), 0);

    add_robot(&mut state, 0, 0);
    state.round_robin_cursor = 3;
    assert_eq!(assign(&mut state, StrategyKind::RoundRobin), 0);
    assert_eq!(state.round_robin_cursor, 3);
    assert!(state.uncommitted_events().is_empty());
}

#[test]
fn strategy_names_parse_with_and_without_suffix() {
    assert_eq!("NEAREST_ROBOT".parse::<StrategyKind>().unwrap(), StrategyKind::NearestRobot);
    assert_eq!("ROUND_ROBIN_BASIC".parse::<StrategyKind>().unwrap(), StrategyKind::RoundRobin);
    assert!("RANDOM".parse::<StrategyKind>().is_err());
    assert_eq!(StrategyKind::RoundRobin.strategy().name(), "ROUND_ROBIN");
}
