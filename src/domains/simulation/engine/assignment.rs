use chrono::Utc;

use crate::domains::logger::DomainLogger;
use crate::domains::simulation::aggregate::{RobotStatus, SimulationState, StrategyKind, TaskStatus};
use crate::domains::simulation::events::SimulationEvent;

/// Policy that binds unassigned tasks to idle robots once per tick.
pub trait TaskAssignmentStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns the number of assignments made.
    fn assign(&self, state: &mut SimulationState, logger: &dyn DomainLogger) -> usize;
}

/// Every unassigned task, in list order, goes to the closest idle robot not
/// yet claimed in this pass. Ties keep the robot seen first.
pub struct NearestRobotStrategy;

/// Walks the robot list circularly from a persistent cursor and gives the
/// first idle robot its closest task. At most one assignment per call.
pub struct RoundRobinStrategy;

impl StrategyKind {
    pub fn strategy(&self) -> &'static dyn TaskAssignmentStrategy {
        match self {
            StrategyKind::NearestRobot => &NearestRobotStrategy,
            StrategyKind::RoundRobin => &RoundRobinStrategy,
        }
    }
}

impl TaskAssignmentStrategy for NearestRobotStrategy {
    fn name(&self) -> &'static str {
        "NEAREST_ROBOT"
    }

    fn assign(&self, state: &mut SimulationState, logger: &dyn DomainLogger) -> usize {
        if state.tasks.is_empty() || state.robots.is_empty() {
            return 0;
        }

        let mut claimed = vec![false; state.robots.len()];
        let mut assigned = 0;
        for task_idx in 0..state.tasks.len() {
            if !state.tasks[task_idx].is_assignable() {
                continue;
            }
            let target = state.tasks[task_idx].position;

            let mut best: Option<(usize, u32)> = None;
            for (robot_idx, robot) in state.robots.iter().enumerate() {
                if claimed[robot_idx] || !robot.is_available() || !robot.can_reach(target) {
                    continue;
                }
                let distance = robot.position.manhattan_distance(&target);
                if best.map_or(true, |(_, shortest)| distance < shortest) {
                    best = Some((robot_idx, distance));
                }
            }

            if let Some((robot_idx, distance)) = best {
                claimed[robot_idx] = true;
                bind(state, robot_idx, task_idx, distance, logger);
                assigned += 1;
            }
        }
        assigned
    }
}

impl TaskAssignmentStrategy for RoundRobinStrategy {
    fn name(&self) -> &'static str {
        "ROUND_ROBIN"
    }

    fn assign(&self, state: &mut SimulationState, logger: &dyn DomainLogger) -> usize {
        let robot_count = state.robots.len();
        if robot_count == 0 || state.tasks.is_empty() {
            return 0;
        }

        let start = state.round_robin_cursor % robot_count;
        for offset in 0..robot_count {
            let robot_idx = (start + offset) % robot_count;
            let robot = &state.robots[robot_idx];
            if !robot.is_available() {
                continue;
            }

            let mut closest: Option<(usize, u32)> = None;
            for (task_idx, task) in state.tasks.iter().enumerate() {
                if !task.is_assignable() || !robot.can_reach(task.position) {
                    continue;
                }
                let distance = robot.position.manhattan_distance(&task.position);
                if closest.map_or(true, |(_, shortest)| distance < shortest) {
                    closest = Some((task_idx, distance));
                }
            }

            if let Some((task_idx, distance)) = closest {
                bind(state, robot_idx, task_idx, distance, logger);
                state.round_robin_cursor = (robot_idx + 1) % robot_count;
                return 1;
            }
        }
        0
    }
}

fn bind(
    state: &mut SimulationState,
    robot_idx: usize,
    task_idx: usize,
    distance: u32,
    logger: &dyn DomainLogger,
) {
    let task = &mut state.tasks[task_idx];
    let robot = &mut state.robots[robot_idx];

    robot.assigned_task_id = Some(task.id.clone());
    robot.status = RobotStatus::MovingToTask;
    task.status = TaskStatus::Assigned;
    task.assigned_to_robot_id = Some(robot.id.clone());

    logger.info(&format!(
        "Assigning task {} to robot {} (distance {})",
        task.id, robot.id, distance
    ));
    let event = SimulationEvent::TaskAssigned {
        robot_id: robot.id.clone(),
        task_id: task.id.clone(),
        distance,
        timestamp: Utc::now(),
    };
    state.add_event(event);
}
