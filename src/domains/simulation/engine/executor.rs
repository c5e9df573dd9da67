use chrono::Utc;

use super::lifecycle::kill_if_depleted;
use super::GameRules;
use crate::domains::logger::DomainLogger;
use crate::domains::simulation::aggregate::{RobotStatus, SimulationState, TaskType};
use crate::domains::simulation::events::SimulationEvent;

/// Completes the robot's assigned task at its current position.
///
/// The type-specific effect is applied exactly once, then the task leaves the
/// task list and its cell is cleared to EMPTY. A vanished or unrecognized task
/// only sends the robot back to IDLE.
pub fn execute_task(
    state: &mut SimulationState,
    robot_idx: usize,
    rules: &GameRules,
    logger: &dyn DomainLogger,
) {
    let Some(task_id) = state.robots[robot_idx].assigned_task_id.clone() else {
        return;
    };
    let Some(task_idx) = state.task_index(&task_id) else {
        drop_assignment(state, robot_idx, &task_id, "task not found", logger);
        return;
    };

    let task_type = state.tasks[task_idx].task_type;
    let robot = &mut state.robots[robot_idx];
    robot.status = RobotStatus::PerformingTask;
    match task_type {
        TaskType::Garbage => robot.hp -= rules.garbage_hp_cost,
        TaskType::HealthPack => robot.hp += rules.health_pack_amount,
        TaskType::Package => {
            if let Some(task) = state.tasks.get_mut(task_idx) {
                task.release();
            }
            drop_assignment(state, robot_idx, &task_id, "unsupported task type PACKAGE", logger);
            return;
        }
    }

    let task = state.tasks.remove(task_idx);
    if let Some(cell) = state.grid.as_mut().and_then(|g| g.cell_mut(task.position)) {
        cell.clear();
    }

    let robot = &mut state.robots[robot_idx];
    robot.unassign();
    logger.info(&format!(
        "Robot {} completed {:?} task {} at {}. HP: {}",
        robot.id, task.task_type, task.id, task.position, robot.hp
    ));
    let event = SimulationEvent::TaskCompleted {
        robot_id: robot.id.clone(),
        task_id: task.id,
        task_type: task.task_type,
        hp: robot.hp,
        timestamp: Utc::now(),
    };
    state.add_event(event);

    kill_if_depleted(state, robot_idx, logger);
}

/// Consistency fallback: forget the assignment and return the robot to IDLE.
pub(crate) fn drop_assignment(
    state: &mut SimulationState,
    robot_idx: usize,
    task_id: &str,
    reason: &str,
    logger: &dyn DomainLogger,
) {
    let robot = &mut state.robots[robot_idx];
    robot.unassign();
    logger.warn(&format!(
        "Robot {} dropped assignment {}: {}",
        robot.id, task_id, reason
    ));

    let event = SimulationEvent::AssignmentDropped {
        robot_id: robot.id.clone(),
        task_id: task_id.to_string(),
        reason: reason.to_string(),
        timestamp: Utc::now(),
    };
    state.add_event(event);
}
