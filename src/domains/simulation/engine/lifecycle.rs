use chrono::Utc;

use super::GameRules;
use crate::domains::logger::DomainLogger;
use crate::domains::simulation::aggregate::{Coordinate, RobotStatus, SimulationState};
use crate::domains::simulation::events::SimulationEvent;

/// Moves a robot one cell and charges the movement cost. Entering a hazard
/// destroys the robot after the position update and consumes the hazard.
pub fn apply_move(
    state: &mut SimulationState,
    robot_idx: usize,
    to: Coordinate,
    rules: &GameRules,
    logger: &dyn DomainLogger,
) {
    let Some(grid) = state.grid.as_mut() else {
        return;
    };
    let robot = &mut state.robots[robot_idx];
    let from = robot.position;

    if let Some(cell) = grid.cell_mut(from) {
        if cell.holds_robot(&robot.id) {
            cell.release();
        }
    }
    let entered_hazard = grid.cell(to).is_some_and(|cell| cell.is_hazard());

    robot.position = to;
    robot.hp -= rules.movement_hp_cost;
    if robot.hp > 0 {
        if let Some(cell) = grid.cell_mut(to) {
            cell.claim(robot.id.clone());
        }
    }
    logger.info(&format!(
        "Robot {} moved to {}. HP: {}",
        robot.id, robot.position, robot.hp
    ));

    let robot_id = robot.id.clone();
    let hp = robot.hp;
    state.add_event(SimulationEvent::RobotMoved {
        robot_id,
        from,
        to,
        hp,
        timestamp: Utc::now(),
    });

    if entered_hazard {
        trigger_hazard(state, robot_idx, logger);
    }
    kill_if_depleted(state, robot_idx, logger);
}

fn trigger_hazard(state: &mut SimulationState, robot_idx: usize, logger: &dyn DomainLogger) {
    let robot = &mut state.robots[robot_idx];
    let at = robot.position;
    robot.hp = 0;
    logger.warn(&format!("Robot {} triggered a hazard at {}", robot.id, at));

    let robot_id = robot.id.clone();
    if let Some(cell) = state.grid.as_mut().and_then(|g| g.cell_mut(at)) {
        cell.clear();
    }
    state.add_event(SimulationEvent::HazardTriggered {
        robot_id,
        at,
        timestamp: Utc::now(),
    });
}

/// Charges the penalty for a tick spent unable to move.
pub fn apply_blocked(
    state: &mut SimulationState,
    robot_idx: usize,
    rules: &GameRules,
    logger: &dyn DomainLogger,
) {
    let robot = &mut state.robots[robot_idx];
    robot.hp -= rules.blocked_hp_penalty;
    logger.info(&format!(
        "Robot {} is blocked at {}. HP: {}",
        robot.id, robot.position, robot.hp
    ));

    let event = SimulationEvent::RobotBlocked {
        robot_id: robot.id.clone(),
        at: robot.position,
        hp: robot.hp,
        timestamp: Utc::now(),
    };
    state.add_event(event);
    kill_if_depleted(state, robot_idx, logger);
}

/// Death transition. Returns true when the robot died just now.
///
/// The robot is marked DEAD with hp clamped to zero, its cell is released if
/// it still holds it, and any task it held goes back to the pool.
pub fn kill_if_depleted(
    state: &mut SimulationState,
    robot_idx: usize,
    logger: &dyn DomainLogger,
) -> bool {
    let robot = &mut state.robots[robot_idx];
    if robot.hp > 0 || robot.status == RobotStatus::Dead {
        return false;
    }

    robot.status = RobotStatus::Dead;
    robot.hp = 0;
    let at = robot.position;
    let robot_id = robot.id.clone();
    let released = robot.assigned_task_id.take();

    if let Some(cell) = state.grid.as_mut().and_then(|g| g.cell_mut(at)) {
        if cell.holds_robot(&robot_id) {
            cell.release();
        }
    }
    if let Some(task_id) = released {
        if let Some(task) = state.tasks.iter_mut().find(|t| t.id == task_id) {
            if task.assigned_to_robot_id.as_deref() == Some(robot_id.as_str()) {
                task.release();
            }
        }
    }

    logger.info(&format!("Robot {} has been marked as DEAD at {}", robot_id, at));
    state.add_event(SimulationEvent::RobotDied {
        robot_id,
        at,
        timestamp: Utc::now(),
    });
    true
}

/// Tick-start sweep over robots whose hp ran out outside the engine.
pub fn death_sweep(state: &mut SimulationState, logger: &dyn DomainLogger) -> usize {
    let mut died = 0;
    for robot_idx in 0..state.robots.len() {
        if kill_if_depleted(state, robot_idx, logger) {
            died += 1;
        }
    }
    died
}
