pub mod assignment;
pub mod executor;
pub mod lifecycle;
pub mod movement;
pub mod outcome;

pub use assignment::*;
pub use executor::*;
pub use lifecycle::*;
pub use movement::*;
pub use outcome::*;

use serde::{Deserialize, Serialize};

use super::aggregate::{GameStatus, RobotStatus, SimulationState};
use super::events::SimulationEvent;
use crate::domains::logger::DynLogger;

/// HP economy of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub movement_hp_cost: i64,
    pub blocked_hp_penalty: i64,
    pub garbage_hp_cost: i64,
    pub health_pack_amount: i64,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            movement_hp_cost: 1,
            blocked_hp_penalty: 1,
            garbage_hp_cost: 3,
            health_pack_amount: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub game_status: GameStatus,
    pub events: Vec<SimulationEvent>,
}

impl TickReport {
    pub fn is_terminal(&self) -> bool {
        self.game_status.is_terminal()
    }
}

/// Pure tick function over a session. Owns no timing and no state of its own.
#[derive(Clone)]
pub struct SimulationEngine {
    rules: GameRules,
    logger: DynLogger,
}

impl SimulationEngine {
    pub fn new(rules: GameRules, logger: DynLogger) -> Self {
        Self { rules, logger }
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Runs one tick: death sweep, assignment, per-robot processing, tick
    /// counter, win/loss evaluation. A session that is not RUNNING is left
    /// untouched.
    pub fn run_tick(&self, state: &mut SimulationState) -> TickReport {
        if state.game_status != GameStatus::Running {
            return TickReport {
                tick: state.tick_count,
                game_status: state.game_status,
                events: Vec::new(),
            };
        }
        let logger = self.logger.as_ref();

        death_sweep(state, logger);

        if let Some(kind) = state.selected_strategy {
            kind.strategy().assign(state, logger);
        }

        for robot_idx in 0..state.robots.len() {
            self.process_robot(state, robot_idx);
        }

        state.tick_count += 1;
        let game_status = evaluate(state, logger);

        TickReport {
            tick: state.tick_count,
            game_status,
            events: state.take_events(),
        }
    }

    fn process_robot(&self, state: &mut SimulationState, robot_idx: usize) {
        let logger = self.logger.as_ref();
        let robot = &state.robots[robot_idx];
        if !robot.is_alive() {
            return;
        }

        let Some(task_id) = robot.assigned_task_id.clone() else {
            state.robots[robot_idx].status = RobotStatus::Idle;
            return;
        };
        let Some(target) = state.task(&task_id).map(|task| task.position) else {
            drop_assignment(state, robot_idx, &task_id, "assigned task no longer exists", logger);
            return;
        };

        let robot = &state.robots[robot_idx];
        if robot.position == target {
            execute_task(state, robot_idx, &self.rules, logger);
            return;
        }

        match plan_step(state, robot, target) {
            StepDecision::Step(next) => {
                state.robots[robot_idx].status = RobotStatus::MovingToTask;
                apply_move(state, robot_idx, next, &self.rules, logger);
            }
            StepDecision::Blocked => {
                state.robots[robot_idx].status = RobotStatus::MovingToTask;
                apply_blocked(state, robot_idx, &self.rules, logger);
            }
            StepDecision::Arrived => execute_task(state, robot_idx, &self.rules, logger),
        }
    }
}
