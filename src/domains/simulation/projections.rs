// Simulation read model for status displays
use serde::{Deserialize, Serialize};

use super::aggregate::{GameStatus, SimulationState, StrategyKind, TaskType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub game_status: GameStatus,
    pub tick_count: u64,
    pub living_robots: usize,
    pub dead_robots: usize,
    pub remaining_tasks: usize,
    pub health_packs: usize,
    pub current_budget: Option<u32>,
    pub selected_strategy: Option<StrategyKind>,
}

impl From<&SimulationState> for SimulationSummary {
    fn from(state: &SimulationState) -> Self {
        let living_robots = state.living_robot_count();
        Self {
            game_status: state.game_status,
            tick_count: state.tick_count,
            living_robots,
            dead_robots: state.robots.len() - living_robots,
            remaining_tasks: state.remaining_task_count(),
            health_packs: state
                .tasks
                .iter()
                .filter(|t| t.task_type == TaskType::HealthPack)
                .count(),
            current_budget: state.current_budget,
            selected_strategy: state.selected_strategy,
        }
    }
}
