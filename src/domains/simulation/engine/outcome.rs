use chrono::Utc;

use crate::domains::logger::DomainLogger;
use crate::domains::simulation::aggregate::{GameStatus, SimulationState};
use crate::domains::simulation::events::SimulationEvent;

/// Decides whether the game ended with the tick that just ran.
pub fn evaluate(state: &mut SimulationState, logger: &dyn DomainLogger) -> GameStatus {
    let living = state.living_robot_count();
    let remaining = state.remaining_task_count();

    let verdict = if remaining == 0 {
        GameStatus::Won
    } else if living == 0 {
        GameStatus::Lost
    } else {
        return state.game_status;
    };

    state.game_status = verdict;
    state.is_running = false;
    logger.info(&format!(
        "Game {:?} after {} ticks ({} robots alive, {} tasks left)",
        verdict, state.tick_count, living, remaining
    ));
    let tick = state.tick_count;
    state.add_event(SimulationEvent::GameEnded {
        status: verdict,
        tick,
        timestamp: Utc::now(),
    });
    verdict
}
