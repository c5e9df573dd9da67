use crate::domains::simulation::aggregate::{Coordinate, Robot, SimulationState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDecision {
    /// The robot already stands on its target.
    Arrived,
    Step(Coordinate),
    /// No neighbour brings the robot strictly closer.
    Blocked,
}

/// Greedy one-cell descent on Manhattan distance. This is not a path search:
/// a robot can stall behind an obstacle a detour would clear.
pub fn plan_step(state: &SimulationState, robot: &Robot, target: Coordinate) -> StepDecision {
    let current = robot.position.manhattan_distance(&target);
    if current == 0 {
        return StepDecision::Arrived;
    }
    let Some(grid) = state.grid.as_ref() else {
        return StepDecision::Blocked;
    };

    for next in robot.position.neighbors() {
        let Some(cell) = grid.cell(next) else {
            continue;
        };
        if !robot.can_reach(next) || state.occupied_by_other(next, &robot.id) {
            continue;
        }
        // Hazards are only ever entered as the declared destination.
        if cell.is_hazard() && next != target {
            continue;
        }
        if next.manhattan_distance(&target) < current {
            return StepDecision::Step(next);
        }
    }
    StepDecision::Blocked
}
