mod support;

use gridbots::domains::simulation::*;
use support::*;

fn plan(state: &SimulationState, robot_id: &str, tx: i32, ty: i32) -> StepDecision {
    plan_step(state, robot(state, robot_id), Coordinate::new(tx, ty))
}

#[test]
fn a_robot_on_its_target_has_arrived() {
    let mut state = board(8, 8);
    let id = add_robot(&mut state, 3, 3);
    assert_eq!(plan(&state, &id, 3, 3), StepDecision::Arrived);
}

#[test]
fn neighbours_are_tried_north_south_west_east() {
    let mut state = board(10, 10);
    let id = add_robot(&mut state, 5, 5);

    // North and west both improve; north comes first.
    assert_eq!(plan(&state, &id, 4, 4), StepDecision::Step(Coordinate::new(5, 4)));
    // South and east both improve; south comes first.
    assert_eq!(plan(&state, &id, 6, 6), StepDecision::Step(Coordinate::new(5, 6)));
    assert_eq!(plan(&state, &id, 2, 5), StepDecision::Step(Coordinate::new(4, 5)));
    assert_eq!(plan(&state, &id, 9, 5), StepDecision::Step(Coordinate::new(6, 5)));
}

#[test]
fn steps_never_leave_the_grid() {
    let mut state = board(8, 8);
    let id = add_robot(&mut state, 0, 0);
    assert_eq!(plan(&state, &id, 0, -3), StepDecision::Blocked);
    assert_eq!(plan(&state, &id, -2, 0), StepDecision::Blocked);
}

#[test]
fn another_living_robot_blocks_the_only_improving_cell() {
    let mut state = board(10, 10);
    let mover = add_robot(&mut state, 5, 5);
    add_robot(&mut state, 5, 4);

    assert_eq!(plan(&state, &mover, 5, 2), StepDecision::Blocked);
}

#[test]
fn a_robot_that_vacated_its_cell_still_blocks() {
    let mut state = board(10, 10);
    let mover = add_robot(&mut state, 5, 5);
    add_robot(&mut state, 5, 4);
    let cell = state
        .grid
        .as_mut()
        .unwrap()
        .cell_mut(Coordinate::new(5, 4))
        .unwrap();
    cell.content = CellContentType::Empty;
    cell.robot_id = None;

    assert_eq!(plan(&state, &mover, 5, 2), StepDecision::Blocked);
}

#[test]
fn dead_robots_do_not_block() {
    let mut state = board(10, 10);
    let mover = add_robot(&mut state, 5, 5);
    let fallen = add_robot(&mut state, 5, 4);
    let body = state.robots.iter_mut().find(|r| r.id == fallen).unwrap();
    body.status = RobotStatus::Dead;
    body.hp = 0;
    let cell = state
        .grid
        .as_mut()
        .unwrap()
        .cell_mut(Coordinate::new(5, 4))
        .unwrap();
    cell.content = CellContentType::Empty;
    cell.robot_id = None;

    assert_eq!(plan(&state, &mover, 5, 2), StepDecision::Step(Coordinate::new(5, 4)));
}

#[test]
fn hazards_are_avoided_unless_they_are_the_target() {
    let mut state = board(10, 10);
    let id = add_robot(&mut state, 5, 5);
    add_hazard(&mut state, 5, 4);

    assert_eq!(plan(&state, &id, 5, 2), StepDecision::Blocked);
    assert_eq!(plan(&state, &id, 5, 4), StepDecision::Step(Coordinate::new(5, 4)));
    // A detour that keeps improving goes around the hazard.
    assert_eq!(plan(&state, &id, 4, 2), StepDecision::Step(Coordinate::new(4, 5)));
}

#[test]
fn no_improving_neighbour_means_blocked() {
    let mut state = board(10, 10);
    let id = add_robot(&mut state, 0, 0);
    add_hazard(&mut state, 0, 1);
    assert_eq!(plan(&state, &id, 0, 2), StepDecision::Blocked);
}

#[test]
fn zoned_robots_stay_inside_their_zone() {
    let mut state = board(12, 12);
    let id = state
        .place_robot(RobotType::JesusOfSuburbia, Coordinate::new(0, 0), &SetupRules::default())
        .unwrap()
        .id;
    assert_eq!(
        robot(&state, &id).movement_zone,
        Some(MovementZone { min_x: 0, max_x: 5, min_y: 0, max_y: 5 })
    );
    assert_eq!(plan(&state, &id, 0, 7), StepDecision::Step(Coordinate::new(0, 1)));

    state.robots[0].position = Coordinate::new(0, 5);
    assert_eq!(plan(&state, &id, 0, 7), StepDecision::Blocked);
}
