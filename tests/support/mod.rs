#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use gridbots::adapters::outbound::init_noop_logger;
use gridbots::domains::logger::DomainLogger;
use gridbots::domains::simulation::*;

/// Hazard-free board in SETUP with a budget large enough for any test.
pub fn board(rows: usize, cols: usize) -> SimulationState {
    SimulationState::with_grid(Grid::new(rows, cols), 100_000)
}

pub fn add_robot(state: &mut SimulationState, x: i32, y: i32) -> RobotId {
    state
        .place_robot(RobotType::CerberusBasic, Coordinate::new(x, y), &SetupRules::default())
        .expect("robot placement")
        .id
}

pub fn add_robot_with_hp(state: &mut SimulationState, x: i32, y: i32, hp: i64) -> RobotId {
    let id = add_robot(state, x, y);
    let robot = state.robots.iter_mut().find(|r| r.id == id).unwrap();
    robot.hp = hp;
    robot.initial_hp = hp;
    id
}

pub fn add_item(state: &mut SimulationState, task_type: TaskType, x: i32, y: i32) -> TaskId {
    state
        .place_item(task_type, Coordinate::new(x, y))
        .expect("item placement")
        .id
}

pub fn add_hazard(state: &mut SimulationState, x: i32, y: i32) {
    let placed = state
        .grid
        .as_mut()
        .unwrap()
        .place_hazard(Coordinate::new(x, y));
    assert!(placed, "hazard cell must be empty");
}

pub fn run(state: &mut SimulationState, strategy: StrategyKind) {
    state.game_status = GameStatus::Running;
    state.is_running = true;
    state.selected_strategy = Some(strategy);
}

pub fn engine() -> SimulationEngine {
    SimulationEngine::new(GameRules::default(), init_noop_logger())
}

pub fn robot<'a>(state: &'a SimulationState, id: &str) -> &'a Robot {
    state.robot(id).expect("robot exists")
}

pub fn cell(state: &SimulationState, x: i32, y: i32) -> GridCell {
    state
        .grid
        .as_ref()
        .unwrap()
        .cell(Coordinate::new(x, y))
        .cloned()
        .expect("cell in bounds")
}

/// Logger that keeps every message for later inspection.
#[derive(Default)]
pub struct CaptureLogger {
    pub messages: Arc<Mutex<Vec<String>>>,
}

impl CaptureLogger {
    pub fn warnings(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.starts_with("WARN:"))
            .cloned()
            .collect()
    }
}

impl DomainLogger for CaptureLogger {
    fn info(&self, msg: &str) { self.messages.lock().unwrap().push(format!("INFO:{}", msg)); }
    fn warn(&self, msg: &str) { self.messages.lock().unwrap().push(format!("WARN:{}", msg)); }
    fn error(&self, msg: &str) { self.messages.lock().unwrap().push(format!("ERR:{}", msg)); }
}
