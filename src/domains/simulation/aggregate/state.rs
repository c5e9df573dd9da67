use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::ids::IdGenerator;
use super::robot::{MovementZone, Robot, RobotType};
use super::task::Task;
use super::types::{
    CellContentType, Coordinate, GameStatus, RobotStatus, StrategyKind, TaskStatus, TaskType,
};
use crate::common::{DomainError, DomainResult};
use crate::domains::simulation::events::SimulationEvent;

/// Limits applied while a session is being set up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupRules {
    pub min_dimension: usize,
    pub max_dimension: usize,
    pub hazard_count: usize,
    pub zone_radius: i32,
}

impl Default for SetupRules {
    fn default() -> Self {
        Self {
            min_dimension: 8,
            max_dimension: 160,
            hazard_count: 3,
            zone_radius: 5,
        }
    }
}

/// The single mutable session: board, entities and game bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub grid: Option<Grid>,
    pub robots: Vec<Robot>,
    pub tasks: Vec<Task>,
    pub initial_budget: Option<u32>,
    pub current_budget: Option<u32>,
    pub is_running: bool,
    pub game_status: GameStatus,
    pub selected_strategy: Option<StrategyKind>,
    pub round_robin_cursor: usize,
    pub tick_count: u64,
    pub speed_multiplier: f64,
    #[serde(skip)]
    ids: IdGenerator,
    #[serde(skip)]
    uncommitted_events: Vec<SimulationEvent>,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            grid: None,
            robots: Vec::new(),
            tasks: Vec::new(),
            initial_budget: None,
            current_budget: None,
            is_running: false,
            game_status: GameStatus::Setup,
            selected_strategy: None,
            round_robin_cursor: 0,
            tick_count: 0,
            speed_multiplier: 1.0,
            ids: IdGenerator::default(),
            uncommitted_events: Vec::new(),
        }
    }
}

impl SimulationState {
    /// Empty SETUP session without a grid, as after a reset.
    pub fn new(speed_multiplier: f64) -> Self {
        Self {
            speed_multiplier,
            ..Self::default()
        }
    }

    pub fn uncommitted_events(&self) -> &[SimulationEvent] {
        &self.uncommitted_events
    }

    pub(crate) fn add_event(&mut self, event: SimulationEvent) {
        self.uncommitted_events.push(event);
    }

    pub(crate) fn take_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.uncommitted_events)
    }
}

impl SimulationState {
    /// Fresh SETUP session with an empty board and hazards scattered by `rng`.
    pub fn configure<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        initial_budget: u32,
        rules: &SetupRules,
        rng: &mut R,
    ) -> DomainResult<Self> {
        let valid = rules.min_dimension..=rules.max_dimension;
        if !valid.contains(&rows) || !valid.contains(&cols) {
            return Err(DomainError::InvalidDimensions {
                rows,
                cols,
                min: rules.min_dimension,
                max: rules.max_dimension,
            });
        }

        let mut grid = Grid::new(rows, cols);
        grid.place_hazards(rules.hazard_count, rng);

        Ok(Self {
            grid: Some(grid),
            initial_budget: Some(initial_budget),
            current_budget: Some(initial_budget),
            ..Self::default()
        })
    }

    /// Same as [`SimulationState::configure`] but on a caller-built board.
    pub fn with_grid(grid: Grid, initial_budget: u32) -> Self {
        Self {
            grid: Some(grid),
            initial_budget: Some(initial_budget),
            current_budget: Some(initial_budget),
            ..Self::default()
        }
    }

    pub fn place_robot(
        &mut self,
        robot_type: RobotType,
        at: Coordinate,
        rules: &SetupRules,
    ) -> DomainResult<Robot> {
        let (rows, cols) = self.ensure_placeable(at)?;
        let spec = robot_type.spec();
        let available = self.current_budget.unwrap_or(0);
        if available < spec.cost {
            return Err(DomainError::InsufficientBudget {
                required: spec.cost,
                available,
            });
        }

        let id = self.ids.next_robot_id();
        let mut robot = Robot::new(id.clone(), robot_type, at, i64::from(spec.initial_hp));
        if spec.zoned {
            robot = robot.with_zone(MovementZone::around(at, rules.zone_radius, rows, cols));
        }

        if let Some(cell) = self.grid.as_mut().and_then(|g| g.cell_mut(at)) {
            cell.claim(id);
        }
        self.current_budget = Some(available - spec.cost);
        self.robots.push(robot.clone());
        Ok(robot)
    }

    pub fn place_item(&mut self, task_type: TaskType, at: Coordinate) -> DomainResult<Task> {
        if task_type == TaskType::Package {
            return Err(DomainError::UnknownType {
                kind: "placeable item",
                value: "PACKAGE".to_string(),
            });
        }
        self.ensure_placeable(at)?;

        let id = self.ids.next_task_id();
        let task = Task::new(id.clone(), task_type, at);
        if let Some(cell) = self.grid.as_mut().and_then(|g| g.cell_mut(at)) {
            cell.put_task(id, task_type);
        }
        self.tasks.push(task.clone());
        Ok(task)
    }

    fn ensure_placeable(&self, at: Coordinate) -> DomainResult<(usize, usize)> {
        let grid = self.grid.as_ref().ok_or(DomainError::NotConfigured)?;
        if self.game_status != GameStatus::Setup {
            return Err(DomainError::NotInSetup);
        }
        let cell = grid.cell(at).ok_or(DomainError::OutOfBounds { x: at.x, y: at.y })?;
        if !cell.is_empty() {
            return Err(DomainError::CellOccupied { x: at.x, y: at.y });
        }
        Ok((grid.rows, grid.cols))
    }
}

impl SimulationState {
    pub fn robot(&self, robot_id: &str) -> Option<&Robot> {
        self.robots.iter().find(|r| r.id == robot_id)
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub(crate) fn task_index(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }

    pub fn living_robot_count(&self) -> usize {
        self.robots.iter().filter(|r| r.is_alive()).count()
    }

    pub fn remaining_task_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.task_type.counts_toward_win())
            .count()
    }

    /// Whether a living robot other than `robot_id` stands on `at`, whether or
    /// not it still owns that cell.
    pub fn occupied_by_other(&self, at: Coordinate, robot_id: &str) -> bool {
        let on_grid = self
            .grid
            .as_ref()
            .and_then(|g| g.cell(at))
            .and_then(|cell| cell.robot_id.as_deref())
            .is_some_and(|holder| holder != robot_id);
        on_grid
            || self
                .robots
                .iter()
                .any(|r| r.id != robot_id && r.is_alive() && r.position == at)
    }

    /// Verifies that the grid is an exact index of the robot and task lists.
    pub fn check_consistency(&self) -> DomainResult<()> {
        let fail = |msg: String| Err(DomainError::Inconsistent(msg));
        let Some(grid) = self.grid.as_ref() else {
            if self.robots.is_empty() && self.tasks.is_empty() {
                return Ok(());
            }
            return fail("entities exist without a grid".to_string());
        };

        for robot in &self.robots {
            if robot.hp < 0 {
                return fail(format!("{} has negative hp {}", robot.id, robot.hp));
            }
            if (robot.hp == 0) != (robot.status == RobotStatus::Dead) {
                return fail(format!("{} has hp {} with status {:?}", robot.id, robot.hp, robot.status));
            }
            let Some(cell) = grid.cell(robot.position) else {
                return fail(format!("{} stands outside the grid", robot.id));
            };
            if robot.is_alive() {
                let vacated = cell.is_empty() && cell.robot_id.is_none() && cell.task_id.is_none();
                if !cell.holds_robot(&robot.id) && !vacated {
                    return fail(format!("{} is not indexed at {}", robot.id, robot.position));
                }
            }
            if let Some(task_id) = &robot.assigned_task_id {
                let held = self
                    .task(task_id)
                    .is_some_and(|t| t.assigned_to_robot_id.as_deref() == Some(robot.id.as_str()));
                if !held {
                    return fail(format!("{} holds {} which does not point back", robot.id, task_id));
                }
            }
        }

        for task in &self.tasks {
            let Some(cell) = grid.cell(task.position) else {
                return fail(format!("{} lies outside the grid", task.id));
            };
            let content_matches = cell.content == task.task_type.cell_content()
                || (cell.content == CellContentType::Robot && cell.covered_task == Some(task.task_type));
            if !cell.holds_task(&task.id) || !content_matches {
                return fail(format!("{} is not indexed at {}", task.id, task.position));
            }
            match (&task.status, &task.assigned_to_robot_id) {
                (TaskStatus::Unassigned, None) => {}
                (TaskStatus::Unassigned, Some(_)) => {
                    return fail(format!("{} is unassigned but names a robot", task.id));
                }
                (_, Some(robot_id)) => {
                    let back = self
                        .robot(robot_id)
                        .is_some_and(|r| r.is_alive() && r.assigned_task_id.as_deref() == Some(task.id.as_str()));
                    if !back {
                        return fail(format!("{} is assigned to {} which does not hold it", task.id, robot_id));
                    }
                }
                (_, None) => return fail(format!("{} is assigned to nobody", task.id)),
            }
        }

        for (at, cell) in grid.iter_cells() {
            if cell.robot_id.is_some() != (cell.content == CellContentType::Robot) {
                return fail(format!("cell {} has a robot reference mismatch", at));
            }
            if cell.content.is_task() && cell.task_id.is_none() {
                return fail(format!("cell {} shows a task without a reference", at));
            }
            if let Some(robot_id) = &cell.robot_id {
                let present = self
                    .robot(robot_id)
                    .is_some_and(|r| r.is_alive() && r.position == at);
                if !present {
                    return fail(format!("cell {} references absent robot {}", at, robot_id));
                }
            }
            if let Some(task_id) = &cell.task_id {
                if !self.task(task_id).is_some_and(|t| t.position == at) {
                    return fail(format!("cell {} references absent task {}", at, task_id));
                }
            }
        }
        Ok(())
    }
}
