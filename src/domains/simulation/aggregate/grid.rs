use rand::Rng;
use serde::{Deserialize, Serialize};

use super::types::{CellContentType, Coordinate, RobotId, TaskId, TaskType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub content: CellContentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robot_id: Option<RobotId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
    /// Task lying under a robot that currently occupies this cell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub covered_task: Option<TaskType>,
}

impl GridCell {
    pub fn empty() -> Self {
        Self {
            content: CellContentType::Empty,
            robot_id: None,
            task_id: None,
            covered_task: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content == CellContentType::Empty
    }

    pub fn is_hazard(&self) -> bool {
        self.content == CellContentType::Bomb
    }

    pub fn holds_robot(&self, robot_id: &str) -> bool {
        self.robot_id.as_deref() == Some(robot_id)
    }

    pub fn holds_task(&self, task_id: &str) -> bool {
        self.task_id.as_deref() == Some(task_id)
    }

    pub(crate) fn clear(&mut self) {
        *self = GridCell::empty();
    }

    pub(crate) fn put_task(&mut self, task_id: TaskId, kind: TaskType) {
        self.content = kind.cell_content();
        self.robot_id = None;
        self.task_id = Some(task_id);
        self.covered_task = None;
    }

    /// Marks the cell as held by `robot_id`. A task on the cell stays
    /// registered underneath; a hazard is overwritten.
    pub(crate) fn claim(&mut self, robot_id: RobotId) {
        if self.content.is_task() {
            self.covered_task = match self.content {
                CellContentType::Garbage => Some(TaskType::Garbage),
                CellContentType::HealthPack => Some(TaskType::HealthPack),
                _ => Some(TaskType::Package),
            };
        }
        self.content = CellContentType::Robot;
        self.robot_id = Some(robot_id);
    }

    /// Drops the robot reference and restores whatever task lay beneath it.
    pub(crate) fn release(&mut self) {
        self.robot_id = None;
        match (self.covered_task.take(), self.task_id.is_some()) {
            (Some(kind), true) => self.content = kind.cell_content(),
            _ => {
                self.content = CellContentType::Empty;
                self.task_id = None;
            }
        }
    }
}

/// Rectangular board, indexed as `cells[y][x]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<Vec<GridCell>>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![vec![GridCell::empty(); cols]; rows],
        }
    }

    pub fn within_bounds(&self, at: Coordinate) -> bool {
        at.x >= 0 && at.y >= 0 && (at.x as usize) < self.cols && (at.y as usize) < self.rows
    }

    pub fn cell(&self, at: Coordinate) -> Option<&GridCell> {
        if !self.within_bounds(at) {
            return None;
        }
        Some(&self.cells[at.y as usize][at.x as usize])
    }

    pub fn cell_mut(&mut self, at: Coordinate) -> Option<&mut GridCell> {
        if !self.within_bounds(at) {
            return None;
        }
        Some(&mut self.cells[at.y as usize][at.x as usize])
    }

    pub fn place_hazard(&mut self, at: Coordinate) -> bool {
        match self.cell_mut(at) {
            Some(cell) if cell.is_empty() => {
                cell.content = CellContentType::Bomb;
                true
            }
            _ => false,
        }
    }

    /// Scatters up to `count` hazards over distinct empty cells. Gives up after
    /// `rows * cols * 2` draws and returns how many were actually placed.
    pub fn place_hazards<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> usize {
        if self.rows == 0 || self.cols == 0 {
            return 0;
        }
        let max_attempts = self.rows * self.cols * 2;
        let mut placed = 0;
        let mut attempts = 0;
        while placed < count && attempts < max_attempts {
            let at = Coordinate::new(
                rng.gen_range(0..self.cols) as i32,
                rng.gen_range(0..self.rows) as i32,
            );
            if self.place_hazard(at) {
                placed += 1;
            }
            attempts += 1;
        }
        placed
    }

    pub fn hazard_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_hazard())
            .count()
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (Coordinate, &GridCell)> {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, cell)| (Coordinate::new(x as i32, y as i32), cell))
        })
    }
}
