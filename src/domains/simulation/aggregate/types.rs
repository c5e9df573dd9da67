use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::common::DomainError;

pub type RobotId = String;
pub type TaskId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan_distance(&self, other: &Coordinate) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Orthogonal neighbours in scan order: north, south, west, east.
    pub fn neighbors(&self) -> [Coordinate; 4] {
        [
            Coordinate::new(self.x, self.y - 1),
            Coordinate::new(self.x, self.y + 1),
            Coordinate::new(self.x - 1, self.y),
            Coordinate::new(self.x + 1, self.y),
        ]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CellContentType {
    Empty,
    Robot,
    Bomb,
    Garbage,
    HealthPack,
    Package,
}

impl CellContentType {
    pub fn is_task(&self) -> bool {
        matches!(self, Self::Garbage | Self::HealthPack | Self::Package)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RobotStatus {
    Idle,
    MovingToTask,
    PerformingTask,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    Garbage,
    HealthPack,
    Package,
}

impl TaskType {
    pub fn cell_content(&self) -> CellContentType {
        match self {
            TaskType::Garbage => CellContentType::Garbage,
            TaskType::HealthPack => CellContentType::HealthPack,
            TaskType::Package => CellContentType::Package,
        }
    }

    /// Task types a robot completes on arrival.
    pub fn is_executable(&self) -> bool {
        matches!(self, TaskType::Garbage | TaskType::HealthPack)
    }

    /// Task types that must be cleared for the game to be won.
    pub fn counts_toward_win(&self) -> bool {
        matches!(self, TaskType::Garbage)
    }
}

impl FromStr for TaskType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GARBAGE" => Ok(TaskType::Garbage),
            "HEALTH_PACK" => Ok(TaskType::HealthPack),
            "PACKAGE" => Ok(TaskType::Package),
            other => Err(DomainError::UnknownType {
                kind: "item",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Unassigned,
    Assigned,
    InTransit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Setup,
    Running,
    Paused,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyKind {
    NearestRobot,
    RoundRobin,
}

impl FromStr for StrategyKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEAREST_ROBOT" | "NEAREST_ROBOT_BASIC" => Ok(StrategyKind::NearestRobot),
            "ROUND_ROBIN" | "ROUND_ROBIN_BASIC" => Ok(StrategyKind::RoundRobin),
            other => Err(DomainError::InvalidStrategy(other.to_string())),
        }
    }
}
