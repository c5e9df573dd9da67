use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::types::{Coordinate, RobotId, RobotStatus, TaskId};
use crate::common::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RobotType {
    CerberusBasic,
    JesusOfSuburbia,
    Calcifer,
}

/// Purchase price and starting health of a robot model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobotSpec {
    pub initial_hp: u32,
    pub cost: u32,
    pub zoned: bool,
}

impl RobotType {
    pub fn spec(&self) -> RobotSpec {
        match self {
            RobotType::CerberusBasic => RobotSpec { initial_hp: 300, cost: 300, zoned: false },
            RobotType::JesusOfSuburbia => RobotSpec { initial_hp: 100, cost: 100, zoned: true },
            RobotType::Calcifer => RobotSpec { initial_hp: 50, cost: 50, zoned: false },
        }
    }
}

impl FromStr for RobotType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CERBERUS_BASIC" => Ok(RobotType::CerberusBasic),
            "JESUS_OF_SUBURBIA" => Ok(RobotType::JesusOfSuburbia),
            "CALCIFER" => Ok(RobotType::Calcifer),
            other => Err(DomainError::UnknownType {
                kind: "robot",
                value: other.to_string(),
            }),
        }
    }
}

/// Inclusive rectangle a zoned robot may not leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementZone {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl MovementZone {
    /// Square of `radius` around `center`, clipped to a `rows` x `cols` board.
    pub fn around(center: Coordinate, radius: i32, rows: usize, cols: usize) -> Self {
        Self {
            min_x: (center.x - radius).max(0),
            max_x: (center.x + radius).min(cols as i32 - 1),
            min_y: (center.y - radius).max(0),
            max_y: (center.y + radius).min(rows as i32 - 1),
        }
    }

    pub fn contains(&self, at: Coordinate) -> bool {
        at.x >= self.min_x && at.x <= self.max_x && at.y >= self.min_y && at.y <= self.max_y
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Robot {
    pub id: RobotId,
    #[serde(rename = "type")]
    pub robot_type: RobotType,
    pub position: Coordinate,
    pub hp: i64,
    pub initial_hp: i64,
    pub status: RobotStatus,
    pub assigned_task_id: Option<TaskId>,
    pub movement_zone: Option<MovementZone>,
}

impl Robot {
    pub fn new(id: RobotId, robot_type: RobotType, position: Coordinate, hp: i64) -> Self {
        Self {
            id,
            robot_type,
            position,
            hp,
            initial_hp: hp,
            status: RobotStatus::Idle,
            assigned_task_id: None,
            movement_zone: None,
        }
    }

    pub fn with_zone(mut self, zone: MovementZone) -> Self {
        self.movement_zone = Some(zone);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.status != RobotStatus::Dead
    }

    pub fn is_available(&self) -> bool {
        self.status == RobotStatus::Idle && self.hp > 0
    }

    pub fn can_reach(&self, at: Coordinate) -> bool {
        self.movement_zone.map_or(true, |zone| zone.contains(at))
    }

    pub(crate) fn unassign(&mut self) {
        self.assigned_task_id = None;
        self.status = RobotStatus::Idle;
    }
}
