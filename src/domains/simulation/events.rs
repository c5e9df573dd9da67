use crate::common::DomainEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregate::{Coordinate, GameStatus, RobotId, TaskId, TaskType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimulationEvent {
    TaskAssigned {
        robot_id: RobotId,
        task_id: TaskId,
        distance: u32,
        timestamp: DateTime<Utc>,
    },
    RobotMoved {
        robot_id: RobotId,
        from: Coordinate,
        to: Coordinate,
        hp: i64,
        timestamp: DateTime<Utc>,
    },
    RobotBlocked {
        robot_id: RobotId,
        at: Coordinate,
        hp: i64,
        timestamp: DateTime<Utc>,
    },
    HazardTriggered {
        robot_id: RobotId,
        at: Coordinate,
        timestamp: DateTime<Utc>,
    },
    TaskCompleted {
        robot_id: RobotId,
        task_id: TaskId,
        task_type: TaskType,
        hp: i64,
        timestamp: DateTime<Utc>,
    },
    AssignmentDropped {
        robot_id: RobotId,
        task_id: TaskId,
        reason: String,
        timestamp: DateTime<Utc>,
    },
    RobotDied {
        robot_id: RobotId,
        at: Coordinate,
        timestamp: DateTime<Utc>,
    },
    GameEnded {
        status: GameStatus,
        tick: u64,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent for SimulationEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SimulationEvent::TaskAssigned { .. } => "TaskAssigned",
            SimulationEvent::RobotMoved { .. } => "RobotMoved",
            SimulationEvent::RobotBlocked { .. } => "RobotBlocked",
            SimulationEvent::HazardTriggered { .. } => "HazardTriggered",
            SimulationEvent::TaskCompleted { .. } => "TaskCompleted",
            SimulationEvent::AssignmentDropped { .. } => "AssignmentDropped",
            SimulationEvent::RobotDied { .. } => "RobotDied",
            SimulationEvent::GameEnded { .. } => "GameEnded",
        }
    }

    fn aggregate_id(&self) -> &str {
        match self {
            SimulationEvent::TaskAssigned { robot_id, .. } => robot_id,
            SimulationEvent::RobotMoved { robot_id, .. } => robot_id,
            SimulationEvent::RobotBlocked { robot_id, .. } => robot_id,
            SimulationEvent::HazardTriggered { robot_id, .. } => robot_id,
            SimulationEvent::TaskCompleted { robot_id, .. } => robot_id,
            SimulationEvent::AssignmentDropped { robot_id, .. } => robot_id,
            SimulationEvent::RobotDied { robot_id, .. } => robot_id,
            SimulationEvent::GameEnded { .. } => "session",
        }
    }

    fn event_version(&self) -> u64 { 1 }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            SimulationEvent::TaskAssigned { timestamp, .. } => *timestamp,
            SimulationEvent::RobotMoved { timestamp, .. } => *timestamp,
            SimulationEvent::RobotBlocked { timestamp, .. } => *timestamp,
            SimulationEvent::HazardTriggered { timestamp, .. } => *timestamp,
            SimulationEvent::TaskCompleted { timestamp, .. } => *timestamp,
            SimulationEvent::AssignmentDropped { timestamp, .. } => *timestamp,
            SimulationEvent::RobotDied { timestamp, .. } => *timestamp,
            SimulationEvent::GameEnded { timestamp, .. } => *timestamp,
        }
    }
}
