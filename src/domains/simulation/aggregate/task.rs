use serde::{Deserialize, Serialize};

use super::types::{Coordinate, RobotId, TaskId, TaskStatus, TaskType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub position: Coordinate,
    pub status: TaskStatus,
    pub assigned_to_robot_id: Option<RobotId>,
}

impl Task {
    pub fn new(id: TaskId, task_type: TaskType, position: Coordinate) -> Self {
        Self {
            id,
            task_type,
            position,
            status: TaskStatus::Unassigned,
            assigned_to_robot_id: None,
        }
    }

    pub fn is_unassigned(&self) -> bool {
        self.status == TaskStatus::Unassigned
    }

    /// Unclaimed and of a type the executor can complete.
    pub fn is_assignable(&self) -> bool {
        self.is_unassigned() && self.task_type.is_executable()
    }

    pub(crate) fn release(&mut self) {
        self.status = TaskStatus::Unassigned;
        self.assigned_to_robot_id = None;
    }
}
