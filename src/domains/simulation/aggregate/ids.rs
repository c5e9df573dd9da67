use serde::{Deserialize, Serialize};

use super::types::{RobotId, TaskId};

/// Monotonic per-session id source. Starts again at 1 whenever a session is
/// configured or reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdGenerator {
    next_robot: u64,
    next_task: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self {
            next_robot: 1,
            next_task: 1,
        }
    }
}

impl IdGenerator {
    pub fn next_robot_id(&mut self) -> RobotId {
        let id = format!("robot-{}", self.next_robot);
        self.next_robot += 1;
        id
    }

    pub fn next_task_id(&mut self) -> TaskId {
        let id = format!("task-{}", self.next_task);
        self.next_task += 1;
        id
    }
}
