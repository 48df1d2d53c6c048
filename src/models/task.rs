use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Task {
    /// UUID to identify the task
    pub id: Uuid,
    /// Title of the task
    pub title: String,
    /// Whether the task is done
    pub completed: bool,
    /// Deadline of the task, if it has one
    pub due_date: Option<Timestamp>,
    /// When the task was created
    pub created_at: Timestamp,
}

/// Caller-supplied fields of a task; the store assigns `id` and `created_at`.
#[derive(Debug, Default, Clone)]
pub struct NewTask {
    pub title: String,
    pub completed: bool,
    pub due_date: Option<Timestamp>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn into_task(self, created_at: Timestamp) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: self.title,
            completed: self.completed,
            due_date: self.due_date,
            created_at,
        }
    }
}
