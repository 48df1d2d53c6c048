use uuid::Uuid;

use crate::models::project::Project;

/// One successful store mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    ProjectCreated { project_id: Uuid, title: String },
    ProjectUpdated { project_id: Uuid },
    ProjectDeleted { project_id: Uuid, title: String },
    TaskAdded { project_id: Uuid, task_id: Uuid },
    TaskUpdated { project_id: Uuid, task_id: Uuid },
    TaskDeleted { project_id: Uuid, task_id: Uuid },
    TagAdded { project_id: Uuid, tag: String },
    TagRemoved { project_id: Uuid, tag: String },
}

/// Short confirmation message shown after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: &'static str,
    pub description: String,
    pub destructive: bool,
}

impl ChangeEvent {
    pub fn project_id(&self) -> Uuid {
        match self {
            ChangeEvent::ProjectCreated { project_id, .. }
            | ChangeEvent::ProjectUpdated { project_id }
            | ChangeEvent::ProjectDeleted { project_id, .. }
            | ChangeEvent::TaskAdded { project_id, .. }
            | ChangeEvent::TaskUpdated { project_id, .. }
            | ChangeEvent::TaskDeleted { project_id, .. }
            | ChangeEvent::TagAdded { project_id, .. }
            | ChangeEvent::TagRemoved { project_id, .. } => *project_id,
        }
    }

    /// Task edits (e.g. ticking a checkbox) are silent.
    pub fn notification(&self) -> Option<Notification> {
        let notification = match self {
            ChangeEvent::ProjectCreated { title, .. } => Notification {
                title: "Project created",
                description: format!("{title} has been created successfully."),
                destructive: false,
            },
            ChangeEvent::ProjectUpdated { .. }
            | ChangeEvent::TagAdded { .. }
            | ChangeEvent::TagRemoved { .. } => Notification {
                title: "Project updated",
                description: "Project has been updated successfully.".to_string(),
                destructive: false,
            },
            ChangeEvent::ProjectDeleted { title, .. } => Notification {
                title: "Project deleted",
                description: format!("{title} has been deleted."),
                destructive: true,
            },
            ChangeEvent::TaskAdded { .. } => Notification {
                title: "Task added",
                description: "New task has been added to the project.".to_string(),
                destructive: false,
            },
            ChangeEvent::TaskDeleted { .. } => Notification {
                title: "Task deleted",
                description: "Task has been removed from the project.".to_string(),
                destructive: false,
            },
            ChangeEvent::TaskUpdated { .. } => return None,
        };
        Some(notification)
    }
}

/// Consumer refreshed after every mutation with the full collection.
pub trait ChangeListener {
    fn on_change(&mut self, event: &ChangeEvent, projects: &[Project]);
}

impl<F> ChangeListener for F
where
    F: FnMut(&ChangeEvent, &[Project]),
{
    fn on_change(&mut self, event: &ChangeEvent, projects: &[Project]) {
        self(event, projects)
    }
}
