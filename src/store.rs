use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::models::{
    patch::{ProjectPatch, TaskPatch},
    project::{NewProject, Project},
    status::{ProjectStatus, StatusFilter},
    task::{NewTask, Task},
};

pub mod clock;
pub mod events;
pub mod validation;

use clock::{Clock, SystemClock};
use events::{ChangeEvent, ChangeListener};
use validation::ValidationError;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("Project {0} not found")]
    ProjectNotFound(Uuid),

    #[error("Task {task_id} not found in project {project_id}")]
    TaskNotFound { project_id: Uuid, task_id: Uuid },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// In-memory authority over the project collection for one session.
///
/// Every successful mutation refreshes the affected project's `updated_at`
/// (tag no-ops excepted), bumps [`ProjectStore::revision`] and notifies all
/// subscribed listeners. A lookup miss returns an error and changes nothing.
pub struct ProjectStore {
    projects: Vec<Project>,
    clock: Box<dyn Clock>,
    listeners: Vec<Box<dyn ChangeListener>>,
    revision: u64,
}

impl ProjectStore {
    pub fn new(projects: Vec<Project>, clock: Box<dyn Clock>) -> Self {
        Self {
            projects,
            clock,
            listeners: Vec::new(),
            revision: 0,
        }
    }

    pub fn with_projects(projects: Vec<Project>) -> Self {
        Self::new(projects, Box::new(SystemClock))
    }

    pub fn subscribe(&mut self, listener: Box<dyn ChangeListener>) {
        self.listeners.push(listener);
    }

    /// Number of successful mutations since construction
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn list_all(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: Uuid) -> Result<&mut Project, StoreError> {
        self.projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::ProjectNotFound(id))
    }

    pub fn filter_by_status(&self, filter: StatusFilter) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| filter.matches(p.status))
            .collect()
    }

    pub fn status_counts(&self) -> [(ProjectStatus, usize); 5] {
        ProjectStatus::ALL.map(|status| {
            let count = self.projects.iter().filter(|p| p.status == status).count();
            (status, count)
        })
    }

    pub fn create(&mut self, mut new_project: NewProject) -> Result<Uuid, StoreError> {
        validation::check_new_project(&mut new_project)?;

        let project = new_project.into_project(self.clock.now());
        let project_id = project.id;
        let title = project.title.clone();
        debug!(%project_id, %title, "creating project");

        self.projects.push(project);
        self.notify(ChangeEvent::ProjectCreated { project_id, title });

        Ok(project_id)
    }

    pub fn update(&mut self, id: Uuid, mut patch: ProjectPatch) -> Result<(), StoreError> {
        validation::check_project_patch(&mut patch)?;

        let now = self.clock.now();
        let project = self.get_mut(id)?;
        patch.apply(project);
        project.touch(now);
        debug!(project_id = %id, "updated project");

        self.notify(ChangeEvent::ProjectUpdated { project_id: id });
        Ok(())
    }

    /// Removes the project together with all of its tasks.
    pub fn delete(&mut self, id: Uuid) -> Result<Project, StoreError> {
        let index = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::ProjectNotFound(id))?;

        let project = self.projects.remove(index);
        debug!(project_id = %id, tasks = project.tasks.len(), "deleted project");

        self.notify(ChangeEvent::ProjectDeleted {
            project_id: id,
            title: project.title.clone(),
        });
        Ok(project)
    }

    pub fn add_task(&mut self, project_id: Uuid, new_task: NewTask) -> Result<Uuid, StoreError> {
        validation::check_new_task(&new_task)?;

        let now = self.clock.now();
        let project = self.get_mut(project_id)?;
        let task = new_task.into_task(now);
        let task_id = task.id;
        project.tasks.push(task);
        project.touch(now);
        debug!(%project_id, %task_id, "added task");

        self.notify(ChangeEvent::TaskAdded {
            project_id,
            task_id,
        });
        Ok(task_id)
    }

    pub fn update_task(
        &mut self,
        project_id: Uuid,
        task_id: Uuid,
        patch: TaskPatch,
    ) -> Result<(), StoreError> {
        validation::check_task_patch(&patch)?;

        let now = self.clock.now();
        let project = self.get_mut(project_id)?;
        let task = project
            .get_task_mut(task_id)
            .ok_or(StoreError::TaskNotFound {
                project_id,
                task_id,
            })?;
        patch.apply(task);
        project.touch(now);
        debug!(%project_id, %task_id, "updated task");

        self.notify(ChangeEvent::TaskUpdated {
            project_id,
            task_id,
        });
        Ok(())
    }

    pub fn delete_task(&mut self, project_id: Uuid, task_id: Uuid) -> Result<Task, StoreError> {
        let now = self.clock.now();
        let project = self.get_mut(project_id)?;
        let index = project
            .tasks
            .iter()
            .position(|t| t.id == task_id)
            .ok_or(StoreError::TaskNotFound {
                project_id,
                task_id,
            })?;
        let task = project.tasks.remove(index);
        project.touch(now);
        debug!(%project_id, %task_id, "deleted task");

        self.notify(ChangeEvent::TaskDeleted {
            project_id,
            task_id,
        });
        Ok(task)
    }

    /// Adds a tech-stack tag. Returns `false`, without writing, when the tag
    /// is already present.
    pub fn add_tag(&mut self, project_id: Uuid, tag: &str) -> Result<bool, StoreError> {
        let tag = validation::normalize_tag(tag)?;

        let now = self.clock.now();
        let project = self.get_mut(project_id)?;
        if !project.insert_tag(tag.clone()) {
            debug!(%project_id, %tag, "tag already present");
            return Ok(false);
        }
        project.touch(now);

        self.notify(ChangeEvent::TagAdded { project_id, tag });
        Ok(true)
    }

    /// Removes one matching tech-stack tag. Returns `false` when absent.
    pub fn remove_tag(&mut self, project_id: Uuid, tag: &str) -> Result<bool, StoreError> {
        let tag = tag.trim();

        let now = self.clock.now();
        let project = self.get_mut(project_id)?;
        if !project.remove_tag(tag) {
            return Ok(false);
        }
        project.touch(now);

        self.notify(ChangeEvent::TagRemoved {
            project_id,
            tag: tag.to_string(),
        });
        Ok(true)
    }

    fn notify(&mut self, event: ChangeEvent) {
        self.revision += 1;
        for listener in self.listeners.iter_mut() {
            listener.on_change(&event, &self.projects);
        }
    }
}
