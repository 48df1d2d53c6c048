use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use slug::slugify;
use uuid::Uuid;

use crate::models::{
    status::ProjectStatus,
    task::{NewTask, Task},
};

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Project {
    /// UUID of the project
    pub id: Uuid,
    /// Title of the project
    pub title: String,
    /// Free text description
    pub description: String,
    /// Current lifecycle status
    pub status: ProjectStatus,
    /// Repository link
    pub github_url: Option<String>,
    /// Deployed site link
    pub live_url: Option<String>,
    /// Technology tags, unique, in insertion order
    pub tech_stack: Vec<String>,
    /// Tasks owned by this project
    pub tasks: Vec<Task>,
    /// Created at timestamp of the project
    pub created_at: Timestamp,
    /// Last write to the project or any of its tasks
    pub updated_at: Timestamp,
}

impl Project {
    pub fn slug(&self) -> String {
        slugify(&self.title)
    }

    pub fn get_task(&self, task_id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn get_task_mut(&mut self, task_id: Uuid) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }

    /// `(completed, total)` task counts
    pub fn task_progress(&self) -> (usize, usize) {
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        (completed, self.tasks.len())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tech_stack.iter().any(|t| t == tag)
    }

    /// Appends `tag` unless it is already present. Returns whether it was added.
    pub fn insert_tag(&mut self, tag: String) -> bool {
        if self.has_tag(&tag) {
            return false;
        }
        self.tech_stack.push(tag);
        true
    }

    /// Removes the first entry equal to `tag`. Returns whether one was removed.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        match self.tech_stack.iter().position(|t| t == tag) {
            Some(index) => {
                self.tech_stack.remove(index);
                true
            }
            None => false,
        }
    }

    /// Refreshes `updated_at`. The new value is always strictly later than the
    /// previous one, even when the clock has not moved.
    pub fn touch(&mut self, now: Timestamp) {
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at
                .checked_add(jiff::SignedDuration::from_nanos(1))
                .unwrap_or(self.updated_at)
        };
    }
}

/// Caller-supplied fields of a project; the store assigns `id`,
/// `created_at` and `updated_at`.
#[derive(Debug, Default, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub tech_stack: Vec<String>,
    /// Initial tasks; each gets a fresh id and the project's `created_at`
    pub tasks: Vec<NewTask>,
}

impl NewProject {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn into_project(self, now: Timestamp) -> Project {
        let mut project = Project {
            id: Uuid::new_v4(),
            title: self.title,
            description: self.description,
            status: self.status,
            github_url: self.github_url,
            live_url: self.live_url,
            tech_stack: Vec::with_capacity(self.tech_stack.len()),
            tasks: self
                .tasks
                .into_iter()
                .map(|task| task.into_task(now))
                .collect(),
            created_at: now,
            updated_at: now,
        };
        for tag in self.tech_stack {
            project.insert_tag(tag);
        }
        project
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_tag_rejects_duplicates() {
        let mut project = Project::default();
        assert!(project.insert_tag("Rust".to_string()));
        assert!(project.insert_tag("Go".to_string()));
        assert!(!project.insert_tag("Rust".to_string()));
        assert_eq!(project.tech_stack, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_remove_tag() {
        let mut project = Project {
            tech_stack: vec!["Rust".into(), "Go".into()],
            ..Project::default()
        };
        assert!(project.remove_tag("Rust"));
        assert!(!project.remove_tag("Rust"));
        assert_eq!(project.tech_stack, vec!["Go"]);
    }

    #[test]
    fn test_into_project_dedupes_tech_stack() {
        let new_project = NewProject {
            tech_stack: vec!["React".into(), "Rust".into(), "React".into()],
            ..NewProject::titled("Dedup")
        };
        let project = new_project.into_project(Timestamp::UNIX_EPOCH);
        assert_eq!(project.tech_stack, vec!["React", "Rust"]);
        assert_eq!(project.created_at, project.updated_at);
    }

    #[test]
    fn test_touch_always_moves_forward() {
        let start = Timestamp::from_second(1_000).unwrap();
        let mut project = Project {
            created_at: start,
            updated_at: start,
            ..Project::default()
        };

        project.touch(start);
        assert!(project.updated_at > start);

        let later = Timestamp::from_second(2_000).unwrap();
        project.touch(later);
        assert_eq!(project.updated_at, later);
    }

    #[test]
    fn test_task_progress_and_slug() {
        let project = Project {
            title: "Site Redesign".into(),
            tasks: vec![
                Task {
                    completed: true,
                    ..Task::default()
                },
                Task::default(),
            ],
            ..Project::default()
        };
        assert_eq!(project.task_progress(), (1, 2));
        assert_eq!(project.slug(), "site-redesign");
    }
}
