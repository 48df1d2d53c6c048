//! Sparse updates. A `None` field is left untouched; for fields that are
//! themselves optional, `Some(None)` clears the stored value.

use jiff::Timestamp;

use crate::models::{project::Project, status::ProjectStatus, task::Task};

#[derive(Debug, Default, Clone)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub github_url: Option<Option<String>>,
    pub live_url: Option<Option<String>>,
    /// Replaces the whole stack; duplicates are dropped keeping the first one
    pub tech_stack: Option<Vec<String>>,
}

impl ProjectPatch {
    pub fn status(status: ProjectStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.github_url.is_none()
            && self.live_url.is_none()
            && self.tech_stack.is_none()
    }

    pub fn apply(self, project: &mut Project) {
        if let Some(title) = self.title {
            project.title = title;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        if let Some(github_url) = self.github_url {
            project.github_url = github_url;
        }
        if let Some(live_url) = self.live_url {
            project.live_url = live_url;
        }
        if let Some(tech_stack) = self.tech_stack {
            project.tech_stack.clear();
            for tag in tech_stack {
                project.insert_tag(tag);
            }
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<Option<Timestamp>>,
}

impl TaskPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none() && self.due_date.is_none()
    }

    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_patch_leaves_unspecified_fields() {
        let mut project = Project {
            title: "Old".into(),
            description: "Keep me".into(),
            github_url: Some("https://github.com/a/b".into()),
            live_url: Some("https://b.example.com".into()),
            ..Project::default()
        };

        ProjectPatch {
            title: Some("New".into()),
            live_url: Some(None),
            ..ProjectPatch::default()
        }
        .apply(&mut project);

        assert_eq!(project.title, "New");
        assert_eq!(project.description, "Keep me");
        assert_eq!(project.github_url.as_deref(), Some("https://github.com/a/b"));
        assert_eq!(project.live_url, None);
    }

    #[test]
    fn test_project_patch_tech_stack_is_deduplicated() {
        let mut project = Project::default();
        ProjectPatch {
            tech_stack: Some(vec!["Go".into(), "Go".into(), "Docker".into()]),
            ..ProjectPatch::default()
        }
        .apply(&mut project);
        assert_eq!(project.tech_stack, vec!["Go", "Docker"]);
    }

    #[test]
    fn test_task_patch_clears_due_date() {
        let mut task = Task {
            title: "Ship".into(),
            due_date: Some(Timestamp::UNIX_EPOCH),
            ..Task::default()
        };
        TaskPatch {
            due_date: Some(None),
            ..TaskPatch::default()
        }
        .apply(&mut task);
        assert_eq!(task.due_date, None);
        assert_eq!(task.title, "Ship");
        assert!(!task.completed);
    }

    #[test]
    fn test_empty_patches() {
        assert!(ProjectPatch::default().is_empty());
        assert!(!ProjectPatch::status(ProjectStatus::Active).is_empty());
        assert!(TaskPatch::default().is_empty());
        assert!(!TaskPatch::completed(true).is_empty());
    }
}
