use jiff::{Timestamp, civil::Date, tz::TimeZone};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    models::{
        patch::TaskPatch,
        project::Project,
        task::{NewTask, Task},
    },
    services::projects::{ProjectCommandError, resolve_project},
    store::{ProjectStore, StoreError},
};

#[derive(Debug, Error)]
pub enum TaskCommandError {
    #[error(transparent)]
    Project(#[from] ProjectCommandError),

    #[error("Task '{0}' not found")]
    TaskNotFound(String),

    #[error("Task name is ambiguous. Multiple tasks found: {}", .0.join(", "))]
    AmbiguousTaskName(Vec<String>),

    #[error("Invalid due date '{0}': {1}")]
    InvalidDueDate(String, String),

    #[error("Nothing to change: pass at least one field to edit")]
    EmptyEdit,

    #[error("{0}")]
    Store(#[from] StoreError),
}

/// Finds a task inside `project` by its 1-based position, or by a title fragment.
pub fn resolve_task(project: &Project, reference: &str) -> Result<Uuid, TaskCommandError> {
    if let Ok(position) = reference.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|index| project.tasks.get(index))
            .map(|t| t.id)
            .ok_or_else(|| TaskCommandError::TaskNotFound(reference.to_string()));
    }

    let needle = reference.to_lowercase();
    let matching_tasks: Vec<&Task> = project
        .tasks
        .iter()
        .filter(|t| t.title.to_lowercase().contains(&needle))
        .collect();

    match matching_tasks.len() {
        0 => Err(TaskCommandError::TaskNotFound(reference.to_string())),
        1 => Ok(matching_tasks[0].id),
        _ => {
            let titles: Vec<String> = matching_tasks.iter().map(|t| t.title.clone()).collect();
            Err(TaskCommandError::AmbiguousTaskName(titles))
        }
    }
}

/// Parses a `YYYY-MM-DD` date into the start of that day in `tz`.
pub fn parse_due_date(input: &str, tz: &TimeZone) -> Result<Timestamp, TaskCommandError> {
    let invalid = |e: jiff::Error| TaskCommandError::InvalidDueDate(input.to_string(), e.to_string());
    let date: Date = input.trim().parse().map_err(invalid)?;
    let zoned = date.to_zoned(tz.clone()).map_err(invalid)?;
    Ok(zoned.timestamp())
}

fn locate(
    store: &ProjectStore,
    project_reference: &str,
    task_reference: &str,
) -> Result<(Uuid, Uuid), TaskCommandError> {
    let project_id = resolve_project(store, project_reference)?;
    let project = store
        .get(project_id)
        .ok_or(StoreError::ProjectNotFound(project_id))?;
    let task_id = resolve_task(project, task_reference)?;
    Ok((project_id, task_id))
}

fn fetch_task(store: &ProjectStore, project_id: Uuid, task_id: Uuid) -> Result<Task, StoreError> {
    store
        .get(project_id)
        .and_then(|p| p.get_task(task_id))
        .cloned()
        .ok_or(StoreError::TaskNotFound {
            project_id,
            task_id,
        })
}

pub struct AddTaskParameters {
    pub project: String,
    pub title: String,
    pub due: Option<String>,
}

pub fn add_task(
    store: &mut ProjectStore,
    tz: &TimeZone,
    parameters: AddTaskParameters,
) -> Result<Task, TaskCommandError> {
    let project_id = resolve_project(store, &parameters.project)?;

    let due_date = parameters
        .due
        .as_deref()
        .map(|due| parse_due_date(due, tz))
        .transpose()?;

    let task_id = store.add_task(
        project_id,
        NewTask {
            title: parameters.title,
            completed: false,
            due_date,
        },
    )?;

    Ok(fetch_task(store, project_id, task_id)?)
}

pub struct SetCompletedParameters {
    pub project: String,
    pub task: String,
    pub completed: bool,
}

pub fn set_completed(
    store: &mut ProjectStore,
    parameters: SetCompletedParameters,
) -> Result<Task, TaskCommandError> {
    let (project_id, task_id) = locate(store, &parameters.project, &parameters.task)?;
    store.update_task(project_id, task_id, TaskPatch::completed(parameters.completed))?;
    Ok(fetch_task(store, project_id, task_id)?)
}

pub struct EditTaskParameters {
    pub project: String,
    pub task: String,
    pub title: Option<String>,
    pub due: Option<String>,
    pub clear_due: bool,
}

pub fn edit_task(
    store: &mut ProjectStore,
    tz: &TimeZone,
    parameters: EditTaskParameters,
) -> Result<Task, TaskCommandError> {
    let (project_id, task_id) = locate(store, &parameters.project, &parameters.task)?;

    let due_date = if parameters.clear_due {
        Some(None)
    } else {
        parameters
            .due
            .as_deref()
            .map(|due| parse_due_date(due, tz).map(Some))
            .transpose()?
    };

    let patch = TaskPatch {
        title: parameters.title,
        completed: None,
        due_date,
    };
    if patch.is_empty() {
        return Err(TaskCommandError::EmptyEdit);
    }

    store.update_task(project_id, task_id, patch)?;
    Ok(fetch_task(store, project_id, task_id)?)
}

pub struct DeleteTaskParameters {
    pub project: String,
    pub task: String,
}

pub fn delete_task(
    store: &mut ProjectStore,
    parameters: DeleteTaskParameters,
) -> Result<Task, TaskCommandError> {
    let (project_id, task_id) = locate(store, &parameters.project, &parameters.task)?;
    Ok(store.delete_task(project_id, task_id)?)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::project::NewProject;

    fn store() -> ProjectStore {
        let mut store = ProjectStore::with_projects(vec![]);
        let id = store.create(NewProject::titled("Site Redesign")).unwrap();
        for title in ["Design mockups", "Write copy", "Design review"] {
            store.add_task(id, NewTask::titled(title)).unwrap();
        }
        store
    }

    #[test]
    fn test_resolve_task_by_position_and_title() {
        let store = store();
        let project = &store.list_all()[0];

        assert_eq!(resolve_task(project, "2").unwrap(), project.tasks[1].id);
        assert_eq!(resolve_task(project, "copy").unwrap(), project.tasks[1].id);
        assert!(matches!(
            resolve_task(project, "0"),
            Err(TaskCommandError::TaskNotFound(_))
        ));
        assert!(matches!(
            resolve_task(project, "4"),
            Err(TaskCommandError::TaskNotFound(_))
        ));
        match resolve_task(project, "design") {
            Err(TaskCommandError::AmbiguousTaskName(titles)) => {
                assert_eq!(titles, vec!["Design mockups", "Design review"]);
            }
            _ => panic!("Expected AmbiguousTaskName"),
        }
    }

    #[test]
    fn test_parse_due_date() {
        let due = parse_due_date("2026-03-04", &TimeZone::UTC).unwrap();
        assert_eq!(due.to_zoned(TimeZone::UTC).date(), date(2026, 3, 4));

        match parse_due_date("next friday", &TimeZone::UTC) {
            Err(TaskCommandError::InvalidDueDate(input, _)) => assert_eq!(input, "next friday"),
            _ => panic!("Expected InvalidDueDate"),
        }
    }

    #[test]
    fn test_add_task_with_due_date() {
        let mut store = store();
        let task = add_task(
            &mut store,
            &TimeZone::UTC,
            AddTaskParameters {
                project: "site".into(),
                title: "Launch".into(),
                due: Some("2026-05-01".into()),
            },
        )
        .unwrap();

        assert!(!task.completed);
        assert_eq!(
            task.due_date.map(|d| d.to_zoned(TimeZone::UTC).date()),
            Some(date(2026, 5, 1))
        );
        assert_eq!(store.list_all()[0].tasks.last().unwrap().id, task.id);
    }

    #[test]
    fn test_invalid_due_date_adds_nothing() {
        let mut store = store();
        let result = add_task(
            &mut store,
            &TimeZone::UTC,
            AddTaskParameters {
                project: "site".into(),
                title: "Launch".into(),
                due: Some("2026-13-01".into()),
            },
        );
        assert!(matches!(result, Err(TaskCommandError::InvalidDueDate(..))));
        assert_eq!(store.list_all()[0].tasks.len(), 3);
    }

    #[test]
    fn test_done_and_undo() {
        let mut store = store();
        let done = set_completed(
            &mut store,
            SetCompletedParameters {
                project: "site".into(),
                task: "mockups".into(),
                completed: true,
            },
        )
        .unwrap();
        assert!(done.completed);
        assert_eq!(done.title, "Design mockups");

        let undone = set_completed(
            &mut store,
            SetCompletedParameters {
                project: "site".into(),
                task: "1".into(),
                completed: false,
            },
        )
        .unwrap();
        assert!(!undone.completed);
    }

    #[test]
    fn test_edit_task_due_date() {
        let mut store = store();
        let edited = edit_task(
            &mut store,
            &TimeZone::UTC,
            EditTaskParameters {
                project: "site".into(),
                task: "copy".into(),
                title: Some("Write landing copy".into()),
                due: Some("2026-06-01".into()),
                clear_due: false,
            },
        )
        .unwrap();
        assert_eq!(edited.title, "Write landing copy");
        assert!(edited.due_date.is_some());

        let cleared = edit_task(
            &mut store,
            &TimeZone::UTC,
            EditTaskParameters {
                project: "site".into(),
                task: "landing".into(),
                title: None,
                due: None,
                clear_due: true,
            },
        )
        .unwrap();
        assert_eq!(cleared.due_date, None);

        let nothing = edit_task(
            &mut store,
            &TimeZone::UTC,
            EditTaskParameters {
                project: "site".into(),
                task: "landing".into(),
                title: None,
                due: None,
                clear_due: false,
            },
        );
        assert!(matches!(nothing, Err(TaskCommandError::EmptyEdit)));
    }

    #[test]
    fn test_delete_task_by_reference() {
        let mut store = store();
        let removed = delete_task(
            &mut store,
            DeleteTaskParameters {
                project: "site".into(),
                task: "3".into(),
            },
        )
        .unwrap();
        assert_eq!(removed.title, "Design review");
        assert_eq!(store.list_all()[0].tasks.len(), 2);

        let missing_project = delete_task(
            &mut store,
            DeleteTaskParameters {
                project: "nowhere".into(),
                task: "1".into(),
            },
        );
        assert!(matches!(
            missing_project,
            Err(TaskCommandError::Project(ProjectCommandError::ProjectNotFound(_)))
        ));
    }
}
