//! Input checks applied at the store's create/update entry points.

use thiserror::Error;

use crate::models::{
    patch::{ProjectPatch, TaskPatch},
    project::NewProject,
    task::NewTask,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Project title cannot be empty")]
    EmptyProjectTitle,

    #[error("Task title cannot be empty")]
    EmptyTaskTitle,

    #[error("Tag cannot be empty")]
    EmptyTag,

    #[error("Invalid {field} '{value}': expected an http(s) URL")]
    InvalidUrl { field: &'static str, value: String },
}

pub fn check_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyProjectTitle);
    }
    Ok(())
}

pub fn check_task_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTaskTitle);
    }
    Ok(())
}

/// Trims the tag and rejects it if nothing is left.
pub fn normalize_tag(tag: &str) -> Result<String, ValidationError> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTag);
    }
    Ok(trimmed.to_string())
}

pub fn check_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidUrl {
        field,
        value: value.to_string(),
    };

    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
        .ok_or_else(invalid)?;

    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    if host.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    Ok(())
}

fn check_optional_url(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(url) => check_url(field, url),
        None => Ok(()),
    }
}

/// Validates a new project and normalizes its tags in place.
pub fn check_new_project(project: &mut NewProject) -> Result<(), ValidationError> {
    check_title(&project.title)?;
    check_optional_url("GitHub URL", project.github_url.as_deref())?;
    check_optional_url("live URL", project.live_url.as_deref())?;
    project.tech_stack = project
        .tech_stack
        .iter()
        .map(|tag| normalize_tag(tag))
        .collect::<Result<_, _>>()?;
    for task in &project.tasks {
        check_task_title(&task.title)?;
    }
    Ok(())
}

/// Validates the fields a patch sets and normalizes its tags in place.
pub fn check_project_patch(patch: &mut ProjectPatch) -> Result<(), ValidationError> {
    if let Some(title) = &patch.title {
        check_title(title)?;
    }
    if let Some(github_url) = &patch.github_url {
        check_optional_url("GitHub URL", github_url.as_deref())?;
    }
    if let Some(live_url) = &patch.live_url {
        check_optional_url("live URL", live_url.as_deref())?;
    }
    if let Some(tech_stack) = &mut patch.tech_stack {
        *tech_stack = tech_stack
            .iter()
            .map(|tag| normalize_tag(tag))
            .collect::<Result<_, _>>()?;
    }
    Ok(())
}

pub fn check_new_task(task: &NewTask) -> Result<(), ValidationError> {
    check_task_title(&task.title)
}

pub fn check_task_patch(patch: &TaskPatch) -> Result<(), ValidationError> {
    match &patch.title {
        Some(title) => check_task_title(title),
        None => Ok(()),
    }
}
