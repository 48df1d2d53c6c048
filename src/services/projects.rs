use thiserror::Error;
use uuid::Uuid;

use crate::{
    models::{
        patch::ProjectPatch,
        project::{NewProject, Project},
        status::ProjectStatus,
    },
    store::{ProjectStore, StoreError},
};

#[derive(Debug, Error)]
pub enum ProjectCommandError {
    #[error("Project '{0}' not found")]
    ProjectNotFound(String),

    #[error("Project name is ambiguous. Multiple projects found: {}", .0.join(", "))]
    AmbiguousProjectName(Vec<String>),

    #[error("Nothing to change: pass at least one field to edit")]
    EmptyEdit,

    #[error("{0}")]
    Store(#[from] StoreError),
}

/// Finds a project by id, slug or title fragment, in that order.
pub fn resolve_project(store: &ProjectStore, reference: &str) -> Result<Uuid, ProjectCommandError> {
    if let Ok(id) = reference.parse::<Uuid>() {
        return store
            .get(id)
            .map(|p| p.id)
            .ok_or_else(|| ProjectCommandError::ProjectNotFound(reference.to_string()));
    }

    let projects = store.list_all();

    let wanted_slug = slug::slugify(reference);
    if let Some(project) = projects.iter().find(|p| p.slug() == wanted_slug) {
        return Ok(project.id);
    }

    // Fuzzy match on the title
    let needle = reference.to_lowercase();
    let matching_projects: Vec<&Project> = projects
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&needle))
        .collect();

    match matching_projects.len() {
        0 => Err(ProjectCommandError::ProjectNotFound(reference.to_string())),
        1 => Ok(matching_projects[0].id),
        _ => {
            let names: Vec<String> = matching_projects.iter().map(|p| p.title.clone()).collect();
            Err(ProjectCommandError::AmbiguousProjectName(names))
        }
    }
}

pub struct CreateProjectParameters {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub tech_stack: Vec<String>,
}

pub fn create_project(
    store: &mut ProjectStore,
    parameters: CreateProjectParameters,
) -> Result<Project, ProjectCommandError> {
    let project_id = store.create(NewProject {
        title: parameters.title,
        description: parameters.description.unwrap_or_default(),
        status: parameters.status.unwrap_or_default(),
        github_url: parameters.github_url,
        live_url: parameters.live_url,
        tech_stack: parameters.tech_stack,
        tasks: vec![],
    })?;

    Ok(fetch(store, project_id)?.clone())
}

pub struct EditProjectParameters {
    pub project: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub clear_github_url: bool,
    pub clear_live_url: bool,
}

pub fn edit_project(
    store: &mut ProjectStore,
    parameters: EditProjectParameters,
) -> Result<Project, ProjectCommandError> {
    let project_id = resolve_project(store, &parameters.project)?;

    let patch = ProjectPatch {
        title: parameters.title,
        description: parameters.description,
        status: parameters.status,
        github_url: clearable(parameters.github_url, parameters.clear_github_url),
        live_url: clearable(parameters.live_url, parameters.clear_live_url),
        tech_stack: None,
    };
    if patch.is_empty() {
        return Err(ProjectCommandError::EmptyEdit);
    }

    store.update(project_id, patch)?;

    Ok(fetch(store, project_id)?.clone())
}

fn clearable(value: Option<String>, clear: bool) -> Option<Option<String>> {
    if clear { Some(None) } else { value.map(Some) }
}

pub struct DeleteProjectParameters {
    pub project: String,
}

pub struct DeleteProjectResult {
    pub project: Project,
    pub cascaded_tasks_count: usize,
}

pub fn delete_project(
    store: &mut ProjectStore,
    parameters: DeleteProjectParameters,
) -> Result<DeleteProjectResult, ProjectCommandError> {
    let project_id = resolve_project(store, &parameters.project)?;
    let project = store.delete(project_id)?;

    Ok(DeleteProjectResult {
        cascaded_tasks_count: project.tasks.len(),
        project,
    })
}

pub struct TagParameters {
    pub project: String,
    pub tag: String,
}

pub struct TagResult {
    pub project: Project,
    /// `false` when the tag was already there (add) or missing (remove)
    pub changed: bool,
}

pub fn add_tag(
    store: &mut ProjectStore,
    parameters: TagParameters,
) -> Result<TagResult, ProjectCommandError> {
    let project_id = resolve_project(store, &parameters.project)?;
    let changed = store.add_tag(project_id, &parameters.tag)?;

    Ok(TagResult {
        project: fetch(store, project_id)?.clone(),
        changed,
    })
}

pub fn remove_tag(
    store: &mut ProjectStore,
    parameters: TagParameters,
) -> Result<TagResult, ProjectCommandError> {
    let project_id = resolve_project(store, &parameters.project)?;
    let changed = store.remove_tag(project_id, &parameters.tag)?;

    Ok(TagResult {
        project: fetch(store, project_id)?.clone(),
        changed,
    })
}

fn fetch(store: &ProjectStore, project_id: Uuid) -> Result<&Project, StoreError> {
    store
        .get(project_id)
        .ok_or(StoreError::ProjectNotFound(project_id))
}
