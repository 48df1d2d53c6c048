use clap::Subcommand;
use colored::*;
use jiff::{Timestamp, civil::Date};
use thiserror::Error;

use crate::{
    calendar,
    models::status::{ProjectStatus, StatusFilter},
    services::{
        projects::{
            CreateProjectParameters, DeleteProjectParameters, EditProjectParameters,
            ProjectCommandError, TagParameters, add_tag, create_project, delete_project,
            edit_project, remove_tag, resolve_project,
        },
        tasks::{
            AddTaskParameters, DeleteTaskParameters, EditTaskParameters, SetCompletedParameters,
            TaskCommandError, add_task, delete_task, edit_task, set_completed,
        },
    },
    session::Session,
    ui,
};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List projects, optionally filtered by status
    List {
        /// all, planning, active, onhold, completed or canceled
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,

        /// Print the projects as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a project with its tasks
    Show {
        /// Project id, slug or part of its title
        project: String,

        /// Print the project as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new project
    New {
        /// Project title
        title: String,

        /// Project description
        #[arg(short, long)]
        description: Option<String>,

        /// Initial status (defaults to planning)
        #[arg(short, long)]
        status: Option<ProjectStatus>,

        /// Repository URL
        #[arg(long)]
        github: Option<String>,

        /// Deployed site URL
        #[arg(long)]
        live: Option<String>,

        /// Add tech-stack tags (can be used multiple times)
        #[arg(short, long, action = clap::ArgAction::Append)]
        tech: Vec<String>,
    },

    /// Change fields of a project
    Edit {
        /// Project id, slug or part of its title
        project: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        status: Option<ProjectStatus>,

        #[arg(long, conflicts_with = "clear_github")]
        github: Option<String>,

        #[arg(long, conflicts_with = "clear_live")]
        live: Option<String>,

        /// Remove the repository URL
        #[arg(long)]
        clear_github: bool,

        /// Remove the deployed site URL
        #[arg(long)]
        clear_live: bool,
    },

    /// Delete a project and all of its tasks
    Delete {
        /// Project id, slug or part of its title
        project: String,
    },

    /// Manage tech-stack tags
    #[command(subcommand)]
    Tag(TagCommands),

    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommands),

    /// Show the days of a month that have tasks due
    Calendar {
        /// Month as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show tasks due on a given day
    Due {
        /// Day as YYYY-MM-DD
        date: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum TagCommands {
    /// Add a tag to a project's tech stack
    Add { project: String, tag: String },
    /// Remove a tag from a project's tech stack
    Remove { project: String, tag: String },
}

#[derive(Debug, Subcommand)]
pub enum TaskCommands {
    /// Add a task to a project
    Add {
        project: String,
        title: String,

        /// Due date as YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
    },
    /// Mark a task as completed
    Done { project: String, task: String },
    /// Mark a task as not completed
    Undo { project: String, task: String },
    /// Change a task's title or due date
    Edit {
        project: String,
        task: String,

        #[arg(long)]
        title: Option<String>,

        /// Due date as YYYY-MM-DD
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,

        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
    },
    /// Delete a task
    Delete { project: String, task: String },
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Project(#[from] ProjectCommandError),

    #[error(transparent)]
    Task(#[from] TaskCommandError),

    #[error("Invalid month '{0}': expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Calendar error: {0}")]
    Calendar(#[from] jiff::Error),

    #[error("Failed to serialize to JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CommandError {
    /// The project reference that could not be resolved, if that is what failed
    pub fn missing_project(&self) -> Option<&str> {
        match self {
            CommandError::Project(ProjectCommandError::ProjectNotFound(name))
            | CommandError::Task(TaskCommandError::Project(
                ProjectCommandError::ProjectNotFound(name),
            )) => Some(name),
            _ => None,
        }
    }
}

pub fn parse_month(input: &str) -> Result<Date, CommandError> {
    format!("{}-01", input.trim())
        .parse::<Date>()
        .map_err(|_| CommandError::InvalidMonth(input.to_string()))
}

pub fn execute(command: Commands, session: &mut Session) -> Result<(), CommandError> {
    let now = Timestamp::now();
    let tz = session.config.time_zone.clone();
    let store = &mut session.store;

    match command {
        Commands::List { status, json } => {
            let projects = store.filter_by_status(status);

            if json {
                println!("{}", serde_json::to_string_pretty(&projects)?);
            } else if projects.is_empty() {
                println!("No projects found");
            } else {
                let title = match status {
                    StatusFilter::All => "PROJECTS".to_string(),
                    StatusFilter::Only(status) => status.label().to_uppercase(),
                };
                ui::render_view_header(&title, projects.len(), "project");
                ui::render_status_tabs(store.list_all().len(), &store.status_counts());
                println!();
                for project in projects {
                    ui::render_project_card(project);
                }
            }
        }
        Commands::Show { project, json } => {
            let project_id = resolve_project(store, &project)?;
            if let Some(project) = store.get(project_id) {
                if json {
                    println!("{}", serde_json::to_string_pretty(project)?);
                } else {
                    ui::render_project_detail(project, &tz, now);
                }
            }
        }
        Commands::New {
            title,
            description,
            status,
            github,
            live,
            tech,
        } => {
            let params = CreateProjectParameters {
                title,
                description,
                status,
                github_url: github,
                live_url: live,
                tech_stack: tech,
            };
            let project = create_project(store, params)?;
            println!("  {} {}", "slug:".dimmed(), project.slug());
        }
        Commands::Edit {
            project,
            title,
            description,
            status,
            github,
            live,
            clear_github,
            clear_live,
        } => {
            let params = EditProjectParameters {
                project,
                title,
                description,
                status,
                github_url: github,
                live_url: live,
                clear_github_url: clear_github,
                clear_live_url: clear_live,
            };
            let project = edit_project(store, params)?;
            println!("  {} {}", project.title.bold(), ui::status_badge(project.status));
        }
        Commands::Delete { project } => {
            let params = DeleteProjectParameters { project };
            let result = delete_project(store, params)?;
            if result.cascaded_tasks_count > 0 {
                println!("  └─ {} task(s) also deleted", result.cascaded_tasks_count);
            }
        }
        Commands::Tag(TagCommands::Add { project, tag }) => {
            let result = add_tag(store, TagParameters { project, tag })?;
            if !result.changed {
                println!("Tag already present on {}", result.project.title);
            }
        }
        Commands::Tag(TagCommands::Remove { project, tag }) => {
            let result = remove_tag(store, TagParameters { project, tag: tag.clone() })?;
            if !result.changed {
                println!("{} has no tag '{}'", result.project.title, tag);
            }
        }
        Commands::Task(TaskCommands::Add { project, title, due }) => {
            let params = AddTaskParameters {
                project,
                title,
                due,
            };
            add_task(store, &tz, params)?;
        }
        Commands::Task(TaskCommands::Done { project, task }) => {
            let params = SetCompletedParameters {
                project,
                task,
                completed: true,
            };
            let task = set_completed(store, params)?;
            println!("✓ Task completed: {}", task.title);
        }
        Commands::Task(TaskCommands::Undo { project, task }) => {
            let params = SetCompletedParameters {
                project,
                task,
                completed: false,
            };
            let task = set_completed(store, params)?;
            println!("○ Task reopened: {}", task.title);
        }
        Commands::Task(TaskCommands::Edit {
            project,
            task,
            title,
            due,
            clear_due,
        }) => {
            let params = EditTaskParameters {
                project,
                task,
                title,
                due,
                clear_due,
            };
            let task = edit_task(store, &tz, params)?;
            println!("✓ Task updated: {}", task.title);
        }
        Commands::Task(TaskCommands::Delete { project, task }) => {
            delete_task(store, DeleteTaskParameters { project, task })?;
        }
        Commands::Calendar { month } => {
            let month = match month {
                Some(input) => parse_month(&input)?,
                None => now.to_zoned(tz.clone()).date().first_of_month(),
            };
            let days = calendar::days_with_tasks(store.list_all(), month, &tz);
            let count = days.iter().map(|d| d.tasks.len()).sum();

            let header = month.strftime("%B %Y").to_string();
            if days.is_empty() {
                println!("No tasks due in {}", header);
            } else {
                ui::render_view_header(&header, count, "task");
                for day in &days {
                    ui::render_calendar_day(day, now);
                }
                let previous = calendar::shift_month(month, -1)?;
                let next = calendar::shift_month(month, 1)?;
                println!(
                    "\n  {}",
                    format!(
                        "‹ calendar --month {}   calendar --month {} ›",
                        previous.strftime("%Y-%m"),
                        next.strftime("%Y-%m")
                    )
                    .dimmed()
                );
            }
        }
        Commands::Due { date } => {
            let day: Date = date
                .trim()
                .parse()
                .map_err(|_| CommandError::InvalidDate(date.clone()))?;
            let due = calendar::tasks_due_on(store.list_all(), day, &tz);

            if due.is_empty() {
                println!("No tasks due on {}", day.strftime("%b %d, %Y"));
            } else {
                let day_view = calendar::CalendarDay { date: day, tasks: due };
                ui::render_calendar_day(&day_view, now);
            }
        }
    }

    Ok(())
}

/// Print an error the way both the one-shot and the interactive mode report it
pub fn report_error(error: &CommandError, session: &Session) {
    eprintln!("{} {}", "Error:".red(), error);

    match error {
        CommandError::Project(ProjectCommandError::AmbiguousProjectName(_))
        | CommandError::Task(TaskCommandError::Project(
            ProjectCommandError::AmbiguousProjectName(_),
        )) => {
            eprintln!("\nPlease be more specific or use the project slug.");
        }
        CommandError::Task(TaskCommandError::AmbiguousTaskName(_)) => {
            eprintln!("\nPlease be more specific or use the task number.");
        }
        _ => {}
    }

    if error.missing_project().is_some() {
        let projects = session.store.list_all();
        if projects.is_empty() {
            eprintln!("\nNo projects exist yet. Create one with `new <title>`.");
        } else {
            eprintln!("\nAvailable projects:");
            for project in projects {
                eprintln!("  - {} ({})", project.title, project.slug());
            }
        }
    }
}
