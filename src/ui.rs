use colored::*;
use jiff::{Timestamp, civil::Date, tz::TimeZone};

use crate::{
    calendar::CalendarDay,
    models::{project::Project, status::ProjectStatus, task::Task},
    store::events::Notification,
};

/// Get the terminal width, defaulting to 80 if unavailable
fn get_terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Colored badge for a project status
pub fn status_badge(status: ProjectStatus) -> ColoredString {
    let label = format!(" {} ", status.label());
    match status {
        ProjectStatus::Planning => label.black().on_blue(),
        ProjectStatus::Active => label.black().on_green(),
        ProjectStatus::OnHold => label.black().on_yellow(),
        ProjectStatus::Completed => label.black().on_cyan(),
        ProjectStatus::Canceled => label.white().on_red(),
    }
}

/// Get the appropriate status glyph for a task
pub fn get_status_glyph(task: &Task, is_overdue: bool) -> ColoredString {
    if task.completed {
        "✓".dimmed()
    } else if is_overdue {
        "●".red()
    } else {
        "○".normal()
    }
}

/// An open task whose due date has passed
pub fn is_overdue(task: &Task, now: Timestamp) -> bool {
    !task.completed && task.due_date.is_some_and(|due| due < now)
}

/// Format a due date relative to today (e.g. "Today", "Tomorrow", "Mar 04")
pub fn format_due_date(due: Timestamp, tz: &TimeZone, today: Date) -> String {
    let date = due.to_zoned(tz.clone()).date();

    if date == today {
        "Today".to_string()
    } else if today.tomorrow().is_ok_and(|tomorrow| date == tomorrow) {
        "Tomorrow".to_string()
    } else if today.yesterday().is_ok_and(|yesterday| date == yesterday) {
        "Yesterday".to_string()
    } else if date.year() == today.year() {
        date.strftime("%b %d").to_string()
    } else {
        date.strftime("%b %d, %Y").to_string()
    }
}

/// Render a view header with title and count
pub fn render_view_header(title: &str, count: usize, noun: &str) {
    let word = if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    };
    println!("\n  {} ({} {})\n", title.cyan().bold(), count, word);
}

/// Render a section header (e.g., "Tasks", "Tech stack")
pub fn render_section_header(title: &str) {
    println!("\n  ─── {} ───\n", title.bold());
}

/// Render the dashboard tab strip with per-status counts
pub fn render_status_tabs(total: usize, counts: &[(ProjectStatus, usize)]) {
    let mut tabs = vec![format!("All {total}")];
    tabs.extend(
        counts
            .iter()
            .map(|(status, count)| format!("{} {}", status.label(), count)),
    );
    println!("  {}", tabs.join(&format!(" {} ", "│".dimmed())).dimmed());
}

/// Render a project as a dashboard card
pub fn render_project_card(project: &Project) {
    let (completed, total) = project.task_progress();

    println!(
        "{} {}  {}",
        "•".green(),
        project.title.bold(),
        status_badge(project.status)
    );
    if !project.description.is_empty() {
        println!("    {}", project.description.dimmed());
    }
    if !project.tech_stack.is_empty() {
        println!("    {}", project.tech_stack.join(", ").blue());
    }
    println!(
        "    {} {} {}",
        format!("{completed}/{total}").dimmed(),
        "tasks completed".dimmed(),
        format!("({})", project.slug()).dimmed()
    );
    println!("    {}", "─".repeat(30).dimmed());
    println!();
}

/// Render the full project page: metadata, tech stack and tasks
pub fn render_project_detail(project: &Project, tz: &TimeZone, now: Timestamp) {
    let today = now.to_zoned(tz.clone()).date();

    println!("\n  {}  {}", project.title.cyan().bold(), status_badge(project.status));
    if !project.description.is_empty() {
        println!("  {}", project.description);
    }
    println!();
    if let Some(url) = &project.github_url {
        println!("  {} {}", "GitHub:".dimmed(), url.blue());
    }
    if let Some(url) = &project.live_url {
        println!("  {} {}", "Live:".dimmed(), url.blue());
    }
    println!(
        "  {} {}",
        "Created:".dimmed(),
        project.created_at.to_zoned(tz.clone()).strftime("%B %d, %Y")
    );
    println!(
        "  {} {}",
        "Updated:".dimmed(),
        project.updated_at.to_zoned(tz.clone()).strftime("%B %d, %Y %H:%M")
    );

    render_section_header("Tech stack");
    if project.tech_stack.is_empty() {
        println!("  {}", "No technologies added".dimmed());
    } else {
        println!("  {}", project.tech_stack.join(", ").blue());
    }

    let (completed, total) = project.task_progress();
    render_section_header(&format!("Tasks {completed}/{total}"));
    if project.tasks.is_empty() {
        println!("  {}", "No tasks yet".dimmed());
    }
    for (index, task) in project.tasks.iter().enumerate() {
        let due = task.due_date.map(|due| format_due_date(due, tz, today));
        render_task_line(index + 1, task, is_overdue(task, now), due.as_deref());
    }
    println!();
}

/// Render a single task line with position, glyph, title, and right-aligned context
pub fn render_task_line(position: usize, task: &Task, is_overdue: bool, context: Option<&str>) {
    let terminal_width = get_terminal_width();

    let id_str = format!("{:>3}", position);
    let glyph = get_status_glyph(task, is_overdue);
    let title = &task.title;

    let left_section = format!("  {}  {}  {}", id_str, glyph, title);

    let styled_left = if task.completed {
        left_section.dimmed()
    } else {
        left_section.bold()
    };

    let Some(right_section) = context.filter(|c| !c.is_empty()) else {
        println!("{}", styled_left);
        return;
    };

    let left_visible_len = format!("  {}  {}  {}", id_str, " ", title).chars().count();
    let total_content = left_visible_len + right_section.chars().count();

    if total_content + 4 < terminal_width {
        let padding = terminal_width - total_content - 2;
        let right_styled = if is_overdue {
            right_section.red()
        } else {
            right_section.dimmed()
        };
        println!("{}{}{}", styled_left, " ".repeat(padding), right_styled);
    } else {
        // Not enough space for right alignment, just print normally
        println!("{}", styled_left);
    }
}

/// Render one calendar day with the tasks due on it
pub fn render_calendar_day(day: &CalendarDay<'_>, now: Timestamp) {
    render_section_header(&day.date.strftime("%A, %b %d").to_string());
    for (index, due) in day.tasks.iter().enumerate() {
        let context = format!("{} · {}", due.project_title, due.project_status.label());
        render_task_line(index + 1, due.task, is_overdue(due.task, now), Some(&context));
    }
}

/// Print the confirmation shown after a store mutation
pub fn render_notification(notification: &Notification) {
    let title = if notification.destructive {
        notification.title.red().bold()
    } else {
        notification.title.green().bold()
    };
    println!("✓ {}: {}", title, notification.description);
}
