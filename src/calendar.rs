use std::collections::BTreeMap;

use jiff::{Timestamp, ToSpan, civil::Date, tz::TimeZone};

use crate::models::{project::Project, status::ProjectStatus, task::Task};

/// A task with a due date, joined with the project it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct DueTask<'a> {
    pub project_title: &'a str,
    pub project_status: ProjectStatus,
    pub task: &'a Task,
    pub due_date: Timestamp,
}

impl DueTask<'_> {
    pub fn due_on(&self, tz: &TimeZone) -> Date {
        self.due_date.to_zoned(tz.clone()).date()
    }
}

#[derive(Debug)]
pub struct CalendarDay<'a> {
    pub date: Date,
    pub tasks: Vec<DueTask<'a>>,
}

pub fn tasks_with_due_date(projects: &[Project]) -> Vec<DueTask<'_>> {
    projects
        .iter()
        .flat_map(|project| {
            project.tasks.iter().filter_map(move |task| {
                task.due_date.map(|due_date| DueTask {
                    project_title: &project.title,
                    project_status: project.status,
                    task,
                    due_date,
                })
            })
        })
        .collect()
}

pub fn tasks_due_on<'a>(projects: &'a [Project], date: Date, tz: &TimeZone) -> Vec<DueTask<'a>> {
    tasks_with_due_date(projects)
        .into_iter()
        .filter(|due| due.due_on(tz) == date)
        .collect()
}

/// Days of the month containing `month` that have at least one due task,
/// in ascending order.
pub fn days_with_tasks<'a>(
    projects: &'a [Project],
    month: Date,
    tz: &TimeZone,
) -> Vec<CalendarDay<'a>> {
    let first = month.first_of_month();
    let last = month.last_of_month();

    let mut days: BTreeMap<Date, Vec<DueTask<'a>>> = BTreeMap::new();
    for due in tasks_with_due_date(projects) {
        let date = due.due_on(tz);
        if date >= first && date <= last {
            days.entry(date).or_default().push(due);
        }
    }

    days.into_iter()
        .map(|(date, tasks)| CalendarDay { date, tasks })
        .collect()
}

/// First day of the month `delta` months away from the one containing `month`.
pub fn shift_month(month: Date, delta: i32) -> Result<Date, jiff::Error> {
    month.first_of_month().checked_add(delta.months())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use uuid::Uuid;

    use super::*;

    fn at(y: i16, m: i8, d: i8, hour: i8) -> Timestamp {
        date(y, m, d)
            .at(hour, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
            .timestamp()
    }

    fn task(title: &str, due_date: Option<Timestamp>) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            due_date,
            ..Task::default()
        }
    }

    fn fixture() -> Vec<Project> {
        vec![
            Project {
                title: "Alpha".into(),
                status: ProjectStatus::Active,
                tasks: vec![
                    task("a1", Some(at(2026, 3, 4, 9))),
                    task("a2", None),
                    task("a3", Some(at(2026, 3, 20, 23))),
                ],
                ..Project::default()
            },
            Project {
                title: "Beta".into(),
                status: ProjectStatus::Planning,
                tasks: vec![
                    task("b1", Some(at(2026, 3, 4, 18))),
                    task("b2", Some(at(2026, 4, 1, 0))),
                ],
                ..Project::default()
            },
        ]
    }

    #[test]
    fn test_tasks_with_due_date_skips_undated() {
        let projects = fixture();
        let due = tasks_with_due_date(&projects);
        let titles: Vec<&str> = due.iter().map(|d| d.task.title.as_str()).collect();
        assert_eq!(titles, vec!["a1", "a3", "b1", "b2"]);
        assert_eq!(due[2].project_title, "Beta");
        assert_eq!(due[2].project_status, ProjectStatus::Planning);
    }

    #[test]
    fn test_tasks_due_on_day() {
        let projects = fixture();
        let due = tasks_due_on(&projects, date(2026, 3, 4), &TimeZone::UTC);
        let titles: Vec<&str> = due.iter().map(|d| d.task.title.as_str()).collect();
        assert_eq!(titles, vec!["a1", "b1"]);

        assert!(tasks_due_on(&projects, date(2026, 3, 5), &TimeZone::UTC).is_empty());
    }

    #[test]
    fn test_days_are_computed_in_the_given_zone() {
        let projects = fixture();
        // 23:00 UTC on the 20th is already the 21st one hour east
        let plus_one = TimeZone::fixed(jiff::tz::offset(1));
        let due = tasks_due_on(&projects, date(2026, 3, 21), &plus_one);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].task.title, "a3");
    }

    #[test]
    fn test_days_with_tasks_for_month() {
        let projects = fixture();
        let days = days_with_tasks(&projects, date(2026, 3, 15), &TimeZone::UTC);

        let dates: Vec<Date> = days.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date(2026, 3, 4), date(2026, 3, 20)]);
        assert_eq!(days[0].tasks.len(), 2);

        let april = days_with_tasks(&projects, date(2026, 4, 1), &TimeZone::UTC);
        assert_eq!(april.len(), 1);
        assert_eq!(april[0].tasks[0].task.title, "b2");
    }

    #[test]
    fn test_shift_month() {
        assert_eq!(shift_month(date(2026, 1, 31), 1).unwrap(), date(2026, 2, 1));
        assert_eq!(shift_month(date(2026, 1, 10), -1).unwrap(), date(2025, 12, 1));
    }
}
