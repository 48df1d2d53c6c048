//! Placeholder data a session starts from.

use jiff::{SignedDuration, Timestamp};
use rand::{Rng, seq::IndexedRandom};
use uuid::{Builder, Uuid};

use crate::models::{project::Project, status::ProjectStatus, task::Task};

pub const DEFAULT_PROJECT_COUNT: usize = 8;

const TECH_OPTIONS: &[&str] = &[
    "React",
    "Next.js",
    "Vue.js",
    "Angular",
    "Svelte",
    "TypeScript",
    "JavaScript",
    "Python",
    "Go",
    "Rust",
    "Node.js",
    "Express",
    "NestJS",
    "Django",
    "Flask",
    "FastAPI",
    "PostgreSQL",
    "MySQL",
    "MongoDB",
    "Firebase",
    "Supabase",
    "TailwindCSS",
    "Styled Components",
    "SASS",
    "CSS Modules",
    "Redux",
    "MobX",
    "Recoil",
    "Zustand",
    "Context API",
    "Jest",
    "Playwright",
    "Cypress",
    "Testing Library",
    "Docker",
    "Kubernetes",
    "AWS",
    "Vercel",
    "Netlify",
];

fn days(n: i64) -> SignedDuration {
    SignedDuration::from_hours(n * 24)
}

/// `now` shifted by a whole number of days, saturating at the timestamp range.
fn shift_days(now: Timestamp, n: i64) -> Timestamp {
    now.checked_add(days(n)).unwrap_or(now)
}

/// A v4 id drawn from `rng`, so a seeded generator repeats its ids.
fn random_id(rng: &mut impl Rng) -> Uuid {
    Builder::from_random_bytes(rng.random()).into_uuid()
}

/// Generates `count` projects with 1 to 5 tasks each.
///
/// Projects were created within the last 30 days and last touched up to a
/// week after that; due dates fall within the next 14 days.
pub fn generate_projects(count: usize, rng: &mut impl Rng, now: Timestamp) -> Vec<Project> {
    (1..=count)
        .map(|number| generate_project(number, rng, now))
        .collect()
}

fn generate_project(number: usize, rng: &mut impl Rng, now: Timestamp) -> Project {
    let created_at = shift_days(now, -rng.random_range(0..30));
    let updated_at = shift_days(created_at, rng.random_range(0..7));
    let status = ProjectStatus::ALL[rng.random_range(0..ProjectStatus::ALL.len())];

    let github_url = rng
        .random_bool(0.7)
        .then(|| format!("https://github.com/username/project-{number}"));
    let live_url = rng
        .random_bool(0.4)
        .then(|| format!("https://project{number}.example.com"));

    let tag_count = rng.random_range(2..=6);
    let tech_stack = TECH_OPTIONS
        .choose_multiple(rng, tag_count)
        .map(|tag| tag.to_string())
        .collect();

    let task_count = rng.random_range(1..=5);
    let tasks = (1..=task_count)
        .map(|task_number| Task {
            id: random_id(rng),
            title: format!("Task {task_number} for Project {number}"),
            completed: rng.random_bool(0.5),
            due_date: rng
                .random_bool(0.7)
                .then(|| shift_days(now, rng.random_range(0..14))),
            created_at,
        })
        .collect();

    Project {
        id: random_id(rng),
        title: format!("Project {number}"),
        description: format!(
            "This is a description for Project {number}. It's a {status} project with various features and goals."
        ),
        status,
        github_url,
        live_url,
        tech_stack,
        tasks,
        created_at,
        updated_at,
    }
}
