use std::io::{self, BufRead, Write};

use clap::Parser;
use colored::*;
use jiff::Timestamp;
use rand::{SeedableRng, rngs::StdRng};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    commands::{self, Commands},
    config::Config,
    models::project::Project,
    seed,
    store::{ProjectStore, events::ChangeEvent},
    ui,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Unterminated {0} quote")]
    UnterminatedQuote(char),
}

/// One command typed at the prompt.
#[derive(Debug, Parser)]
#[command(no_binary_name = true, name = "devboard", disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: Commands,
}

/// Whether the loop should keep reading input
#[derive(Debug, PartialEq, Eq)]
pub enum LineOutcome {
    Continue,
    Exit,
}

/// A running session: the store plus the settings it was started with.
pub struct Session {
    pub store: ProjectStore,
    pub config: Config,
}

impl Session {
    pub fn new(store: ProjectStore, config: Config) -> Self {
        Self { store, config }
    }

    /// Starts a session from freshly generated placeholder data.
    pub fn seeded(config: Config) -> Self {
        let mut rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let projects = seed::generate_projects(config.seed_count, &mut rng, Timestamp::now());
        info!(
            projects = projects.len(),
            rng_seed = ?config.rng_seed,
            "seeded session"
        );

        Self::new(ProjectStore::with_projects(projects), config)
    }

    /// Prints a confirmation after every mutation that has one.
    pub fn enable_notifications(&mut self) {
        self.store
            .subscribe(Box::new(|event: &ChangeEvent, _: &[Project]| {
                debug!(project_id = %event.project_id(), "store changed");
                if let Some(notification) = event.notification() {
                    ui::render_notification(&notification);
                }
            }));
    }

    pub fn run_line(&mut self, line: &str) -> LineOutcome {
        let tokens = match split_line(line) {
            Ok(tokens) => tokens,
            Err(e) => {
                eprintln!("{} {}", "Error:".red(), e);
                return LineOutcome::Continue;
            }
        };

        match tokens.first().map(String::as_str) {
            None => return LineOutcome::Continue,
            Some("exit" | "quit") => return LineOutcome::Exit,
            _ => {}
        }

        let command = match SessionLine::try_parse_from(&tokens) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                // Covers `help` and `--help` as well as real parse errors
                let _ = e.print();
                return LineOutcome::Continue;
            }
        };

        if let Err(e) = commands::execute(command, self) {
            warn!(error = %e, "command failed");
            commands::report_error(&e, self);
        }
        LineOutcome::Continue
    }

    /// Reads commands from `input` until it ends or the user exits.
    pub fn run(&mut self, input: impl BufRead, interactive: bool) -> io::Result<()> {
        if interactive {
            println!(
                "{} {} projects loaded. Type {} for commands, {} to leave.",
                "devboard".cyan().bold(),
                self.store.list_all().len(),
                "help".bold(),
                "exit".bold()
            );
        }

        let mut lines = input.lines();
        loop {
            if interactive {
                print!("{} ", "›".cyan());
                io::stdout().flush()?;
            }

            let Some(line) = lines.next() else {
                break;
            };
            if self.run_line(&line?) == LineOutcome::Exit {
                break;
            }
        }

        info!(revision = self.store.revision(), "session ended");
        Ok(())
    }
}

/// Splits a command line into words, honoring single and double quotes and
/// backslash escapes outside single quotes.
pub fn split_line(line: &str) -> Result<Vec<String>, SessionError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('"'), '\\') | (None, '\\') => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
                in_word = true;
            }
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(SessionError::UnterminatedQuote(q));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use jiff::tz::TimeZone;

    use super::*;
    use crate::models::status::ProjectStatus;

    fn config() -> Config {
        Config {
            seed_count: 3,
            rng_seed: Some(5),
            time_zone: TimeZone::UTC,
            log_filter: "off".into(),
            color: false,
        }
    }

    #[test]
    fn test_split_line() {
        assert_eq!(
            split_line(r#"new "Site Redesign" -t React --tech 'Styled Components'"#).unwrap(),
            vec!["new", "Site Redesign", "-t", "React", "--tech", "Styled Components"]
        );
        assert_eq!(split_line("  list   ").unwrap(), vec!["list"]);
        assert_eq!(split_line(r#"task add site "say \"hi\"""#).unwrap()[3], r#"say "hi""#);
        assert_eq!(split_line(r#"edit x -d """#).unwrap(), vec!["edit", "x", "-d", ""]);
        assert!(split_line("").unwrap().is_empty());
        assert_eq!(
            split_line("new 'oops"),
            Err(SessionError::UnterminatedQuote('\''))
        );
    }

    #[test]
    fn test_seeded_session_uses_config() {
        let session = Session::seeded(config());
        assert_eq!(session.store.list_all().len(), 3);
        assert_eq!(session.store.revision(), 0);
    }

    #[test]
    fn test_run_script_mutates_store() {
        let mut session = Session::new(ProjectStore::with_projects(vec![]), config());
        let script = "\
new \"Site Redesign\" --status planning --tech React
task add site \"Design mockups\" --due 2026-03-04
task done site 1
tag add site React
edit site --status active --github https://github.com/username/site
not-a-command
show missing-project
exit
new \"Never created\"
";
        session.run(Cursor::new(script), false).unwrap();

        let projects = session.store.list_all();
        assert_eq!(projects.len(), 1);
        let project = &projects[0];
        assert_eq!(project.title, "Site Redesign");
        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(project.tech_stack, vec!["React"]);
        assert_eq!(
            project.github_url.as_deref(),
            Some("https://github.com/username/site")
        );
        assert_eq!(project.tasks.len(), 1);
        assert!(project.tasks[0].completed);
        assert!(project.updated_at > project.created_at);
    }

    #[test]
    fn test_delete_through_session() {
        let mut session = Session::seeded(config());
        let first = session.store.list_all()[0].id.to_string();

        assert_eq!(session.run_line(&format!("delete {first}")), LineOutcome::Continue);
        assert_eq!(session.store.list_all().len(), 2);
        assert_eq!(session.run_line("quit"), LineOutcome::Exit);
    }
}
