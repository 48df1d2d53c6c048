use std::io::{self, IsTerminal};

use clap::Parser;
use colored::*;

use crate::{
    commands::Commands,
    config::{Config, ConfigArgs},
    session::Session,
};

mod calendar;
mod commands;
mod config;
mod logging;
mod models;
mod seed;
mod services;
mod session;
mod store;
mod ui;

#[derive(Parser)]
#[command(
    name = "devboard",
    about = "Track your development projects, their tasks and tech stack",
    long_about = "Track your development projects, their tasks and tech stack.\n\n\
        Every session starts from generated placeholder projects and keeps \
        all changes in memory. Run without a command for an interactive session."
)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::from_args(cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(&config.log_filter) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if !config.color {
        colored::control::set_override(false);
    }

    let mut session = Session::seeded(config);
    session.enable_notifications();

    match cli.command {
        Some(command) => {
            if let Err(e) = commands::execute(command, &mut session) {
                commands::report_error(&e, &session);
                std::process::exit(1);
            }
        }
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            if let Err(e) = session.run(stdin.lock(), interactive) {
                eprintln!("{} Failed to read input: {}", "Error:".red(), e);
                std::process::exit(1);
            }
        }
    }
}
