use clap::Args;
use jiff::tz::TimeZone;
use thiserror::Error;

use crate::seed::DEFAULT_PROJECT_COUNT;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown time zone '{name}': {source}")]
    UnknownTimeZone {
        name: String,
        #[source]
        source: jiff::Error,
    },
}

/// Session settings, taken from global flags or their environment variables.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Number of placeholder projects to start the session with
    #[arg(long, global = true, env = "DEVBOARD_SEED_COUNT", default_value_t = DEFAULT_PROJECT_COUNT)]
    pub seed_count: usize,

    /// Seed for the placeholder data generator (random when unset)
    #[arg(long, global = true, env = "DEVBOARD_RNG_SEED")]
    pub rng_seed: Option<u64>,

    /// IANA time zone used for due dates and the calendar (system zone when unset)
    #[arg(long, global = true, env = "DEVBOARD_TZ")]
    pub tz: Option<String>,

    /// Log filter directives, e.g. "devboard=debug"
    #[arg(long, global = true, env = "DEVBOARD_LOG", default_value = "devboard=warn")]
    pub log: String,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
    pub no_color: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub seed_count: usize,
    pub rng_seed: Option<u64>,
    pub time_zone: TimeZone,
    pub log_filter: String,
    pub color: bool,
}

impl Config {
    pub fn from_args(args: ConfigArgs) -> Result<Self, ConfigError> {
        let time_zone = match args.tz {
            Some(name) => TimeZone::get(&name)
                .map_err(|source| ConfigError::UnknownTimeZone { name, source })?,
            None => TimeZone::system(),
        };

        Ok(Self {
            seed_count: args.seed_count,
            rng_seed: args.rng_seed,
            time_zone,
            log_filter: args.log,
            color: !args.no_color,
        })
    }
}
