//! Stderr log output for the CLI.
//!
//! The library crates log through the `log` facade; `tracing-subscriber`
//! picks those records up through its `tracing-log` bridge. Level comes from
//! `-v` repetitions (none is warn, `-v` info, `-vv` debug, more is trace) and
//! `IGRID_LOG` can override it with filter directives like
//! `ideagrid_engine=debug`.

use tracing_subscriber::filter::{EnvFilter, LevelFilter};

pub const LOG_ENV_VAR: &str = "IGRID_LOG";

pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn filter_for(verbosity: u8) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level_for(verbosity).into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy()
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(verbosity: u8) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbosity))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .without_time()
        .try_init()
}
