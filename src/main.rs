mod cli;
mod comments;
mod config;
mod model;
mod modes;
mod notes;
mod register;
mod review;
mod session;
mod style_guide;

use std::{io, process};

use tracing_subscriber::EnvFilter;

use config::Config;
use modes::ModeRegistry;

/// Filter directives for stderr logging, e.g. `slide_reviewer=debug`.
const LOG_ENV: &str = "SLIDE_REVIEWER_LOG";

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let registry = ModeRegistry::builtin().unwrap_or_else(|e| {
        eprintln!("Failed to load review modes: {e}");
        process::exit(1);
    });

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}");
        process::exit(1);
    });

    if let Err(e) = cli::run(&config, &registry) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
