//! CLI interface for the slide reviewer.
//!
//! Each subcommand is non-interactive: arguments in, structured output out.
//! The JSON result goes to stdout; a one-line summary goes to stderr.
//!
//! A review that fails is still a result. Its error JSON is printed and the
//! process exits 0, so callers branch on `status` rather than exit code.

mod format;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::Config;
use crate::modes::ModeRegistry;
use crate::review::{self, DEFAULT_REVIEWER_NAME, ReviewRequest, WorkflowError};
use crate::session::{Credentials, GoogleSession};

use format::{describe_error, describe_listing, describe_result};

/// Slide reviewer: run a scripted review pass over a Google Slides deck.
#[derive(Debug, Parser)]
#[command(name = "slide-reviewer", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r"Workflow:
  1. slide-reviewer modes
     → lists review modes and their focus areas
  2. slide-reviewer run --presentation-id 1AbCdEf... --review-mode ic_hard_mode
     → inserts an Issues Register slide, adds file comments, rewrites speaker notes

Credentials:
  GOOGLE_SERVICE_ACCOUNT_JSON   service-account key (optional GOOGLE_IMPERSONATE_USER)
  otherwise                     gcloud application default credentials";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the available review modes.
    Modes,

    /// Review a presentation.
    ///
    /// Inserts an Issues Register slide at the front, creates one file
    /// comment per configured issue, and rewrites every slide's speaker
    /// notes. Running again adds another register slide and more comments;
    /// speaker notes are replaced.
    Run {
        /// Google Slides presentation ID.
        #[arg(long)]
        presentation_id: String,

        /// One of: ic_hard_mode, style_police, ceo_friendly.
        /// Case and `-`/`_` are not significant; `ic`, `style`, `ceo` also work.
        #[arg(long)]
        review_mode: String,

        /// Name stamped into the output summary.
        #[arg(long)]
        reviewer_name: Option<String>,

        /// Style-guide rules file (`- ` bullet per rule).
        #[arg(long)]
        style_guide: Option<PathBuf>,
    },
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config, registry: &ModeRegistry) -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Modes => cmd_modes(registry),
        Command::Run {
            presentation_id,
            review_mode,
            reviewer_name,
            style_guide,
        } => {
            let reviewer_name = reviewer_name
                .or_else(|| config.reviewer_name.clone())
                .unwrap_or_else(|| DEFAULT_REVIEWER_NAME.to_string());
            let style_guide = style_guide.unwrap_or_else(|| config.style_guide_path());

            let request = ReviewRequest {
                presentation_id: &presentation_id,
                review_mode: &review_mode,
                reviewer_name: &reviewer_name,
                style_guide: &style_guide,
            };
            cmd_run(config, registry, &request)
        }
    }
}

fn cmd_modes(registry: &ModeRegistry) -> Result<(), String> {
    let listing = review::list_modes(registry);
    print_json(&listing)?;
    eprintln!("{}", describe_listing(&listing));
    Ok(())
}

fn cmd_run(
    config: &Config,
    registry: &ModeRegistry,
    request: &ReviewRequest<'_>,
) -> Result<(), String> {
    match review::review_presentation(registry, request, || connect(config)) {
        Ok(result) => {
            print_json(&result)?;
            eprintln!("{}", describe_result(&result));
        }
        Err(error) => {
            print_json(&error)?;
            eprintln!("{}", describe_error(&error));
        }
    }
    Ok(())
}

/// Resolve credentials and open an authorized session.
fn connect(config: &Config) -> Result<GoogleSession, WorkflowError> {
    let credentials = Credentials::resolve(
        config.service_account_json.as_deref(),
        config.impersonate_user.as_deref(),
    )?;
    Ok(GoogleSession::connect(&credentials)?)
}

fn print_json(value: &impl Serialize) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("failed to serialize output: {e}"))?;
    println!("{json}");
    Ok(())
}
