//! Review workflow: the two entrypoints an external caller drives.
//!
//! A run is strictly linear:
//!
//! ```text
//! Start → ModeResolved → DocumentFetched → RegisterSlideInserted
//!       → CommentsCreated → NotesUpdated → Done
//! ```
//!
//! Any failure ends the run at the stage it reached. Nothing already applied
//! to the deck is rolled back. Failures come back as an [`ErrorResult`]
//! value, never as a panic.

use std::path::Path;

use jiff::Timestamp;
use tracing::{info, warn};

use crate::model::{ErrorResult, ModeListing, ReviewResult, SlideAction, Stage, Status};
use crate::modes::{ModeRegistry, UnknownModeError, normalize_mode};
use crate::session::{AuthError, DocumentSession, RemoteError};
use crate::style_guide::StyleGuide;
use crate::{comments, notes, register};

/// Reviewer label used when none is given.
pub const DEFAULT_REVIEWER_NAME: &str = "Wesfarmers BD Demo Agent";

const REMEDIATION: &str = "Check GOOGLE_SERVICE_ACCOUNT_JSON or ADC setup, confirm Slides/Drive \
    API access, and ensure the deck is shared with the credential identity.";

const NEXT_STEP: &str = "Open the deck and validate comments, the first slide Issues Register, \
    and speaker notes. Then ask the agent to rerun in a different mode for comparison.";

const UNTITLED_PRESENTATION: &str = "Untitled presentation";

const COMMENT_SAMPLE: usize = 3;
const SLIDE_SAMPLE: usize = 5;

/// Anything that can end a review run early.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    UnknownMode(#[from] UnknownModeError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Inputs to one review run.
#[derive(Debug, Clone, Copy)]
pub struct ReviewRequest<'a> {
    pub presentation_id: &'a str,
    pub review_mode: &'a str,
    pub reviewer_name: &'a str,
    pub style_guide: &'a Path,
}

/// Every registered mode and how to pick one.
pub fn list_modes(registry: &ModeRegistry) -> ModeListing {
    registry.list_modes()
}

/// Run the full review against one presentation.
///
/// `connect` is only called once the mode has resolved, so a typo in the
/// mode name never touches credentials or the network.
pub fn review_presentation<S, F>(
    registry: &ModeRegistry,
    request: &ReviewRequest<'_>,
    connect: F,
) -> Result<ReviewResult, ErrorResult>
where
    S: DocumentSession,
    F: FnOnce() -> Result<S, WorkflowError>,
{
    let mut stage = Stage::Start;

    run(registry, request, connect, &mut stage).map_err(|e| {
        warn!(?stage, error = %e, "review failed");
        ErrorResult {
            status: Status::Error,
            presentation_id: request.presentation_id.to_string(),
            review_mode: normalize_mode(request.review_mode),
            failed_stage: stage,
            error_message: e.to_string(),
            remediation: REMEDIATION.to_string(),
        }
    })
}

fn run<S, F>(
    registry: &ModeRegistry,
    request: &ReviewRequest<'_>,
    connect: F,
    stage: &mut Stage,
) -> Result<ReviewResult, WorkflowError>
where
    S: DocumentSession,
    F: FnOnce() -> Result<S, WorkflowError>,
{
    let presentation_id = request.presentation_id;

    let mode = registry.resolve(request.review_mode)?;
    advance(stage, Stage::ModeResolved);

    let session = connect()?;
    let deck = session.fetch_document(presentation_id)?;
    let presentation_title = deck
        .title
        .unwrap_or_else(|| UNTITLED_PRESENTATION.to_string());
    advance(stage, Stage::DocumentFetched);

    let register = register::build(mode, registry.branding(), Timestamp::now());
    session.apply_batch(presentation_id, &register.requests)?;
    advance(stage, Stage::RegisterSlideInserted);

    let comments = comments::create_all(&session, presentation_id, mode)?;
    advance(stage, Stage::CommentsCreated);

    let style_guide = StyleGuide::load(request.style_guide, registry.default_style_rules());
    let updated = notes::update_all(
        &session,
        presentation_id,
        &register.slide_id,
        mode,
        registry,
        &style_guide.rules,
    )?;
    advance(stage, Stage::NotesUpdated);

    advance(stage, Stage::Done);
    Ok(ReviewResult {
        status: Status::Ok,
        presentation_id: presentation_id.to_string(),
        presentation_title,
        review_mode: mode.id.clone(),
        review_mode_label: mode.label.clone(),
        reviewer_name: request.reviewer_name.to_string(),
        issues_register_slide_id: register.slide_id,
        issues_register_action: SlideAction::Created,
        drive_comments_created: comments.len(),
        speaker_notes_updated: updated.len(),
        created_comment_sample: comments.into_iter().take(COMMENT_SAMPLE).collect(),
        updated_slides_sample: updated.into_iter().take(SLIDE_SAMPLE).collect(),
        style_guide_file: style_guide.path.display().to_string(),
        next_step: NEXT_STEP.to_string(),
    })
}

fn advance(stage: &mut Stage, next: Stage) {
    info!(stage = ?next, "review stage reached");
    *stage = next;
}
