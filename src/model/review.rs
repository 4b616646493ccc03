//! Review outcomes: what the entrypoints hand back to their caller.
//!
//! Field names are snake_case on the wire; callers read these as plain JSON.

use serde::Serialize;

/// Whether a run succeeded. Callers branch on this, never on process status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

/// Where a review run has got to.
///
/// Stages advance strictly in declaration order. A remote failure at any
/// point ends the run; mutations already applied stay applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Start,
    ModeResolved,
    DocumentFetched,
    RegisterSlideInserted,
    CommentsCreated,
    NotesUpdated,
    Done,
}

/// What happened to the issues register slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideAction {
    Created,
}

/// A comment the file-comment service accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedComment {
    pub comment_id: String,
    pub slide_ref: String,
    pub content: String,
    pub created_time: String,
}

/// A slide whose speaker notes were rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatedSlide {
    pub slide_object_id: String,

    /// 1-based among content slides; the register slide is not counted.
    pub slide_number: u32,

    /// 1-based position in the deck, register slide included.
    pub deck_position: u32,

    pub slide_title: String,
}

/// Aggregate result of a successful review run.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResult {
    pub status: Status,
    pub presentation_id: String,
    pub presentation_title: String,
    pub review_mode: String,
    pub review_mode_label: String,
    pub reviewer_name: String,
    pub issues_register_slide_id: String,
    pub issues_register_action: SlideAction,
    pub drive_comments_created: usize,
    pub speaker_notes_updated: usize,
    pub created_comment_sample: Vec<CreatedComment>,
    pub updated_slides_sample: Vec<UpdatedSlide>,
    pub style_guide_file: String,
    pub next_step: String,
}

/// Uniform failure shape. Every workflow error ends up here.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResult {
    pub status: Status,
    pub presentation_id: String,
    pub review_mode: String,
    pub failed_stage: Stage,
    pub error_message: String,
    pub remediation: String,
}

/// One entry of the mode listing.
#[derive(Debug, Clone, Serialize)]
pub struct ModeSummary {
    pub review_mode: String,
    pub label: String,
    pub persona: String,
    pub review_style: String,
    pub focus_areas: Vec<String>,
}

/// Capability discovery: every registered mode plus how to pick one.
#[derive(Debug, Clone, Serialize)]
pub struct ModeListing {
    pub review_modes: Vec<ModeSummary>,
    pub selection_instruction: String,
}
