//! One-line summaries for CLI display.

use crate::model::{ErrorResult, ModeListing, ReviewResult, Stage};

pub(super) fn describe_listing(listing: &ModeListing) -> String {
    let ids = listing
        .review_modes
        .iter()
        .map(|m| m.review_mode.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} review modes: {ids}", listing.review_modes.len())
}

pub(super) fn describe_result(result: &ReviewResult) -> String {
    format!(
        "Reviewed '{}' as {}: register slide {}, {} {}, {} speaker {} updated",
        result.presentation_title,
        result.review_mode_label,
        result.issues_register_slide_id,
        result.drive_comments_created,
        plural(result.drive_comments_created, "comment", "comments"),
        result.speaker_notes_updated,
        plural(result.speaker_notes_updated, "note", "notes"),
    )
}

pub(super) fn describe_error(error: &ErrorResult) -> String {
    format!(
        "Review failed after {}: {}",
        format_stage(error.failed_stage),
        error.error_message
    )
}

fn format_stage(stage: Stage) -> &'static str {
    match stage {
        Stage::Start => "start",
        Stage::ModeResolved => "mode resolved",
        Stage::DocumentFetched => "document fetched",
        Stage::RegisterSlideInserted => "register slide inserted",
        Stage::CommentsCreated => "comments created",
        Stage::NotesUpdated => "notes updated",
        Stage::Done => "done",
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}
