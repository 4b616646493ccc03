//! Speaker notes: rewrite every content slide's notes from a fixed template.
//!
//! Computed from a snapshot taken *after* the register slide is inserted,
//! so deck positions reflect the new layout. Writes replace rather than
//! append: a notes body that already has text is cleared first.

use tracing::{debug, warn};

use crate::model::{Presentation, Request, UpdatedSlide};
use crate::modes::{ModeBundle, ModeRegistry};
use crate::session::{DocumentSession, RemoteError};

/// Notes requests for a whole deck, plus a record of what they touch.
#[derive(Debug, Clone, Default)]
pub struct NotesPlan {
    pub requests: Vec<Request>,
    pub updated: Vec<UpdatedSlide>,
}

/// Where a slide sits, counted two ways.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Position {
    /// 1-based among content slides.
    content: u32,
    /// 1-based in the deck, register slide included.
    absolute: u32,
}

/// Re-read the deck and rewrite every content slide's notes in one batch.
///
/// No call is made when there's nothing to write.
pub fn update_all(
    session: &impl DocumentSession,
    presentation_id: &str,
    register_slide_id: &str,
    mode: &ModeBundle,
    registry: &ModeRegistry,
    style_rules: &[String],
) -> Result<Vec<UpdatedSlide>, RemoteError> {
    let deck = session.fetch_document(presentation_id)?;
    let plan = plan(&deck, register_slide_id, mode, registry, style_rules);

    if plan.requests.is_empty() {
        debug!("no speaker notes to write");
    } else {
        session.apply_batch(presentation_id, &plan.requests)?;
    }
    Ok(plan.updated)
}

/// Compute the notes batch for `deck`.
///
/// The register slide is skipped without consuming a content number, but
/// still counts toward deck positions. A slide without a notes shape
/// consumes its content number and is left alone.
pub fn plan(
    deck: &Presentation,
    register_slide_id: &str,
    mode: &ModeBundle,
    registry: &ModeRegistry,
    style_rules: &[String],
) -> NotesPlan {
    let mut plan = NotesPlan::default();
    let mut content = 0;

    for (absolute, slide) in (1..).zip(&deck.slides) {
        if slide.object_id == register_slide_id {
            continue;
        }
        content += 1;
        let position = Position { content, absolute };

        let Some(notes_id) = slide.speaker_notes_object_id() else {
            warn!(slide = %slide.object_id, "slide has no speaker notes shape; skipping");
            continue;
        };

        let title = slide
            .title()
            .unwrap_or_else(|| format!("Untitled slide {content}"));
        let text = note_text(mode, registry, position, &title, style_rules);

        if slide.has_speaker_notes_text() {
            plan.requests.push(Request::clear_text(notes_id));
        }
        plan.requests.push(Request::insert_text(notes_id, text));

        plan.updated.push(UpdatedSlide {
            slide_object_id: slide.object_id.clone(),
            slide_number: position.content,
            deck_position: position.absolute,
            slide_title: title,
        });
    }

    plan
}

fn note_text(
    mode: &ModeBundle,
    registry: &ModeRegistry,
    position: Position,
    title: &str,
    style_rules: &[String],
) -> String {
    let issue = mode.issue_for_slide(position.content);
    let ai_comments = registry.slide_comments(position.content);
    let ai_comment_block = if ai_comments.is_empty() {
        "- No explicit AI comment provided for this slide number.".to_string()
    } else {
        bullets(ai_comments)
    };
    let brand = &registry.branding().name;

    format!(
        "Slide under review: Slide {content} - {title}\n\
         Deck position (including Issues Register if present): {absolute}\n\
         \n\
         AI Comment (requested deck guidance):\n\
         {ai_comment_block}\n\
         \n\
         Per-slide feedback summary:\n\
         - Benchmark reference: {benchmark}\n\
         - Priority concern: {concern}\n\
         - Practical edit: tighten the headline so it states one clear decision implication.\n\
         - Presenter cue: explain evidence quality first, then recommendation confidence.\n\
         \n\
         Review lens to apply while presenting:\n\
         {focus}\n\
         \n\
         {brand} style guide checks:\n\
         {rules}\n\
         \n\
         Suggested talk track (demo narrative):\n\
         1) Open with the decision statement in one sentence.\n\
         2) Confirm evidence basis and key assumptions.\n\
         3) State commercial implication and risk owner.\n\
         4) Close with ask, owner, and due date for follow-up.\n",
        content = position.content,
        absolute = position.absolute,
        benchmark = issue.location_ref,
        concern = issue.comment,
        focus = bullets(&mode.focus),
        rules = bullets(style_rules),
    )
}

fn bullets(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| format!("- {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
