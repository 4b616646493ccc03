//! File comments: one per configured issue, in registry order.
//!
//! Comments are not anchored to a slide; the location reference is carried
//! as a text prefix. The first failed call aborts the run, and comments
//! already created stay in place.

use tracing::debug;

use crate::model::CreatedComment;
use crate::modes::ModeBundle;
use crate::session::{DocumentSession, RemoteError};

/// Create a comment for every issue of `mode`.
pub fn create_all(
    session: &impl DocumentSession,
    presentation_id: &str,
    mode: &ModeBundle,
) -> Result<Vec<CreatedComment>, RemoteError> {
    mode.issues
        .iter()
        .map(|issue| {
            let body = format!("{}: {}", issue.location_ref, issue.comment);
            let comment = session.create_comment(presentation_id, &body)?;
            debug!(comment_id = %comment.id, slide_ref = %issue.location_ref, "comment created");

            Ok(CreatedComment {
                comment_id: comment.id,
                slide_ref: issue.location_ref.clone(),
                content: comment.content,
                created_time: comment.created_time,
            })
        })
        .collect()
}
