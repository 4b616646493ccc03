//! Document session: the only I/O boundary of a review run.
//!
//! Two remote services sit behind it: the presentation editor (read a deck,
//! apply a batch of requests) and the file-comment service. Every call is a
//! single blocking request with no local retry.

mod auth;
#[cfg(test)]
pub mod fake;
mod google;

pub use auth::{AuthError, Credentials};
pub use google::GoogleSession;

use crate::model::{Presentation, Request};

/// Any failure reported by, or on the way to, a remote service.
///
/// Transport and HTTP-level failures are deliberately not distinguished;
/// `reason` carries whatever the service or transport said.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Google API request failed: {reason}")]
pub struct RemoteError {
    pub reason: String,
}

impl RemoteError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A comment as acknowledged by the file-comment service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteComment {
    pub id: String,
    pub content: String,
    pub created_time: String,
}

/// Operations a review run performs against one presentation.
pub trait DocumentSession {
    /// Read the full current state of the presentation.
    fn fetch_document(&self, presentation_id: &str) -> Result<Presentation, RemoteError>;

    /// Apply `requests` in order as one atomic batch.
    fn apply_batch(&self, presentation_id: &str, requests: &[Request]) -> Result<(), RemoteError>;

    /// Create one comment on the whole file. It is not anchored to any
    /// slide; location is conveyed only through the text.
    fn create_comment(
        &self,
        presentation_id: &str,
        content: &str,
    ) -> Result<RemoteComment, RemoteError>;
}

impl<T: DocumentSession + ?Sized> DocumentSession for &T {
    fn fetch_document(&self, presentation_id: &str) -> Result<Presentation, RemoteError> {
        (**self).fetch_document(presentation_id)
    }

    fn apply_batch(&self, presentation_id: &str, requests: &[Request]) -> Result<(), RemoteError> {
        (**self).apply_batch(presentation_id, requests)
    }

    fn create_comment(
        &self,
        presentation_id: &str,
        content: &str,
    ) -> Result<RemoteComment, RemoteError> {
        (**self).create_comment(presentation_id, content)
    }
}
