//! Google Slides and Drive over HTTP.

use reqwest::{
    Url,
    blocking::{Client, RequestBuilder},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Presentation, Request};

use super::{AuthError, Credentials, DocumentSession, RemoteComment, RemoteError};

const SLIDES_BASE: &str = "https://slides.googleapis.com/v1/presentations/";
const DRIVE_FILES_BASE: &str = "https://www.googleapis.com/drive/v3/files/";
const USER_AGENT: &str = concat!("slide-reviewer/", env!("CARGO_PKG_VERSION"));

/// An authorized session against the Slides and Drive APIs.
pub struct GoogleSession {
    http: Client,
    access_token: String,
}

impl GoogleSession {
    /// Build the HTTP client and exchange `credentials` for a token.
    pub fn connect(credentials: &Credentials) -> Result<Self, AuthError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AuthError::ServiceSetup(format!("Unable to create Google API client: {e}")))?;
        let access_token = credentials.access_token(&http)?;
        Ok(Self { http, access_token })
    }

    /// Send an authorized request, mapping any failure to a `RemoteError`.
    fn send(&self, request: RequestBuilder) -> Result<reqwest::blocking::Response, RemoteError> {
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .map_err(|e| RemoteError::new(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        Err(RemoteError::new(error_reason(status, &body)))
    }
}

#[derive(Serialize)]
struct BatchUpdateBody<'a> {
    requests: &'a [Request],
}

#[derive(Serialize)]
struct CommentBody<'a> {
    content: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentResponse {
    id: Option<String>,
    content: Option<String>,
    created_time: Option<String>,
}

impl DocumentSession for GoogleSession {
    fn fetch_document(&self, presentation_id: &str) -> Result<Presentation, RemoteError> {
        let url = endpoint(SLIDES_BASE, presentation_id)?;
        debug!(presentation_id, "fetching presentation");

        self.send(self.http.get(url))?
            .json()
            .map_err(|e| RemoteError::new(format!("unreadable presentation: {e}")))
    }

    fn apply_batch(&self, presentation_id: &str, requests: &[Request]) -> Result<(), RemoteError> {
        let url = endpoint(SLIDES_BASE, &format!("{presentation_id}:batchUpdate"))?;
        debug!(presentation_id, requests = requests.len(), "applying batch update");

        self.send(self.http.post(url).json(&BatchUpdateBody { requests }))?;
        Ok(())
    }

    fn create_comment(
        &self,
        presentation_id: &str,
        content: &str,
    ) -> Result<RemoteComment, RemoteError> {
        let mut url = endpoint(DRIVE_FILES_BASE, presentation_id)?;
        url.path_segments_mut()
            .map_err(|()| RemoteError::new("invalid Drive endpoint"))?
            .push("comments");
        url.query_pairs_mut()
            .append_pair("fields", "id,content,createdTime");
        debug!(presentation_id, "creating comment");

        let response: CommentResponse = self
            .send(self.http.post(url).json(&CommentBody { content }))?
            .json()
            .map_err(|e| RemoteError::new(format!("unreadable comment response: {e}")))?;

        Ok(RemoteComment {
            id: response.id.unwrap_or_else(|| "unknown".to_string()),
            content: response.content.unwrap_or_default(),
            created_time: response.created_time.unwrap_or_default(),
        })
    }
}

/// `base` with `segment` appended as one percent-encoded path segment.
fn endpoint(base: &str, segment: &str) -> Result<Url, RemoteError> {
    if segment.is_empty() || segment.starts_with(':') {
        return Err(RemoteError::new("presentation id is empty"));
    }
    let mut url = Url::parse(base).map_err(|e| RemoteError::new(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| RemoteError::new(format!("invalid endpoint {base}")))?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}

/// Google's error envelope: `{"error": {"code": 404, "message": "...", "status": "NOT_FOUND"}}`.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// The reason a failed call reports: the envelope's message when there is
/// one, else the HTTP status.
fn error_reason(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.error.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| status.to_string())
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn endpoint_appends_one_encoded_segment() {
        let url = endpoint(SLIDES_BASE, "1AbC-d_e:batchUpdate").unwrap();
        assert_eq!(
            url.as_str(),
            "https://slides.googleapis.com/v1/presentations/1AbC-d_e:batchUpdate"
        );

        let url = endpoint(SLIDES_BASE, "a/b").unwrap();
        assert_eq!(
            url.as_str(),
            "https://slides.googleapis.com/v1/presentations/a%2Fb"
        );
    }

    #[test]
    fn endpoint_rejects_empty_id() {
        assert!(endpoint(SLIDES_BASE, "").is_err());
        assert!(endpoint(SLIDES_BASE, ":batchUpdate").is_err());
    }

    #[test]
    fn error_reason_uses_envelope_message() {
        let body = r#"{"error": {"code": 404, "message": "Requested entity was not found.", "status": "NOT_FOUND"}}"#;

        assert_eq!(
            error_reason(StatusCode::NOT_FOUND, body),
            "Requested entity was not found."
        );
    }

    #[test]
    fn error_reason_falls_back_to_status() {
        assert_eq!(
            error_reason(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>"),
            "502 Bad Gateway"
        );
    }

    #[test]
    fn batch_body_wraps_requests() {
        let requests = [Request::insert_text("n1", "hi")];
        let value = serde_json::to_value(BatchUpdateBody {
            requests: &requests,
        })
        .unwrap();

        assert_eq!(value["requests"][0]["insertText"]["objectId"], "n1");
    }
}
