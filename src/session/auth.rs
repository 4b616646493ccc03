//! Credential resolution and token exchange for the Google APIs.
//!
//! Credentials are resolved through a chain, first hit wins:
//!
//! 1. An explicit service-account key (`GOOGLE_SERVICE_ACCOUNT_JSON` or
//!    `service-account-json` in config), optionally impersonating a user.
//! 2. Application Default Credentials: `GOOGLE_APPLICATION_CREDENTIALS`,
//!    then gcloud's well-known file.
//!
//! The access token is exchanged once per run and covers both scopes.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use jiff::Timestamp;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The two permission scopes a run needs: deck editing and file comments.
pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/presentations",
    "https://www.googleapis.com/auth/drive",
];

const ADC_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";
const ADC_FILE: &str = "application_default_credentials.json";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for a signed assertion. Google caps this at one hour.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Errors that stop a run before any document call is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No usable authorization was found, or the token endpoint refused it.
    #[error("{0}")]
    CredentialsResolution(String),

    /// Credentials exist but couldn't be turned into a working session.
    #[error("{0}")]
    ServiceSetup(String),
}

/// A service-account key file, as downloaded from the cloud console.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

/// An end-user refresh token written by `gcloud auth application-default login`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthorizedUser {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

/// Credentials file contents, discriminated by the `type` field.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum CredentialFile {
    ServiceAccount(ServiceAccountKey),
    AuthorizedUser(AuthorizedUser),
}

/// Resolved credentials, ready to be exchanged for an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    ServiceAccount {
        key: ServiceAccountKey,
        /// User to act as, via domain-wide delegation.
        subject: Option<String>,
    },
    AuthorizedUser(AuthorizedUser),
}

impl Credentials {
    /// Resolve credentials from the tiered chain.
    pub fn resolve(
        service_account: Option<&Path>,
        subject: Option<&str>,
    ) -> Result<Self, AuthError> {
        let adc_env = env::var(ADC_ENV)
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        Self::resolve_from(service_account, subject, adc_env.as_deref(), well_known_adc_path())
    }

    fn resolve_from(
        service_account: Option<&Path>,
        subject: Option<&str>,
        adc_env: Option<&Path>,
        well_known: Option<PathBuf>,
    ) -> Result<Self, AuthError> {
        // 1. Explicit service-account key.
        if let Some(path) = service_account {
            debug!(path = %path.display(), "using explicit service-account key");
            return match read_credential_file(path)? {
                CredentialFile::ServiceAccount(key) => Ok(Self::ServiceAccount {
                    key,
                    subject: subject.map(String::from),
                }),
                CredentialFile::AuthorizedUser(_) => Err(AuthError::CredentialsResolution(
                    format!("{} is not a service-account key", path.display()),
                )),
            };
        }

        // 2. Application Default Credentials.
        let adc_path = match adc_env {
            Some(path) => Some(path.to_path_buf()),
            None => well_known.filter(|p| p.is_file()),
        };
        if let Some(path) = adc_path {
            debug!(path = %path.display(), "using application default credentials");
            return Ok(match read_credential_file(&path)? {
                CredentialFile::ServiceAccount(key) => Self::ServiceAccount { key, subject: None },
                CredentialFile::AuthorizedUser(user) => Self::AuthorizedUser(user),
            });
        }

        Err(AuthError::CredentialsResolution(format!(
            "No Google credentials found. Set GOOGLE_SERVICE_ACCOUNT_JSON or run \
             `gcloud auth application-default login --scopes={}`.",
            SCOPES.join(",")
        )))
    }

    /// Exchange these credentials for a bearer token.
    pub fn access_token(&self, http: &Client) -> Result<String, AuthError> {
        match self {
            Self::ServiceAccount { key, subject } => {
                let assertion = sign_assertion(key, subject.as_deref(), Timestamp::now())?;
                exchange(
                    http,
                    &key.token_uri,
                    &[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())],
                )
            }
            Self::AuthorizedUser(user) => exchange(
                http,
                DEFAULT_TOKEN_URI,
                &[
                    ("grant_type", "refresh_token"),
                    ("client_id", user.client_id.as_str()),
                    ("client_secret", user.client_secret.as_str()),
                    ("refresh_token", user.refresh_token.as_str()),
                ],
            ),
        }
    }
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

fn well_known_adc_path() -> Option<PathBuf> {
    if cfg!(windows) {
        dirs::config_dir().map(|d| d.join("gcloud").join(ADC_FILE))
    } else {
        dirs::home_dir().map(|h| h.join(".config").join("gcloud").join(ADC_FILE))
    }
}

fn read_credential_file(path: &Path) -> Result<CredentialFile, AuthError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        AuthError::CredentialsResolution(format!(
            "failed to read credentials at {}: {e}",
            path.display()
        ))
    })?;
    serde_json::from_str(&contents).map_err(|e| {
        AuthError::CredentialsResolution(format!(
            "invalid credentials file at {}: {e}",
            path.display()
        ))
    })
}

/// JWT claims for the service-account bearer grant.
#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    sub: Option<&'a str>,
}

impl<'a> Claims<'a> {
    fn new(key: &'a ServiceAccountKey, subject: Option<&'a str>, now: Timestamp) -> Self {
        let iat = now.as_second();
        Self {
            iss: &key.client_email,
            scope: SCOPES.join(" "),
            aud: &key.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
            sub: subject,
        }
    }
}

fn sign_assertion(
    key: &ServiceAccountKey,
    subject: Option<&str>,
    now: Timestamp,
) -> Result<String, AuthError> {
    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
        AuthError::CredentialsResolution(format!("invalid service-account private key: {e}"))
    })?;
    jsonwebtoken::encode(
        &Header::new(Algorithm::RS256),
        &Claims::new(key, subject, now),
        &encoding_key,
    )
    .map_err(|e| AuthError::CredentialsResolution(format!("failed to sign token request: {e}")))
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// OAuth error body, e.g. `{"error": "invalid_grant", "error_description": "..."}`.
#[derive(Deserialize)]
struct OAuthError {
    error: String,
    error_description: Option<String>,
}

fn exchange(http: &Client, token_uri: &str, form: &[(&str, &str)]) -> Result<String, AuthError> {
    let response = http
        .post(token_uri)
        .form(form)
        .send()
        .map_err(|e| AuthError::ServiceSetup(format!("failed to reach {token_uri}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(AuthError::CredentialsResolution(format!(
            "token exchange rejected ({status}): {}",
            oauth_error_reason(&body)
        )));
    }

    let token: TokenResponse = response
        .json()
        .map_err(|e| AuthError::ServiceSetup(format!("unreadable token response: {e}")))?;
    debug!(token_uri, "obtained access token");
    Ok(token.access_token)
}

fn oauth_error_reason(body: &str) -> String {
    match serde_json::from_str::<OAuthError>(body) {
        Ok(OAuthError {
            error,
            error_description: Some(description),
        }) => format!("{error}: {description}"),
        Ok(OAuthError { error, .. }) => error,
        Err(_) => body.trim().to_string(),
    }
}
