//! Slide reviewer configuration.
//!
//! Loaded from `~/.slide-reviewer/config.toml`. Every key is optional and a
//! missing file means defaults. Environment variables override the file.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

/// Service-account key file; overrides `service-account-json`.
pub const SERVICE_ACCOUNT_ENV: &str = "GOOGLE_SERVICE_ACCOUNT_JSON";

/// Delegated subject; overrides `impersonate-user`.
pub const IMPERSONATE_USER_ENV: &str = "GOOGLE_IMPERSONATE_USER";

/// Style-guide rules file; overrides `style-guide`.
pub const STYLE_GUIDE_ENV: &str = "SLIDE_REVIEWER_STYLE_GUIDE";

/// Errors loading the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Slide reviewer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Path to a Google service-account key (JSON).
    /// When unset, Application Default Credentials are used.
    pub service_account_json: Option<PathBuf>,

    /// User to impersonate through domain-wide delegation.
    /// Only meaningful with a service-account key.
    pub impersonate_user: Option<String>,

    /// Style-guide rules file. Defaults to `~/.slide-reviewer/style_guide.md`.
    pub style_guide: Option<PathBuf>,

    /// Reviewer label stamped into results when `--reviewer-name` is absent.
    pub reviewer_name: Option<String>,
}

impl Config {
    /// Load config from `~/.slide-reviewer/config.toml`, then apply
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| env::var(key).ok());
        Ok(config)
    }

    /// Load config from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The config file path: `~/.slide-reviewer/config.toml`.
    pub fn path() -> Option<PathBuf> {
        Self::home_dir().map(|d| d.join("config.toml"))
    }

    /// The style-guide file this config points at.
    pub fn style_guide_path(&self) -> PathBuf {
        self.style_guide.clone().unwrap_or_else(|| {
            Self::home_dir()
                .unwrap_or_default()
                .join("style_guide.md")
        })
    }

    fn home_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".slide-reviewer"))
    }

    /// Overlay non-empty environment values onto the file values.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(path) = lookup(SERVICE_ACCOUNT_ENV) {
            self.service_account_json = Some(PathBuf::from(path));
        }
        if let Some(user) = lookup(IMPERSONATE_USER_ENV) {
            self.impersonate_user = Some(user);
        }
        if let Some(path) = lookup(STYLE_GUIDE_ENV) {
            self.style_guide = Some(PathBuf::from(path));
        }
    }
}
