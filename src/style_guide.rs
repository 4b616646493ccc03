//! Style-guide rules checked in every slide's speaker notes.
//!
//! The rules file is plain text; each rule is a line starting with `- `.
//! Everything else (headings, prose) is ignored. When the file is missing,
//! unreadable, or has no rules, the built-in rule set is used instead.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

/// Where a run's style rules came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleGuide {
    /// The file that was consulted, whether or not it was usable.
    pub path: PathBuf,
    pub rules: Vec<String>,
}

impl StyleGuide {
    /// Load rules from `path`, falling back to `defaults`.
    ///
    /// Read fresh on every call.
    pub fn load(path: &Path, defaults: &[String]) -> Self {
        let rules = match fs::read_to_string(path) {
            Ok(text) => {
                let rules = parse_rules(&text);
                if rules.is_empty() {
                    warn!(path = %path.display(), "style guide has no `- ` rules; using defaults");
                    defaults.to_vec()
                } else {
                    debug!(path = %path.display(), count = rules.len(), "loaded style guide");
                    rules
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no style guide file; using defaults");
                defaults.to_vec()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read style guide; using defaults");
                defaults.to_vec()
            }
        };

        Self {
            path: path.to_path_buf(),
            rules,
        }
    }
}

/// Extract `- ` bullet lines, trimmed, in file order.
fn parse_rules(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| line.trim().strip_prefix("- "))
        .map(|rule| rule.trim().to_string())
        .filter(|rule| !rule.is_empty())
        .collect()
}
