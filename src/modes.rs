//! Review modes: the persona bundles a run is driven by.
//!
//! The content lives in `content/review_modes.toml`, embedded at compile time
//! and parsed once at startup. Nothing here is computed; the registry only
//! resolves user-typed mode names to bundles.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::model::{ModeListing, ModeSummary};

const BUILTIN_CONTENT: &str = include_str!("../content/review_modes.toml");

/// Shorthand mode names, applied after normalization.
const ALIASES: &[(&str, &str)] = &[
    ("ic", "ic_hard_mode"),
    ("ic_hard", "ic_hard_mode"),
    ("style", "style_police"),
    ("style_mode", "style_police"),
    ("ceo", "ceo_friendly"),
    ("ceo_mode", "ceo_friendly"),
];

/// Errors raised while loading the registry content.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("invalid review mode content: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("review mode '{0}' is defined more than once")]
    DuplicateMode(String),

    #[error("review mode '{0}' has no issues configured")]
    NoIssues(String),
}

/// A mode name that doesn't resolve to any registered bundle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown review mode '{input}'. Expected one of: {}", expected.join(", "))]
pub struct UnknownModeError {
    pub input: String,
    pub expected: Vec<String>,
}

/// One configured issue: where it applies and what the reviewer says.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    /// Free-text location, e.g. `"Slides 7 and 12"`.
    #[serde(rename = "location")]
    pub location_ref: String,

    /// Comment text, usually led by a bracketed category like `[TONE]`.
    pub comment: String,
}

/// A persona bundle. Issue order is significant: it is both the comment
/// creation order and the round-robin order for speaker notes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModeBundle {
    pub id: String,
    pub label: String,
    pub persona: String,
    pub style: String,
    pub register_summary: String,
    pub focus: Vec<String>,
    #[serde(rename = "issue")]
    pub issues: Vec<Issue>,
}

impl ModeBundle {
    /// The issue a content slide is bound to, cycling through the list.
    ///
    /// `content_slide_number` is 1-based. Registry load guarantees at least one issue.
    pub fn issue_for_slide(&self, content_slide_number: u32) -> &Issue {
        let index = (content_slide_number.saturating_sub(1) as usize) % self.issues.len();
        &self.issues[index]
    }

    fn summary(&self) -> ModeSummary {
        ModeSummary {
            review_mode: self.id.clone(),
            label: self.label.clone(),
            persona: self.persona.clone(),
            review_style: self.style.clone(),
            focus_areas: self.focus.clone(),
        }
    }
}

/// Deck branding stamped onto the register slide and notes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Branding {
    /// Organisation name, e.g. used in `"<name> Issues Register"`.
    pub name: String,

    /// Literal for the owner/status column of every register row.
    pub owner_status: String,

    pub source_tag: String,
    pub footer: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct Content {
    default_style_rules: Vec<String>,
    branding: Branding,
    #[serde(rename = "mode")]
    modes: Vec<ModeBundle>,
    #[serde(default, rename = "slide-comment")]
    slide_comments: Vec<SlideComment>,
}

#[derive(Deserialize)]
struct SlideComment {
    slide: u32,
    lines: Vec<String>,
}

/// All registered modes plus the static per-slide commentary.
#[derive(Debug, Clone)]
pub struct ModeRegistry {
    modes: BTreeMap<String, ModeBundle>,
    slide_comments: BTreeMap<u32, Vec<String>>,
    default_style_rules: Vec<String>,
    branding: Branding,
}

impl ModeRegistry {
    /// Load the content embedded in the binary.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_toml(BUILTIN_CONTENT)
    }

    /// Parse registry content from TOML.
    pub fn from_toml(source: &str) -> Result<Self, RegistryError> {
        let content: Content = toml::from_str(source)?;

        let mut modes = BTreeMap::new();
        for mode in content.modes {
            if mode.issues.is_empty() {
                return Err(RegistryError::NoIssues(mode.id));
            }
            if modes.contains_key(&mode.id) {
                return Err(RegistryError::DuplicateMode(mode.id));
            }
            modes.insert(mode.id.clone(), mode);
        }

        let slide_comments = content
            .slide_comments
            .into_iter()
            .map(|c| (c.slide, c.lines))
            .collect();

        Ok(Self {
            modes,
            slide_comments,
            default_style_rules: content.default_style_rules,
            branding: content.branding,
        })
    }

    /// Resolve user-typed mode text to a bundle.
    ///
    /// Case, surrounding whitespace, and `-`/space vs `_` are not significant,
    /// and a few short aliases (`ic`, `style`, `ceo`, ...) are accepted.
    pub fn resolve(&self, mode_text: &str) -> Result<&ModeBundle, UnknownModeError> {
        let key = normalize_mode(mode_text);
        self.modes.get(&key).ok_or_else(|| UnknownModeError {
            input: mode_text.to_string(),
            expected: self.modes.keys().cloned().collect(),
        })
    }

    /// Summaries of every mode, for capability discovery.
    pub fn list_modes(&self) -> ModeListing {
        ModeListing {
            review_modes: self.modes.values().map(ModeBundle::summary).collect(),
            selection_instruction: "Reply with both `review_mode` and `presentation_id` to \
                execute the review. Example: review_mode=ic_hard_mode presentation_id=1AbCdEf..."
                .to_string(),
        }
    }

    /// Literal AI commentary for a content slide. Empty when none is configured.
    pub fn slide_comments(&self, content_slide_number: u32) -> &[String] {
        self.slide_comments
            .get(&content_slide_number)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Style rules used when no style-guide file is available.
    pub fn default_style_rules(&self) -> &[String] {
        &self.default_style_rules
    }

    pub fn branding(&self) -> &Branding {
        &self.branding
    }
}

/// Normalize mode text: trim, lowercase, map spaces and hyphens to `_`,
/// then expand aliases.
pub fn normalize_mode(value: &str) -> String {
    let cleaned = value.trim().to_lowercase().replace(['-', ' '], "_");
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == cleaned)
        .map_or(cleaned, |(_, id)| (*id).to_string())
}
