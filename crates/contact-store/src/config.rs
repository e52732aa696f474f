//! Store configuration
//!
//! Defaults match the desktop app: `contacts.xml` in the working directory.
//! Environment overrides:
//! - `CONTACT_BOOK_FILE`: path of the contacts file
//! - `CONTACT_BOOK_PLACEHOLDER`: `legacy` or `normalize`

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub const DEFAULT_CONTACTS_FILE: &str = "contacts.xml";
pub const ENV_CONTACTS_FILE: &str = "CONTACT_BOOK_FILE";
pub const ENV_PLACEHOLDER: &str = "CONTACT_BOOK_PLACEHOLDER";

/// How empty fields are written and how the `" - "` token is read back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderMode {
    /// Write empty elements; read `" - "` as an empty field
    #[default]
    Normalize,
    /// Write `" - "` for empty fields (blank for phone); read text verbatim
    Legacy,
}

impl PlaceholderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceholderMode::Normalize => "normalize",
            PlaceholderMode::Legacy => "legacy",
        }
    }
}

impl fmt::Display for PlaceholderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceholderMode {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normalize" => Ok(PlaceholderMode::Normalize),
            "legacy" => Ok(PlaceholderMode::Legacy),
            other => Err(StoreError::InvalidConfig(format!(
                "placeholder mode must be 'legacy' or 'normalize', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Contacts file, rewritten in full on every save
    pub path: PathBuf,
    #[serde(default)]
    pub placeholder: PlaceholderMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONTACTS_FILE),
            placeholder: PlaceholderMode::default(),
        }
    }
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_placeholder(mut self, placeholder: PlaceholderMode) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Defaults plus process environment overrides
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup; blank or invalid values are ignored
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup(ENV_CONTACTS_FILE) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                self.path = PathBuf::from(trimmed);
            }
        }

        if let Some(raw) = lookup(ENV_PLACEHOLDER) {
            if !raw.trim().is_empty() {
                match raw.parse::<PlaceholderMode>() {
                    Ok(mode) => self.placeholder = mode,
                    Err(err) => tracing::warn!("invalid {}, ignoring: {err}", ENV_PLACEHOLDER),
                }
            }
        }
    }
}
