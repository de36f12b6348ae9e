//! Library configuration

use serde::{Deserialize, Serialize};

/// Options shared by every helper on a [`RefKit`](crate::RefKit)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Cache mode applied to requests that do not pick one
    pub fetch_cache: FetchCache,

    /// Request mode applied to requests that do not pick one
    pub fetch_mode: FetchMode,

    /// Class names written by the form validator
    pub validation: ValidationOptions,
}

/// Fetch cache mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchCache {
    #[default]
    Default,
    NoStore,
    Reload,
    NoCache,
    ForceCache,
}

impl FetchCache {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchCache::Default => "default",
            FetchCache::NoStore => "no-store",
            FetchCache::Reload => "reload",
            FetchCache::NoCache => "no-cache",
            FetchCache::ForceCache => "force-cache",
        }
    }
}

/// Fetch request mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchMode {
    #[default]
    NoCors,
    Cors,
    SameOrigin,
}

impl FetchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchMode::NoCors => "no-cors",
            FetchMode::Cors => "cors",
            FetchMode::SameOrigin => "same-origin",
        }
    }
}

/// Class names the validator toggles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Marker class for fields that failed a rule
    pub invalid_class: String,

    /// Summary container class when there are messages
    pub summary_errors_class: String,

    /// Summary container class when the form is valid
    pub summary_valid_class: String,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            invalid_class: "input-has-error".to_string(),
            summary_errors_class: "validation-summary-errors".to_string(),
            summary_valid_class: "validation-summary-valid".to_string(),
        }
    }
}
