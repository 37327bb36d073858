//! Name patterns for guessing an axis from a variable or dimension name.
//!
//! Patterns are written for lowercase names and match at the start of the
//! name only, so `platform` is not taken for a latitude even though it
//! contains `lat`. Lowercasing the name is the caller's job.
//!
//! # Engines
//!
//! The `fancy-regex` feature (on by default) selects `fancy_regex`, which adds
//! backtracking constructs. Building with `--no-default-features` falls back
//! to the `regex` crate. The engine is fixed at compile time; every built-in
//! pattern is valid in both.

use serde::{Serialize, Serializer};
use std::fmt;
#[cfg(feature = "fancy-regex")]
use tracing::warn;

use crate::error::{CriteriaError, CriteriaResult};

#[cfg(feature = "fancy-regex")]
type Engine = fancy_regex::Regex;

#[cfg(not(feature = "fancy-regex"))]
type Engine = regex::Regex;

/// Built-in name patterns, keyed by axis table key.
///
/// `T` is not listed; it shares the `time` pattern.
pub(crate) const BUILTIN_PATTERNS: [(&str, &str); 6] = [
    ("time", r"\bt\b|(time|min|hour|day|week|month|year)[0-9]*"),
    (
        "Z",
        concat!(
            "(z|nav_lev|gdep|lv_|[o]*lev|bottom_top|sigma|h(ei)?ght|altitude|depth|",
            "isobaric|pres|isotherm)[a-z_]*[0-9]*"
        ),
    ),
    ("Y", "y|j|nlat|rlat|nj"),
    ("latitude", "y?(nav_lat|lat|gphi)[a-z0-9]*"),
    ("X", "x|i|nlon|rlon|ni"),
    ("longitude", "x?(nav_lon|lon|glam)[a-z0-9]*"),
];

/// Matches any non-empty attribute value.
pub(crate) const ANY_VALUE_PATTERN: &str = ".";

/// Regular expression engine backing [`NamePattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternEngine {
    /// The `regex` crate
    Standard,
    /// The `fancy-regex` crate
    Extended,
}

impl PatternEngine {
    /// Engine bound for this build.
    pub const ACTIVE: PatternEngine = if cfg!(feature = "fancy-regex") {
        PatternEngine::Extended
    } else {
        PatternEngine::Standard
    };

    pub fn name(&self) -> &'static str {
        match self {
            PatternEngine::Standard => "regex",
            PatternEngine::Extended => "fancy-regex",
        }
    }
}

/// A compiled, start-anchored name pattern.
#[derive(Clone)]
pub struct NamePattern {
    source: String,
    compiled: Engine,
}

impl NamePattern {
    /// Compile `source` anchored at the start of the input.
    ///
    /// `key` only labels the error.
    pub fn new(key: &str, source: &str) -> CriteriaResult<Self> {
        let anchored = format!("^(?:{})", source);
        let compiled = Engine::new(&anchored).map_err(|e| CriteriaError::InvalidPattern {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            source: source.to_string(),
            compiled,
        })
    }

    /// Check whether `name` starts with a match of this pattern.
    #[cfg(not(feature = "fancy-regex"))]
    pub fn is_match(&self, name: &str) -> bool {
        self.compiled.is_match(name)
    }

    /// Check whether `name` starts with a match of this pattern.
    ///
    /// A backtracking limit error counts as no match.
    #[cfg(feature = "fancy-regex")]
    pub fn is_match(&self, name: &str) -> bool {
        match self.compiled.is_match(name) {
            Ok(matched) => matched,
            Err(e) => {
                warn!(pattern = %self.source, name = %name, error = %e, "Name pattern match failed");
                false
            }
        }
    }

    /// The pattern as written, without the anchor.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NamePattern").field(&self.as_str()).finish()
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for NamePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for NamePattern {}

impl Serialize for NamePattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
