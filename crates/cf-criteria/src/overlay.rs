//! YAML overlay that extends the built-in tables before they are frozen.
//!
//! ```yaml
//! coordinates:
//!   latitude:
//!     units: [degrees_north_true]
//!   time:
//!     standard_name: [forecast_reference_time]
//! roles: [station_id]
//! patterns:
//!   latitude: "y?(nav_lat|lat|gphi|rlat_t)[a-z0-9]*"
//! ```
//!
//! The overlay location can be set with the `CF_CRITERIA_OVERLAY` environment
//! variable.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::CriteriaResult;

/// Environment variable naming an overlay file.
pub const OVERLAY_ENV: &str = "CF_CRITERIA_OVERLAY";

/// Additions to the built-in criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Overlay {
    /// Axis key → attribute → extra values
    #[serde(default)]
    pub coordinates: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    /// Extra `cf_role` names
    #[serde(default)]
    pub roles: Vec<String>,
    /// Axis key → replacement name pattern
    #[serde(default)]
    pub patterns: BTreeMap<String, String>,
}

impl Overlay {
    pub fn from_yaml_str(contents: &str) -> CriteriaResult<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> CriteriaResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let overlay = Self::from_yaml_str(&contents)?;
        debug!(path = ?path, "Loaded criteria overlay");
        Ok(overlay)
    }

    /// Load the overlay named by `CF_CRITERIA_OVERLAY`, if set.
    pub fn from_env() -> CriteriaResult<Option<Self>> {
        match env::var(OVERLAY_ENV) {
            Ok(path) if !path.is_empty() => Self::from_path(PathBuf::from(path)).map(Some),
            _ => Ok(None),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty() && self.roles.is_empty() && self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_overlay() {
        let overlay = Overlay::from_yaml_str(
            r#"
coordinates:
  latitude:
    units: [degrees_north_true]
roles: [station_id]
patterns:
  X: "x|i|col"
"#,
        )
        .unwrap();
        assert_eq!(
            overlay.coordinates["latitude"]["units"],
            vec!["degrees_north_true".to_string()]
        );
        assert_eq!(overlay.roles, vec!["station_id".to_string()]);
        assert_eq!(overlay.patterns["X"], "x|i|col");
    }

    #[test]
    fn test_sections_optional() {
        let overlay = Overlay::from_yaml_str("roles: [station_id]").unwrap();
        assert!(overlay.coordinates.is_empty());
        assert!(overlay.patterns.is_empty());
        assert!(!overlay.is_empty());
    }

    #[test]
    fn test_from_env() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "roles: [station_id]").unwrap();

        env::set_var(OVERLAY_ENV, file.path());
        let loaded = Overlay::from_env();
        env::remove_var(OVERLAY_ENV);

        assert_eq!(loaded.unwrap().unwrap().roles, vec!["station_id".to_string()]);
        assert!(Overlay::from_env().unwrap().is_none());
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!(Overlay::from_yaml_str("criteria: {}").is_err());
    }
}
