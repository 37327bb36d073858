//! Error types for criteria table construction.

use thiserror::Error;

/// Result type for criteria operations.
pub type CriteriaResult<T> = Result<T, CriteriaError>;

/// Errors raised while building a criteria table from an overlay.
///
/// The built-in table never fails; these only come from user-supplied
/// configuration.
#[derive(Error, Debug)]
pub enum CriteriaError {
    /// Overlay file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Overlay file is not valid YAML or has the wrong shape
    #[error("Invalid overlay YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Axis key not in the closed axis set
    #[error("Unknown axis '{0}'")]
    UnknownAxis(String),

    /// Name pattern failed to compile
    #[error("Invalid pattern for '{key}': {message}")]
    InvalidPattern { key: String, message: String },

    /// Two overlay keys resolve to the same axis entry
    #[error("Overlay {section} lists '{key}' and its alias '{alias}'")]
    DuplicateAxis {
        section: String,
        key: String,
        alias: String,
    },

    /// Attribute is derived during construction and cannot be set directly
    #[error("Attribute '{attribute}' on axis '{axis}' is derived and cannot be overridden")]
    ReservedAttribute { axis: String, attribute: String },
}
