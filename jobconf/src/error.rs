//! Error types for the jobconf library.
//!
//! Build failures carry the literal, field-specific message that operator
//! tooling matches on, so the `Display` output of the build variants is the
//! message and nothing else.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Result type alias for operations that may fail with a jobconf error.
///
/// # Examples
///
/// ```
/// use jobconf::{Error, Result};
///
/// fn example_operation() -> Result<u16> {
///     Ok(8080)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the jobconf library.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field resolved to absent, either unconditionally or because
    /// its gating flag resolved true.
    #[error("{message}")]
    MissingRequiredValue {
        /// The input-facing field name.
        field: String,
        /// The literal message reported to the operator.
        message: String,
    },

    /// A present value failed its validator or a cross-field invariant.
    #[error("{message}")]
    InvalidValue {
        /// The input-facing field name.
        field: String,
        /// The literal message reported to the operator.
        message: String,
    },

    /// Content for a required cert/key file was never supplied.
    #[error("Can't find property '{path}'")]
    UnknownProperty {
        /// The property path that was looked up.
        path: String,
    },

    /// No schema is registered under the requested job name.
    #[error("unknown job '{name}'")]
    UnknownJob {
        /// The job name that was requested.
        name: String,
    },

    /// The render input file could not be parsed.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// The file being parsed.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A rendered document could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A YAML serialization error occurred.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Broad classification of a failure, used by reporters and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`Error::MissingRequiredValue`].
    MissingRequiredValue,
    /// See [`Error::InvalidValue`].
    InvalidValue,
    /// See [`Error::UnknownProperty`].
    UnknownProperty,
    /// Anything that is not a build failure (I/O, parsing, lookup).
    Other,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequiredValue => write!(f, "missing_required_value"),
            Self::InvalidValue => write!(f, "invalid_value"),
            Self::UnknownProperty => write!(f, "unknown_property"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl Error {
    /// Classify this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use jobconf::{Error, ErrorKind};
    ///
    /// let err = Error::UnknownProperty { path: "locket.ca_cert".into() };
    /// assert_eq!(err.kind(), ErrorKind::UnknownProperty);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingRequiredValue { .. } => ErrorKind::MissingRequiredValue,
            Self::InvalidValue { .. } => ErrorKind::InvalidValue,
            Self::UnknownProperty { .. } => ErrorKind::UnknownProperty,
            _ => ErrorKind::Other,
        }
    }

    /// Returns `true` if the error means the deployment must not proceed
    /// because of its configuration values.
    #[must_use]
    pub fn is_build_failure(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Other)
    }

    /// The field or property path the error is about, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredValue { field, .. } | Self::InvalidValue { field, .. } => {
                Some(field)
            }
            Self::UnknownProperty { path } => Some(path),
            _ => None,
        }
    }
}
