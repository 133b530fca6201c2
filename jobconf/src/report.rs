//! Reporting a failed build.
//!
//! A build fails with exactly one error. Operators and test harnesses match
//! the message text literally, so the text form is the message alone; the JSON
//! form wraps it with the job, error kind and field for tooling.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, ErrorKind, Result};

/// One failed build, ready to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// The job being built.
    pub job: String,
    /// Error classification.
    pub kind: ErrorKind,
    /// The field or property the error is about.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// The literal message.
    pub message: String,
}

impl Report {
    /// Describe `error` raised while building `job`.
    #[must_use]
    pub fn new(job: &str, error: &Error) -> Self {
        Self {
            job: job.to_string(),
            kind: error.kind(),
            field: error.field().map(ToString::to_string),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Output format for [`ErrorReporter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorReporter {
    /// The literal message only.
    #[default]
    Text,
    /// A single-line JSON object.
    Json,
}

impl ErrorReporter {
    /// Format the failure of `job` with `error`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if the JSON form cannot be produced.
    ///
    /// # Examples
    ///
    /// ```
    /// use jobconf::report::ErrorReporter;
    /// use jobconf::Error;
    ///
    /// let err = Error::InvalidValue {
    ///     field: "tag_length".into(),
    ///     message: "tag length must be greater than 0 and less than 4".into(),
    /// };
    /// assert_eq!(
    ///     ErrorReporter::Text.render("policy-server", &err).unwrap(),
    ///     "tag length must be greater than 0 and less than 4"
    /// );
    /// let json = ErrorReporter::Json.render("policy-server", &err).unwrap();
    /// assert!(json.contains("\"kind\":\"invalid_value\""));
    /// ```
    pub fn render(self, job: &str, error: &Error) -> Result<String> {
        let report = Report::new(job, error);
        match self {
            Self::Text => Ok(report.to_string()),
            Self::Json => Ok(serde_json::to_string(&report)?),
        }
    }
}
