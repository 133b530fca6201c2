//! Declarative job schemas.
//!
//! A [`JobConfigSchema`] is plain data: an ordered list of [`FieldRule`]s, the
//! cross-field [`Invariant`]s checked before any field, and the [`FileRule`]s
//! for certificate and key outputs. [`crate::builder::ConfigBuilder`] is the
//! only interpreter.
//!
//! # Examples
//!
//! ```
//! use jobconf::schema::{FieldRule, JobConfigSchema};
//! use jobconf::validate::Validator;
//!
//! let schema = JobConfigSchema::new("netmon", "config/netmon.json")
//!     .field(FieldRule::constant("log_prefix", "cfnetworking"))
//!     .field(
//!         FieldRule::property("poll_interval")
//!             .or_default(30)
//!             .validate(Validator::PositiveIntegerSeconds),
//!     );
//!
//! assert_eq!(schema.config_path(), "/var/vcap/jobs/netmon/config/netmon.json");
//! assert!(schema.lint().is_empty());
//! ```

use std::collections::BTreeSet;

use serde_json::{json, Value};

use crate::resolve::{BlankPolicy, Source};
use crate::validate::{TimeUnit, Validator};
use crate::value::{as_strict_integer, to_text};

/// Root under which every job's rendered files live.
pub const JOBS_ROOT: &str = "/var/vcap/jobs";

/// Message used when a required field has no rule-specific one.
pub const DEFAULT_MISSING_MESSAGE: &str = "{field} must be specified";

/// A predicate over fields resolved earlier in the same build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// The named field resolved to boolean `true`.
    Enabled(String),
    /// The named field resolved to any value.
    Present(String),
}

impl Condition {
    /// The field the condition inspects.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Enabled(field) | Self::Present(field) => field,
        }
    }

    /// Evaluate against the value the field resolved to, if any.
    #[must_use]
    pub fn holds(&self, resolved: Option<&Value>) -> bool {
        match self {
            Self::Enabled(_) => resolved == Some(&Value::Bool(true)),
            Self::Present(_) => resolved.is_some(),
        }
    }
}

/// Whether an absent value is an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Requirement {
    /// Absence is fine; the output key is omitted.
    #[default]
    Optional,
    /// Absence fails the build.
    Required,
    /// Absence fails the build only when the condition holds.
    RequiredIf(Condition),
}

/// Deterministic projection applied to a validated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Convert a duration from `unit` to seconds. Whole results stay integers.
    ToSeconds(TimeUnit),
}

impl Transform {
    /// Apply to `value`. Non-numeric values pass through unchanged.
    #[must_use]
    pub fn apply(self, value: Value) -> Value {
        match self {
            Self::ToSeconds(unit) => scale(value, unit.seconds()),
        }
    }
}

fn scale(value: Value, factor: u64) -> Value {
    if let Some(n) = as_strict_integer(&value) {
        if let Some(scaled) = n
            .checked_mul(i128::from(factor))
            .and_then(|scaled| i64::try_from(scaled).ok())
        {
            return json!(scaled);
        }
    }
    let Some(n) = value.as_f64() else {
        return value;
    };
    #[allow(clippy::cast_precision_loss)]
    let scaled = n * factor as f64;
    if scaled.fract() == 0.0 && scaled.abs() < 9.0e15 {
        #[allow(clippy::cast_possible_truncation)]
        let whole = scaled as i64;
        return json!(whole);
    }
    json!(scaled)
}

/// Substitute `{field}` and `{value}` in a message template.
///
/// # Examples
///
/// ```
/// use jobconf::schema::render_message;
/// use serde_json::json;
///
/// assert_eq!(
///     render_message("unknown driver {value}", "database.type", Some(&json!("bar"))),
///     "unknown driver bar"
/// );
/// assert_eq!(
///     render_message("{field} must be specified", "database.name", None),
///     "database.name must be specified"
/// );
/// ```
#[must_use]
pub fn render_message(template: &str, field: &str, value: Option<&Value>) -> String {
    let shown = value.map(to_text).unwrap_or_default();
    template.replace("{field}", field).replace("{value}", &shown)
}

/// How one output key is produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    /// Input-facing name, used in messages and conditions.
    pub name: String,
    /// Dotted key in the rendered document.
    pub output_key: String,
    /// Sources, most preferred first.
    pub sources: Vec<Source>,
    /// Semantic check run on a present value.
    pub validator: Option<Validator>,
    /// Whether absence is an error.
    pub requirement: Requirement,
    /// Projection applied after validation.
    pub transform: Option<Transform>,
    /// Treatment of the empty string.
    pub blank: BlankPolicy,
    /// Template for the missing-value message.
    pub missing_message: Option<String>,
    /// Template replacing the validator's default message.
    pub invalid_message: Option<String>,
}

impl FieldRule {
    /// A rule with no sources whose output key equals its name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            output_key: name.to_string(),
            sources: Vec::new(),
            validator: None,
            requirement: Requirement::Optional,
            transform: None,
            blank: BlankPolicy::FallThrough,
            missing_message: None,
            invalid_message: None,
        }
    }

    /// A rule read from the property of the same name.
    #[must_use]
    pub fn property(name: &str) -> Self {
        Self::new(name).source(Source::property(name))
    }

    /// A fixed value under `output_key`.
    pub fn constant(output_key: &str, value: impl Into<Value>) -> Self {
        Self::new(output_key).source(Source::Default(value.into()))
    }

    /// Write under `key` instead of the rule name.
    #[must_use]
    pub fn output(mut self, key: &str) -> Self {
        self.output_key = key.to_string();
        self
    }

    /// Append a source.
    #[must_use]
    pub fn source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    /// Append a property source.
    #[must_use]
    pub fn or_property(self, path: &str) -> Self {
        self.source(Source::property(path))
    }

    /// Append a link-property source.
    #[must_use]
    pub fn or_link(self, link: &str, path: &str) -> Self {
        self.source(Source::link(link, path))
    }

    /// Append a link-address source.
    #[must_use]
    pub fn or_link_address(self, link: &str) -> Self {
        self.source(Source::link_address(link))
    }

    /// Append a default.
    #[must_use]
    pub fn or_default(self, value: impl Into<Value>) -> Self {
        self.source(Source::Default(value.into()))
    }

    /// Check present values with `validator`.
    #[must_use]
    pub fn validate(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Fail the build when absent.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.requirement = Requirement::Required;
        self
    }

    /// Fail the build when absent and `condition` holds.
    #[must_use]
    pub fn required_if(mut self, condition: Condition) -> Self {
        self.requirement = Requirement::RequiredIf(condition);
        self
    }

    /// Project the validated value.
    #[must_use]
    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Treat `""` as a real value.
    #[must_use]
    pub fn keep_blank(mut self) -> Self {
        self.blank = BlankPolicy::Keep;
        self
    }

    /// Literal message when required and absent.
    #[must_use]
    pub fn missing_message(mut self, template: &str) -> Self {
        self.missing_message = Some(template.to_string());
        self
    }

    /// Literal message when the validator rejects the value.
    #[must_use]
    pub fn invalid_message(mut self, template: &str) -> Self {
        self.invalid_message = Some(template.to_string());
        self
    }

    /// The rendered missing-value message.
    #[must_use]
    pub fn missing_text(&self) -> String {
        render_message(
            self.missing_message
                .as_deref()
                .unwrap_or(DEFAULT_MISSING_MESSAGE),
            &self.name,
            None,
        )
    }
}

/// A raw-text output such as a certificate or key.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRule {
    /// Path relative to the job directory.
    pub path: String,
    /// Property reported when required content is missing.
    pub property: String,
    /// Content sources, most preferred first.
    pub sources: Vec<Source>,
    /// Whether absent content is an error.
    pub requirement: Requirement,
    /// Append `\n` to present content.
    pub trailing_newline: bool,
}

impl FileRule {
    /// A file written from `property`.
    #[must_use]
    pub fn new(path: &str, property: &str) -> Self {
        Self {
            path: path.to_string(),
            property: property.to_string(),
            sources: vec![Source::property(property)],
            requirement: Requirement::Optional,
            trailing_newline: false,
        }
    }

    /// A file under `config/certs/`.
    #[must_use]
    pub fn cert(file: &str, property: &str) -> Self {
        Self::new(&format!("config/certs/{file}"), property)
    }

    /// Append a link-property source.
    #[must_use]
    pub fn or_link(mut self, link: &str, path: &str) -> Self {
        self.sources.push(Source::link(link, path));
        self
    }

    /// Fail the build when absent.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.requirement = Requirement::Required;
        self
    }

    /// Fail the build when absent and `condition` holds.
    #[must_use]
    pub fn required_if(mut self, condition: Condition) -> Self {
        self.requirement = Requirement::RequiredIf(condition);
        self
    }

    /// End present content with a newline.
    #[must_use]
    pub fn with_trailing_newline(mut self) -> Self {
        self.trailing_newline = true;
        self
    }
}

/// A check across several raw properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invariant {
    /// At most one of two properties may be set.
    MutuallyExclusive {
        /// First property path.
        first: String,
        /// Second property path.
        second: String,
        /// Literal failure message.
        message: String,
    },
}

impl Invariant {
    /// [`Invariant::MutuallyExclusive`].
    #[must_use]
    pub fn mutually_exclusive(first: &str, second: &str, message: &str) -> Self {
        Self::MutuallyExclusive {
            first: first.to_string(),
            second: second.to_string(),
            message: message.to_string(),
        }
    }
}

/// Everything needed to render one job.
#[derive(Debug, Clone, PartialEq)]
pub struct JobConfigSchema {
    /// Job name.
    pub job: String,
    /// Config document path relative to the job directory.
    pub config_file: String,
    /// Checked before any field.
    pub invariants: Vec<Invariant>,
    /// Processed in order.
    pub fields: Vec<FieldRule>,
    /// Processed after every field.
    pub files: Vec<FileRule>,
}

impl JobConfigSchema {
    /// An empty schema.
    #[must_use]
    pub fn new(job: &str, config_file: &str) -> Self {
        Self {
            job: job.to_string(),
            config_file: config_file.to_string(),
            invariants: Vec::new(),
            fields: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Append an invariant.
    #[must_use]
    pub fn invariant(mut self, invariant: Invariant) -> Self {
        self.invariants.push(invariant);
        self
    }

    /// Append a field rule.
    #[must_use]
    pub fn field(mut self, rule: FieldRule) -> Self {
        self.fields.push(rule);
        self
    }

    /// Append several field rules.
    #[must_use]
    pub fn fields(mut self, rules: impl IntoIterator<Item = FieldRule>) -> Self {
        self.fields.extend(rules);
        self
    }

    /// Append a file rule.
    #[must_use]
    pub fn file(mut self, rule: FileRule) -> Self {
        self.files.push(rule);
        self
    }

    /// Append several file rules.
    #[must_use]
    pub fn files(mut self, rules: impl IntoIterator<Item = FileRule>) -> Self {
        self.files.extend(rules);
        self
    }

    /// Absolute path of a file inside the job directory.
    #[must_use]
    pub fn job_path(&self, relative: &str) -> String {
        format!("{JOBS_ROOT}/{}/{relative}", self.job)
    }

    /// Absolute path of the config document.
    #[must_use]
    pub fn config_path(&self) -> String {
        self.job_path(&self.config_file)
    }

    /// Find a field rule by name.
    #[must_use]
    pub fn field_rule(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.name == name)
    }

    /// Structural problems: duplicate output keys or file paths, conditions
    /// naming fields that are not declared earlier, fields with no sources.
    #[must_use]
    pub fn lint(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut names = BTreeSet::new();
        let mut keys = BTreeSet::new();

        for rule in &self.fields {
            if rule.sources.is_empty() {
                problems.push(format!("field {} has no sources", rule.name));
            }
            if let Requirement::RequiredIf(condition) = &rule.requirement {
                if !names.contains(condition.field()) {
                    problems.push(format!(
                        "field {} is gated on {}, which is not declared before it",
                        rule.name,
                        condition.field()
                    ));
                }
            }
            if !keys.insert(rule.output_key.as_str()) {
                problems.push(format!("output key {} is declared twice", rule.output_key));
            }
            names.insert(rule.name.as_str());
        }

        let mut paths = BTreeSet::new();
        for file in &self.files {
            if let Requirement::RequiredIf(condition) = &file.requirement {
                if !names.contains(condition.field()) {
                    problems.push(format!(
                        "file {} is gated on undeclared field {}",
                        file.path,
                        condition.field()
                    ));
                }
            }
            if !paths.insert(file.path.as_str()) {
                problems.push(format!("file {} is declared twice", file.path));
            }
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_seconds_keeps_integers() {
        let minutes = Transform::ToSeconds(TimeUnit::Minutes);
        assert_eq!(minutes.apply(json!(1)), json!(60));
        assert_eq!(minutes.apply(json!(1.5)), json!(90));
        assert!(minutes.apply(json!(1.5)).is_i64());
        assert_eq!(Transform::ToSeconds(TimeUnit::Seconds).apply(json!(1.5)), json!(1.5));

        let hours = Transform::ToSeconds(TimeUnit::Hours);
        assert_eq!(hours.apply(json!(168)), json!(604_800));
        assert_eq!(hours.apply(json!("x")), json!("x"));
    }

    #[test]
    fn test_condition_holds() {
        let enabled = Condition::Enabled("nats.tls_enabled".to_string());
        assert!(enabled.holds(Some(&json!(true))));
        assert!(!enabled.holds(Some(&json!(false))));
        assert!(!enabled.holds(Some(&json!("true"))));
        assert!(!enabled.holds(None));

        let present = Condition::Present("x".to_string());
        assert!(present.holds(Some(&json!(false))));
        assert!(!present.holds(None));
    }

    #[test]
    fn test_missing_text_defaults() {
        let rule = FieldRule::property("database.username").output("database.user");
        assert_eq!(rule.missing_text(), "database.username must be specified");

        let rule = FieldRule::property("proxy_range").missing_message("Must specify `{field}`");
        assert_eq!(rule.missing_text(), "Must specify `proxy_range`");
    }

    #[test]
    fn test_field_builder_collects_sources_in_order() {
        let rule = FieldRule::property("database.host")
            .or_link("dbconn", "database.host")
            .or_link_address("database");
        assert_eq!(
            rule.sources,
            vec![
                Source::property("database.host"),
                Source::link("dbconn", "database.host"),
                Source::link_address("database"),
            ]
        );
        assert_eq!(rule.output_key, "database.host");
    }

    #[test]
    fn test_paths() {
        let schema = JobConfigSchema::new("silk-controller", "config/silk-controller.json");
        assert_eq!(
            schema.job_path("config/certs/ca.crt"),
            "/var/vcap/jobs/silk-controller/config/certs/ca.crt"
        );
        assert_eq!(FileRule::cert("ca.crt", "ca_cert").path, "config/certs/ca.crt");
    }

    #[test]
    fn test_lint_reports_structural_problems() {
        let schema = JobConfigSchema::new("j", "config/j.json")
            .field(FieldRule::new("empty"))
            .field(FieldRule::property("a").required_if(Condition::Enabled("b".to_string())))
            .field(FieldRule::property("b"))
            .field(FieldRule::property("c").output("a"))
            .file(FileRule::cert("x.crt", "x"))
            .file(FileRule::cert("x.crt", "y"));

        let problems = schema.lint();
        assert_eq!(problems.len(), 4, "{problems:?}");
        assert!(problems.iter().any(|p| p.contains("no sources")));
        assert!(problems.iter().any(|p| p.contains("gated on b")));
        assert!(problems.iter().any(|p| p.contains("output key a")));
        assert!(problems.iter().any(|p| p.contains("x.crt is declared twice")));
    }
}
