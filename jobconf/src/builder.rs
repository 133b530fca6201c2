//! Building a job's configuration from a schema and a render input.
//!
//! A build runs the schema's invariants, then every field rule in order, then
//! every file rule. The first violation ends the build; no partial document is
//! ever returned.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::manifest::RenderInput;
use crate::resolve::{BlankPolicy, PropertyResolver, Provenance};
use crate::schema::{render_message, FieldRule, FileRule, Invariant, JobConfigSchema, Requirement};
use crate::value::{insert_path, is_blank, lookup_path, to_text};

/// A fully resolved and validated configuration document.
///
/// Keys are kept sorted, so serializing the same document always yields the
/// same bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfigDocument(Map<String, Value>);

impl ConfigDocument {
    /// Look up a dotted path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.0.get(path).or_else(|| {
            let (head, rest) = path.split_once('.')?;
            lookup_path(self.0.get(head)?, rest)
        })
    }

    /// The document as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Consume the document, returning its top-level mapping.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Pretty-printed JSON, the jobs' native format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }

    /// YAML rendering of the same document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Yaml`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.0)?)
    }
}

/// Raw text destined for a file in the job directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedFile {
    /// Absolute target path.
    pub path: String,
    /// Verbatim content.
    pub content: String,
}

/// Where one output key's value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOrigin {
    /// Kind of source.
    pub provenance: Provenance,
    /// Exact source, e.g. `link dbconn: database.host`.
    pub origin: String,
}

/// The result of a successful build.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedJob {
    /// Job name.
    pub job: String,
    /// Absolute path the document is written to.
    pub config_path: String,
    /// The configuration document.
    pub document: ConfigDocument,
    /// Certificate and key files, in schema order.
    pub files: Vec<RenderedFile>,
    /// Provenance of every output key present in the document.
    pub provenance: BTreeMap<String, FieldOrigin>,
}

impl RenderedJob {
    /// Find a rendered file by the last component of its path.
    #[must_use]
    pub fn file(&self, name: &str) -> Option<&RenderedFile> {
        self.files
            .iter()
            .find(|file| file.path.rsplit('/').next() == Some(name))
    }
}

/// Interprets a [`JobConfigSchema`] against a [`RenderInput`].
///
/// # Examples
///
/// ```
/// use jobconf::builder::ConfigBuilder;
/// use jobconf::manifest::{PropertyTree, RenderInput};
/// use jobconf::schema::{FieldRule, JobConfigSchema};
/// use jobconf::validate::Validator;
/// use serde_json::json;
///
/// let schema = JobConfigSchema::new("demo", "config/demo.json").field(
///     FieldRule::property("tag_length")
///         .or_default(3)
///         .validate(Validator::BoundedInteger { min: 1, max: 3 })
///         .invalid_message("tag length must be greater than 0 and less than 4"),
/// );
///
/// let ok = RenderInput::new(PropertyTree::from_value(json!({"tag_length": 2})));
/// let rendered = ConfigBuilder::new(&schema).build(&ok).unwrap();
/// assert_eq!(rendered.document.get("tag_length"), Some(&json!(2)));
///
/// let bad = RenderInput::new(PropertyTree::from_value(json!({"tag_length": 4})));
/// let err = ConfigBuilder::new(&schema).build(&bad).unwrap_err();
/// assert_eq!(err.to_string(), "tag length must be greater than 0 and less than 4");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder<'s> {
    schema: &'s JobConfigSchema,
}

impl<'s> ConfigBuilder<'s> {
    /// Create a builder for `schema`.
    #[must_use]
    pub const fn new(schema: &'s JobConfigSchema) -> Self {
        Self { schema }
    }

    /// Build the job's document and files.
    ///
    /// # Errors
    ///
    /// Returns the first violation in schema order:
    /// [`Error::InvalidValue`] for a failed invariant or validator,
    /// [`Error::MissingRequiredValue`] for an absent required field, or
    /// [`Error::UnknownProperty`] for absent required file content.
    pub fn build(&self, input: &RenderInput) -> Result<RenderedJob> {
        let job = &self.schema.job;
        let result = self.build_inner(input);
        match &result {
            Ok(rendered) => log::debug!(
                "{job}: built {} key(s) and {} file(s)",
                rendered.provenance.len(),
                rendered.files.len()
            ),
            Err(e) => log::debug!("{job}: {e}"),
        }
        result
    }

    fn build_inner(&self, input: &RenderInput) -> Result<RenderedJob> {
        for invariant in &self.schema.invariants {
            check_invariant(invariant, input)?;
        }

        let resolver = PropertyResolver::new(input);
        let mut state = BuildState::default();

        for rule in &self.schema.fields {
            self.apply_field(rule, &resolver, &mut state)?;
        }

        let files = self
            .schema
            .files
            .iter()
            .map(|rule| self.render_file(rule, &resolver, &state))
            .collect::<Result<Vec<_>>>()?;

        Ok(RenderedJob {
            job: self.schema.job.clone(),
            config_path: self.schema.config_path(),
            document: ConfigDocument(state.document),
            files,
            provenance: state.provenance,
        })
    }

    fn apply_field(
        &self,
        rule: &FieldRule,
        resolver: &PropertyResolver<'_>,
        state: &mut BuildState,
    ) -> Result<()> {
        let Some(resolved) = resolver.resolve(&rule.sources, rule.blank) else {
            if state.is_required(&rule.requirement) {
                return Err(Error::MissingRequiredValue {
                    field: rule.name.clone(),
                    message: rule.missing_text(),
                });
            }
            log::debug!("{}: {} is unset", self.schema.job, rule.name);
            return Ok(());
        };

        if let Some(validator) = &rule.validator {
            validator
                .check(&rule.name, &resolved.value)
                .map_err(|invalid| Error::InvalidValue {
                    field: rule.name.clone(),
                    message: rule.invalid_message.as_deref().map_or(invalid.reason, |template| {
                        render_message(template, &rule.name, Some(&resolved.value))
                    }),
                })?;
        }

        log::debug!(
            "{}: {} <- {} ({})",
            self.schema.job,
            rule.output_key,
            resolved.origin,
            resolved.provenance
        );

        let output = match rule.transform {
            Some(transform) => transform.apply(resolved.value.clone()),
            None => resolved.value.clone(),
        };
        insert_path(&mut state.document, &rule.output_key, output);
        state.provenance.insert(
            rule.output_key.clone(),
            FieldOrigin {
                provenance: resolved.provenance,
                origin: resolved.origin,
            },
        );
        state.resolved.insert(rule.name.clone(), resolved.value);
        Ok(())
    }

    fn render_file(
        &self,
        rule: &FileRule,
        resolver: &PropertyResolver<'_>,
        state: &BuildState,
    ) -> Result<RenderedFile> {
        let path = self.schema.job_path(&rule.path);
        let content = match resolver.resolve(&rule.sources, BlankPolicy::FallThrough) {
            Some(resolved) => {
                let mut content = to_text(&resolved.value);
                if rule.trailing_newline {
                    content.push('\n');
                }
                content
            }
            None if state.is_required(&rule.requirement) => {
                return Err(Error::UnknownProperty {
                    path: rule.property.clone(),
                });
            }
            None => String::new(),
        };
        Ok(RenderedFile { path, content })
    }
}

#[derive(Default)]
struct BuildState {
    document: Map<String, Value>,
    provenance: BTreeMap<String, FieldOrigin>,
    resolved: BTreeMap<String, Value>,
}

impl BuildState {
    fn is_required(&self, requirement: &Requirement) -> bool {
        match requirement {
            Requirement::Optional => false,
            Requirement::Required => true,
            Requirement::RequiredIf(condition) => {
                condition.holds(self.resolved.get(condition.field()))
            }
        }
    }
}

fn check_invariant(invariant: &Invariant, input: &RenderInput) -> Result<()> {
    match invariant {
        Invariant::MutuallyExclusive {
            first,
            second,
            message,
        } => {
            let set = |path: &str| {
                input
                    .properties
                    .get(path)
                    .is_some_and(|value| !is_blank(value, false))
            };
            if set(first) && set(second) {
                return Err(Error::InvalidValue {
                    field: first.clone(),
                    message: message.clone(),
                });
            }
            Ok(())
        }
    }
}

/// Build `schema` against `input`. Shorthand for
/// `ConfigBuilder::new(schema).build(input)`.
///
/// # Errors
///
/// See [`ConfigBuilder::build`].
pub fn build(schema: &JobConfigSchema, input: &RenderInput) -> Result<RenderedJob> {
    ConfigBuilder::new(schema).build(input)
}
