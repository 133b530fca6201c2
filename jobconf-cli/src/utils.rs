//! Utility functions for CLI operations.
//!
//! This module provides common helpers used across CLI commands: loading
//! render inputs, looking up job schemas, and turning build failures into
//! reports in the requested format.

use crate::cli::ErrorFormat;
use crate::error::CliError;
use clap::Args;
use jobconf::manifest::InputLoader;
use jobconf::schema::JOBS_ROOT;
use jobconf::{jobs, ConfigBuilder, ErrorReporter, JobConfigSchema, RenderInput, RenderedJob};
use std::path::{Path, PathBuf};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // verbose/quiet are consumed by the logger in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// How build failures are reported.
    pub error_format: ErrorFormat,
}

/// The job and input shared by every building command.
#[derive(Args, Debug, Clone)]
pub struct JobInput {
    /// Job to build
    #[arg(value_name = "JOB")]
    pub job: String,

    /// Render input file (YAML or JSON); an empty input is used when omitted
    #[arg(long, short, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Treat the input file as a bare property tree with no links
    #[arg(long)]
    pub properties_only: bool,
}

impl JobInput {
    /// Look up the schema and load the input.
    pub fn load(&self) -> Result<(JobConfigSchema, RenderInput), CliError> {
        let schema = jobs::lookup(&self.job)?;
        let input = match &self.input {
            Some(path) => load_input(path, self.properties_only)?,
            None => RenderInput::default(),
        };
        Ok((schema, input))
    }
}

/// Load a render input from disk.
pub fn load_input(path: &Path, properties_only: bool) -> Result<RenderInput, CliError> {
    if !path.exists() {
        return Err(CliError::InvalidArguments(format!(
            "File not found: {}",
            path.display()
        )));
    }
    let input = if properties_only {
        InputLoader::load_properties_file(path)?
    } else {
        InputLoader::load_file(path)?
    };
    Ok(input)
}

/// Build `schema` against `input`, formatting a failure for the operator.
pub fn build_job(
    global: &GlobalOptions,
    schema: &JobConfigSchema,
    input: &RenderInput,
) -> Result<RenderedJob, CliError> {
    ConfigBuilder::new(schema).build(input).map_err(|e| {
        if !e.is_build_failure() {
            return CliError::from(e);
        }
        let reporter = ErrorReporter::from(global.error_format);
        match reporter.render(&schema.job, &e) {
            Ok(report) => CliError::Build(report),
            Err(report_err) => CliError::from(report_err),
        }
    })
}

/// Strip the jobs root from an absolute output path so it can be placed
/// under another directory.
pub fn relative_to_jobs_root(path: &str) -> PathBuf {
    let path = Path::new(path);
    path.strip_prefix(JOBS_ROOT)
        .unwrap_or(path)
        .components()
        .filter(|c| matches!(c, std::path::Component::Normal(_)))
        .collect()
}
