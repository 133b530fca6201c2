//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, ExplainCommand, JobsCommand, RenderCommand, ValidateCommand,
};
use clap::{Parser, Subcommand, ValueEnum};
use jobconf::ErrorReporter;

/// Command-line tool for rendering per-job deployment configuration.
#[derive(Parser)]
#[command(name = "jobconf")]
#[command(version, about = "Render and validate per-job deployment configuration", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// How build failures are reported on stderr
    #[arg(
        long,
        value_enum,
        default_value = "text",
        global = true,
        env = "JOBCONF_ERROR_FORMAT",
        ignore_case = true
    )]
    pub error_format: ErrorFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Build a job's config document and cert files
    Render(RenderCommand),

    /// Check that a job's input builds
    Validate(ValidateCommand),

    /// Show where each config value came from
    Explain(ExplainCommand),

    /// List the known jobs
    Jobs(JobsCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}

/// Output format for build failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ErrorFormat {
    /// The literal message only
    Text,
    /// One JSON object with job, kind, field and message
    Json,
}

impl From<ErrorFormat> for ErrorReporter {
    fn from(format: ErrorFormat) -> Self {
        match format {
            ErrorFormat::Text => Self::Text,
            ErrorFormat::Json => Self::Json,
        }
    }
}
