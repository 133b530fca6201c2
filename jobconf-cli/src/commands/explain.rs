//! Explain command implementation.
//!
//! Shows, for each output key, the value written and where it came from:
//! an explicit property, a link, a default or the instance spec.

use crate::error::CliError;
use crate::utils::{build_job, GlobalOptions, JobInput};
use clap::{Args, ValueEnum};
use jobconf::RenderedJob;
use serde_json::{json, Map, Value};
use std::io::Write;

/// Column headers for table output.
const COLUMN_HEADERS: [&str; 4] = ["key", "source", "origin", "value"];

/// Show where each config value came from.
#[derive(Args)]
pub struct ExplainCommand {
    #[command(flatten)]
    pub target: JobInput,

    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: ExplainFormat,
}

/// Output format for the explain command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ExplainFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
}

impl ExplainCommand {
    /// Execute the explain command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (schema, input) = self.target.load()?;
        let rendered = build_job(global, &schema, &input)?;

        match self.format {
            ExplainFormat::Table => format_as_table(&rendered),
            ExplainFormat::Json => format_as_json(&rendered),
        }
    }
}

fn value_of(rendered: &RenderedJob, key: &str) -> Value {
    rendered.document.get(key).cloned().unwrap_or(Value::Null)
}

fn format_as_table(rendered: &RenderedJob) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for (key, origin) in &rendered.provenance {
        writeln!(
            handle,
            "{key}\t{}\t{}\t{}",
            origin.provenance,
            origin.origin,
            value_of(rendered, key)
        )?;
    }
    Ok(())
}

fn format_as_json(rendered: &RenderedJob) -> Result<(), CliError> {
    let entries: Map<String, Value> = rendered
        .provenance
        .iter()
        .map(|(key, origin)| {
            (
                key.clone(),
                json!({
                    "value": value_of(rendered, key),
                    "source": origin.provenance,
                    "origin": origin.origin,
                }),
            )
        })
        .collect();

    let text = serde_json::to_string_pretty(&Value::Object(entries))
        .map_err(|e| CliError::Library(e.into()))?;
    println!("{text}");
    Ok(())
}
