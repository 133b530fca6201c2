//! Render command implementation.
//!
//! Prints a job's config document, or writes the document and its cert files
//! beneath an output directory laid out like the jobs root.

use crate::error::CliError;
use crate::utils::{build_job, relative_to_jobs_root, GlobalOptions, JobInput};
use clap::{Args, ValueEnum};
use jobconf::RenderedJob;
use std::fs;
use std::path::{Path, PathBuf};

/// Build a job's config document and cert files.
#[derive(Args)]
pub struct RenderCommand {
    #[command(flatten)]
    pub target: JobInput,

    /// Write the document and files under this directory instead of printing
    #[arg(long, short, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Format of the printed document; written documents are always JSON
    #[arg(long, value_enum, default_value = "json", ignore_case = true)]
    pub format: DocumentFormat,
}

/// Output format for a printed document.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

impl RenderCommand {
    /// Execute the render command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (schema, input) = self.target.load()?;
        let rendered = build_job(global, &schema, &input)?;

        match &self.output_dir {
            Some(dir) => {
                for path in write_job(dir, &rendered)? {
                    if !global.quiet {
                        println!("{}", path.display());
                    }
                }
            }
            None => {
                let text = match self.format {
                    DocumentFormat::Json => rendered.document.to_json_pretty()?,
                    DocumentFormat::Yaml => rendered.document.to_yaml()?,
                };
                println!("{}", text.trim_end());
            }
        }
        Ok(())
    }
}

/// Write the document and every file, returning the paths written.
fn write_job(dir: &Path, rendered: &RenderedJob) -> Result<Vec<PathBuf>, CliError> {
    let mut written = Vec::with_capacity(rendered.files.len() + 1);

    let config_path = dir.join(relative_to_jobs_root(&rendered.config_path));
    write_file(&config_path, &rendered.document.to_json_pretty()?)?;
    written.push(config_path);

    for file in &rendered.files {
        let path = dir.join(relative_to_jobs_root(&file.path));
        write_file(&path, &file.content)?;
        written.push(path);
    }

    log::debug!("{}: wrote {} file(s) to {}", rendered.job, written.len(), dir.display());
    Ok(written)
}

fn write_file(path: &Path, contents: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}
