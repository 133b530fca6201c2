//! Command to check that a job's input builds.

use crate::error::CliError;
use crate::utils::{build_job, GlobalOptions, JobInput};
use clap::Args;

/// Check that a job's input builds without writing anything.
#[derive(Args)]
pub struct ValidateCommand {
    #[command(flatten)]
    pub target: JobInput,
}

impl ValidateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (schema, input) = self.target.load()?;

        for problem in schema.lint() {
            log::warn!("{}: {problem}", schema.job);
        }

        build_job(global, &schema, &input)?;
        if !global.quiet {
            println!("Configuration is valid");
        }
        Ok(())
    }
}
