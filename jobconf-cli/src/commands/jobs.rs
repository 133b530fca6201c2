//! List the jobs that have a schema.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;

/// List the known jobs, one per line.
#[derive(Args)]
pub struct JobsCommand {
    /// Also show where each job writes its config document
    #[arg(long)]
    pub paths: bool,
}

impl JobsCommand {
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        for schema in jobconf::jobs::all() {
            if self.paths {
                println!("{}\t{}", schema.job, schema.config_path());
            } else {
                println!("{}", schema.job);
            }
        }
        Ok(())
    }
}
