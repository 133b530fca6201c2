//! Main entry point for the jobconf CLI.
//!
//! This is the command-line interface for rendering per-job deployment
//! configuration:
//! - `render`: Build a job's config document and cert files
//! - `validate`: Check that a job's input builds
//! - `explain`: Show where each config value came from
//! - `jobs`: List the known jobs

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use error::CliError;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    let _logger = jobconf::init_logger(cli.verbose, cli.quiet).install().ok();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        error_format: cli.error_format,
    };

    let result = match cli.command {
        cli::Command::Render(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Explain(cmd) => cmd.execute(&global),
        cli::Command::Jobs(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(CliError::Build(report)) => {
            eprintln!("{report}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
