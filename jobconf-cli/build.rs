//! Build script for jobconf-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("jobconf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render and validate per-job deployment configuration")
        .long_about(
            "Command-line tool for resolving job configuration from manifest properties, \
             links and defaults, and validating it before deployment",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("error-format")
                .long("error-format")
                .help("How build failures are reported on stderr")
                .value_name("FORMAT")
                .value_parser(["text", "json"])
                .global(true)
                .env("JOBCONF_ERROR_FORMAT"),
        )
        .subcommands(vec![
            Command::new("render")
                .about("Build a job's config document and cert files")
                .long_about("Print a job's config document or write it, with its cert files, to a directory"),
            Command::new("validate")
                .about("Check that a job's input builds")
                .long_about("Build a job's configuration and report the first problem found"),
            Command::new("explain")
                .about("Show where each config value came from")
                .long_about("List each output key with its value and the property, link or default it came from"),
            Command::new("jobs")
                .about("List the known jobs")
                .long_about("Display every job that has a configuration schema"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("jobconf.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
