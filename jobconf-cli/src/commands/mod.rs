//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `render`: Build a job's config document and cert files
//! - `validate`: Check that a job's input builds
//! - `explain`: Show where each config value came from
//! - `jobs`: List the known jobs
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod explain;
pub mod jobs;
pub mod render;
pub mod validate;

pub use completions::CompletionsCommand;
pub use explain::ExplainCommand;
pub use jobs::JobsCommand;
pub use render::RenderCommand;
pub use validate::ValidateCommand;
