#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # jobconf
//!
//! A library for resolving and validating per-job deployment configuration.
//!
//! Each job's configuration document is assembled from operator properties,
//! data published by linked peer jobs, and built-in defaults, then checked
//! against per-field rules. A build either yields a complete document or
//! fails with one literal, field-specific message.
//!
//! ## Core Types
//!
//! - [`RenderInput`]: properties, links and instance spec for one render
//! - [`PropertyResolver`] and [`Source`]: ordered, first-present-wins lookup
//! - [`Validator`]: semantic checks on resolved values
//! - [`JobConfigSchema`], [`FieldRule`] and [`FileRule`]: declarative job schemas
//! - [`ConfigBuilder`] and [`RenderedJob`]: building a job's document and files
//! - [`ErrorReporter`]: formatting a failed build
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use jobconf::manifest::{Link, PropertyTree, RenderInput};
//! use jobconf::{jobs, ConfigBuilder};
//! use serde_json::json;
//!
//! let input = RenderInput::new(PropertyTree::from_value(json!({})))
//!     .with_link(Link::new("cf_network").with_properties(json!({
//!         "cf_networking": {"network": "10.255.0.0/16"}
//!     })));
//!
//! let schema = jobs::lookup("proxy-plugin").unwrap();
//! let rendered = ConfigBuilder::new(&schema).build(&input).unwrap();
//! assert_eq!(rendered.document.get("proxy_range"), Some(&json!("10.255.0.0/16")));
//! ```

pub mod builder;
pub mod error;
pub mod jobs;
pub mod logging;
pub mod manifest;
pub mod report;
pub mod resolve;
pub mod schema;
pub mod validate;
pub mod value;

#[cfg(all(test, feature = "property-tests"))]
mod resolve_proptests;
#[cfg(all(test, feature = "property-tests"))]
mod validate_proptests;

// Re-export key types at crate root for convenience
pub use builder::{build, ConfigBuilder, ConfigDocument, FieldOrigin, RenderedFile, RenderedJob};
pub use error::{Error, ErrorKind, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use manifest::{InputLoader, InstanceSpec, Link, PropertyTree, RenderInput};
pub use report::{ErrorReporter, Report};
pub use resolve::{BlankPolicy, PropertyResolver, Provenance, ResolvedValue, Source};
pub use schema::{Condition, FieldRule, FileRule, Invariant, JobConfigSchema, Requirement, Transform};
pub use validate::{Invalid, TimeUnit, Validator};
