//! Job schemas shipped with the engine.
//!
//! Every job is a [`JobConfigSchema`] value; there is no per-job rendering
//! code. Look one up by name with [`schema_for`] or [`lookup`].
//!
//! # Examples
//!
//! ```
//! use jobconf::jobs;
//!
//! let schema = jobs::lookup("policy-server").unwrap();
//! assert_eq!(schema.config_path(), "/var/vcap/jobs/policy-server/config/policy-server.json");
//! assert!(jobs::lookup("no-such-job").is_err());
//! ```

mod asg_syncer;
mod bosh_dns_adapter;
mod netmon;
mod policy_server;
mod policy_server_internal;
mod proxy_plugin;
mod service_discovery_controller;
mod shared;
mod silk_controller;
mod silk_daemon;
mod vxlan_policy_agent;

use crate::error::{Error, Result};
use crate::schema::JobConfigSchema;

/// Names of every known job, sorted.
pub const JOB_NAMES: &[&str] = &[
    bosh_dns_adapter::JOB,
    netmon::JOB,
    policy_server::JOB,
    asg_syncer::JOB,
    policy_server_internal::JOB,
    proxy_plugin::JOB,
    service_discovery_controller::JOB,
    silk_controller::JOB,
    silk_daemon::JOB,
    vxlan_policy_agent::JOB,
];

/// The schema for `name`, if the job is known.
#[must_use]
pub fn schema_for(name: &str) -> Option<JobConfigSchema> {
    let schema = match name {
        policy_server::JOB => policy_server::schema(),
        policy_server_internal::JOB => policy_server_internal::schema(),
        asg_syncer::JOB => asg_syncer::schema(),
        silk_controller::JOB => silk_controller::schema(),
        silk_daemon::JOB => silk_daemon::schema(),
        proxy_plugin::JOB => proxy_plugin::schema(),
        service_discovery_controller::JOB => service_discovery_controller::schema(),
        bosh_dns_adapter::JOB => bosh_dns_adapter::schema(),
        vxlan_policy_agent::JOB => vxlan_policy_agent::schema(),
        netmon::JOB => netmon::schema(),
        _ => return None,
    };
    Some(schema)
}

/// The schema for `name`.
///
/// # Errors
///
/// Returns [`Error::UnknownJob`] if no schema is registered under `name`.
pub fn lookup(name: &str) -> Result<JobConfigSchema> {
    schema_for(name).ok_or_else(|| Error::UnknownJob {
        name: name.to_string(),
    })
}

/// Every known schema, in [`JOB_NAMES`] order.
pub fn all() -> impl Iterator<Item = JobConfigSchema> {
    JOB_NAMES.iter().filter_map(|name| schema_for(name))
}
