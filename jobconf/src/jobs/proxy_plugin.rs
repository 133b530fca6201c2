//! `proxy-plugin`: redirects container traffic through a sidecar proxy.

use crate::schema::{FieldRule, JobConfigSchema};

pub(crate) const JOB: &str = "proxy-plugin";

pub(crate) fn schema() -> JobConfigSchema {
    JobConfigSchema::new(JOB, "config/proxy-plugin.json")
        .field(
            FieldRule::property("proxy_range")
                .or_link("cf_network", "cf_networking.network")
                .required()
                .missing_message(
                    "Must specify `proxy_range` property, or have it provided from the \
                     property `cf_networking.network` via bosh links",
                ),
        )
        .field(FieldRule::property("proxy_port").or_default(8090))
        .field(FieldRule::property("proxy_uid").or_default(0))
}
