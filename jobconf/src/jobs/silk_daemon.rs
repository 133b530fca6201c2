//! `silk-daemon`: the per-cell overlay agent.
//!
//! Operator properties live under `cf_networking.silk_daemon`. The overlay
//! network and subnet size come from the controller's `cf_network` link.

use crate::resolve::Source;
use crate::schema::{FieldRule, FileRule, Invariant, JobConfigSchema, Transform};
use crate::validate::{TimeUnit, Validator};

use super::shared::{self, cert_field, DEFAULT_METRON_PORT};

pub(crate) const JOB: &str = "silk-daemon";

const PREFIX: &str = "cf_networking.silk_daemon";

fn property(name: &str) -> String {
    format!("{PREFIX}.{name}")
}

fn field(name: &str) -> FieldRule {
    FieldRule::property(&property(name)).output(name)
}

pub(crate) fn schema() -> JobConfigSchema {
    JobConfigSchema::new(JOB, "config/client-config.json")
        .invariant(Invariant::mutually_exclusive(
            &property("temporary_vxlan_interface"),
            &property("vxlan_network"),
            "Cannot specify both 'temporary_vxlan_interface' and 'vxlan_network' properties.",
        ))
        .field(
            field("temporary_vxlan_interface")
                .output("vxlan_interface_name")
                .or_default(""),
        )
        .field(
            FieldRule::new("underlay_ip")
                .source(Source::NetworkIp {
                    network_property: property("vxlan_network"),
                })
                .source(Source::InstanceAddress)
                .required()
                .missing_message("underlay_ip requires an instance address or a vxlan_network IP"),
        )
        .field(
            FieldRule::new("overlay_network")
                .or_link("cf_network", "cf_networking.network")
                .validate(Validator::Cidr)
                .required()
                .missing_message("overlay_network requires the cf_network link"),
        )
        .field(
            FieldRule::new("subnet_prefix_length")
                .or_link("cf_network", "cf_networking.subnet_prefix_length")
                .validate(Validator::BoundedInteger { min: 1, max: 30 })
                .required()
                .missing_message("subnet_prefix_length requires the cf_network link"),
        )
        .field(
            FieldRule::new("connectivity_server_url")
                .source(Source::format(
                    "https://{}:{}",
                    vec![
                        Source::property("cf_networking.silk_controller.hostname"),
                        Source::property("cf_networking.silk_controller.listen_port"),
                    ],
                ))
                .or_default("https://silk-controller.service.cf.internal:4103"),
        )
        .field(field("health_check_port").or_default(19684))
        .field(field("debug_port").output("debug_server_port").or_default(22233))
        .field(FieldRule::constant("vtep_name", "silk-vtep"))
        .field(FieldRule::constant("vni", 1))
        .field(
            field("lease_poll_interval_seconds")
                .output("poll_interval")
                .or_default(30)
                .validate(Validator::PositiveIntegerSeconds),
        )
        .field(
            field("partition_tolerance_hours")
                .output("partition_tolerance_seconds")
                .or_default(168)
                .validate(Validator::PositiveIntegerSeconds)
                .transform(Transform::ToSeconds(TimeUnit::Hours)),
        )
        .field(
            field("client_timeout_seconds")
                .or_default(5)
                .validate(Validator::PositiveIntegerSeconds),
        )
        .field(field("metron_port").or_default(DEFAULT_METRON_PORT))
        .field(field("single_ip_only").or_default(false))
        .field(FieldRule::constant("datastore", "/var/vcap/data/silk/store.json"))
        .field(shared::log_prefix())
        .field(cert_field(JOB, "ca_cert_file", "ca.crt"))
        .field(cert_field(JOB, "client_cert_file", "client.crt"))
        .field(cert_field(JOB, "client_key_file", "client.key"))
        .file(FileRule::cert("ca.crt", &property("ca_cert")))
        .file(FileRule::cert("client.crt", &property("client_cert")))
        .file(FileRule::cert("client.key", &property("client_key")))
}
