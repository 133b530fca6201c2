//! `vxlan-policy-agent`: the per-cell agent that enforces container network
//! policy.

use crate::resolve::Source;
use crate::schema::{FieldRule, FileRule, JobConfigSchema};
use crate::validate::Validator;

use super::shared::{self, cert_field};

pub(crate) const JOB: &str = "vxlan-policy-agent";

pub(crate) fn schema() -> JobConfigSchema {
    JobConfigSchema::new(JOB, "config/vxlan-policy-agent.json")
        .field(
            FieldRule::new("policy_server_url")
                .source(Source::format(
                    "https://{}:{}",
                    vec![
                        Source::property("policy_server.hostname"),
                        Source::property("policy_server.internal_listen_port"),
                    ],
                ))
                .or_default("https://policy-server.service.cf.internal:4003"),
        )
        .field(
            FieldRule::property("policy_poll_interval_seconds")
                .output("poll_interval")
                .or_default(5)
                .validate(Validator::PositiveIntegerSeconds),
        )
        .field(
            FieldRule::property("asg_poll_interval_seconds")
                .or_default(60)
                .validate(Validator::PositiveIntegerSeconds),
        )
        .field(
            FieldRule::new("overlay_network")
                .or_link("cf_network", "cf_networking.network")
                .validate(Validator::Cidr)
                .required()
                .missing_message("overlay_network requires the cf_network link"),
        )
        .field(FieldRule::constant("vni", 1))
        .field(FieldRule::property("iptables_c2c_logging").or_default(false))
        .field(
            FieldRule::property("iptables_accepted_udp_logs_per_sec")
                .or_default(100)
                .validate(Validator::BoundedInteger { min: 1, max: 1000 }),
        )
        .field(FieldRule::property("enable_overlay_ingress_rules").or_default(false))
        .field(FieldRule::property("disable_container_network_policy").or_default(false))
        .field(FieldRule::property("force_policy_poll_cycle_port").or_default(8721))
        .field(FieldRule::constant(
            "cni_datastore_path",
            "/var/vcap/data/container-metadata/store.json",
        ))
        .field(FieldRule::constant(
            "iptables_lock_file",
            "/var/vcap/data/garden-cni/iptables.lock",
        ))
        .field(shared::debug_server_host())
        .field(shared::debug_server_port(22222))
        .field(shared::log_level())
        .field(shared::log_prefix())
        .field(shared::metron_address())
        .field(cert_field(JOB, "ca_cert_file", "ca.crt"))
        .field(cert_field(JOB, "client_cert_file", "client.crt"))
        .field(cert_field(JOB, "client_key_file", "client.key"))
        .file(FileRule::cert("ca.crt", "ca_cert"))
        .file(FileRule::cert("client.crt", "client_cert"))
        .file(FileRule::cert("client.key", "client_key"))
}
