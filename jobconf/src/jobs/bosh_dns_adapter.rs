//! `bosh-dns-adapter`: forwards internal-domain DNS queries to the service
//! discovery controller.

use crate::resolve::Source;
use crate::schema::{FieldRule, FileRule, JobConfigSchema};
use crate::validate::Validator;

use super::shared::{cert_field, DEFAULT_METRON_PORT};

pub(crate) const JOB: &str = "bosh-dns-adapter";

fn port_string(name: &str, default: &str) -> FieldRule {
    FieldRule::new(name)
        .source(Source::format("{}", vec![Source::property(name)]))
        .or_default(default)
}

fn port_number(name: &str, default: u16) -> FieldRule {
    FieldRule::property(name)
        .or_default(default)
        .validate(Validator::BoundedInteger { min: 1, max: 65535 })
}

pub(crate) fn schema() -> JobConfigSchema {
    JobConfigSchema::new(JOB, "config/config.json")
        .field(
            FieldRule::property("address")
                .or_default("127.0.0.1")
                .validate(Validator::DottedAddress),
        )
        .field(port_string("port", "8053"))
        .field(
            FieldRule::property("service_discovery_controller_address")
                .or_default("service-discovery-controller.service.cf.internal"),
        )
        .field(port_string("service_discovery_controller_port", "8054"))
        .field(cert_field(JOB, "client_cert", "client.crt"))
        .field(cert_field(JOB, "client_key", "client.key"))
        .field(cert_field(JOB, "ca_cert", "ca.crt"))
        .field(
            FieldRule::property("metrics_emit_seconds")
                .or_default(30)
                .validate(Validator::PositiveIntegerSeconds),
        )
        .field(port_number("metron_port", DEFAULT_METRON_PORT))
        .field(FieldRule::constant("log_level_address", "127.0.0.1"))
        .field(port_number("log_level_port", 8066))
        .field(
            FieldRule::property("internal_route_vip_range")
                .or_default("127.128.0.0/9")
                .validate(Validator::Cidr),
        )
        .file(FileRule::cert("client.crt", "client_cert").required())
        .file(FileRule::cert("client.key", "client_key").required())
        .file(FileRule::cert("ca.crt", "ca_cert").required())
}
