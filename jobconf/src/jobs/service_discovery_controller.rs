//! `service-discovery-controller`: answers internal-route lookups from
//! registrations received over NATS.
//!
//! NATS client certificates are only needed, and only required, when
//! `nats.tls_enabled` is true.

use crate::resolve::Source;
use crate::schema::{Condition, FieldRule, FileRule, JobConfigSchema};
use crate::validate::Validator;

use super::shared::{cert_field, DEFAULT_METRON_PORT};

pub(crate) const JOB: &str = "service-discovery-controller";

const TLS_FLAG: &str = "nats.tls_enabled";

fn tls_enabled() -> Condition {
    Condition::Enabled(TLS_FLAG.to_string())
}

fn positive_seconds(name: &str, default: i64) -> FieldRule {
    FieldRule::property(name)
        .or_default(default)
        .validate(Validator::PositiveIntegerSeconds)
}

fn non_negative_seconds(name: &str, default: i64) -> FieldRule {
    FieldRule::property(name)
        .or_default(default)
        .validate(Validator::BoundedInteger {
            min: 0,
            max: i64::MAX,
        })
        .invalid_message("{field} must be an integer of at least 0")
}

pub(crate) fn schema() -> JobConfigSchema {
    JobConfigSchema::new(JOB, "config/config.json")
        .field(
            FieldRule::property("address")
                .or_default("127.0.0.1")
                .validate(Validator::DottedAddress),
        )
        .field(
            FieldRule::new("port")
                .source(Source::format("{}", vec![Source::property("port")]))
                .or_default("8054"),
        )
        .field(
            FieldRule::new("nats.hosts")
                .source(Source::LinkHosts {
                    name: "nats".to_string(),
                    port_path: "nats.port".to_string(),
                })
                .required()
                .missing_message("must provide a nats link with at least one instance"),
        )
        .field(FieldRule::new("nats.user").or_link("nats", "nats.user"))
        .field(FieldRule::new("nats.pass").or_link("nats", "nats.password"))
        .field(
            FieldRule::property(TLS_FLAG)
                .or_default(false)
                .validate(Validator::Boolean),
        )
        .field(cert_field(JOB, "nats.ca_certs", "nats_ca.crt"))
        .field(cert_field(JOB, "nats.cert_chain", "nats_client.crt"))
        .field(cert_field(JOB, "nats.private_key", "nats_client.key"))
        .field(cert_field(JOB, "ca_cert", "ca.crt"))
        .field(cert_field(JOB, "server_cert", "server.crt"))
        .field(cert_field(JOB, "server_key", "server.key"))
        .field(
            FieldRule::property("metron_port")
                .or_default(DEFAULT_METRON_PORT)
                .validate(Validator::BoundedInteger { min: 1, max: 65535 }),
        )
        .field(FieldRule::constant("log_level_address", "127.0.0.1"))
        .field(
            FieldRule::property("log_level_port")
                .or_default(8055)
                .validate(Validator::BoundedInteger { min: 1, max: 65535 }),
        )
        .field(positive_seconds("staleness_threshold_seconds", 600))
        .field(positive_seconds("pruning_interval_seconds", 300))
        .field(positive_seconds("metrics_emit_seconds", 60))
        .field(non_negative_seconds("resume_pruning_delay_seconds", 2))
        .field(non_negative_seconds("warm_duration_seconds", 0))
        .file(FileRule::cert("ca.crt", "ca_cert").required())
        .file(FileRule::cert("server.crt", "server_cert").required())
        .file(FileRule::cert("server.key", "server_key").required())
        .file(FileRule::cert("nats_ca.crt", "nats.tls.ca_cert").required_if(tls_enabled()))
        .file(
            FileRule::cert("nats_client.crt", "nats.tls.client_cert").required_if(tls_enabled()),
        )
        .file(
            FileRule::cert("nats_client.key", "nats.tls.client_key").required_if(tls_enabled()),
        )
}
