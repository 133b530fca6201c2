//! `silk-controller`: leases overlay subnets to cells.

use crate::schema::{FieldRule, JobConfigSchema, Transform};
use crate::validate::{TimeUnit, Validator};

use super::shared::{
    self, database, database_credentials, database_driver, database_name, server_tls_fields,
    server_tls_files, DEFAULT_METRON_PORT,
};

pub(crate) const JOB: &str = "silk-controller";

pub(crate) fn schema() -> JobConfigSchema {
    JobConfigSchema::new(JOB, "config/silk-controller.json")
        .field(shared::debug_server_port(46455))
        .field(FieldRule::property("health_check_port").or_default(19683))
        .field(shared::listen_host())
        .field(FieldRule::property("listen_port").or_default(4103))
        .fields(server_tls_fields(JOB))
        .field(
            FieldRule::property("network")
                .or_default("10.255.0.0/16")
                .validate(Validator::Cidr),
        )
        .field(
            FieldRule::property("subnet_prefix_length")
                .or_default(24)
                .validate(Validator::BoundedInteger { min: 1, max: 30 }),
        )
        .field(database_driver(false))
        .fields(database_credentials(false))
        .field(
            database("host", "host", false)
                .or_link_address("database")
                .required()
                .missing_message("must provide database link or set database.host"),
        )
        .field(database_name(false))
        .field(
            FieldRule::property("connect_timeout_seconds")
                .output("database.timeout")
                .or_default(120),
        )
        .field(
            FieldRule::property("subnet_lease_expiration_hours")
                .output("lease_expiration_seconds")
                .or_default(168)
                .validate(Validator::PositiveIntegerSeconds)
                .invalid_message("subnet_lease_expiration_hours must be an integer greater than 0")
                .transform(Transform::ToSeconds(TimeUnit::Hours)),
        )
        .field(FieldRule::property("metron_port").or_default(DEFAULT_METRON_PORT))
        .field(FieldRule::constant("staleness_threshold_seconds", 3600))
        .field(FieldRule::constant("metrics_emit_seconds", 30))
        .field(shared::log_prefix())
        .field(FieldRule::property("max_idle_connections").or_default(10))
        .field(FieldRule::property("max_open_connections").or_default(200))
        .files(server_tls_files())
}
