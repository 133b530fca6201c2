//! `policy-server-internal`: the policy API consumed by cell agents.
//!
//! Database settings come from explicit properties first, then the `dbconn`
//! link. The host additionally falls back to the `database` link's address.

use crate::schema::{FieldRule, JobConfigSchema};

use super::shared::{
    self, database, database_ca_file, database_client_certs, database_client_files,
    database_credentials, database_name, database_tls, server_tls_fields, server_tls_files,
};

pub(crate) const JOB: &str = "policy-server-internal";

pub(crate) fn schema() -> JobConfigSchema {
    JobConfigSchema::new(JOB, "config/policy-server-internal.json")
        .field(shared::listen_host())
        .field(shared::debug_server_host())
        .field(shared::debug_server_port(31945))
        .field(FieldRule::property("health_check_port").or_default(31946))
        .field(FieldRule::property("internal_listen_port").or_default(4003))
        .field(shared::log_prefix())
        .fields(server_tls_fields(JOB))
        .field(database("type", "type", true).required())
        .fields(database_credentials(true))
        .field(
            database("host", "host", true)
                .or_link_address("database")
                .required()
                .missing_message("must provide dbconn link or database link"),
        )
        .field(database_name(true))
        .field(database("connect_timeout_seconds", "timeout", true).or_default(120))
        .fields(database_tls(JOB, true))
        .fields(database_client_certs(JOB))
        .fields(shared::connection_limits())
        .field(
            shared::tag_length()
                .or_link("tag_length", "tag_length")
                .or_default(3),
        )
        .field(shared::metron_address())
        .field(shared::log_level())
        .field(
            FieldRule::property("enforce_experimental_dynamic_egress_policies").or_default(false),
        )
        .field(FieldRule::constant("request_timeout", 5))
        .file(database_ca_file(true))
        .files(database_client_files(true))
        .files(server_tls_files())
}
