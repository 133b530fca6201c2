//! `policy-server`: the external policy API.

use serde_json::json;

use crate::schema::{FieldRule, FileRule, JobConfigSchema, Transform};
use crate::validate::{TimeUnit, Validator};

use super::shared::{
    self, cc_ca_file, cc_url, cert_field, database, database_ca_file, database_client_certs,
    database_client_files, database_credentials, database_driver, database_name, database_tls,
};

pub(crate) const JOB: &str = "policy-server";

pub(crate) fn schema() -> JobConfigSchema {
    JobConfigSchema::new(JOB, "config/policy-server.json")
        .field(shared::listen_host())
        .field(FieldRule::property("listen_port").or_default(4002))
        .field(shared::log_prefix())
        .field(shared::debug_server_host())
        .field(shared::debug_server_port(22222))
        .fields(shared::uaa_fields(JOB))
        .field(cc_url().or_default("http://cloud-controller-ng.service.cf.internal:9022"))
        .field(cert_field(JOB, "cc_ca_cert", "cc_ca.crt"))
        .field(FieldRule::property("skip_ssl_validation").or_default(false))
        .field(database_driver(false))
        .fields(database_credentials(false))
        .field(
            database("host", "host", false)
                .or_link_address("database")
                .required()
                .missing_message("must provide database link or set database.host"),
        )
        .field(database_name(false))
        .field(database("connect_timeout_seconds", "timeout", false).or_default(120))
        .fields(database_tls(JOB, false))
        .fields(database_client_certs(JOB))
        .field(FieldRule::property("database_migration_timeout").or_default(600))
        .fields(shared::connection_limits())
        .field(shared::tag_length().or_default(3))
        .field(shared::metron_address())
        .field(shared::log_level())
        .field(
            FieldRule::property("policy_cleanup_interval")
                .output("cleanup_interval")
                .or_default(60)
                .validate(Validator::MinimumDuration {
                    unit: TimeUnit::Minutes,
                    min_seconds: 60,
                })
                .invalid_message("policy_cleanup_interval must be at least 1 minute")
                .transform(Transform::ToSeconds(TimeUnit::Minutes)),
        )
        .field(
            FieldRule::property("max_policies_per_app_source")
                .output("max_policies")
                .or_default(50),
        )
        .field(FieldRule::property("enable_space_developer_self_service").or_default(false))
        .field(FieldRule::property("allowed_cors_domains").or_default(json!([])))
        .field(FieldRule::constant("request_timeout", 5))
        .file(database_ca_file(false))
        .files(database_client_files(false))
        .file(cc_ca_file())
        .file(FileRule::cert("uaa_ca.crt", "uaa_ca"))
}
