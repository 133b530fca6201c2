//! `policy-server-asg-syncer`: polls Cloud Controller for application
//! security groups and holds a Locket lock while doing so.

use crate::schema::{FieldRule, FileRule, JobConfigSchema};
use crate::validate::Validator;

use super::shared::{
    self, cc_ca_file, cc_url, cert_field, database, database_ca_file, database_credentials,
    database_name, database_tls,
};

pub(crate) const JOB: &str = "policy-server-asg-syncer";

pub(crate) fn schema() -> JobConfigSchema {
    JobConfigSchema::new(JOB, "config/policy-server-asg-syncer.json")
        .field(FieldRule::property("uuid").or_default("xxxxxx-xxxxxxxx-xxxxx"))
        .fields(shared::uaa_fields(JOB))
        .field(
            cc_url().required().missing_message(
                "`cc_hostname` and `cc_port` properties were not supplied as manifest \
                 properties, nor were found in `cloud_controller_https_endpoint` link",
            ),
        )
        .field(cert_field(JOB, "cc_ca_cert", "cc_ca.crt"))
        .field(FieldRule::property("skip_ssl_validation").or_default(false))
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
        .field(shared::log_level())
        .field(shared::log_prefix())
        .field(shared::metron_address())
        .field(
            FieldRule::property("asg_poll_interval_seconds")
                .or_default(60)
                .validate(Validator::PositiveIntegerSeconds),
        )
        .field(
            FieldRule::property("locket.address")
                .output("locket_address")
                .keep_blank()
                .or_default("locket.service.cf.internal:8891")
                .validate(Validator::HostPort),
        )
        .field(cert_field(JOB, "locket_ca_cert_file", "locket_ca.crt"))
        .field(cert_field(JOB, "locket_client_cert_file", "locket.crt"))
        .field(cert_field(JOB, "locket_client_key_file", "locket.key"))
        .file(database_ca_file(true))
        .file(cc_ca_file())
        .file(FileRule::cert("uaa_ca.crt", "uaa_ca"))
        .file(FileRule::cert("locket_ca.crt", "locket.ca_cert").required())
        .file(FileRule::cert("locket.crt", "locket.client_cert").required())
        .file(FileRule::cert("locket.key", "locket.client_key").required())
}
