//! Rule fragments shared by several jobs.

use crate::resolve::Source;
use crate::schema::{FieldRule, FileRule, JOBS_ROOT};
use crate::validate::Validator;

pub(crate) const LOG_PREFIX: &str = "cfnetworking";
pub(crate) const DRIVERS: &[&str] = &["postgres", "mysql"];
pub(crate) const DEFAULT_METRON_PORT: u16 = 3457;

const CC_LINK: &str = "cloud_controller_https_endpoint";

/// Absolute path of a file under the job's `config/certs/`.
pub(crate) fn cert_path(job: &str, file: &str) -> String {
    format!("{JOBS_ROOT}/{job}/config/certs/{file}")
}

/// An output key holding the path of one of the job's cert files.
pub(crate) fn cert_field(job: &str, output_key: &str, file: &str) -> FieldRule {
    FieldRule::constant(output_key, cert_path(job, file))
}

pub(crate) fn log_prefix() -> FieldRule {
    FieldRule::constant("log_prefix", LOG_PREFIX)
}

pub(crate) fn debug_server_host() -> FieldRule {
    FieldRule::constant("debug_server_host", "127.0.0.1")
}

pub(crate) fn debug_server_port(default: u16) -> FieldRule {
    FieldRule::property("debug_port")
        .output("debug_server_port")
        .or_default(default)
}

pub(crate) fn listen_host() -> FieldRule {
    FieldRule::property("listen_ip")
        .output("listen_host")
        .or_default("0.0.0.0")
}

pub(crate) fn metron_address() -> FieldRule {
    FieldRule::new("metron_port")
        .output("metron_address")
        .source(Source::format(
            "127.0.0.1:{}",
            vec![Source::property("metron_port")],
        ))
        .or_default(format!("127.0.0.1:{DEFAULT_METRON_PORT}"))
}

pub(crate) fn log_level() -> FieldRule {
    FieldRule::property("log_level").or_default("info")
}

pub(crate) fn tag_length() -> FieldRule {
    FieldRule::property("tag_length")
        .validate(Validator::BoundedInteger { min: 1, max: 3 })
        .invalid_message("tag length must be greater than 0 and less than 4")
}

/// Connection-pool limits.
pub(crate) fn connection_limits() -> [FieldRule; 3] {
    [
        FieldRule::property("max_idle_connections").or_default(10),
        FieldRule::property("max_open_connections").or_default(200),
        FieldRule::property("connections_max_lifetime_seconds").or_default(3600),
    ]
}

pub(crate) fn uaa_fields(job: &str) -> [FieldRule; 5] {
    [
        FieldRule::property("uaa_client").or_default("network-policy"),
        FieldRule::property("uaa_client_secret").required(),
        FieldRule::new("uaa_hostname")
            .output("uaa_url")
            .source(Source::format(
                "https://{}",
                vec![Source::property("uaa_hostname")],
            ))
            .or_default("https://uaa.service.cf.internal"),
        FieldRule::property("uaa_port").or_default(8443),
        cert_field(job, "uaa_ca", "uaa_ca.crt"),
    ]
}

/// The Cloud Controller URL: explicit host and port over the
/// `cloud_controller_https_endpoint` link.
pub(crate) fn cc_url() -> FieldRule {
    FieldRule::new("cc_url")
        .source(Source::format(
            "http://{}:{}",
            vec![Source::property("cc_hostname"), Source::property("cc_port")],
        ))
        .source(Source::format(
            "https://{}:{}",
            vec![
                Source::link(CC_LINK, "cc.internal_service_hostname"),
                Source::link(CC_LINK, "cc.public_tls.port"),
            ],
        ))
}

pub(crate) fn cc_ca_file() -> FileRule {
    FileRule::cert("cc_ca.crt", "cc_ca_cert").or_link(CC_LINK, "cc.public_tls.ca_cert")
}

/// A `database.<name>` property written to `database.<output>`, optionally
/// falling back to the `dbconn` link.
pub(crate) fn database(name: &str, output: &str, dbconn: bool) -> FieldRule {
    let path = format!("database.{name}");
    let rule = FieldRule::property(&path).output(&format!("database.{output}"));
    if dbconn {
        rule.or_link("dbconn", &path)
    } else {
        rule
    }
}

pub(crate) fn database_driver(dbconn: bool) -> FieldRule {
    database("type", "type", dbconn)
        .required()
        .validate(Validator::one_of("driver", DRIVERS))
        .invalid_message("unknown driver {value}")
}

/// Credentials, port and name, all required.
pub(crate) fn database_credentials(dbconn: bool) -> [FieldRule; 3] {
    [
        database("username", "user", dbconn).required(),
        database("password", "password", dbconn).required(),
        database("port", "port", dbconn).required(),
    ]
}

pub(crate) fn database_name(dbconn: bool) -> FieldRule {
    database("name", "database_name", dbconn).required()
}

/// TLS settings for the database connection.
pub(crate) fn database_tls(job: &str, dbconn: bool) -> [FieldRule; 3] {
    [
        database("require_ssl", "require_ssl", dbconn).or_default(false),
        cert_field(job, "database.ca_cert", "database_ca.crt"),
        database("skip_hostname_validation", "skip_hostname_validation", dbconn).or_default(false),
    ]
}

/// Client certificate paths for mutual TLS with the database.
pub(crate) fn database_client_certs(job: &str) -> [FieldRule; 2] {
    [
        cert_field(job, "database.client_cert", "db_client.crt"),
        cert_field(job, "database.client_key", "db_client.key"),
    ]
}

pub(crate) fn database_ca_file(dbconn: bool) -> FileRule {
    let rule = FileRule::cert("database_ca.crt", "database.ca_cert");
    if dbconn {
        rule.or_link("dbconn", "database.ca_cert")
    } else {
        rule
    }
}

pub(crate) fn database_client_files(dbconn: bool) -> [FileRule; 2] {
    let cert = FileRule::cert("db_client.crt", "database.client_cert").with_trailing_newline();
    let key = FileRule::cert("db_client.key", "database.client_key").with_trailing_newline();
    if dbconn {
        [
            cert.or_link("dbconn", "database.client_cert"),
            key.or_link("dbconn", "database.client_key"),
        ]
    } else {
        [cert, key]
    }
}

/// `ca.crt`, `server.crt` and `server.key` paths for a job serving mutual TLS.
pub(crate) fn server_tls_fields(job: &str) -> [FieldRule; 3] {
    [
        cert_field(job, "ca_cert_file", "ca.crt"),
        cert_field(job, "server_cert_file", "server.crt"),
        cert_field(job, "server_key_file", "server.key"),
    ]
}

pub(crate) fn server_tls_files() -> [FileRule; 3] {
    [
        FileRule::cert("ca.crt", "ca_cert"),
        FileRule::cert("server.crt", "server_cert"),
        FileRule::cert("server.key", "server_key"),
    ]
}
