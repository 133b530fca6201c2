//! Whole-pipeline tests: loading inputs, building every job and reporting.

mod common;

use std::fs;

use common::InputFixture;
use jobconf::manifest::InputLoader;
use jobconf::{jobs, ConfigBuilder, ErrorKind, ErrorReporter};
use serde_json::{json, Value};
use tempfile::TempDir;

#[test]
fn netmon_renders_from_empty_input() {
    let rendered = InputFixture::new(json!({})).render("netmon");
    assert_eq!(
        rendered.document.to_value(),
        json!({
            "poll_interval": 30,
            "interface_name": "silk-vtep",
            "metron_address": "127.0.0.1:3457",
            "log_level": "info",
            "log_prefix": "cfnetworking",
        })
    );
    assert!(rendered.files.is_empty());
}

#[test]
fn log_prefix_ignores_properties() {
    let rendered = InputFixture::new(json!({"log_prefix": "something-else"})).render("netmon");
    assert_eq!(rendered.document.get("log_prefix"), Some(&json!("cfnetworking")));
}

#[test]
fn builds_are_idempotent() {
    let input = InputFixture::new(json!({"poll_interval": 12, "metron_port": 9999})).build();
    let schema = jobs::lookup("netmon").unwrap();
    let first = ConfigBuilder::new(&schema).build(&input).unwrap();
    let second = ConfigBuilder::new(&schema).build(&input).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.document.to_json_pretty().unwrap(),
        second.document.to_json_pretty().unwrap()
    );
    assert_eq!(first.document.get("metron_address"), Some(&json!("127.0.0.1:9999")));
}

fn sdc_properties() -> Value {
    json!({
        "ca_cert": "the ca",
        "server_cert": "the cert",
        "server_key": "the key",
    })
}

#[test]
fn service_discovery_controller_lists_nats_hosts() {
    let rendered = InputFixture::new(sdc_properties())
        .link(common::nats_link())
        .render("service-discovery-controller");
    assert_eq!(
        rendered.document.get("nats.hosts"),
        Some(&json!([
            {"hostname": "10.0.0.1", "port": 4222},
            {"hostname": "10.0.0.2", "port": 4222},
        ]))
    );
    assert_eq!(rendered.document.get("nats.pass"), Some(&json!("secret")));
    assert_eq!(rendered.document.get("port"), Some(&json!("8054")));
    assert_eq!(rendered.file("nats_ca.crt").unwrap().content, "");
}

#[test]
fn service_discovery_controller_requires_nats_certs_with_tls() {
    let err = InputFixture::new(sdc_properties())
        .edit(|p| common::set(p, "nats.tls_enabled", json!(true)))
        .link(common::nats_link())
        .render_err("service-discovery-controller");
    assert_eq!(err.kind(), ErrorKind::UnknownProperty);
    assert_eq!(err.to_string(), "Can't find property 'nats.tls.ca_cert'");

    let rendered = InputFixture::new(sdc_properties())
        .edit(|p| {
            common::set(p, "nats.tls_enabled", json!(true));
            common::set(p, "nats.tls.ca_cert", json!("nats ca"));
            common::set(p, "nats.tls.client_cert", json!("nats cert"));
            common::set(p, "nats.tls.client_key", json!("nats key"));
        })
        .link(common::nats_link())
        .render("service-discovery-controller");
    assert_eq!(rendered.file("nats_client.key").unwrap().content, "nats key");
}

#[test]
fn service_discovery_controller_requires_nats_link() {
    let err = InputFixture::new(sdc_properties()).render_err("service-discovery-controller");
    assert_eq!(err.to_string(), "must provide a nats link with at least one instance");
}

#[test]
fn bosh_dns_adapter_rejects_leading_zero_address() {
    let err = InputFixture::new(json!({
        "address": "127.0.0.01",
        "client_cert": "c",
        "client_key": "k",
        "ca_cert": "ca",
    }))
    .render_err("bosh-dns-adapter");
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
    assert_eq!(err.field(), Some("address"));
}

#[test]
fn vxlan_policy_agent_defaults() {
    let rendered = InputFixture::new(json!({}))
        .link(common::cf_network_link(json!({"network": "10.255.0.0/16"})))
        .render("vxlan-policy-agent");
    let doc = &rendered.document;
    assert_eq!(
        doc.get("policy_server_url"),
        Some(&json!("https://policy-server.service.cf.internal:4003"))
    );
    assert_eq!(doc.get("overlay_network"), Some(&json!("10.255.0.0/16")));
    assert_eq!(doc.get("debug_server_port"), Some(&json!(22222)));
}

#[test]
fn loads_input_file_and_builds() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("proxy.yml");
    fs::write(
        &path,
        "properties: {}\n\
         links:\n\
         \x20 - name: cf_network\n\
         \x20   properties:\n\
         \x20     cf_networking:\n\
         \x20       network: 10.255.0.0/16\n\
         \x20   instances:\n\
         \x20     - address: link.instance.address.com\n",
    )
    .unwrap();

    let input = InputLoader::load_file(&path).unwrap();
    let rendered = common::render("proxy-plugin", &input);
    assert_eq!(rendered.document.get("proxy_range"), Some(&json!("10.255.0.0/16")));
}

#[test]
fn json_report_for_failed_build() {
    let input = InputFixture::new(json!({"tag_length": 7})).build();
    let schema = jobs::lookup("proxy-plugin").unwrap();
    let err = ConfigBuilder::new(&schema).build(&input).unwrap_err();
    let report: Value =
        serde_json::from_str(&ErrorReporter::Json.render("proxy-plugin", &err).unwrap()).unwrap();
    assert_eq!(report["kind"], json!("missing_required_value"));
    assert_eq!(report["field"], json!("proxy_range"));
}

#[test]
fn every_job_is_registered() {
    for name in jobs::JOB_NAMES {
        let schema = jobs::lookup(name).unwrap();
        assert_eq!(schema.job, *name);
        assert!(schema.config_path().starts_with("/var/vcap/jobs/"));
    }
    assert!(jobs::lookup("no-such-job").is_err());
}
