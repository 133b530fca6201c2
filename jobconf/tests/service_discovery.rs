//! Rejection tests for the `service-discovery-controller` and
//! `bosh-dns-adapter` jobs.

mod common;

use common::{set, InputFixture};
use jobconf::ErrorKind;
use serde_json::{json, Value};

const CONTROLLER: &str = "service-discovery-controller";
const ADAPTER: &str = "bosh-dns-adapter";

fn controller(edit: impl FnOnce(&mut Value)) -> InputFixture {
    InputFixture::new(json!({
        "ca_cert": "the ca",
        "server_cert": "the cert",
        "server_key": "the key",
    }))
    .link(common::nats_link())
    .edit(edit)
}

fn adapter(edit: impl FnOnce(&mut Value)) -> InputFixture {
    InputFixture::new(json!({
        "client_cert": "the cert",
        "client_key": "the key",
        "ca_cert": "the ca",
    }))
    .edit(edit)
}

#[test]
fn controller_rejects_string_tls_flag() {
    for flag in ["true", "false"] {
        let err = controller(|p| set(p, "nats.tls_enabled", json!(flag))).render_err(CONTROLLER);
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(err.field(), Some("nats.tls_enabled"));
        assert_eq!(
            err.to_string(),
            format!("nats.tls_enabled must be a boolean, got '{flag}'")
        );
    }
}

#[test]
fn controller_rejects_numeric_tls_flag() {
    let err = controller(|p| set(p, "nats.tls_enabled", json!(1))).render_err(CONTROLLER);
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
    assert_eq!(err.field(), Some("nats.tls_enabled"));
}

#[test]
fn controller_accepts_boolean_tls_flag_off() {
    let rendered =
        controller(|p| set(p, "nats.tls_enabled", json!(false))).render(CONTROLLER);
    assert_eq!(rendered.document.get("nats.tls_enabled"), Some(&json!(false)));
    assert_eq!(rendered.file("nats_client.crt").unwrap().content, "");
}

#[test]
fn controller_rejects_negative_delays() {
    for field in ["resume_pruning_delay_seconds", "warm_duration_seconds"] {
        let err = controller(|p| set(p, field, json!(-1))).render_err(CONTROLLER);
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(err.field(), Some(field));
        assert_eq!(
            err.to_string(),
            format!("{field} must be an integer of at least 0")
        );
    }
}

#[test]
fn controller_accepts_zero_delays() {
    let rendered = controller(|p| {
        set(p, "resume_pruning_delay_seconds", json!(0));
        set(p, "warm_duration_seconds", json!(0));
    })
    .render(CONTROLLER);
    assert_eq!(
        rendered.document.get("resume_pruning_delay_seconds"),
        Some(&json!(0))
    );
    assert_eq!(rendered.document.get("warm_duration_seconds"), Some(&json!(0)));
}

#[test]
fn controller_rejects_non_positive_intervals() {
    for field in [
        "staleness_threshold_seconds",
        "pruning_interval_seconds",
        "metrics_emit_seconds",
    ] {
        let err = controller(|p| set(p, field, json!(0))).render_err(CONTROLLER);
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(
            err.to_string(),
            format!("{field} must be an integer greater than 0")
        );
    }
}

#[test]
fn controller_rejects_out_of_range_ports() {
    for (field, value) in [
        ("metron_port", json!(-2)),
        ("log_level_port", json!(0)),
        ("log_level_port", json!(65536)),
    ] {
        let err = controller(|p| set(p, field, value)).render_err(CONTROLLER);
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(
            err.to_string(),
            format!("{field} must be a value between 1-65535")
        );
    }
}

#[test]
fn controller_requires_server_key() {
    let err = controller(|p| common::remove(p, "server_key")).render_err(CONTROLLER);
    assert_eq!(err.kind(), ErrorKind::UnknownProperty);
    assert_eq!(err.to_string(), "Can't find property 'server_key'");
}

#[test]
fn adapter_renders_with_certs() {
    let rendered = adapter(|_| {}).render(ADAPTER);
    assert_eq!(rendered.document.get("metron_port"), Some(&json!(3457)));
    assert_eq!(rendered.document.get("log_level_port"), Some(&json!(8066)));
    assert_eq!(rendered.file("client.key").unwrap().content, "the key");
}

#[test]
fn adapter_rejects_negative_ports() {
    for field in ["metron_port", "log_level_port"] {
        let err = adapter(|p| set(p, field, json!(-2))).render_err(ADAPTER);
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(err.field(), Some(field));
        assert_eq!(
            err.to_string(),
            format!("{field} must be a value between 1-65535")
        );
    }
}

#[test]
fn adapter_rejects_negative_metrics_interval() {
    let err = adapter(|p| set(p, "metrics_emit_seconds", json!(-2))).render_err(ADAPTER);
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
    assert_eq!(
        err.to_string(),
        "metrics_emit_seconds must be an integer greater than 0"
    );
}

#[test]
fn adapter_rejects_bad_vip_range() {
    let err = adapter(|p| set(p, "internal_route_vip_range", json!("127.128.0.0")))
        .render_err(ADAPTER);
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
    assert_eq!(err.field(), Some("internal_route_vip_range"));
}

#[test]
fn adapter_requires_client_cert() {
    let err = adapter(|p| common::remove(p, "client_cert")).render_err(ADAPTER);
    assert_eq!(err.kind(), ErrorKind::UnknownProperty);
    assert_eq!(err.to_string(), "Can't find property 'client_cert'");
}
