//! Property-based tests for validators.

use crate::validate::{is_cidr, is_dotted_address, is_host_port, Validator};
use proptest::prelude::*;
use serde_json::json;

fn tag_length() -> Validator {
    Validator::BoundedInteger { min: 1, max: 3 }
}

fn hostname_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,10}[a-z0-9](\\.[a-z]{2,6}){0,2}"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn tag_length_accepts_exactly_one_to_three(n in any::<i64>()) {
        let result = tag_length().check("tag_length", &json!(n));
        prop_assert_eq!(result.is_ok(), (1..=3).contains(&n));
    }

    #[test]
    fn bounded_integer_rejects_floats(n in -10.0f64..10.0) {
        prop_assert!(tag_length().check("tag_length", &json!(n)).is_err());
    }

    #[test]
    fn positive_interval_accepts_positive_integers(n in 1i64..=i64::MAX) {
        prop_assert!(Validator::PositiveIntegerSeconds
            .check("asg_poll_interval_seconds", &json!(n))
            .is_ok());
    }

    #[test]
    fn positive_interval_rejects_non_positive_integers(n in i64::MIN..=0) {
        let err = Validator::PositiveIntegerSeconds
            .check("asg_poll_interval_seconds", &json!(n))
            .unwrap_err();
        prop_assert_eq!(
            err.reason,
            "asg_poll_interval_seconds must be an integer greater than 0"
        );
    }

    #[test]
    fn positive_interval_rejects_floats_strings_and_booleans(
        f in any::<f64>().prop_filter("finite", |f| f.is_finite()),
        s in "[0-9]{1,6}",
        b in any::<bool>(),
    ) {
        let validator = Validator::PositiveIntegerSeconds;
        prop_assert!(validator.check("interval", &json!(f)).is_err());
        prop_assert!(validator.check("interval", &json!(s)).is_err());
        prop_assert!(validator.check("interval", &json!(b)).is_err());
    }

    #[test]
    fn dotted_address_accepts_plain_octets(a in any::<u8>(), b in any::<u8>(), c in any::<u8>(), d in any::<u8>()) {
        let candidate = format!("{a}.{b}.{c}.{d}");
        prop_assert!(is_dotted_address(&candidate), "{}", candidate);
    }

    #[test]
    fn dotted_address_rejects_leading_zeros(
        octets in prop::array::uniform4(any::<u8>()),
        position in 0usize..4,
        padded in 1u8..=255,
    ) {
        let parts: Vec<String> = octets
            .iter()
            .enumerate()
            .map(|(i, o)| if i == position { format!("0{padded}") } else { o.to_string() })
            .collect();
        let candidate = parts.join(".");
        prop_assert!(!is_dotted_address(&candidate), "{}", candidate);
    }

    #[test]
    fn host_port_accepts_host_and_ip_forms(
        host in hostname_strategy(),
        ip in prop::array::uniform4(any::<u8>()),
        port in 1u16..=65535,
    ) {
        let ip = ip.iter().map(ToString::to_string).collect::<Vec<_>>().join(".");
        let by_name = format!("{host}:{port}");
        let by_ip = format!("{ip}:{port}");
        prop_assert!(is_host_port(&by_name), "{}", by_name);
        prop_assert!(is_host_port(&by_ip), "{}", by_ip);
    }

    #[test]
    fn host_port_rejects_urls_and_missing_or_bad_ports(
        host in hostname_strategy(),
        port in 1u16..=65535,
        junk in "[a-z]{1,6}",
    ) {
        let url = format!("http://{host}:{port}");
        let bad_port = format!("{host}:{junk}");
        prop_assert!(!is_host_port(&url), "{}", url);
        prop_assert!(!is_host_port(&host), "{}", host);
        prop_assert!(!is_host_port(&bad_port), "{}", bad_port);
    }

    #[test]
    fn cidr_accepts_prefixes_up_to_32(ip in prop::array::uniform4(any::<u8>()), prefix in 0u8..=32) {
        let ip = ip.iter().map(ToString::to_string).collect::<Vec<_>>().join(".");
        let candidate = format!("{ip}/{prefix}");
        prop_assert!(is_cidr(&candidate), "{}", candidate);
    }

    #[test]
    fn cidr_rejects_large_prefixes(ip in prop::array::uniform4(any::<u8>()), prefix in 33u16..1000) {
        let ip = ip.iter().map(ToString::to_string).collect::<Vec<_>>().join(".");
        let candidate = format!("{ip}/{prefix}");
        prop_assert!(!is_cidr(&candidate), "{}", candidate);
    }
}
