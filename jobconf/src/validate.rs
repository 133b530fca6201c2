//! Semantic validators for resolved field values.
//!
//! Every validator is a pure check of one value. A failure carries the
//! validator's default message for the field; rules may replace it with a
//! literal message of their own.

use std::fmt;
use std::net::Ipv4Addr;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::value::{as_number, as_strict_integer, to_text};

/// A failed validation, with the default message for the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invalid {
    /// Human-readable reason, already naming the field.
    pub reason: String,
}

impl fmt::Display for Invalid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl std::error::Error for Invalid {}

/// Unit an input duration is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    /// Seconds.
    Seconds,
    /// Minutes.
    Minutes,
    /// Hours.
    Hours,
}

impl TimeUnit {
    /// Number of seconds in one unit.
    #[must_use]
    pub const fn seconds(self) -> u64 {
        match self {
            Self::Seconds => 1,
            Self::Minutes => 60,
            Self::Hours => 3600,
        }
    }
}

/// A semantic check applied to a present value.
///
/// # Examples
///
/// ```
/// use jobconf::validate::Validator;
/// use serde_json::json;
///
/// let tag_length = Validator::BoundedInteger { min: 1, max: 3 };
/// assert!(tag_length.check("tag_length", &json!(2)).is_ok());
/// assert!(tag_length.check("tag_length", &json!(4)).is_err());
///
/// let locket = Validator::HostPort;
/// assert!(locket.check("locket.address", &json!("locket.internal:8891")).is_ok());
/// assert!(locket.check("locket.address", &json!("http://locket:8891")).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validator {
    /// An integer (not a float, string or boolean) within `[min, max]`.
    BoundedInteger {
        /// Smallest accepted value.
        min: i64,
        /// Largest accepted value.
        max: i64,
    },

    /// An integer strictly greater than zero.
    PositiveIntegerSeconds,

    /// A number that, converted from `unit` to seconds, is at least
    /// `min_seconds`.
    MinimumDuration {
        /// Unit the input is expressed in.
        unit: TimeUnit,
        /// Threshold in seconds.
        min_seconds: u64,
    },

    /// A string drawn from a fixed set.
    EnumMember {
        /// What the value names, used in the message ("driver").
        noun: String,
        /// The accepted values.
        allowed: Vec<String>,
    },

    /// An IPv4 dotted quad with no leading-zero octets.
    DottedAddress,

    /// `<hostname-or-ipv4>:<port>`.
    HostPort,

    /// `<ipv4>/<prefix>` with a prefix of 0-32.
    Cidr,

    /// Any non-empty string.
    NonEmpty,

    /// A JSON boolean; `"true"` and `1` are rejected.
    Boolean,
}

impl Validator {
    /// Convenience constructor for [`Validator::EnumMember`].
    #[must_use]
    pub fn one_of(noun: &str, allowed: &[&str]) -> Self {
        Self::EnumMember {
            noun: noun.to_string(),
            allowed: allowed.iter().map(ToString::to_string).collect(),
        }
    }

    /// Check `value`, reporting failures against `field`.
    ///
    /// # Errors
    ///
    /// Returns [`Invalid`] with the default message when the value does not
    /// satisfy the validator.
    pub fn check(&self, field: &str, value: &Value) -> Result<(), Invalid> {
        let ok = match self {
            Self::BoundedInteger { min, max } => as_strict_integer(value)
                .is_some_and(|n| n >= i128::from(*min) && n <= i128::from(*max)),
            Self::PositiveIntegerSeconds => as_strict_integer(value).is_some_and(|n| n > 0),
            Self::MinimumDuration { unit, min_seconds } => as_number(value).is_some_and(|n| {
                #[allow(clippy::cast_precision_loss)]
                let threshold = *min_seconds as f64;
                #[allow(clippy::cast_precision_loss)]
                let factor = unit.seconds() as f64;
                n * factor >= threshold
            }),
            Self::EnumMember { allowed, .. } => value
                .as_str()
                .is_some_and(|s| allowed.iter().any(|candidate| candidate == s)),
            Self::DottedAddress => value.as_str().is_some_and(is_dotted_address),
            Self::HostPort => value.as_str().is_some_and(is_host_port),
            Self::Cidr => value.as_str().is_some_and(is_cidr),
            Self::NonEmpty => value.as_str().is_some_and(|s| !s.is_empty()),
            Self::Boolean => value.is_boolean(),
        };

        if ok {
            Ok(())
        } else {
            Err(Invalid {
                reason: self.default_message(field, value),
            })
        }
    }

    fn default_message(&self, field: &str, value: &Value) -> String {
        let shown = to_text(value);
        match self {
            Self::BoundedInteger { min, max } => {
                format!("{field} must be a value between {min}-{max}")
            }
            Self::PositiveIntegerSeconds => {
                format!("{field} must be an integer greater than 0")
            }
            Self::MinimumDuration { min_seconds, .. } => {
                format!("{field} must be at least {}", human_duration(*min_seconds))
            }
            Self::EnumMember { noun, .. } => format!("unknown {noun} {shown}"),
            Self::DottedAddress => format!(
                "{field} must be an IPv4 address without leading zeros, got '{shown}'"
            ),
            Self::HostPort => format!("the {field} is invalid"),
            Self::Cidr => format!("{field} must be a CIDR range, got '{shown}'"),
            Self::NonEmpty => format!("{field} must not be empty"),
            Self::Boolean => format!("{field} must be a boolean, got '{shown}'"),
        }
    }
}

/// Format a whole number of seconds as the largest exact unit.
///
/// # Examples
///
/// ```
/// use jobconf::validate::human_duration;
///
/// assert_eq!(human_duration(60), "1 minute");
/// assert_eq!(human_duration(7200), "2 hours");
/// assert_eq!(human_duration(90), "90 seconds");
/// ```
#[must_use]
pub fn human_duration(seconds: u64) -> String {
    let (count, unit) = if seconds != 0 && seconds % 3600 == 0 {
        (seconds / 3600, "hour")
    } else if seconds != 0 && seconds % 60 == 0 {
        (seconds / 60, "minute")
    } else {
        (seconds, "second")
    };
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// IPv4 dotted quad; every octet is 0-255 written without a leading zero.
///
/// A leading zero is ambiguous between octal and decimal readings, so
/// `127.0.0.01` is rejected even though some parsers accept it.
#[must_use]
pub fn is_dotted_address(candidate: &str) -> bool {
    let octets: Vec<&str> = candidate.split('.').collect();
    if octets.len() != 4 {
        return false;
    }
    let well_formed = octets.iter().all(|octet| {
        !octet.is_empty()
            && octet.len() <= 3
            && octet.bytes().all(|b| b.is_ascii_digit())
            && !(octet.len() > 1 && octet.starts_with('0'))
            && octet.parse::<u8>().is_ok()
    });
    well_formed && candidate.parse::<Ipv4Addr>().is_ok()
}

fn hostname_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
        )
        .expect("hostname pattern is valid")
    })
}

/// A hostname (RFC 1123 labels) or an IPv4 literal.
///
/// Hosts made only of digits and dots must be valid dotted addresses.
#[must_use]
pub fn is_host(candidate: &str) -> bool {
    if candidate.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return is_dotted_address(candidate);
    }
    candidate.len() <= 253 && hostname_pattern().is_match(candidate)
}

/// `<host>:<port>` with a numeric port in 1-65535.
#[must_use]
pub fn is_host_port(candidate: &str) -> bool {
    let Some((host, port)) = candidate.rsplit_once(':') else {
        return false;
    };
    let port_ok = !port.is_empty()
        && port.bytes().all(|b| b.is_ascii_digit())
        && port.parse::<u16>().is_ok_and(|p| p > 0);
    port_ok && is_host(host)
}

/// `<dotted address>/<prefix>` with a prefix of 0-32, no leading zeros.
#[must_use]
pub fn is_cidr(candidate: &str) -> bool {
    let Some((address, prefix)) = candidate.split_once('/') else {
        return false;
    };
    let prefix_ok = !prefix.is_empty()
        && prefix.bytes().all(|b| b.is_ascii_digit())
        && !(prefix.len() > 1 && prefix.starts_with('0'))
        && prefix.parse::<u8>().is_ok_and(|p| p <= 32);
    prefix_ok && is_dotted_address(address)
}
