//! The instance spec of the VM a job is rendered for.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Settings for one network the instance is attached to.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NetworkSpec {
    /// The instance's IP on this network.
    #[serde(default)]
    pub ip: Option<String>,

    /// Any other per-network settings, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The instance a job is being rendered for.
///
/// # Examples
///
/// ```
/// use jobconf::manifest::InstanceSpec;
///
/// let spec = InstanceSpec::new("cell-0.internal")
///     .with_ip("10.0.16.4")
///     .with_network("vxlan", "192.74.65.4");
///
/// assert_eq!(spec.primary_address(), Some("10.0.16.4"));
/// assert_eq!(spec.network_ip("vxlan"), Some("192.74.65.4"));
/// assert_eq!(spec.network_ip("missing"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InstanceSpec {
    /// The instance's address (usually a DNS name).
    #[serde(default)]
    pub address: Option<String>,

    /// The instance's default IP.
    #[serde(default)]
    pub ip: Option<String>,

    /// Networks keyed by name.
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkSpec>,
}

impl InstanceSpec {
    /// Create a spec with the given address.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            ..Self::default()
        }
    }

    /// Set the default IP.
    #[must_use]
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    /// Attach a network with the given IP.
    #[must_use]
    pub fn with_network(mut self, name: impl Into<String>, ip: impl Into<String>) -> Self {
        self.networks.insert(
            name.into(),
            NetworkSpec {
                ip: Some(ip.into()),
                extra: Map::new(),
            },
        );
        self
    }

    /// The IP bound to the named network.
    #[must_use]
    pub fn network_ip(&self, name: &str) -> Option<&str> {
        self.networks
            .get(name)
            .and_then(|network| network.ip.as_deref())
            .filter(|ip| !ip.is_empty())
    }

    /// The default IP, falling back to the address.
    #[must_use]
    pub fn primary_address(&self) -> Option<&str> {
        self.ip
            .as_deref()
            .filter(|ip| !ip.is_empty())
            .or_else(|| self.address.as_deref().filter(|a| !a.is_empty()))
    }
}
