//! Links: data exposed by peer jobs at deploy time.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::value::lookup_path;

/// One instance behind a link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LinkInstance {
    /// The instance's address (hostname or IP).
    #[serde(default)]
    pub address: Option<String>,
}

/// A named reference to a peer job's exposed data.
///
/// # Examples
///
/// ```
/// use jobconf::manifest::Link;
/// use serde_json::json;
///
/// let link = Link::new("dbconn")
///     .with_properties(json!({"database": {"host": "db.internal"}}))
///     .with_instance("10.0.0.5");
///
/// assert_eq!(link.property("database.host"), Some(&json!("db.internal")));
/// assert_eq!(link.address(), Some("10.0.0.5"));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Link {
    /// The link name the job consumes it under.
    pub name: String,

    /// Properties the peer job exposes.
    #[serde(default = "empty_object")]
    pub properties: Value,

    /// Instances behind the link.
    #[serde(default)]
    pub instances: Vec<LinkInstance>,

    /// Link-level address (e.g. a DNS name covering all instances).
    #[serde(default)]
    pub address: Option<String>,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl Link {
    /// Create a link with no properties and no instances.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: empty_object(),
            instances: Vec::new(),
            address: None,
        }
    }

    /// Replace the link's properties.
    #[must_use]
    pub fn with_properties(mut self, properties: Value) -> Self {
        self.properties = properties;
        self
    }

    /// Append an instance with the given address.
    #[must_use]
    pub fn with_instance(mut self, address: impl Into<String>) -> Self {
        self.instances.push(LinkInstance {
            address: Some(address.into()),
        });
        self
    }

    /// Set the link-level address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Look up a dotted path in the link's properties.
    #[must_use]
    pub fn property(&self, path: &str) -> Option<&Value> {
        lookup_path(&self.properties, path)
    }

    /// The address to reach this link: the first instance with an address,
    /// otherwise the link-level address.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.instance_addresses()
            .next()
            .or_else(|| self.address.as_deref().filter(|a| !a.is_empty()))
    }

    /// Addresses of all instances that have one, in order.
    pub fn instance_addresses(&self) -> impl Iterator<Item = &str> {
        self.instances
            .iter()
            .filter_map(|instance| instance.address.as_deref())
            .filter(|address| !address.is_empty())
    }
}
