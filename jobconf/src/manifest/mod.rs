//! Render inputs: the operator property tree, links from peer jobs, and the
//! optional instance spec.
//!
//! These are constructed once per render by the caller and are read-only for
//! the duration of a build.
//!
//! # Examples
//!
//! ```
//! use jobconf::manifest::{Link, PropertyTree, RenderInput};
//! use serde_json::json;
//!
//! let input = RenderInput::new(PropertyTree::from_value(json!({"log_level": "debug"})))
//!     .with_link(Link::new("database").with_instance("10.0.0.5"));
//!
//! assert_eq!(input.properties.get("log_level"), Some(&json!("debug")));
//! assert_eq!(input.link("database").and_then(|l| l.address()), Some("10.0.0.5"));
//! ```

pub mod instance;
pub mod link;
pub mod loader;
pub mod property_tree;

pub use instance::{InstanceSpec, NetworkSpec};
pub use link::{Link, LinkInstance};
pub use loader::InputLoader;
pub use property_tree::PropertyTree;

use serde::{Deserialize, Serialize};

/// Everything a build reads.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RenderInput {
    /// Operator-supplied properties.
    #[serde(default)]
    pub properties: PropertyTree,

    /// Links consumed by the job, in declaration order.
    #[serde(default)]
    pub links: Vec<Link>,

    /// The instance being rendered for, when known.
    #[serde(default)]
    pub instance: Option<InstanceSpec>,
}

impl RenderInput {
    /// Create an input with the given properties and no links.
    #[must_use]
    pub fn new(properties: PropertyTree) -> Self {
        Self {
            properties,
            links: Vec::new(),
            instance: None,
        }
    }

    /// Append a link.
    #[must_use]
    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    /// Set the instance spec.
    #[must_use]
    pub fn with_instance(mut self, instance: InstanceSpec) -> Self {
        self.instance = Some(instance);
        self
    }

    /// Find a link by name. When several share a name the first one wins.
    #[must_use]
    pub fn link(&self, name: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.name == name)
    }
}
