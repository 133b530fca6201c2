//! Property resolution: walking a field's sources in order until one yields.
//!
//! # Precedence
//!
//! Sources are consulted left to right and the first one that is *present*
//! wins; later sources are never looked at. A source is absent when its data
//! is missing, null, or (unless the rule keeps blanks) the empty string, so an
//! operator cannot use `""` to blank out a link-supplied value.

use std::fmt;

use serde::Serialize;
use serde_json::{json, Value};

use crate::manifest::RenderInput;
use crate::value::{is_blank, to_text};

/// Which kind of input ultimately supplied a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// An operator-supplied property.
    Explicit,
    /// Data from a linked peer job.
    Link,
    /// A built-in default or derived constant.
    Default,
    /// The instance spec of the VM being rendered for.
    Instance,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit => write!(f, "explicit"),
            Self::Link => write!(f, "link"),
            Self::Default => write!(f, "default"),
            Self::Instance => write!(f, "instance"),
        }
    }
}

/// How the empty string is treated when resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlankPolicy {
    /// `""` counts as absent and resolution moves on.
    #[default]
    FallThrough,
    /// `""` is a real value and is handed to the validator.
    Keep,
}

impl BlankPolicy {
    const fn keeps_blank(self) -> bool {
        matches!(self, Self::Keep)
    }
}

/// One place a field's value may come from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// A path in the operator property tree.
    Property(String),

    /// A path in a named link's properties. The path `address` falls back to
    /// the link's address when the link exposes no such property.
    Link {
        /// Link name.
        name: String,
        /// Dotted path within the link's properties.
        path: String,
    },

    /// The first instance address of a named link, else its link-level address.
    LinkAddress(String),

    /// All instance addresses of a link as `[{hostname, port}]`, with the port
    /// read from the link's properties.
    LinkHosts {
        /// Link name.
        name: String,
        /// Dotted path of the port within the link's properties.
        port_path: String,
    },

    /// The instance IP on the network named by a property.
    NetworkIp {
        /// Property holding the network name.
        network_property: String,
    },

    /// The instance's default IP, else its address.
    InstanceAddress,

    /// A string built from `{}` placeholders; yields only when every argument
    /// yields.
    Format {
        /// Pattern with one `{}` per argument.
        pattern: String,
        /// Argument sources, in placeholder order.
        args: Vec<Source>,
    },

    /// A fixed value that is always present.
    Default(Value),
}

impl Source {
    /// [`Source::Property`].
    #[must_use]
    pub fn property(path: &str) -> Self {
        Self::Property(path.to_string())
    }

    /// [`Source::Link`].
    #[must_use]
    pub fn link(name: &str, path: &str) -> Self {
        Self::Link {
            name: name.to_string(),
            path: path.to_string(),
        }
    }

    /// [`Source::LinkAddress`].
    #[must_use]
    pub fn link_address(name: &str) -> Self {
        Self::LinkAddress(name.to_string())
    }

    /// [`Source::Format`].
    #[must_use]
    pub fn format(pattern: &str, args: Vec<Source>) -> Self {
        Self::Format {
            pattern: pattern.to_string(),
            args,
        }
    }

    /// [`Source::Default`].
    pub fn default_value(value: impl Into<Value>) -> Self {
        Self::Default(value.into())
    }
}

/// A value that was found, and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedValue {
    /// The resolved value.
    pub value: Value,
    /// Which kind of input supplied it.
    pub provenance: Provenance,
    /// Human-readable description of the exact source.
    pub origin: String,
}

impl ResolvedValue {
    fn new(value: Value, provenance: Provenance, origin: String) -> Self {
        Self {
            value,
            provenance,
            origin,
        }
    }
}

/// Resolves sources against one render input.
///
/// # Examples
///
/// ```
/// use jobconf::manifest::{Link, PropertyTree, RenderInput};
/// use jobconf::resolve::{BlankPolicy, PropertyResolver, Provenance, Source};
/// use serde_json::json;
///
/// let input = RenderInput::new(PropertyTree::from_value(json!({"database": {"host": ""}})))
///     .with_link(Link::new("database").with_instance("10.0.0.5"));
/// let resolver = PropertyResolver::new(&input);
///
/// let resolved = resolver
///     .resolve(
///         &[Source::property("database.host"), Source::link_address("database")],
///         BlankPolicy::FallThrough,
///     )
///     .unwrap();
/// assert_eq!(resolved.value, json!("10.0.0.5"));
/// assert_eq!(resolved.provenance, Provenance::Link);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PropertyResolver<'a> {
    input: &'a RenderInput,
}

impl<'a> PropertyResolver<'a> {
    /// Create a resolver over `input`.
    #[must_use]
    pub const fn new(input: &'a RenderInput) -> Self {
        Self { input }
    }

    /// Walk `sources` in order and return the first present value, or `None`
    /// when every source is absent.
    #[must_use]
    pub fn resolve(&self, sources: &[Source], blank: BlankPolicy) -> Option<ResolvedValue> {
        sources
            .iter()
            .find_map(|source| self.resolve_source(source, blank))
    }

    fn resolve_source(&self, source: &Source, blank: BlankPolicy) -> Option<ResolvedValue> {
        let keep = blank.keeps_blank();
        let resolved = match source {
            Source::Property(path) => self
                .input
                .properties
                .get(path)
                .filter(|value| !is_blank(value, keep))
                .map(|value| {
                    ResolvedValue::new(value.clone(), Provenance::Explicit, format!("property {path}"))
                }),

            Source::Link { name, path } => {
                let link = self.input.link(name)?;
                match link.property(path).filter(|value| !is_blank(value, keep)) {
                    Some(value) => Some(ResolvedValue::new(
                        value.clone(),
                        Provenance::Link,
                        format!("link {name}: {path}"),
                    )),
                    None if path == "address" => link.address().map(|address| {
                        ResolvedValue::new(
                            json!(address),
                            Provenance::Link,
                            format!("link {name} address"),
                        )
                    }),
                    None => None,
                }
            }

            Source::LinkAddress(name) => {
                let link = self.input.link(name)?;
                link.address().map(|address| {
                    ResolvedValue::new(json!(address), Provenance::Link, format!("link {name} address"))
                })
            }

            Source::LinkHosts { name, port_path } => {
                let link = self.input.link(name)?;
                let port = link
                    .property(port_path)
                    .filter(|value| !is_blank(value, false))
                    .cloned()
                    .unwrap_or(Value::Null);
                let hosts: Vec<Value> = link
                    .instance_addresses()
                    .map(|address| json!({"hostname": address, "port": port.clone()}))
                    .collect();
                if hosts.is_empty() {
                    None
                } else {
                    Some(ResolvedValue::new(
                        Value::Array(hosts),
                        Provenance::Link,
                        format!("link {name} instances"),
                    ))
                }
            }

            Source::NetworkIp { network_property } => {
                let network = self
                    .input
                    .properties
                    .get(network_property)
                    .filter(|value| !is_blank(value, false))
                    .map(to_text)?;
                let ip = self.input.instance.as_ref()?.network_ip(&network)?;
                Some(ResolvedValue::new(
                    json!(ip),
                    Provenance::Instance,
                    format!("instance network {network}"),
                ))
            }

            Source::InstanceAddress => {
                let address = self.input.instance.as_ref()?.primary_address()?;
                Some(ResolvedValue::new(
                    json!(address),
                    Provenance::Instance,
                    "instance address".to_string(),
                ))
            }

            Source::Format { pattern, args } => self.resolve_format(pattern, args, blank),

            Source::Default(value) => Some(ResolvedValue::new(
                value.clone(),
                Provenance::Default,
                "default".to_string(),
            )),
        };

        log::trace!(
            "source {:?} {}",
            source,
            if resolved.is_some() { "yielded" } else { "absent" }
        );
        resolved
    }

    fn resolve_format(
        &self,
        pattern: &str,
        args: &[Source],
        blank: BlankPolicy,
    ) -> Option<ResolvedValue> {
        let parts = args
            .iter()
            .map(|arg| self.resolve_source(arg, blank))
            .collect::<Option<Vec<_>>>()?;

        let mut rendered = String::with_capacity(pattern.len());
        let mut pieces = pattern.split("{}");
        if let Some(first) = pieces.next() {
            rendered.push_str(first);
        }
        for (piece, part) in pieces.zip(parts.iter()) {
            rendered.push_str(&to_text(&part.value));
            rendered.push_str(piece);
        }

        let (provenance, origin) = parts.first().map_or_else(
            || (Provenance::Default, "default".to_string()),
            |first| {
                let origins: Vec<&str> = parts.iter().map(|p| p.origin.as_str()).collect();
                (first.provenance, origins.join(" + "))
            },
        );
        Some(ResolvedValue::new(json!(rendered), provenance, origin))
    }
}
