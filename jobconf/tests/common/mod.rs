//! Common test utilities for integration tests.
//!
//! Helpers for building render inputs and running job schemas the way the
//! deployment tooling does.

use jobconf::manifest::{InstanceSpec, Link, PropertyTree, RenderInput};
use jobconf::{jobs, ConfigBuilder, Error, RenderedJob};
use serde_json::Value;

/// Builder for render inputs with sensible defaults.
#[allow(dead_code)]
pub struct InputFixture {
    properties: Value,
    links: Vec<Link>,
    instance: Option<InstanceSpec>,
}

#[allow(dead_code)]
impl InputFixture {
    /// Start from a property tree.
    pub fn new(properties: Value) -> Self {
        Self {
            properties,
            links: Vec::new(),
            instance: None,
        }
    }

    /// Add a link.
    pub fn link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    /// Add several links.
    pub fn links(mut self, links: impl IntoIterator<Item = Link>) -> Self {
        self.links.extend(links);
        self
    }

    /// Set the instance spec.
    pub fn instance(mut self, instance: InstanceSpec) -> Self {
        self.instance = Some(instance);
        self
    }

    /// Mutate the property tree in place.
    pub fn edit(mut self, f: impl FnOnce(&mut Value)) -> Self {
        f(&mut self.properties);
        self
    }

    /// Finish the input.
    pub fn build(self) -> RenderInput {
        let mut input = RenderInput::new(PropertyTree::from_value(self.properties));
        for link in self.links {
            input = input.with_link(link);
        }
        if let Some(instance) = self.instance {
            input = input.with_instance(instance);
        }
        input
    }

    /// Render `job` and expect success.
    pub fn render(self, job: &str) -> RenderedJob {
        render(job, &self.build())
    }

    /// Render `job` and expect failure.
    pub fn render_err(self, job: &str) -> Error {
        render_err(job, &self.build())
    }
}

/// Render `job` against `input`, panicking with the error message on failure.
#[allow(dead_code)]
pub fn render(job: &str, input: &RenderInput) -> RenderedJob {
    let schema = jobs::lookup(job).expect("known job");
    match ConfigBuilder::new(&schema).build(input) {
        Ok(rendered) => rendered,
        Err(e) => panic!("{job} failed to render: {e}"),
    }
}

/// Render `job` against `input`, expecting an error.
#[allow(dead_code)]
pub fn render_err(job: &str, input: &RenderInput) -> Error {
    let schema = jobs::lookup(job).expect("known job");
    match ConfigBuilder::new(&schema).build(input) {
        Ok(rendered) => panic!(
            "{job} rendered unexpectedly: {}",
            rendered.document.to_value()
        ),
        Err(e) => e,
    }
}

/// Remove a dotted path from a property tree.
#[allow(dead_code)]
pub fn remove(properties: &mut Value, path: &str) {
    let (parent, key) = match path.rsplit_once('.') {
        Some((parent, key)) => (parent, key),
        None => ("", path),
    };
    let target = if parent.is_empty() {
        Some(properties)
    } else {
        parent
            .split('.')
            .try_fold(properties, |node, segment| node.get_mut(segment))
    };
    if let Some(Value::Object(map)) = target {
        map.remove(key);
    }
}

/// Set a dotted path in a property tree, creating parents.
#[allow(dead_code)]
pub fn set(properties: &mut Value, path: &str, value: Value) {
    if let Value::Object(map) = properties {
        jobconf::value::insert_path(map, path, value);
    }
}

/// A `database` link whose single instance has `address`.
#[allow(dead_code)]
pub fn database_link(address: &str) -> Link {
    Link::new("database").with_instance(address)
}

/// A `cf_network` link publishing `cf_networking` properties.
#[allow(dead_code)]
pub fn cf_network_link(cf_networking: Value) -> Link {
    Link::new("cf_network")
        .with_instance("link.instance.address.com")
        .with_properties(serde_json::json!({ "cf_networking": cf_networking }))
}

/// A `nats` link with two instances and client credentials.
#[allow(dead_code)]
pub fn nats_link() -> Link {
    Link::new("nats")
        .with_instance("10.0.0.1")
        .with_instance("10.0.0.2")
        .with_properties(serde_json::json!({
            "nats": {"port": 4222, "user": "nats", "password": "secret"}
        }))
}
