//! The operator property tree.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::value::lookup_path;

/// Operator-supplied configuration, addressed by dotted key paths.
///
/// The root is always a mapping; `null` or a missing `properties` section
/// deserializes to an empty tree.
///
/// # Examples
///
/// ```
/// use jobconf::manifest::PropertyTree;
/// use serde_json::json;
///
/// let tree = PropertyTree::from_value(json!({"database": {"port": 5432}}));
/// assert_eq!(tree.get("database.port"), Some(&json!(5432)));
/// assert!(tree.contains("database"));
/// assert!(!tree.contains("database.host"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PropertyTree(Value);

impl Default for PropertyTree {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl PropertyTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a JSON value. Anything other than an object yields
    /// an empty tree.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        if value.is_object() {
            Self(value)
        } else {
            Self::default()
        }
    }

    /// Look up a dotted path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup_path(&self.0, path)
    }

    /// Returns `true` if the path exists, even when its value is null.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Returns `true` if the tree has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.as_object().map_or(true, Map::is_empty)
    }

    /// The tree as a JSON value.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl<'de> Deserialize<'de> for PropertyTree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        match value {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(value @ Value::Object(_)) => Ok(Self(value)),
            Some(other) => Err(serde::de::Error::custom(format!(
                "properties must be a mapping, got {}",
                crate::value::type_name(&other)
            ))),
        }
    }
}

impl From<Value> for PropertyTree {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_is_empty() {
        assert!(PropertyTree::new().is_empty());
        assert!(PropertyTree::from_value(json!("scalar")).is_empty());
    }

    #[test]
    fn test_contains_null_value() {
        let tree = PropertyTree::from_value(json!({"database": {"host": null}}));
        assert!(tree.contains("database.host"));
        assert_eq!(tree.get("database.host"), Some(&Value::Null));
    }

    #[test]
    fn test_deserialize_null_as_empty() {
        let tree: PropertyTree = serde_yaml::from_str("~").unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_deserialize_rejects_list() {
        let result: Result<PropertyTree, _> = serde_yaml::from_str("[1, 2]");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("properties must be a mapping"));
    }

    #[test]
    fn test_yaml_integers_and_floats_stay_distinct() {
        let tree: PropertyTree = serde_yaml::from_str("a: 1\nb: 1.0\nc: '1'").unwrap();
        assert!(tree.get("a").unwrap().is_i64());
        assert!(tree.get("b").unwrap().is_f64());
        assert!(tree.get("c").unwrap().is_string());
    }
}
