//! Helpers over [`serde_json::Value`], the value type used for properties,
//! link data and rendered documents.

use serde_json::{Map, Value};

/// Returns `true` if `value` counts as "not supplied".
///
/// Null is always blank. The empty string is blank unless `keep_blank_strings`
/// is set, which lets a rule treat an explicit `""` as a real value.
///
/// # Examples
///
/// ```
/// use jobconf::value::is_blank;
/// use serde_json::json;
///
/// assert!(is_blank(&json!(null), false));
/// assert!(is_blank(&json!(""), false));
/// assert!(!is_blank(&json!(""), true));
/// assert!(!is_blank(&json!(0), false));
/// ```
#[must_use]
pub fn is_blank(value: &Value, keep_blank_strings: bool) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty() && !keep_blank_strings,
        _ => false,
    }
}

/// Returns the value as an integer if it is an integer number.
///
/// Floats, numeric strings and booleans are not integers, even when they
/// look like one (`1.0`, `"1"`, `true`).
///
/// # Examples
///
/// ```
/// use jobconf::value::as_strict_integer;
/// use serde_json::json;
///
/// assert_eq!(as_strict_integer(&json!(3)), Some(3));
/// assert_eq!(as_strict_integer(&json!(-1)), Some(-1));
/// assert_eq!(as_strict_integer(&json!(1.0)), None);
/// assert_eq!(as_strict_integer(&json!("1")), None);
/// assert_eq!(as_strict_integer(&json!(true)), None);
/// ```
#[must_use]
pub fn as_strict_integer(value: &Value) -> Option<i128> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from)),
        _ => None,
    }
}

/// Returns the value as a float if it is any JSON number.
#[must_use]
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// Render a scalar for string interpolation.
///
/// Strings are used verbatim (no quotes); numbers and booleans use their JSON
/// text. Compound values fall back to compact JSON.
///
/// # Examples
///
/// ```
/// use jobconf::value::to_text;
/// use serde_json::json;
///
/// assert_eq!(to_text(&json!("cc.internal")), "cc.internal");
/// assert_eq!(to_text(&json!(443)), "443");
/// assert_eq!(to_text(&json!(true)), "true");
/// ```
#[must_use]
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Look up a dotted path inside a value.
///
/// Both nested-object addressing (`{"database": {"host": ..}}`) and literal
/// dotted keys (`{"database.host": ..}`) are honoured; at each level the
/// longest literal key that matches a prefix of the remaining path wins.
///
/// # Examples
///
/// ```
/// use jobconf::value::lookup_path;
/// use serde_json::json;
///
/// let tree = json!({"database": {"host": "db"}, "locket.address": "l:1"});
/// assert_eq!(lookup_path(&tree, "database.host"), Some(&json!("db")));
/// assert_eq!(lookup_path(&tree, "locket.address"), Some(&json!("l:1")));
/// assert_eq!(lookup_path(&tree, "database.port"), None);
/// ```
#[must_use]
pub fn lookup_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(root);
    }
    let map = root.as_object()?;
    let segments: Vec<&str> = path.split('.').collect();

    for split in (1..=segments.len()).rev() {
        let head = segments[..split].join(".");
        if let Some(child) = map.get(&head) {
            if split == segments.len() {
                return Some(child);
            }
            let rest = segments[split..].join(".");
            if let Some(found) = lookup_path(child, &rest) {
                return Some(found);
            }
        }
    }
    None
}

/// Insert `value` at a dotted path, creating intermediate objects.
///
/// Existing non-object values along the path are replaced by objects.
///
/// # Examples
///
/// ```
/// use jobconf::value::insert_path;
/// use serde_json::{json, Map};
///
/// let mut doc = Map::new();
/// insert_path(&mut doc, "database.user", json!("admin"));
/// insert_path(&mut doc, "database.port", json!(5432));
/// assert_eq!(
///     serde_json::Value::Object(doc),
///     json!({"database": {"user": "admin", "port": 5432}})
/// );
/// ```
pub fn insert_path(doc: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            doc.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let entry = doc
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(child) = entry {
                insert_path(child, rest, value);
            }
        }
    }
}

/// Short description of a value's type, for diagnostics.
#[must_use]
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
