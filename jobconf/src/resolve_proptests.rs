//! Property-based tests for source precedence and build determinism.

use crate::builder::build;
use crate::manifest::{Link, PropertyTree, RenderInput};
use crate::resolve::{BlankPolicy, PropertyResolver, Provenance, Source};
use crate::schema::{FieldRule, JobConfigSchema};
use proptest::prelude::*;
use serde_json::{json, Value};

fn sources() -> Vec<Source> {
    vec![
        Source::property("tag_length"),
        Source::link("tag_length", "tag_length"),
        Source::default_value("default"),
    ]
}

fn explicit_strategy() -> impl Strategy<Value = Option<Value>> {
    prop_oneof![
        Just(None),
        Just(Some(Value::Null)),
        Just(Some(json!(""))),
        "[a-z0-9]{1,12}".prop_map(|s| Some(json!(s))),
        any::<i32>().prop_map(|n| Some(json!(n))),
    ]
}

fn link_strategy() -> impl Strategy<Value = Option<Value>> {
    prop_oneof![
        Just(None),
        Just(Some(json!(""))),
        "[a-z0-9]{1,12}".prop_map(|s| Some(json!(s))),
    ]
}

fn input_for(explicit: Option<&Value>, link: Option<&Value>) -> RenderInput {
    let properties = explicit.map_or_else(|| json!({}), |v| json!({"tag_length": v}));
    let mut input = RenderInput::new(PropertyTree::from_value(properties));
    if let Some(v) = link {
        input = input.with_link(Link::new("tag_length").with_properties(json!({"tag_length": v})));
    }
    input
}

fn present(value: Option<&Value>) -> bool {
    value.is_some_and(|v| !v.is_null() && v != &json!(""))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // explicit > link > default, with null and "" falling through
    #[test]
    fn first_present_source_wins(explicit in explicit_strategy(), link in link_strategy()) {
        let input = input_for(explicit.as_ref(), link.as_ref());
        let resolved = PropertyResolver::new(&input)
            .resolve(&sources(), BlankPolicy::FallThrough)
            .unwrap();

        if present(explicit.as_ref()) {
            prop_assert_eq!(resolved.provenance, Provenance::Explicit);
            prop_assert_eq!(Some(&resolved.value), explicit.as_ref());
        } else if present(link.as_ref()) {
            prop_assert_eq!(resolved.provenance, Provenance::Link);
            prop_assert_eq!(Some(&resolved.value), link.as_ref());
        } else {
            prop_assert_eq!(resolved.provenance, Provenance::Default);
            prop_assert_eq!(resolved.value, json!("default"));
        }
    }

    #[test]
    fn required_field_without_any_source_fails(explicit in explicit_strategy(), link in link_strategy()) {
        let schema = JobConfigSchema::new("demo", "config/demo.json").field(
            FieldRule::property("tag_length")
                .or_link("tag_length", "tag_length")
                .required(),
        );
        let input = input_for(explicit.as_ref(), link.as_ref());
        let result = build(&schema, &input);
        prop_assert_eq!(
            result.is_ok(),
            present(explicit.as_ref()) || present(link.as_ref())
        );
    }

    #[test]
    fn builds_are_deterministic(
        keys in prop::collection::btree_map("[a-z]{1,8}", "[a-z0-9]{0,8}", 0..12),
    ) {
        let schema = keys.keys().fold(
            JobConfigSchema::new("demo", "config/demo.json"),
            |schema, key| schema.field(FieldRule::property(key).or_default("fallback")),
        );
        let properties: serde_json::Map<String, Value> =
            keys.iter().map(|(k, v)| (k.clone(), json!(v))).collect();
        let input = RenderInput::new(PropertyTree::from_value(Value::Object(properties)));

        let first = build(&schema, &input).unwrap().document.to_json_pretty().unwrap();
        let second = build(&schema, &input).unwrap().document.to_json_pretty().unwrap();
        prop_assert_eq!(first, second);
    }
}
