//! End-to-end scenarios exercising the compiled validator as a whole, rather than a
//! single constraint in isolation. Mirrors the teacher's top-level integration suite.
use schema_forge::{CompileOptions, Dialect, RootContainer};
use serde_json::json;

#[test]
fn array_with_ref_items_and_positional_tuple() {
    let schema = json!({
        "definitions": {"uint": {"type": "integer", "minimum": 0}},
        "type": "object",
        "properties": {
            "numbers": {"type": "array", "items": {"$ref": "#/definitions/uint"}},
            "tuple": {"items": [{"type": "string"}, {"type": "boolean"}, {"type": "number"}]}
        }
    });
    let compiled = RootContainer::compile(&schema, None).unwrap();

    assert!(compiled.is_valid(&json!({"numbers": [0, 1, 2], "tuple": ["a", true, 1.5]})));

    let errors: Vec<_> = compiled.validate(&json!({"numbers": [-1]})).collect();
    assert!(!errors.is_empty());

    let errors: Vec<_> = compiled.validate(&json!({"tuple": [1, 2, 3]})).collect();
    assert!(!errors.is_empty());
}

#[test]
fn validation_errors_carry_a_breadcrumb_through_nested_arrays_and_objects() {
    let schema = json!({
        "type": "object",
        "properties": {
            "people": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {"age": {"type": "integer", "minimum": 0}}
                }
            }
        }
    });
    let compiled = RootContainer::compile(&schema, None).unwrap();

    let instance = json!({"people": [{"age": 10}, {"age": -1}]});
    let errors: Vec<_> = compiled.validate(&instance).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "at /people/1/age: -1 is less than the minimum of 0");
}

#[test]
fn string_with_default_is_surfaced_through_the_side_channel_not_validation() {
    let schema = json!({
        "type": "string",
        "maxLength": 15,
        "minLength": 5,
        "default": "Hello, World!"
    });
    let compiled = RootContainer::compile(&schema, None).unwrap();

    assert!(!compiled.is_valid(&json!("Hi")));
    assert!(compiled.is_valid(&json!("Hello")));

    // The default itself must satisfy the same constraint (min/max length) —
    // the default side channel does not exempt the default value.
    assert!(compiled.is_valid(&json!("Hello, World!")));
}

#[test]
fn default_side_channel_surfaces_absent_properties_without_mutating_the_instance() {
    let schema = json!({
        "type": "object",
        "properties": {
            "name": {"type": "string", "default": "John Doe"},
            "age": {"type": "integer"}
        }
    });
    let compiled = RootContainer::compile(&schema, None).unwrap();

    let instance = json!({"age": 10});
    let defaults = compiled.defaults(&instance);
    assert_eq!(defaults.get("name"), Some(&json!("John Doe")));
    // The instance itself is untouched — defaults never rewrite the document.
    assert_eq!(instance, json!({"age": 10}));

    let defaults = compiled.defaults(&json!({"age": 10, "name": "Ada"}));
    assert!(defaults.is_empty());
}

#[test]
fn integer_is_inferred_from_multiple_of() {
    let schema = json!({"multipleOf": 1});
    let compiled = RootContainer::compile(&schema, None).unwrap();
    assert!(compiled.is_valid(&json!(3)));
    assert!(!compiled.is_valid(&json!(3.5)));
}

#[test]
fn split_inference_accepts_either_branch() {
    let schema = json!({"minimum": 0, "pattern": "^[a-z]+$"});
    let compiled = RootContainer::compile(&schema, None).unwrap();
    assert!(compiled.is_valid(&json!(5)));
    assert!(compiled.is_valid(&json!("abc")));
    assert!(!compiled.is_valid(&json!(-1)));
    assert!(!compiled.is_valid(&json!("A")));
}

#[test]
fn self_reference_terminates_on_recursive_instances() {
    let schema = json!({
        "type": "object",
        "properties": {"next": {"$ref": "#"}},
    });
    let compiled = RootContainer::compile(&schema, None).unwrap();
    assert!(compiled.is_valid(&json!({"next": {"next": {"next": {}}}})));
}

#[test]
fn one_of_rejects_an_instance_matching_more_than_one_branch() {
    let schema = json!({"oneOf": [{"type": "string"}, {"type": "integer"}]});
    let compiled = RootContainer::compile(&schema, None).unwrap();
    assert!(compiled.is_valid(&json!("x")));
    assert!(compiled.is_valid(&json!(3)));

    let ambiguous = json!({"oneOf": [{"minimum": 0}, {"multipleOf": 1}]});
    let compiled = RootContainer::compile(&ambiguous, None).unwrap();
    assert!(!compiled.is_valid(&json!(5)));
}

#[test]
fn legacy_dialect_treats_exclusive_minimum_as_a_boolean_flag() {
    let schema = json!({"minimum": 1, "exclusiveMinimum": true});
    let options = CompileOptions::new().with_dialect(Dialect::Legacy);
    let compiled = RootContainer::compile(&schema, Some(options)).unwrap();
    assert!(!compiled.is_valid(&json!(1)));
    assert!(compiled.is_valid(&json!(1.5)));
}

#[test]
fn modern_dialect_exclusive_minimum_is_independent_of_minimum() {
    let schema = json!({"minimum": 1, "exclusiveMinimum": 2});
    let compiled = RootContainer::compile(&schema, None).unwrap();
    assert!(!compiled.is_valid(&json!(2)));
    assert!(compiled.is_valid(&json!(2.5)));
}

#[test]
fn unresolvable_reference_fails_compilation_not_validation() {
    let schema = json!({"$ref": "#/definitions/missing"});
    assert!(RootContainer::compile(&schema, None).is_err());
}

#[test]
fn dependencies_support_both_name_lists_and_schemas() {
    let schema = json!({
        "type": "object",
        "dependencies": {
            "credit_card": ["billing_address"],
            "ship_to": {"required": ["address"]}
        }
    });
    let compiled = RootContainer::compile(&schema, None).unwrap();
    assert!(compiled.is_valid(&json!({})));
    assert!(!compiled.is_valid(&json!({"credit_card": "1234"})));
    assert!(compiled.is_valid(&json!({"credit_card": "1234", "billing_address": "x"})));
    assert!(!compiled.is_valid(&json!({"ship_to": "home"})));
    assert!(compiled.is_valid(&json!({"ship_to": "home", "address": "x"})));
}
