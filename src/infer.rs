use crate::primitive_type::{self, PrimitiveType};
use crate::schema::SchemaNode;
use serde_json::Value;

/// Nominates primitive type tags for a schema that omits `type`.
///
/// Additive: a schema combining a numeric bound and a string pattern infers both
/// `integer`/`number` and `string`. Returns an empty, already-canonical list when
/// nothing nominates a type.
pub(crate) fn infer(node: &SchemaNode) -> Vec<PrimitiveType> {
    let mut types = Vec::new();

    if node.has_any(&[
        "properties",
        "patternProperties",
        "additionalProperties",
        "required",
        "minProperties",
        "maxProperties",
    ]) {
        types.push(PrimitiveType::Object);
    }

    if node.has_any(&["items", "additionalItems", "minItems", "maxItems", "uniqueItems"]) {
        types.push(PrimitiveType::Array);
    }

    let enum_has_string = node
        .enum_values()
        .map_or(false, |values| values.iter().any(Value::is_string));
    if node.has_any(&["minLength", "maxLength", "pattern", "format"]) || enum_has_string {
        types.push(PrimitiveType::String);
    }

    if let Some(integral) = node.first_numeric_keyword_is_integral() {
        types.push(if integral { PrimitiveType::Integer } else { PrimitiveType::Number });
    }

    let enum_has_bool = node
        .enum_values()
        .map_or(false, |values| values.iter().any(Value::is_boolean));
    if enum_has_bool {
        types.push(PrimitiveType::Boolean);
    }

    primitive_type::canonicalize(types)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use crate::schema::{parse_schema, Schema};
    use serde_json::json;
    use test_case::test_case;

    fn node(value: Value) -> SchemaNode {
        match parse_schema(&value, Dialect::Modern).unwrap() {
            Schema::Node(n) => n,
            Schema::Bool(_) => panic!("expected an object schema"),
        }
    }

    #[test_case(json!({"multipleOf": 1}), vec![PrimitiveType::Integer])]
    #[test_case(json!({"multipleOf": 1.5}), vec![PrimitiveType::Number])]
    #[test_case(json!({"minimum": 0, "pattern": "^[a-z]+$"}), vec![PrimitiveType::Integer, PrimitiveType::String])]
    #[test_case(json!({"properties": {}}), vec![PrimitiveType::Object])]
    #[test_case(json!({}), vec![])]
    fn inference_matches_expected_types(schema: Value, expected: Vec<PrimitiveType>) {
        assert_eq!(infer(&node(schema)), expected);
    }

    #[test]
    fn first_present_numeric_keyword_decides_integer_vs_number_even_when_others_disagree() {
        // `minimum` is present and whole, so `integer` wins even though `maximum`
        // (checked later, and not at all once `minimum` has already decided it) is not.
        let schema = json!({"minimum": 0, "maximum": 1.5});
        assert_eq!(infer(&node(schema)), vec![PrimitiveType::Integer]);
    }
}
