//! Thin, non-validating mapping from raw JSON onto the typed schema data model.
//!
//! This is deliberately not a meta-schema-checking parser: it fails only when the
//! document isn't structurally a schema (not an object or boolean). A schema that is
//! itself invalid against the JSON Schema meta-schema compiles without complaint here;
//! catching that is out of scope.
use crate::dialect::Dialect;
use crate::error::CompileError;
use crate::primitive_type::PrimitiveType;
use serde_json::{Map, Value};
use std::convert::TryFrom;

/// A schema, either the trivial boolean form or a keyword-bearing object.
#[derive(Debug)]
pub(crate) enum Schema {
    Bool(bool),
    Node(SchemaNode),
}

/// One dialect's view over a schema object's keywords.
///
/// Rather than modeling the two dialects as separate record structs, this keeps a
/// single raw keyword map and branches on `dialect` only where the two actually
/// differ (the numeric exclusive-bound keywords) — the `match` an exhaustive two-variant
/// enum would otherwise force is instead paid for once, here, at the accessor level.
#[derive(Debug)]
pub(crate) struct SchemaNode {
    dialect: Dialect,
    raw: Map<String, Value>,
}

/// How a numeric bound applies, if at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum BoundMode {
    None,
    Inclusive(f64),
    Exclusive(f64),
}

/// The two shapes `items` can take.
#[derive(Debug)]
pub(crate) enum ItemsSpec<'a> {
    Homogeneous(&'a Value),
    Positional(&'a [Value]),
}

pub(crate) fn parse_schema(document: &Value, dialect: Dialect) -> Result<Schema, CompileError> {
    match document {
        Value::Bool(b) => Ok(Schema::Bool(*b)),
        Value::Object(map) => Ok(Schema::Node(SchemaNode {
            dialect,
            raw: map.clone(),
        })),
        other => Err(CompileError::NotASchema(other.clone())),
    }
}

/// Forced dialect wins; otherwise sniff `$schema`; otherwise fall back to `Modern`.
pub(crate) fn resolve_dialect(document: &Value, forced: Option<Dialect>) -> Dialect {
    forced
        .or_else(|| crate::dialect::sniff(document))
        .unwrap_or_default()
}

impl SchemaNode {
    pub(crate) fn reference(&self) -> Option<&str> {
        self.raw.get("$ref").and_then(Value::as_str)
    }

    pub(crate) fn declared_types(&self) -> Option<Vec<PrimitiveType>> {
        match self.raw.get("type")? {
            Value::String(s) => PrimitiveType::try_from(s.as_str()).ok().map(|t| vec![t]),
            Value::Array(items) => {
                let types: Vec<PrimitiveType> = items
                    .iter()
                    .filter_map(Value::as_str)
                    .filter_map(|s| PrimitiveType::try_from(s).ok())
                    .collect();
                if types.is_empty() {
                    None
                } else {
                    Some(types)
                }
            }
            _ => None,
        }
    }

    pub(crate) fn enum_values(&self) -> Option<&Vec<Value>> {
        self.raw.get("enum").and_then(Value::as_array)
    }

    pub(crate) fn default_value(&self) -> Option<&Value> {
        self.raw.get("default")
    }

    fn raw_minimum(&self) -> Option<f64> {
        self.raw.get("minimum").and_then(Value::as_f64)
    }

    fn raw_maximum(&self) -> Option<f64> {
        self.raw.get("maximum").and_then(Value::as_f64)
    }

    pub(crate) fn lower_bound(&self) -> BoundMode {
        match self.dialect {
            Dialect::Legacy => {
                let exclusive = self
                    .raw
                    .get("exclusiveMinimum")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                match self.raw_minimum() {
                    Some(m) if exclusive => BoundMode::Exclusive(m),
                    Some(m) => BoundMode::Inclusive(m),
                    None => BoundMode::None,
                }
            }
            Dialect::Modern => {
                if let Some(e) = self.raw.get("exclusiveMinimum").and_then(Value::as_f64) {
                    BoundMode::Exclusive(e)
                } else if let Some(m) = self.raw_minimum() {
                    BoundMode::Inclusive(m)
                } else {
                    BoundMode::None
                }
            }
        }
    }

    pub(crate) fn upper_bound(&self) -> BoundMode {
        match self.dialect {
            Dialect::Legacy => {
                let exclusive = self
                    .raw
                    .get("exclusiveMaximum")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                match self.raw_maximum() {
                    Some(m) if exclusive => BoundMode::Exclusive(m),
                    Some(m) => BoundMode::Inclusive(m),
                    None => BoundMode::None,
                }
            }
            Dialect::Modern => {
                if let Some(e) = self.raw.get("exclusiveMaximum").and_then(Value::as_f64) {
                    BoundMode::Exclusive(e)
                } else if let Some(m) = self.raw_maximum() {
                    BoundMode::Inclusive(m)
                } else {
                    BoundMode::None
                }
            }
        }
    }

    pub(crate) fn multiple_of(&self) -> Option<f64> {
        self.raw.get("multipleOf").and_then(Value::as_f64)
    }

    /// Picks whichever numeric keyword is present first, in the order `multipleOf`,
    /// `minimum`, `maximum`, `exclusiveMinimum`, `exclusiveMaximum`, and reports
    /// whether *that one's* value is whole. Used by type inference to choose
    /// `integer` over `number`; later keywords are never consulted once an earlier
    /// one is present, even if their values disagree on integral-ness. Returns
    /// `None` when no numeric keyword is present at all.
    pub(crate) fn first_numeric_keyword_is_integral(&self) -> Option<bool> {
        ["multipleOf", "minimum", "maximum", "exclusiveMinimum", "exclusiveMaximum"]
            .iter()
            .find_map(|k| self.raw.get(*k))
            .and_then(Value::as_f64)
            .map(|v| v.fract() == 0.0)
    }

    pub(crate) fn min_length(&self) -> Option<usize> {
        self.raw.get("minLength").and_then(Value::as_u64).map(|v| v as usize)
    }

    pub(crate) fn max_length(&self) -> Option<usize> {
        self.raw.get("maxLength").and_then(Value::as_u64).map(|v| v as usize)
    }

    pub(crate) fn pattern(&self) -> Option<&str> {
        self.raw.get("pattern").and_then(Value::as_str)
    }

    pub(crate) fn format(&self) -> Option<&str> {
        self.raw.get("format").and_then(Value::as_str)
    }

    pub(crate) fn items(&self) -> Option<ItemsSpec<'_>> {
        match self.raw.get("items")? {
            Value::Array(items) => Some(ItemsSpec::Positional(items)),
            other => Some(ItemsSpec::Homogeneous(other)),
        }
    }

    pub(crate) fn additional_items(&self) -> Option<&Value> {
        self.raw.get("additionalItems")
    }

    pub(crate) fn min_items(&self) -> Option<usize> {
        self.raw.get("minItems").and_then(Value::as_u64).map(|v| v as usize)
    }

    pub(crate) fn max_items(&self) -> Option<usize> {
        self.raw.get("maxItems").and_then(Value::as_u64).map(|v| v as usize)
    }

    pub(crate) fn unique_items(&self) -> bool {
        self.raw.get("uniqueItems").and_then(Value::as_bool).unwrap_or(false)
    }

    pub(crate) fn properties(&self) -> Option<&Map<String, Value>> {
        self.raw.get("properties").and_then(Value::as_object)
    }

    pub(crate) fn pattern_properties(&self) -> Option<&Map<String, Value>> {
        self.raw.get("patternProperties").and_then(Value::as_object)
    }

    pub(crate) fn additional_properties(&self) -> Option<&Value> {
        self.raw.get("additionalProperties")
    }

    pub(crate) fn required(&self) -> Option<Vec<String>> {
        let items = self.raw.get("required")?.as_array()?;
        Some(items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
    }

    pub(crate) fn min_properties(&self) -> Option<usize> {
        self.raw
            .get("minProperties")
            .and_then(Value::as_u64)
            .map(|v| v as usize)
    }

    pub(crate) fn max_properties(&self) -> Option<usize> {
        self.raw
            .get("maxProperties")
            .and_then(Value::as_u64)
            .map(|v| v as usize)
    }

    pub(crate) fn dependencies(&self) -> Option<&Map<String, Value>> {
        self.raw.get("dependencies").and_then(Value::as_object)
    }

    pub(crate) fn all_of(&self) -> Option<&Vec<Value>> {
        self.raw.get("allOf").and_then(Value::as_array)
    }

    pub(crate) fn any_of(&self) -> Option<&Vec<Value>> {
        self.raw.get("anyOf").and_then(Value::as_array)
    }

    pub(crate) fn one_of(&self) -> Option<&Vec<Value>> {
        self.raw.get("oneOf").and_then(Value::as_array)
    }

    pub(crate) fn not(&self) -> Option<&Value> {
        self.raw.get("not")
    }

    pub(crate) fn has_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.raw.contains_key(*k))
    }

    pub(crate) fn dialect(&self) -> Dialect {
        self.dialect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_exclusive_minimum_is_a_flag() {
        let schema = parse_schema(&json!({"minimum": 1, "exclusiveMinimum": true}), Dialect::Legacy)
            .unwrap();
        let node = match schema {
            Schema::Node(n) => n,
            _ => panic!("expected node"),
        };
        assert_eq!(node.lower_bound(), BoundMode::Exclusive(1.0));
    }

    #[test]
    fn modern_exclusive_minimum_is_independent_of_minimum() {
        let schema = parse_schema(
            &json!({"minimum": 1, "exclusiveMinimum": 2}),
            Dialect::Modern,
        )
        .unwrap();
        let node = match schema {
            Schema::Node(n) => n,
            _ => panic!("expected node"),
        };
        assert_eq!(node.lower_bound(), BoundMode::Exclusive(2.0));
    }

    #[test]
    fn items_array_stays_positional_even_with_one_element() {
        let schema = parse_schema(&json!({"items": [{"type": "string"}]}), Dialect::Modern).unwrap();
        let node = match schema {
            Schema::Node(n) => n,
            _ => panic!("expected node"),
        };
        assert!(matches!(node.items(), Some(ItemsSpec::Positional(items)) if items.len() == 1));
    }

    #[test]
    fn non_object_non_bool_is_rejected() {
        assert!(parse_schema(&json!([1, 2, 3]), Dialect::Modern).is_err());
    }
}
