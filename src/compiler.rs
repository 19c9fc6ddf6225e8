//! Depth-first compilation of raw JSON into a `Constraint` tree.
use crate::constraints::{
    ArrayConstraint, Constraint, ExtrasPolicy, ItemsConstraint, NumberConstraint, ObjectConstraint,
    StringConstraint,
};
use crate::dialect::Dialect;
use crate::error::CompileError;
use crate::infer;
use crate::primitive_type::PrimitiveType;
use crate::schema::{self, ItemsSpec, Schema, SchemaNode};
use regex::Regex;
use serde_json::Value;

/// Compiles a schema document, recording every `$ref` string it encounters into
/// `pending` so the caller can resolve them once this pass returns.
pub(crate) fn compile(
    document: &Value,
    dialect: Dialect,
    pending: &mut Vec<String>,
) -> Result<Constraint, CompileError> {
    match schema::parse_schema(document, dialect)? {
        Schema::Bool(true) => Ok(Constraint::Empty),
        Schema::Bool(false) => Ok(Constraint::Not(Box::new(Constraint::Empty))),
        Schema::Node(node) => compile_node(&node, dialect, pending),
    }
}

fn compile_node(
    node: &SchemaNode,
    dialect: Dialect,
    pending: &mut Vec<String>,
) -> Result<Constraint, CompileError> {
    if let Some(reference) = node.reference() {
        pending.push(reference.to_string());
        return Ok(Constraint::Reference(reference.to_string()));
    }

    let mut pieces = Vec::new();

    if let Some(combinator) = compile_combinator(node, dialect, pending)? {
        pieces.push(combinator);
    }

    let declared = node.declared_types();
    let types = declared.unwrap_or_else(|| infer::infer(node));

    if !types.is_empty() {
        if let Some(default) = node.default_value() {
            if !types.iter().any(|ty| default_matches_type(default, *ty)) {
                return Err(CompileError::InvalidDefault {
                    expected: types.clone(),
                    value: default.clone(),
                });
            }
        }
        pieces.push(compile_types(node, &types, dialect, pending)?);
    }
    // `enum` constrains the instance independently of `type`, so it is always its
    // own piece rather than threaded into a per-type leaf constraint.
    if let Some(values) = node.enum_values() {
        pieces.push(Constraint::Enum(values.clone()));
    }

    let combined = match pieces.len() {
        0 => Constraint::Empty,
        1 => pieces.remove(0),
        _ => Constraint::All(pieces),
    };
    Ok(combined.reduce())
}

/// Picks at most one combinator per node, in strict priority order. A schema
/// that mixes `not` with `allOf` is unusual enough that honoring only the
/// higher-priority keyword (rather than conjoining both) keeps this pass simple.
fn compile_combinator(
    node: &SchemaNode,
    dialect: Dialect,
    pending: &mut Vec<String>,
) -> Result<Option<Constraint>, CompileError> {
    if let Some(child) = node.not() {
        let compiled = compile(child, dialect, pending)?;
        return Ok(Some(Constraint::Not(Box::new(compiled))));
    }
    if let Some(children) = node.all_of() {
        let compiled = compile_each(children, dialect, pending)?;
        return Ok(Some(Constraint::All(compiled)));
    }
    if let Some(children) = node.any_of() {
        let compiled = compile_each(children, dialect, pending)?;
        return Ok(Some(Constraint::Any(compiled)));
    }
    if let Some(children) = node.one_of() {
        let compiled = compile_each(children, dialect, pending)?;
        return Ok(Some(Constraint::OneOf(compiled)));
    }
    Ok(None)
}

fn compile_each(
    children: &[Value],
    dialect: Dialect,
    pending: &mut Vec<String>,
) -> Result<Vec<Constraint>, CompileError> {
    children.iter().map(|c| compile(c, dialect, pending)).collect()
}

fn compile_types(
    node: &SchemaNode,
    types: &[PrimitiveType],
    dialect: Dialect,
    pending: &mut Vec<String>,
) -> Result<Constraint, CompileError> {
    let mut pieces = Vec::with_capacity(types.len());
    for ty in types {
        let piece = match ty {
            PrimitiveType::Null => Constraint::Null,
            PrimitiveType::Boolean => Constraint::Boolean {
                default: default_for(node, PrimitiveType::Boolean),
            },
            PrimitiveType::Integer | PrimitiveType::Number => Constraint::Number(compile_number(
                node,
                *ty == PrimitiveType::Integer,
            )?),
            PrimitiveType::String => Constraint::String(compile_string(node)?),
            PrimitiveType::Array => Constraint::Array(Box::new(compile_array(node, dialect, pending)?)),
            PrimitiveType::Object => {
                Constraint::Object(Box::new(compile_object(node, dialect, pending)?))
            }
        };
        pieces.push(piece);
    }
    Ok(match pieces.len() {
        1 => pieces.remove(0),
        _ => Constraint::Any(pieces),
    })
}

fn compile_number(node: &SchemaNode, integer: bool) -> Result<NumberConstraint, CompileError> {
    let expected = if integer { PrimitiveType::Integer } else { PrimitiveType::Number };
    Ok(NumberConstraint::from_schema(
        integer,
        node.lower_bound(),
        node.upper_bound(),
        node.multiple_of(),
        None,
        default_for(node, expected),
    ))
}

fn compile_string(node: &SchemaNode) -> Result<StringConstraint, CompileError> {
    let pattern = match node.pattern() {
        Some(p) => Some(Regex::new(p)?),
        None => None,
    };
    Ok(StringConstraint::from_schema(
        node.min_length(),
        node.max_length(),
        pattern,
        node.format().map(str::to_string),
        None,
        default_for(node, PrimitiveType::String),
    ))
}

/// The declared `default`, attached to this particular type branch only when it
/// actually matches that branch's kind. A schema with split type inference
/// (e.g. `{"minimum": 0, "pattern": "..."}`) may carry a default that matches only
/// one of several inferred branches; `compile_node` has already checked the default
/// matches *some* type in the set before this runs, so a mismatch here just means
/// "not this branch" rather than an error.
fn default_for(node: &SchemaNode, ty: PrimitiveType) -> Option<Value> {
    node.default_value()
        .filter(|value| default_matches_type(value, ty))
        .cloned()
}

/// Whether a JSON literal is shaped like a valid default for primitive type `ty`,
/// used to validate `default` against the schema's own declared/inferred type:
/// an invalid default literal for the declared type is a compile error, not silently
/// accepted.
fn default_matches_type(value: &Value, ty: PrimitiveType) -> bool {
    match ty {
        PrimitiveType::Null => value.is_null(),
        PrimitiveType::Boolean => value.is_boolean(),
        PrimitiveType::Integer => value.as_f64().map_or(false, |v| v.fract() == 0.0),
        PrimitiveType::Number => value.is_number(),
        PrimitiveType::String => value.is_string(),
        PrimitiveType::Array => value.is_array(),
        PrimitiveType::Object => value.is_object(),
    }
}

fn compile_array(
    node: &SchemaNode,
    dialect: Dialect,
    pending: &mut Vec<String>,
) -> Result<ArrayConstraint, CompileError> {
    let items = match node.items() {
        Some(ItemsSpec::Homogeneous(schema)) => {
            Some(ItemsConstraint::Homogeneous(Box::new(compile(schema, dialect, pending)?)))
        }
        Some(ItemsSpec::Positional(schemas)) => {
            Some(ItemsConstraint::Positional(compile_each(schemas, dialect, pending)?))
        }
        None => None,
    };
    let additional_items = compile_extras_policy(node.additional_items(), dialect, pending)?;
    Ok(ArrayConstraint::from_schema(
        items,
        additional_items,
        node.min_items(),
        node.max_items(),
        node.unique_items(),
    ))
}

fn compile_object(
    node: &SchemaNode,
    dialect: Dialect,
    pending: &mut Vec<String>,
) -> Result<ObjectConstraint, CompileError> {
    let mut properties = Vec::new();
    if let Some(map) = node.properties() {
        for (name, schema) in map {
            properties.push((name.clone(), compile(schema, dialect, pending)?));
        }
    }

    let mut pattern_properties = Vec::new();
    if let Some(map) = node.pattern_properties() {
        for (pattern, schema) in map {
            pattern_properties.push((Regex::new(pattern)?, compile(schema, dialect, pending)?));
        }
    }

    let additional_properties = compile_extras_policy(node.additional_properties(), dialect, pending)?;
    let required = node.required().unwrap_or_default();

    let mut name_dependencies = Vec::new();
    let mut schema_dependencies = Vec::new();
    if let Some(map) = node.dependencies() {
        for (trigger, value) in map {
            match value {
                Value::Array(names) => {
                    let names = names
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect();
                    name_dependencies.push((trigger.clone(), names));
                }
                other => {
                    schema_dependencies.push((trigger.clone(), compile(other, dialect, pending)?));
                }
            }
        }
    }

    Ok(ObjectConstraint::from_schema(
        properties,
        pattern_properties,
        additional_properties,
        required,
        node.min_properties(),
        node.max_properties(),
        name_dependencies,
        schema_dependencies,
    ))
}

fn compile_extras_policy(
    value: Option<&Value>,
    dialect: Dialect,
    pending: &mut Vec<String>,
) -> Result<ExtrasPolicy, CompileError> {
    match value {
        None => Ok(ExtrasPolicy::Allow),
        Some(Value::Bool(true)) => Ok(ExtrasPolicy::Allow),
        Some(Value::Bool(false)) => Ok(ExtrasPolicy::Forbid),
        Some(schema) => Ok(ExtrasPolicy::Constrained(Box::new(compile(
            schema, dialect, pending,
        )?))),
    }
}
