//! The compiled constraint tree.
mod array;
mod combinators;
mod number;
mod object;
mod string;

pub use array::ArrayConstraint;
pub use number::NumberConstraint;
pub use object::ObjectConstraint;
pub use string::StringConstraint;

pub(crate) use array::ItemsConstraint;

use crate::default::{self, DefaultKind};
use crate::error::{no_error, ErrorIterator, ValidationError};
use crate::root::RootContainer;
use serde_json::Value;

/// A node in the compiled validator tree.
///
/// Closed over seven leaf shapes, four combinators and a late-bound reference — this
/// is a tagged union, not an open trait-object hierarchy, because the set of node
/// kinds is fixed by the data model and never extended by user code.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Matches anything. The identity element of `All`.
    Empty,
    Null,
    Boolean { default: Option<Value> },
    Number(NumberConstraint),
    String(StringConstraint),
    Array(Box<ArrayConstraint>),
    Object(Box<ObjectConstraint>),
    Enum(Vec<Value>),
    All(Vec<Constraint>),
    Any(Vec<Constraint>),
    OneOf(Vec<Constraint>),
    Not(Box<Constraint>),
    /// A key into the owning root container's reference table.
    Reference(String),
}

/// How a container handles members it doesn't otherwise have an opinion about:
/// extra array elements beyond the positional-items list, or object properties
/// matching neither a named property nor a pattern property.
#[derive(Debug, Clone)]
pub(crate) enum ExtrasPolicy {
    Allow,
    Forbid,
    Constrained(Box<Constraint>),
}

impl Constraint {
    pub fn validate<'a>(&'a self, instance: &'a Value, root: &'a RootContainer) -> ErrorIterator<'a> {
        match self {
            Constraint::Empty => no_error(),
            Constraint::Null => {
                if instance.is_null() {
                    no_error()
                } else {
                    ValidationError::type_mismatch(
                        instance.clone(),
                        vec![crate::primitive_type::PrimitiveType::Null],
                    )
                }
            }
            Constraint::Boolean { .. } => {
                if instance.is_boolean() {
                    no_error()
                } else {
                    ValidationError::type_mismatch(
                        instance.clone(),
                        vec![crate::primitive_type::PrimitiveType::Boolean],
                    )
                }
            }
            Constraint::Number(n) => n.validate(instance),
            Constraint::String(s) => s.validate(instance),
            Constraint::Array(a) => a.validate(instance, root),
            Constraint::Object(o) => o.validate(instance, root),
            Constraint::Enum(values) => {
                if values.iter().any(|v| json_eq(v, instance)) {
                    no_error()
                } else {
                    ValidationError::enumeration(instance.clone(), values.clone())
                }
            }
            Constraint::All(children) => combinators::validate_all(children, instance, root),
            Constraint::Any(children) => combinators::validate_any(children, instance, root),
            Constraint::OneOf(children) => combinators::validate_one_of(children, instance, root),
            Constraint::Not(child) => combinators::validate_not(child, instance, root),
            Constraint::Reference(key) => match root.get_reference(key) {
                Some(target) => target.validate(instance, root),
                None => ValidationError::unresolved_reference(key.clone()),
            },
        }
    }

    #[must_use]
    pub fn is_valid(&self, instance: &Value, root: &RootContainer) -> bool {
        self.validate(instance, root).next().is_none()
    }

    /// The declared `default`, if this node (or, for a type+enum `All`, one of its
    /// immediate children) carries one. Only `Boolean`/`Number`/`String` leaves hold
    /// a default.
    pub(crate) fn default_value(&self) -> Option<&Value> {
        match self {
            Constraint::Boolean { default } => default.as_ref(),
            Constraint::Number(n) => n.default_value(),
            Constraint::String(s) => s.default_value(),
            Constraint::All(children) => children.iter().find_map(Constraint::default_value),
            _ => None,
        }
    }

    /// The declared `default`, coerced through the `Maybe<T>` alias that matches this
    /// leaf's declared shape (see `default::coerce`) rather than handed back as the raw
    /// literal parsed out of the schema document.
    pub(crate) fn coerced_default(&self) -> Option<Value> {
        match self {
            Constraint::Boolean { default } => {
                default.as_ref().map(|raw| default::coerce(DefaultKind::Bool, raw))
            }
            Constraint::Number(n) => n.default_value().map(|raw| {
                let kind = if n.is_integer() { DefaultKind::Integer } else { DefaultKind::Float };
                default::coerce(kind, raw)
            }),
            Constraint::String(s) => s.default_value().map(|raw| {
                let kind = match s.format() {
                    Some("date-time") => DefaultKind::Time,
                    _ => DefaultKind::String,
                };
                default::coerce(kind, raw)
            }),
            Constraint::All(children) => children.iter().find_map(Constraint::coerced_default),
            _ => None,
        }
    }

    /// Dispatches the default side channel to the object leaf, which is the
    /// only constraint kind that owns named properties. Any other root constraint
    /// has nothing to surface, so it returns an empty map.
    pub(crate) fn defaults(&self, instance: &Value) -> serde_json::Map<String, Value> {
        match self {
            Constraint::Object(o) => o.defaults(instance),
            Constraint::All(children) => {
                let mut sink = serde_json::Map::new();
                for child in children {
                    sink.extend(child.defaults(instance));
                }
                sink
            }
            _ => serde_json::Map::new(),
        }
    }

    /// Collapses single-child combinators to their child and empty combinators to
    /// `Empty`. Applied bottom-up by the compiler.
    pub(crate) fn reduce(self) -> Constraint {
        match self {
            Constraint::All(mut children) if children.len() == 1 => children.remove(0),
            Constraint::All(children) if children.is_empty() => Constraint::Empty,
            Constraint::Any(mut children) if children.len() == 1 => children.remove(0),
            other => other,
        }
    }
}

/// JSON deep equality where numbers compare as floats, sidestepping `serde_json`'s
/// `Number` representation (`1` and `1.0` are distinct internally, but not to a schema).
pub(crate) fn json_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(a, b)| json_eq(a, b))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).map_or(false, |v2| json_eq(v, v2)))
        }
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_eq_treats_int_and_float_as_equal() {
        assert!(json_eq(&json!(1), &json!(1.0)));
    }

    #[test]
    fn json_eq_compares_objects_by_key_set() {
        assert!(json_eq(&json!({"a": 1, "b": 2}), &json!({"b": 2.0, "a": 1})));
        assert!(!json_eq(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
    }

    #[test]
    fn reduce_collapses_single_child_all() {
        let reduced = Constraint::All(vec![Constraint::Null]).reduce();
        assert!(matches!(reduced, Constraint::Null));
    }

    #[test]
    fn reduce_collapses_empty_all_to_empty() {
        let reduced = Constraint::All(vec![]).reduce();
        assert!(matches!(reduced, Constraint::Empty));
    }
}
