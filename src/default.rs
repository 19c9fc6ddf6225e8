//! The default-value side channel.
//!
//! A constraint that declares a `default` never mutates the instance being validated;
//! instead it writes the default into a caller-supplied `Maybe<T>` when the corresponding
//! property is absent. Modeled after the original source's family of `Maybe*` types,
//! collapsed here into one generic wrapper plus type aliases.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// A value that may or may not have been set. Never satisfies `required` on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Maybe<T> {
    value: Option<T>,
}

impl<T> Maybe<T> {
    #[must_use]
    pub fn new() -> Self {
        Maybe { value: None }
    }

    pub fn set(&mut self, value: T) {
        self.value = Some(value);
    }

    #[must_use]
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.value.is_some()
    }
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Maybe::new()
    }
}

/// A `bool` default that distinguishes "absent" from "explicitly `false`".
pub type MaybeBool = Maybe<bool>;
/// A floating-point default; coerces from any JSON number.
pub type MaybeFloat = Maybe<f64>;
/// A signed-integer default; coerces from a whole-valued JSON number.
pub type MaybeInt = Maybe<i64>;
/// An unsigned-integer default; coerces from a non-negative whole-valued JSON number.
pub type MaybeUint = Maybe<u64>;
/// A `String` default.
pub type MaybeString = Maybe<String>;
/// An RFC 3339 timestamp default, parsed from a JSON string.
pub type MaybeTime = Maybe<DateTime<Utc>>;

/// A `Maybe<T>` that knows how to coerce a raw default literal from a schema into `T`.
///
/// Numeric widening is allowed (an integer default for a `MaybeFloat` field, for example)
/// because JSON itself draws no line between the two; anything else is silently dropped
/// rather than treated as a validation failure, since a malformed default is a compile-time
/// concern (see `CompileError::InvalidDefault`), not something `write_default` should fail on.
pub(crate) trait WriteDefault {
    fn write_default(&mut self, value: &Value);
}

impl WriteDefault for MaybeBool {
    fn write_default(&mut self, value: &Value) {
        if let Some(b) = value.as_bool() {
            self.set(b);
        }
    }
}

impl WriteDefault for MaybeFloat {
    fn write_default(&mut self, value: &Value) {
        if let Some(f) = value.as_f64() {
            self.set(f);
        }
    }
}

impl WriteDefault for MaybeInt {
    fn write_default(&mut self, value: &Value) {
        if let Some(i) = value.as_i64() {
            self.set(i);
        } else if let Some(f) = value.as_f64() {
            if f.fract() == 0.0 {
                self.set(f as i64);
            }
        }
    }
}

impl WriteDefault for MaybeUint {
    fn write_default(&mut self, value: &Value) {
        if let Some(u) = value.as_u64() {
            self.set(u);
        }
    }
}

impl WriteDefault for MaybeString {
    fn write_default(&mut self, value: &Value) {
        if let Some(s) = value.as_str() {
            self.set(s.to_string());
        }
    }
}

impl WriteDefault for MaybeTime {
    fn write_default(&mut self, value: &Value) {
        if let Some(s) = value.as_str() {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                self.set(dt.with_timezone(&Utc));
            }
        }
    }
}

/// Which `Maybe<T>` alias a leaf constraint's default literal should round-trip
/// through before it's handed back out of the default side channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DefaultKind {
    Bool,
    Integer,
    Float,
    String,
    /// A `string` default under `format: "date-time"`.
    Time,
}

/// Coerces a raw default literal through the `Maybe<T>` alias matching `kind`, then back
/// to a `Value`. This is the one caller `WriteDefault` exists for: `ObjectConstraint::defaults`
/// hands every declared default through here rather than cloning the raw literal straight out
/// of the schema, so a `minimum`-bearing `integer` default and a `maxLength`-bearing `string`
/// default both come back in the shape their own `Maybe<T>` alias would produce.
///
/// Falls back to cloning `raw` untouched if coercion doesn't apply — `default_matches_type`
/// already rejected a default literal that couldn't possibly match its leaf's declared type
/// at compile time, so this only happens for literals outside any `Maybe<T>` alias's reach.
pub(crate) fn coerce(kind: DefaultKind, raw: &Value) -> Value {
    match kind {
        DefaultKind::Bool => {
            let mut m = MaybeBool::new();
            m.write_default(raw);
            m.value().map_or_else(|| raw.clone(), |b| Value::Bool(*b))
        }
        DefaultKind::Integer => {
            let mut m = MaybeInt::new();
            m.write_default(raw);
            m.value()
                .map_or_else(|| raw.clone(), |i| Value::Number((*i).into()))
        }
        DefaultKind::Float => {
            let mut m = MaybeFloat::new();
            m.write_default(raw);
            m.value().map_or_else(
                || raw.clone(),
                |f| serde_json::Number::from_f64(*f).map_or_else(|| raw.clone(), Value::Number),
            )
        }
        DefaultKind::String => {
            let mut m = MaybeString::new();
            m.write_default(raw);
            m.value().map_or_else(|| raw.clone(), |s| Value::String(s.clone()))
        }
        DefaultKind::Time => {
            let mut m = MaybeTime::new();
            m.write_default(raw);
            m.value()
                .map_or_else(|| raw.clone(), |dt| Value::String(dt.to_rfc3339()))
        }
    }
}
