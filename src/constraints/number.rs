use crate::error::{no_error, ErrorIterator, ValidationError};
use crate::primitive_type::PrimitiveType;
use crate::schema::BoundMode;
use serde_json::Value;

/// Validates both `number` and `integer` schemas — the latter is the former plus one
/// extra precondition. `multiple_of: 0` disables the multiple-of check.
#[derive(Debug, Clone, Default)]
pub struct NumberConstraint {
    integer: bool,
    lower: Option<BoundMode>,
    upper: Option<BoundMode>,
    multiple_of: Option<f64>,
    enum_values: Option<Vec<Value>>,
    default: Option<Value>,
}

impl NumberConstraint {
    #[must_use]
    pub fn new() -> Self {
        NumberConstraint::default()
    }

    #[must_use]
    pub fn integer(mut self, integer: bool) -> Self {
        self.integer = integer;
        self
    }

    #[must_use]
    pub fn minimum(mut self, value: f64) -> Self {
        self.lower = Some(BoundMode::Inclusive(value));
        self
    }

    #[must_use]
    pub fn exclusive_minimum(mut self, value: f64) -> Self {
        self.lower = Some(BoundMode::Exclusive(value));
        self
    }

    #[must_use]
    pub fn maximum(mut self, value: f64) -> Self {
        self.upper = Some(BoundMode::Inclusive(value));
        self
    }

    #[must_use]
    pub fn exclusive_maximum(mut self, value: f64) -> Self {
        self.upper = Some(BoundMode::Exclusive(value));
        self
    }

    #[must_use]
    pub fn multiple_of(mut self, value: f64) -> Self {
        self.multiple_of = Some(value);
        self
    }

    #[must_use]
    pub fn enum_values(mut self, values: Vec<Value>) -> Self {
        self.enum_values = Some(values);
        self
    }

    #[must_use]
    pub fn default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub(crate) fn from_schema(
        integer: bool,
        lower: BoundMode,
        upper: BoundMode,
        multiple_of: Option<f64>,
        enum_values: Option<Vec<Value>>,
        default: Option<Value>,
    ) -> Self {
        NumberConstraint {
            integer,
            lower: if lower == BoundMode::None { None } else { Some(lower) },
            upper: if upper == BoundMode::None { None } else { Some(upper) },
            multiple_of,
            enum_values,
            default,
        }
    }

    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.integer
    }

    pub(crate) fn validate<'a>(&self, instance: &'a Value) -> ErrorIterator<'a> {
        let value = match instance.as_f64() {
            Some(v) => v,
            None => {
                let kind = if self.integer {
                    PrimitiveType::Integer
                } else {
                    PrimitiveType::Number
                };
                return ValidationError::type_mismatch(instance.clone(), vec![kind]);
            }
        };

        if self.integer && value.fract() != 0.0 {
            return ValidationError::not_an_integer(value);
        }

        // Comparisons are the mathematically correct direction for both bound sides;
        // the original Go source inverts the maximum check, which is not replicated here.
        match self.lower.unwrap_or(BoundMode::None) {
            BoundMode::Inclusive(min) if value < min => return ValidationError::minimum(value, min),
            BoundMode::Exclusive(min) if value <= min => {
                return ValidationError::exclusive_minimum(value, min)
            }
            _ => {}
        }
        match self.upper.unwrap_or(BoundMode::None) {
            BoundMode::Inclusive(max) if value > max => return ValidationError::maximum(value, max),
            BoundMode::Exclusive(max) if value >= max => {
                return ValidationError::exclusive_maximum(value, max)
            }
            _ => {}
        }

        if let Some(m) = self.multiple_of {
            if m != 0.0 && (value / m).fract().abs() > f64::EPSILON {
                return ValidationError::multiple_of(value, m);
            }
        }

        if let Some(values) = &self.enum_values {
            if !values.iter().any(|v| super::json_eq(v, instance)) {
                return ValidationError::enumeration(instance.clone(), values.clone());
            }
        }

        no_error()
    }
}
