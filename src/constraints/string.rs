use crate::error::{no_error, ErrorIterator, ValidationError};
use crate::format;
use crate::primitive_type::PrimitiveType;
use regex::Regex;
use serde_json::Value;

/// Validates `string` schemas. Lengths are Unicode code-point counts, not byte counts
/// `"héllo".len()` is 6 bytes but 5 chars, and schemas mean the latter.
#[derive(Debug, Clone, Default)]
pub struct StringConstraint {
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<Regex>,
    format: Option<String>,
    enum_values: Option<Vec<Value>>,
    default: Option<Value>,
}

impl StringConstraint {
    #[must_use]
    pub fn new() -> Self {
        StringConstraint::default()
    }

    #[must_use]
    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    #[must_use]
    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    #[must_use]
    pub fn pattern(mut self, regex: Regex) -> Self {
        self.pattern = Some(regex);
        self
    }

    #[must_use]
    pub fn format(mut self, name: impl Into<String>) -> Self {
        self.format = Some(name.into());
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
        min_length: Option<usize>,
        max_length: Option<usize>,
        pattern: Option<Regex>,
        format: Option<String>,
        enum_values: Option<Vec<Value>>,
        default: Option<Value>,
    ) -> Self {
        StringConstraint {
            min_length,
            max_length,
            pattern,
            format,
            enum_values,
            default,
        }
    }

    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    #[must_use]
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub(crate) fn validate<'a>(&self, instance: &'a Value) -> ErrorIterator<'a> {
        let value = match instance.as_str() {
            Some(s) => s,
            None => {
                return ValidationError::type_mismatch(instance.clone(), vec![PrimitiveType::String])
            }
        };

        let char_count = value.chars().count();
        if let Some(min) = self.min_length {
            if char_count < min {
                return ValidationError::min_length(value.to_string(), min);
            }
        }
        if let Some(max) = self.max_length {
            if char_count > max {
                return ValidationError::max_length(value.to_string(), max);
            }
        }
        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(value) {
                return ValidationError::pattern(value.to_string(), pattern.as_str().to_string());
            }
        }
        if let Some(fmt) = &self.format {
            if !format::check(fmt, value) {
                return ValidationError::format(value.to_string(), fmt.clone());
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
