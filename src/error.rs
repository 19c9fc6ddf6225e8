use crate::primitive_type::PrimitiveType;
use serde_json::Value;
use std::iter::{empty, once};
use std::{error, fmt};

/// Errors that can occur while compiling a schema into a constraint tree.
///
/// Fatal: a partially built tree is never handed back to the caller.
#[derive(Debug)]
pub enum CompileError {
    /// The document handed to `parse_schema` is not an object or boolean.
    NotASchema(Value),
    /// `default` is present but doesn't match any of the schema's own declared or
    /// inferred types, e.g. a string default on an `integer` schema.
    InvalidDefault { expected: Vec<PrimitiveType>, value: Value },
    /// `pattern`/`patternProperties` contained an invalid regex.
    InvalidRegex(regex::Error),
    /// `$ref` could not be resolved against the root document.
    UnresolvableReference(String),
}

impl From<regex::Error> for CompileError {
    fn from(err: regex::Error) -> Self {
        CompileError::InvalidRegex(err)
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::NotASchema(value) => {
                write!(f, "'{}' is not a valid schema", value)
            }
            CompileError::InvalidDefault { expected, value } => write!(
                f,
                "'{}' is not a valid default for type {}",
                value,
                expected.iter().map(|t| format!("'{}'", t)).collect::<Vec<_>>().join(", ")
            ),
            CompileError::InvalidRegex(err) => write!(f, "invalid regex: {}", err),
            CompileError::UnresolvableReference(reference) => {
                write!(f, "unresolvable reference: {}", reference)
            }
        }
    }
}

impl error::Error for CompileError {}

/// One step of the breadcrumb trail attached to a `ValidationError` as it unwinds
/// through array/object containers: which property or index the failure came from.
#[derive(Debug, Clone, PartialEq)]
pub enum PathChunk {
    /// An object property name.
    Property(String),
    /// An array index.
    Index(usize),
}

impl fmt::Display for PathChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathChunk::Property(name) => write!(f, "/{}", name),
            PathChunk::Index(index) => write!(f, "/{}", index),
        }
    }
}

/// An error produced while validating an instance against a compiled constraint.
///
/// `path` is the breadcrumb trail from the root instance to the value that actually
/// failed, built up one chunk at a time as the error unwinds out of each array/object
/// container it passes through (outermost container first).
#[derive(Debug)]
pub struct ValidationError {
    kind: ValidationErrorKind,
    path: Vec<PathChunk>,
}

impl ValidationError {
    /// The breadcrumb trail to the failing value, root first.
    #[must_use]
    pub fn path(&self) -> &[PathChunk] {
        &self.path
    }

    /// Prepends `chunk` to this error's path — called by the container that is about
    /// to return this error to its own caller, so the trail reads outermost-first.
    pub(crate) fn with_prefix(mut self, chunk: PathChunk) -> Self {
        self.path.insert(0, chunk);
        self
    }
}

/// The result of validating an instance: an empty iterator means it's valid.
pub type ErrorIterator<'a> = Box<dyn Iterator<Item = ValidationError> + 'a>;

// Empty iterator means no error happened.
pub(crate) fn no_error<'a>() -> ErrorIterator<'a> {
    Box::new(empty())
}
// A wrapper for exactly one error.
pub(crate) fn error<'a>(instance: ValidationError) -> ErrorIterator<'a> {
    Box::new(once(instance))
}

/// Prepends `chunk` to the path of every error `errors` yields — used by array/object
/// constraints to attach the index/property name a child's errors were found under.
pub(crate) fn prefix_errors<'a>(errors: ErrorIterator<'a>, chunk: PathChunk) -> ErrorIterator<'a> {
    Box::new(errors.map(move |e| e.with_prefix(chunk.clone())))
}

/// Kinds of errors that may happen during validation.
#[derive(Debug)]
pub enum ValidationErrorKind {
    /// The instance doesn't match any of the (possibly inferred) accepted types.
    Type { instance: Value, types: Vec<PrimitiveType> },
    /// Value is too small for an inclusive lower bound.
    Minimum { instance: f64, limit: f64 },
    /// Value is too large for an inclusive upper bound.
    Maximum { instance: f64, limit: f64 },
    /// Value is at or below an exclusive lower bound.
    ExclusiveMinimum { instance: f64, limit: f64 },
    /// Value is at or above an exclusive upper bound.
    ExclusiveMaximum { instance: f64, limit: f64 },
    /// Value is not a multiple of the declared step.
    MultipleOf { instance: f64, multiple_of: f64 },
    /// An `integer` constraint was given a non-integral number.
    NotAnInteger(f64),
    /// String has fewer code points than `minLength`.
    MinLength { instance: String, limit: usize },
    /// String has more code points than `maxLength`.
    MaxLength { instance: String, limit: usize },
    /// String doesn't match `pattern`.
    Pattern { instance: String, pattern: String },
    /// String doesn't satisfy a named format.
    Format { instance: String, format: String },
    /// Array has fewer elements than `minItems`.
    MinItems { instance: Value, limit: usize },
    /// Array has more elements than `maxItems`.
    MaxItems { instance: Value, limit: usize },
    /// Array elements are not pairwise distinct under `uniqueItems`.
    UniqueItems(Value),
    /// Array has more elements than the positional-items list allows and
    /// `additionalItems` forbids extras.
    AdditionalItems { limit: usize },
    /// A required property is missing.
    Required(String),
    /// An object property is present that `additionalProperties: false` forbids.
    AdditionalPropertyForbidden(String),
    /// Object has fewer members than `minProperties`.
    MinProperties { instance: Value, limit: usize },
    /// Object has more members than `maxProperties`.
    MaxProperties { instance: Value, limit: usize },
    /// A name dependency's trigger property is present but a dependent is missing.
    Dependency { property: String, missing: String },
    /// A schema dependency's trigger property is present and the attached schema failed.
    SchemaDependency { property: String },
    /// The instance doesn't equal any enum member.
    Enum { instance: Value, options: Vec<Value> },
    /// No `anyOf` child accepted the instance.
    AnyOf(Value),
    /// No `oneOf` child accepted the instance.
    OneOfNotValid(Value),
    /// More than one `oneOf` child accepted the instance.
    OneOfMultipleValid(Value),
    /// `not`'s child accepted the instance.
    Not(Value),
    /// A reference failed to resolve at validation time; indicates a compiler bug,
    /// since every reference key is populated in the table before compilation returns.
    UnresolvedReference(String),
}

impl ValidationError {
    #[must_use]
    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }

    pub(crate) fn type_mismatch<'a>(instance: Value, types: Vec<PrimitiveType>) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::Type { instance, types },
            path: Vec::new(),
        })
    }
    pub(crate) fn minimum<'a>(instance: f64, limit: f64) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::Minimum { instance, limit },
            path: Vec::new(),
        })
    }
    pub(crate) fn maximum<'a>(instance: f64, limit: f64) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::Maximum { instance, limit },
            path: Vec::new(),
        })
    }
    pub(crate) fn exclusive_minimum<'a>(instance: f64, limit: f64) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::ExclusiveMinimum { instance, limit },
            path: Vec::new(),
        })
    }
    pub(crate) fn exclusive_maximum<'a>(instance: f64, limit: f64) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::ExclusiveMaximum { instance, limit },
            path: Vec::new(),
        })
    }
    pub(crate) fn multiple_of<'a>(instance: f64, multiple_of: f64) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::MultipleOf { instance, multiple_of },
            path: Vec::new(),
        })
    }
    pub(crate) fn not_an_integer<'a>(instance: f64) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::NotAnInteger(instance),
            path: Vec::new(),
        })
    }
    pub(crate) fn min_length<'a>(instance: String, limit: usize) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::MinLength { instance, limit },
            path: Vec::new(),
        })
    }
    pub(crate) fn max_length<'a>(instance: String, limit: usize) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::MaxLength { instance, limit },
            path: Vec::new(),
        })
    }
    pub(crate) fn pattern<'a>(instance: String, pattern: String) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::Pattern { instance, pattern },
            path: Vec::new(),
        })
    }
    pub(crate) fn format<'a>(instance: String, format: String) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::Format { instance, format },
            path: Vec::new(),
        })
    }
    pub(crate) fn min_items<'a>(instance: Value, limit: usize) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::MinItems { instance, limit },
            path: Vec::new(),
        })
    }
    pub(crate) fn max_items<'a>(instance: Value, limit: usize) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::MaxItems { instance, limit },
            path: Vec::new(),
        })
    }
    pub(crate) fn unique_items<'a>(instance: Value) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::UniqueItems(instance),
            path: Vec::new(),
        })
    }
    pub(crate) fn additional_items<'a>(limit: usize) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::AdditionalItems { limit },
            path: Vec::new(),
        })
    }
    pub(crate) fn required<'a>(property: String) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::Required(property),
            path: Vec::new(),
        })
    }
    pub(crate) fn additional_property_forbidden<'a>(property: String) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::AdditionalPropertyForbidden(property),
            path: Vec::new(),
        })
    }
    pub(crate) fn min_properties<'a>(instance: Value, limit: usize) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::MinProperties { instance, limit },
            path: Vec::new(),
        })
    }
    pub(crate) fn max_properties<'a>(instance: Value, limit: usize) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::MaxProperties { instance, limit },
            path: Vec::new(),
        })
    }
    pub(crate) fn dependency<'a>(property: String, missing: String) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::Dependency { property, missing },
            path: Vec::new(),
        })
    }
    pub(crate) fn schema_dependency<'a>(property: String) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::SchemaDependency { property },
            path: Vec::new(),
        })
    }
    pub(crate) fn enumeration<'a>(instance: Value, options: Vec<Value>) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::Enum { instance, options },
            path: Vec::new(),
        })
    }
    pub(crate) fn any_of<'a>(instance: Value) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::AnyOf(instance),
            path: Vec::new(),
        })
    }
    pub(crate) fn one_of_not_valid<'a>(instance: Value) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::OneOfNotValid(instance),
            path: Vec::new(),
        })
    }
    pub(crate) fn one_of_multiple_valid<'a>(instance: Value) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::OneOfMultipleValid(instance),
            path: Vec::new(),
        })
    }
    pub(crate) fn not<'a>(instance: Value) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::Not(instance),
            path: Vec::new(),
        })
    }
    pub(crate) fn unresolved_reference<'a>(key: String) -> ErrorIterator<'a> {
        error(ValidationError {
            kind: ValidationErrorKind::UnresolvedReference(key),
            path: Vec::new(),
        })
    }
}

impl error::Error for ValidationError {}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.path.is_empty() {
            write!(f, "at ")?;
            for chunk in &self.path {
                write!(f, "{}", chunk)?;
            }
            write!(f, ": ")?;
        }
        match &self.kind {
            ValidationErrorKind::Type { instance, types } => write!(
                f,
                "'{}' is not of type {}",
                instance,
                types
                    .iter()
                    .map(|t| format!("'{}'", t))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            ValidationErrorKind::Minimum { instance, limit } => {
                write!(f, "{} is less than the minimum of {}", instance, limit)
            }
            ValidationErrorKind::Maximum { instance, limit } => {
                write!(f, "{} is greater than the maximum of {}", instance, limit)
            }
            ValidationErrorKind::ExclusiveMinimum { instance, limit } => write!(
                f,
                "{} is less than or equal to the exclusive minimum of {}",
                instance, limit
            ),
            ValidationErrorKind::ExclusiveMaximum { instance, limit } => write!(
                f,
                "{} is greater than or equal to the exclusive maximum of {}",
                instance, limit
            ),
            ValidationErrorKind::MultipleOf { instance, multiple_of } => {
                write!(f, "{} is not a multiple of {}", instance, multiple_of)
            }
            ValidationErrorKind::NotAnInteger(instance) => {
                write!(f, "{} is not an integer", instance)
            }
            ValidationErrorKind::MinLength { instance, limit } => write!(
                f,
                "'{}' is shorter than the minimum length of {}",
                instance, limit
            ),
            ValidationErrorKind::MaxLength { instance, limit } => write!(
                f,
                "'{}' is longer than the maximum length of {}",
                instance, limit
            ),
            ValidationErrorKind::Pattern { instance, pattern } => {
                write!(f, "'{}' does not match '{}'", instance, pattern)
            }
            ValidationErrorKind::Format { instance, format } => {
                write!(f, "'{}' is not a valid '{}'", instance, format)
            }
            ValidationErrorKind::MinItems { instance, limit } => write!(
                f,
                "{} has fewer than the minimum of {} items",
                instance, limit
            ),
            ValidationErrorKind::MaxItems { instance, limit } => write!(
                f,
                "{} has more than the maximum of {} items",
                instance, limit
            ),
            ValidationErrorKind::UniqueItems(instance) => {
                write!(f, "{} has non-unique elements", instance)
            }
            ValidationErrorKind::AdditionalItems { limit } => write!(
                f,
                "additional items are not allowed beyond position {}",
                limit
            ),
            ValidationErrorKind::Required(property) => {
                write!(f, "'{}' is a required property", property)
            }
            ValidationErrorKind::AdditionalPropertyForbidden(property) => {
                write!(f, "additional property '{}' is not allowed", property)
            }
            ValidationErrorKind::MinProperties { instance, limit } => write!(
                f,
                "{} has fewer than the minimum of {} properties",
                instance, limit
            ),
            ValidationErrorKind::MaxProperties { instance, limit } => write!(
                f,
                "{} has more than the maximum of {} properties",
                instance, limit
            ),
            ValidationErrorKind::Dependency { property, missing } => write!(
                f,
                "'{}' requires '{}' to also be present",
                property, missing
            ),
            ValidationErrorKind::SchemaDependency { property } => write!(
                f,
                "the schema dependency triggered by '{}' was not satisfied",
                property
            ),
            ValidationErrorKind::Enum { instance, options } => write!(
                f,
                "'{}' is not one of {:?}",
                instance, options
            ),
            ValidationErrorKind::AnyOf(instance) => write!(
                f,
                "'{}' is not valid under any of the given schemas",
                instance
            ),
            ValidationErrorKind::OneOfNotValid(instance) => write!(
                f,
                "'{}' is not valid under any of the given schemas",
                instance
            ),
            ValidationErrorKind::OneOfMultipleValid(instance) => write!(
                f,
                "'{}' is valid under more than one of the given schemas",
                instance
            ),
            ValidationErrorKind::Not(instance) => {
                write!(f, "'{}' should not be valid under 'not'", instance)
            }
            ValidationErrorKind::UnresolvedReference(key) => {
                write!(f, "internal error: unresolved reference '{}'", key)
            }
        }
    }
}
