//! # schema-forge
//!
//! Compiles a JSON Schema document into an in-memory validator tree, then runs that
//! tree against arbitrary decoded JSON values. Compilation fuses a tagged-union
//! constraint algebra, a late-bound `$ref` resolver, and type inference for schemas
//! that omit `type`; validation is a pure, read-only tree walk that never mutates the
//! instance being checked.
//!
//! Two schema dialects are understood — `Dialect::Legacy` (draft-4 shaped, exclusive
//! bounds spelled as a boolean flag) and `Dialect::Modern` (draft-6/7 shaped, exclusive
//! bounds as their own numeric keyword) — auto-detected from `$schema` when not forced
//! through [`CompileOptions`].
//!
//! ## Example
//!
//! ```rust
//! use schema_forge::RootContainer;
//! use serde_json::json;
//!
//! let schema = json!({"type": "string", "maxLength": 5});
//! let instance = json!("foobar");
//! let compiled = RootContainer::compile(&schema, None).unwrap();
//! for error in compiled.validate(&instance) {
//!     println!("validation error: {}", error);
//! }
//! ```
#![warn(
    clippy::doc_markdown,
    clippy::redundant_closure,
    clippy::explicit_iter_loop,
    clippy::match_same_arms,
    clippy::needless_borrow,
    clippy::print_stdout,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications
)]
mod compiler;
mod constraints;
mod default;
mod dialect;
mod error;
mod format;
mod infer;
mod options;
mod primitive_type;
mod resolver;
mod root;
mod schema;

pub use constraints::{ArrayConstraint, Constraint, NumberConstraint, ObjectConstraint, StringConstraint};
pub use default::{Maybe, MaybeBool, MaybeFloat, MaybeInt, MaybeString, MaybeTime, MaybeUint};
pub use dialect::Dialect;
pub use error::{CompileError, ErrorIterator, PathChunk, ValidationError, ValidationErrorKind};
pub use options::CompileOptions;
pub use primitive_type::PrimitiveType;
pub use root::RootContainer;

use serde_json::Value;

/// Shortcut for compiling `schema` and validating `instance` against it in one call.
///
/// Draft/dialect is detected automatically from `$schema`, falling back to
/// [`Dialect::Modern`]. Panics if `schema` fails to compile — use
/// [`RootContainer::compile`] directly when a schema might be invalid.
/// ```rust
/// use schema_forge::is_valid;
/// use serde_json::json;
///
/// let schema = json!({"maxLength": 5});
/// assert!(is_valid(&schema, &json!("foo")));
/// assert!(!is_valid(&schema, &json!("foobar")));
/// ```
#[must_use]
pub fn is_valid(schema: &Value, instance: &Value) -> bool {
    let compiled = RootContainer::compile(schema, None).expect("invalid schema");
    compiled.is_valid(instance)
}
