//! The compiled, ready-to-validate form of a schema document.
use crate::compiler;
use crate::constraints::Constraint;
use crate::error::{CompileError, ErrorIterator};
use crate::options::CompileOptions;
use crate::resolver;
use crate::schema;
use serde_json::Value;
use std::collections::HashMap;

/// A compiled schema: a root constraint plus every constraint reachable from it
/// through a `$ref`, keyed by the reference string that named it.
///
/// The table is populated eagerly, right after compiling the root, and is never
/// mutated again — unlike the lazily-populated, lock-guarded reference cache this
/// design is adapted from, `get_reference` needs no interior mutability because
/// compilation finishes before the first `validate` call.
#[derive(Debug)]
pub struct RootContainer {
    root: Constraint,
    references: HashMap<String, Constraint>,
}

impl RootContainer {
    pub(crate) fn new(root: Constraint) -> Self {
        RootContainer {
            root,
            references: HashMap::new(),
        }
    }

    pub(crate) fn set_root(&mut self, root: Constraint) {
        self.root = root;
    }

    pub(crate) fn set_reference(&mut self, key: String, constraint: Constraint) {
        self.references.insert(key, constraint);
    }

    pub(crate) fn has_reference(&self, key: &str) -> bool {
        self.references.contains_key(key)
    }

    pub(crate) fn get_reference(&self, key: &str) -> Option<&Constraint> {
        self.references.get(key)
    }

    /// Compiles `schema` into a ready-to-validate `RootContainer`.
    ///
    /// Every `$ref` encountered while compiling the root, and transitively while
    /// compiling whatever those references point at, is resolved and compiled
    /// before this function returns. The root's own `#` pointer is pre-populated
    /// before that pass runs, so a schema that refers to itself terminates instead
    /// of looping.
    pub fn compile(document: &Value, options: Option<CompileOptions>) -> Result<RootContainer, CompileError> {
        let options = options.unwrap_or_default();
        let dialect = schema::resolve_dialect(document, options.dialect());
        let ref_context = options.ref_context().unwrap_or(document);

        let mut pending = Vec::new();
        let root_constraint = compiler::compile(document, dialect, &mut pending)?;

        let mut container = RootContainer::new(root_constraint.clone());
        container.set_reference("#".to_string(), root_constraint);

        while let Some(key) = pending.pop() {
            if container.has_reference(&key) {
                continue;
            }
            let target = resolver::resolve(ref_context, &key)
                .ok_or_else(|| CompileError::UnresolvableReference(key.clone()))?;
            let mut nested_pending = Vec::new();
            let compiled = compiler::compile(target, dialect, &mut nested_pending)?;
            container.set_reference(key, compiled);
            for next in nested_pending {
                if !container.has_reference(&next) {
                    pending.push(next);
                }
            }
        }

        Ok(container)
    }

    /// Validates `instance`, returning every error found. An empty result means
    /// the instance is valid.
    pub fn validate<'a>(&'a self, instance: &'a Value) -> ErrorIterator<'a> {
        self.root.validate(instance, self)
    }

    #[must_use]
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validate(instance).next().is_none()
    }

    /// The default side channel: every declared property absent from
    /// `instance` whose constraint carries a `default`, keyed by property name.
    /// Defaults are never applied to `instance` itself and play no part in
    /// `validate`'s outcome — this is a separate, explicit read.
    #[must_use]
    pub fn defaults(&self, instance: &Value) -> serde_json::Map<String, Value> {
        self.root.defaults(instance)
    }
}
