use crate::dialect::Dialect;
use serde_json::Value;

/// Compile-time knobs, grounded in the teacher's `CompilationConfig`/`CompilationOptions`
/// split: a small `Clone + Debug + Default` struct callers build up with setters before
/// handing it to `compile`.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    dialect: Option<Dialect>,
    ref_context: Option<Value>,
}

impl CompileOptions {
    #[must_use]
    pub fn new() -> Self {
        CompileOptions::default()
    }

    /// Forces a dialect instead of sniffing `$schema` off the document.
    #[must_use]
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    /// The document `$ref` pointers are resolved against — the optional external
    /// context. Defaults to the schema being compiled itself when not set — most
    /// schemas only ever reference their own `definitions`.
    #[must_use]
    pub fn with_ref_context(mut self, context: Value) -> Self {
        self.ref_context = Some(context);
        self
    }

    pub(crate) fn dialect(&self) -> Option<Dialect> {
        self.dialect
    }

    pub(crate) fn ref_context(&self) -> Option<&Value> {
        self.ref_context.as_ref()
    }
}
