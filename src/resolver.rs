use serde_json::Value;

/// Resolves a `$ref` string against a document by JSON Pointer.
///
/// Only local fragments are understood (`#`, `#/definitions/uint`, ...); there is no
/// network fetch and no notion of an external document — that's a deliberate Non-goal.
pub(crate) fn resolve<'a>(document: &'a Value, reference: &str) -> Option<&'a Value> {
    let fragment = reference.strip_prefix('#').unwrap_or(reference);
    if fragment.is_empty() {
        Some(document)
    } else {
        document.pointer(fragment)
    }
}
