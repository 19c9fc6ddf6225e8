use serde_json::Value;

/// The two JSON Schema vocabularies this crate understands.
///
/// The two dialects agree on almost every keyword; the one place they diverge
/// is how an exclusive numeric bound is spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Exclusive bounds are boolean flags sitting next to `minimum`/`maximum`
    /// (draft-4 shaped).
    Legacy,
    /// Exclusive bounds are their own numeric keywords, independent of
    /// `minimum`/`maximum` (draft-6/7 shaped).
    Modern,
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect::Modern
    }
}

const DRAFT4_URL: &str = "http://json-schema.org/draft-04/schema#";
const DRAFT6_URL: &str = "http://json-schema.org/draft-06/schema#";
const DRAFT7_URL: &str = "http://json-schema.org/draft-07/schema#";

/// Sniffs a dialect from a schema's `$schema` keyword, if present and recognised.
pub(crate) fn sniff(schema: &Value) -> Option<Dialect> {
    let url = schema.as_object()?.get("$schema")?.as_str()?;
    match url {
        DRAFT4_URL => Some(Dialect::Legacy),
        DRAFT6_URL | DRAFT7_URL => Some(Dialect::Modern),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!({"$schema": DRAFT4_URL}), Some(Dialect::Legacy))]
    #[test_case(json!({"$schema": DRAFT6_URL}), Some(Dialect::Modern))]
    #[test_case(json!({"$schema": DRAFT7_URL}), Some(Dialect::Modern))]
    #[test_case(json!({"$schema": "http://example.com/custom#"}), None)]
    #[test_case(json!({}), None)]
    fn sniffs_known_schema_urls(schema: Value, expected: Option<Dialect>) {
        assert_eq!(sniff(&schema), expected);
    }
}
