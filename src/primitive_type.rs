use std::{convert::TryFrom, fmt};

/// One of the seven primitive JSON types a constraint tree can match against.
///
/// Kept as an enum rather than matching on strings so that inference and error
/// reporting can compare and sort type tags cheaply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimitiveType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl PrimitiveType {
    /// All seven tags in their canonical (alphabetical) order.
    pub(crate) const ALL: [PrimitiveType; 7] = [
        PrimitiveType::Array,
        PrimitiveType::Boolean,
        PrimitiveType::Integer,
        PrimitiveType::Null,
        PrimitiveType::Number,
        PrimitiveType::Object,
        PrimitiveType::String,
    ];
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveType::Array => write!(f, "array"),
            PrimitiveType::Boolean => write!(f, "boolean"),
            PrimitiveType::Integer => write!(f, "integer"),
            PrimitiveType::Null => write!(f, "null"),
            PrimitiveType::Number => write!(f, "number"),
            PrimitiveType::Object => write!(f, "object"),
            PrimitiveType::String => write!(f, "string"),
        }
    }
}

impl TryFrom<&str> for PrimitiveType {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "array" => Ok(PrimitiveType::Array),
            "boolean" => Ok(PrimitiveType::Boolean),
            "integer" => Ok(PrimitiveType::Integer),
            "null" => Ok(PrimitiveType::Null),
            "number" => Ok(PrimitiveType::Number),
            "object" => Ok(PrimitiveType::Object),
            "string" => Ok(PrimitiveType::String),
            _ => Err(()),
        }
    }
}

/// Sorts and de-duplicates a type list into canonical order.
pub(crate) fn canonicalize(mut types: Vec<PrimitiveType>) -> Vec<PrimitiveType> {
    types.sort_unstable();
    types.dedup();
    types
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips_through_try_from() {
        for ty in PrimitiveType::ALL.iter() {
            let rendered = ty.to_string();
            assert_eq!(PrimitiveType::try_from(rendered.as_str()).unwrap(), *ty);
        }
    }

    #[test]
    fn canonicalize_sorts_and_dedups() {
        let types = vec![
            PrimitiveType::String,
            PrimitiveType::Integer,
            PrimitiveType::String,
        ];
        assert_eq!(
            canonicalize(types),
            vec![PrimitiveType::Integer, PrimitiveType::String]
        );
    }
}
