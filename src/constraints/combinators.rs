//! Semantics for the four composition combinators.
use super::Constraint;
use crate::error::{no_error, ErrorIterator, ValidationError};
use crate::root::RootContainer;
use serde_json::Value;

pub(super) fn validate_all<'a>(
    children: &'a [Constraint],
    instance: &'a Value,
    root: &'a RootContainer,
) -> ErrorIterator<'a> {
    for child in children {
        let errors: Vec<_> = child.validate(instance, root).collect();
        if !errors.is_empty() {
            return Box::new(errors.into_iter());
        }
    }
    no_error()
}

pub(super) fn validate_any<'a>(
    children: &'a [Constraint],
    instance: &'a Value,
    root: &'a RootContainer,
) -> ErrorIterator<'a> {
    for child in children {
        if child.is_valid(instance, root) {
            return no_error();
        }
    }
    ValidationError::any_of(instance.clone())
}

pub(super) fn validate_one_of<'a>(
    children: &'a [Constraint],
    instance: &'a Value,
    root: &'a RootContainer,
) -> ErrorIterator<'a> {
    let valid_count = children.iter().filter(|c| c.is_valid(instance, root)).count();
    match valid_count {
        1 => no_error(),
        0 => ValidationError::one_of_not_valid(instance.clone()),
        _ => ValidationError::one_of_multiple_valid(instance.clone()),
    }
}

pub(super) fn validate_not<'a>(
    child: &'a Constraint,
    instance: &'a Value,
    root: &'a RootContainer,
) -> ErrorIterator<'a> {
    if child.is_valid(instance, root) {
        ValidationError::not(instance.clone())
    } else {
        no_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::root::RootContainer;
    use serde_json::json;

    fn root() -> RootContainer {
        RootContainer::new(Constraint::Empty)
    }

    #[test]
    fn all_short_circuits_on_first_failing_child() {
        let root = root();
        let children = vec![Constraint::Null, Constraint::Null];
        let errors: Vec<_> = validate_all(&children, &json!(1), &root).collect();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn one_of_fails_when_more_than_one_child_matches() {
        let root = root();
        let children = vec![Constraint::Empty, Constraint::Empty];
        let errors: Vec<_> = validate_one_of(&children, &json!(1), &root).collect();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn not_passes_only_when_child_fails() {
        let root = root();
        let errors: Vec<_> = validate_not(&Constraint::Null, &json!(1), &root).collect();
        assert!(errors.is_empty());
        let errors: Vec<_> = validate_not(&Constraint::Null, &json!(null), &root).collect();
        assert_eq!(errors.len(), 1);
    }
}
