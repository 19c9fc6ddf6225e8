use super::{json_eq, Constraint, ExtrasPolicy};
use crate::error::{no_error, prefix_errors, ErrorIterator, PathChunk, ValidationError};
use crate::primitive_type::PrimitiveType;
use crate::root::RootContainer;
use serde_json::Value;

/// The two shapes `items` compiles to: a single constraint applied to every
/// element, or a list applied positionally.
#[derive(Debug, Clone)]
pub(crate) enum ItemsConstraint {
    Homogeneous(Box<Constraint>),
    Positional(Vec<Constraint>),
}

#[derive(Debug, Clone, Default)]
pub struct ArrayConstraint {
    items: Option<ItemsConstraint>,
    additional_items: ExtrasPolicy,
    min_items: Option<usize>,
    max_items: Option<usize>,
    unique_items: bool,
}

impl Default for ExtrasPolicy {
    fn default() -> Self {
        ExtrasPolicy::Allow
    }
}

impl ArrayConstraint {
    #[must_use]
    pub fn new() -> Self {
        ArrayConstraint::default()
    }

    #[must_use]
    pub fn items(mut self, constraint: Constraint) -> Self {
        self.items = Some(ItemsConstraint::Homogeneous(Box::new(constraint)));
        self
    }

    #[must_use]
    pub fn positional_items(mut self, constraints: Vec<Constraint>) -> Self {
        self.items = Some(ItemsConstraint::Positional(constraints));
        self
    }

    #[must_use]
    pub fn additional_items(mut self, constraint: Constraint) -> Self {
        self.additional_items = ExtrasPolicy::Constrained(Box::new(constraint));
        self
    }

    #[must_use]
    pub fn forbid_additional_items(mut self) -> Self {
        self.additional_items = ExtrasPolicy::Forbid;
        self
    }

    #[must_use]
    pub fn min_items(mut self, n: usize) -> Self {
        self.min_items = Some(n);
        self
    }

    #[must_use]
    pub fn max_items(mut self, n: usize) -> Self {
        self.max_items = Some(n);
        self
    }

    #[must_use]
    pub fn unique_items(mut self, yes: bool) -> Self {
        self.unique_items = yes;
        self
    }

    pub(crate) fn from_schema(
        items: Option<ItemsConstraint>,
        additional_items: ExtrasPolicy,
        min_items: Option<usize>,
        max_items: Option<usize>,
        unique_items: bool,
    ) -> Self {
        ArrayConstraint {
            items,
            additional_items,
            min_items,
            max_items,
            unique_items,
        }
    }

    pub(crate) fn validate<'a>(
        &'a self,
        instance: &'a Value,
        root: &'a RootContainer,
    ) -> ErrorIterator<'a> {
        let elements = match instance.as_array() {
            Some(v) => v,
            None => return ValidationError::type_mismatch(instance.clone(), vec![PrimitiveType::Array]),
        };

        if let Some(min) = self.min_items {
            if elements.len() < min {
                return ValidationError::min_items(instance.clone(), min);
            }
        }
        if let Some(max) = self.max_items {
            if elements.len() > max {
                return ValidationError::max_items(instance.clone(), max);
            }
        }
        if self.unique_items && !all_distinct(elements) {
            return ValidationError::unique_items(instance.clone());
        }

        match &self.items {
            None => no_error(),
            Some(ItemsConstraint::Homogeneous(child)) => {
                let errors: Vec<_> = elements
                    .iter()
                    .enumerate()
                    .flat_map(|(i, item)| {
                        prefix_errors(child.validate(item, root), PathChunk::Index(i))
                    })
                    .collect();
                Box::new(errors.into_iter())
            }
            Some(ItemsConstraint::Positional(children)) => {
                let mut errors: Vec<_> = elements
                    .iter()
                    .zip(children.iter())
                    .enumerate()
                    .flat_map(|(i, (item, child))| {
                        prefix_errors(child.validate(item, root), PathChunk::Index(i))
                    })
                    .collect();

                let extras = &elements[children.len().min(elements.len())..];
                match &self.additional_items {
                    ExtrasPolicy::Allow => {}
                    ExtrasPolicy::Forbid => {
                        if !extras.is_empty() {
                            errors.extend(
                                ValidationError::additional_items(children.len()).collect::<Vec<_>>(),
                            );
                        }
                    }
                    ExtrasPolicy::Constrained(child) => {
                        errors.extend(extras.iter().enumerate().flat_map(|(j, item)| {
                            prefix_errors(
                                child.validate(item, root),
                                PathChunk::Index(children.len() + j),
                            )
                        }));
                    }
                }
                Box::new(errors.into_iter())
            }
        }
    }
}

fn all_distinct(elements: &[Value]) -> bool {
    for (i, a) in elements.iter().enumerate() {
        for b in &elements[i + 1..] {
            if json_eq(a, b) {
                return false;
            }
        }
    }
    true
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
    fn homogeneous_item_errors_carry_the_failing_index() {
        let constraint = ArrayConstraint::new().items(Constraint::Number(
            crate::constraints::NumberConstraint::new().minimum(0.0),
        ));
        let root = root();
        let errors: Vec<_> = constraint.validate(&json!([0, -1, -2]), &root).collect();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].path(), &[PathChunk::Index(1)]);
        assert_eq!(errors[1].path(), &[PathChunk::Index(2)]);
    }

    #[test]
    fn homogeneous_items_apply_to_every_element() {
        let constraint = ArrayConstraint::new().items(Constraint::Number(
            crate::constraints::NumberConstraint::new().minimum(0.0),
        ));
        let root = root();
        assert!(constraint
            .validate(&json!([0, 1, 2]), &root)
            .next()
            .is_none());
        let errors: Vec<_> = constraint.validate(&json!([-1]), &root).collect();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn positional_items_reject_extras_when_additional_items_forbidden() {
        let constraint = ArrayConstraint::new()
            .positional_items(vec![Constraint::Empty; 3])
            .forbid_additional_items();
        let root = root();
        assert!(constraint
            .validate(&json!([1, 2, 3]), &root)
            .next()
            .is_none());
        assert!(constraint
            .validate(&json!([1, 2, 3, 4]), &root)
            .next()
            .is_some());
    }

    #[test]
    fn positional_items_allow_extras_by_default() {
        let constraint = ArrayConstraint::new().positional_items(vec![Constraint::Empty]);
        let root = root();
        assert!(constraint
            .validate(&json!([1, 2, 3]), &root)
            .next()
            .is_none());
    }

    #[test]
    fn unique_items_uses_deep_equality_across_number_representations() {
        let constraint = ArrayConstraint::new().unique_items(true);
        let root = root();
        assert!(constraint
            .validate(&json!([1, 1.0]), &root)
            .next()
            .is_some());
    }
}
