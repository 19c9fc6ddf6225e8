use super::{Constraint, ExtrasPolicy};
use crate::error::{no_error, prefix_errors, ErrorIterator, PathChunk, ValidationError};
use crate::primitive_type::PrimitiveType;
use crate::root::RootContainer;
use regex::Regex;
use serde_json::Value;

/// Validates `object` schemas: named properties, pattern properties applied
/// additively alongside them, and additional-property handling via `ExtrasPolicy`.
#[derive(Debug, Clone, Default)]
pub struct ObjectConstraint {
    properties: Vec<(String, Constraint)>,
    pattern_properties: Vec<(Regex, Constraint)>,
    additional_properties: ExtrasPolicy,
    required: Vec<String>,
    min_properties: Option<usize>,
    max_properties: Option<usize>,
    name_dependencies: Vec<(String, Vec<String>)>,
    schema_dependencies: Vec<(String, Constraint)>,
}

impl ObjectConstraint {
    #[must_use]
    pub fn new() -> Self {
        ObjectConstraint::default()
    }

    #[must_use]
    pub fn add_prop(mut self, name: impl Into<String>, constraint: Constraint) -> Self {
        self.properties.push((name.into(), constraint));
        self
    }

    #[must_use]
    pub fn pattern_property(mut self, pattern: Regex, constraint: Constraint) -> Self {
        self.pattern_properties.push((pattern, constraint));
        self
    }

    #[must_use]
    pub fn additional_properties(mut self, constraint: Constraint) -> Self {
        self.additional_properties = ExtrasPolicy::Constrained(Box::new(constraint));
        self
    }

    #[must_use]
    pub fn forbid_additional_properties(mut self) -> Self {
        self.additional_properties = ExtrasPolicy::Forbid;
        self
    }

    #[must_use]
    pub fn required(mut self, names: Vec<String>) -> Self {
        self.required = names;
        self
    }

    #[must_use]
    pub fn min_properties(mut self, n: usize) -> Self {
        self.min_properties = Some(n);
        self
    }

    #[must_use]
    pub fn max_properties(mut self, n: usize) -> Self {
        self.max_properties = Some(n);
        self
    }

    #[must_use]
    pub fn prop_dependency(mut self, trigger: impl Into<String>, deps: Vec<String>) -> Self {
        self.name_dependencies.push((trigger.into(), deps));
        self
    }

    #[must_use]
    pub fn schema_dependency(mut self, trigger: impl Into<String>, constraint: Constraint) -> Self {
        self.schema_dependencies.push((trigger.into(), constraint));
        self
    }

    pub(crate) fn from_schema(
        properties: Vec<(String, Constraint)>,
        pattern_properties: Vec<(Regex, Constraint)>,
        additional_properties: ExtrasPolicy,
        required: Vec<String>,
        min_properties: Option<usize>,
        max_properties: Option<usize>,
        name_dependencies: Vec<(String, Vec<String>)>,
        schema_dependencies: Vec<(String, Constraint)>,
    ) -> Self {
        ObjectConstraint {
            properties,
            pattern_properties,
            additional_properties,
            required,
            min_properties,
            max_properties,
            name_dependencies,
            schema_dependencies,
        }
    }

    /// The default side channel: for every declared property absent from
    /// `instance` whose constraint carries a `default`, the default lands in the
    /// returned map under that property's name, coerced through its `Maybe<T>` alias.
    /// Never consulted by `validate` — defaults play no part in the validation outcome.
    pub(crate) fn defaults(&self, instance: &Value) -> serde_json::Map<String, Value> {
        let mut sink = serde_json::Map::new();
        if let Some(members) = instance.as_object() {
            for (name, constraint) in &self.properties {
                if !members.contains_key(name) {
                    if let Some(default) = constraint.coerced_default() {
                        sink.insert(name.clone(), default);
                    }
                }
            }
        }
        sink
    }

    pub(crate) fn validate<'a>(
        &'a self,
        instance: &'a Value,
        root: &'a RootContainer,
    ) -> ErrorIterator<'a> {
        let members = match instance.as_object() {
            Some(v) => v,
            None => {
                return ValidationError::type_mismatch(instance.clone(), vec![PrimitiveType::Object])
            }
        };

        if let Some(min) = self.min_properties {
            if members.len() < min {
                return ValidationError::min_properties(instance.clone(), min);
            }
        }
        if let Some(max) = self.max_properties {
            if members.len() > max {
                return ValidationError::max_properties(instance.clone(), max);
            }
        }

        let mut errors = Vec::new();

        for name in &self.required {
            if !members.contains_key(name) {
                errors.extend(ValidationError::required(name.clone()).collect::<Vec<_>>());
            }
        }

        for (name, constraint) in &self.properties {
            if let Some(value) = members.get(name) {
                errors.extend(prefix_errors(
                    constraint.validate(value, root),
                    PathChunk::Property(name.clone()),
                ));
            }
        }

        for (pattern, constraint) in &self.pattern_properties {
            for (name, value) in members.iter() {
                if pattern.is_match(name) {
                    errors.extend(prefix_errors(
                        constraint.validate(value, root),
                        PathChunk::Property(name.clone()),
                    ));
                }
            }
        }

        let named: std::collections::HashSet<&str> =
            self.properties.iter().map(|(n, _)| n.as_str()).collect();
        for (name, value) in members.iter() {
            let covered_by_named = named.contains(name.as_str());
            let covered_by_pattern = self
                .pattern_properties
                .iter()
                .any(|(pattern, _)| pattern.is_match(name));
            if covered_by_named || covered_by_pattern {
                continue;
            }
            match &self.additional_properties {
                ExtrasPolicy::Allow => {}
                ExtrasPolicy::Forbid => {
                    errors.extend(
                        ValidationError::additional_property_forbidden(name.clone())
                            .collect::<Vec<_>>(),
                    );
                }
                ExtrasPolicy::Constrained(constraint) => {
                    errors.extend(prefix_errors(
                        constraint.validate(value, root),
                        PathChunk::Property(name.clone()),
                    ));
                }
            }
        }

        for (trigger, deps) in &self.name_dependencies {
            if members.contains_key(trigger) {
                for dep in deps {
                    if !members.contains_key(dep) {
                        errors.extend(
                            ValidationError::dependency(trigger.clone(), dep.clone())
                                .collect::<Vec<_>>(),
                        );
                    }
                }
            }
        }

        for (trigger, constraint) in &self.schema_dependencies {
            if members.contains_key(trigger) && !constraint.is_valid(instance, root) {
                errors.extend(
                    ValidationError::schema_dependency(trigger.clone()).collect::<Vec<_>>(),
                );
            }
        }

        if errors.is_empty() {
            no_error()
        } else {
            Box::new(errors.into_iter())
        }
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
    fn named_property_errors_carry_the_property_name() {
        let constraint = ObjectConstraint::new().add_prop(
            "age",
            Constraint::Number(crate::constraints::NumberConstraint::new().minimum(0.0)),
        );
        let root = root();
        let errors: Vec<_> = constraint.validate(&json!({"age": -1}), &root).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path(), &[PathChunk::Property("age".to_string())]);
    }

    #[test]
    fn required_property_missing_is_reported() {
        let constraint = ObjectConstraint::new().required(vec!["name".to_string()]);
        let root = root();
        assert!(constraint.validate(&json!({}), &root).next().is_some());
        assert!(constraint
            .validate(&json!({"name": "a"}), &root)
            .next()
            .is_none());
    }

    #[test]
    fn additional_properties_forbidden_flags_unnamed_members() {
        let constraint = ObjectConstraint::new()
            .add_prop("a", Constraint::Empty)
            .forbid_additional_properties();
        let root = root();
        assert!(constraint
            .validate(&json!({"a": 1}), &root)
            .next()
            .is_none());
        assert!(constraint
            .validate(&json!({"a": 1, "b": 2}), &root)
            .next()
            .is_some());
    }

    #[test]
    fn pattern_properties_apply_additively_with_named_properties() {
        let constraint = ObjectConstraint::new()
            .add_prop("a", Constraint::Null)
            .pattern_property(Regex::new("^x_").unwrap(), Constraint::Null)
            .forbid_additional_properties();
        let root = root();
        assert!(constraint
            .validate(&json!({"a": null, "x_foo": null}), &root)
            .next()
            .is_none());
        assert!(constraint
            .validate(&json!({"a": null, "x_foo": 1}), &root)
            .next()
            .is_some());
    }

    #[test]
    fn name_dependency_requires_the_dependent_property() {
        let constraint =
            ObjectConstraint::new().prop_dependency("credit_card", vec!["billing_address".to_string()]);
        let root = root();
        assert!(constraint
            .validate(&json!({"credit_card": "1234"}), &root)
            .next()
            .is_some());
        assert!(constraint
            .validate(
                &json!({"credit_card": "1234", "billing_address": "x"}),
                &root
            )
            .next()
            .is_none());
    }

    #[test]
    fn schema_dependency_validates_the_whole_object() {
        let constraint = ObjectConstraint::new().schema_dependency(
            "credit_card",
            Constraint::Object(Box::new(
                ObjectConstraint::new().required(vec!["billing_address".to_string()]),
            )),
        );
        let root = root();
        assert!(constraint
            .validate(&json!({"credit_card": "1234"}), &root)
            .next()
            .is_some());
        assert!(constraint
            .validate(
                &json!({"credit_card": "1234", "billing_address": "x"}),
                &root
            )
            .next()
            .is_none());
    }

    #[test]
    fn defaults_surfaces_absent_properties_declared_ones_only() {
        let constraint = ObjectConstraint::new()
            .add_prop(
                "name",
                Constraint::String(
                    crate::constraints::StringConstraint::new().default(json!("John Doe")),
                ),
            )
            .add_prop("age", Constraint::Number(crate::constraints::NumberConstraint::new()));

        let defaults = constraint.defaults(&json!({"age": 10}));
        assert_eq!(defaults.get("name"), Some(&json!("John Doe")));
        assert_eq!(defaults.get("age"), None);

        let defaults = constraint.defaults(&json!({"age": 10, "name": "Ada"}));
        assert!(defaults.is_empty());
    }
}
