//! Step and document validation.
//!
//! Three tiers:
//!
//! 1. **Shape** — the incoming step payload against its permissive schema.
//!    Runs on every save; a failure aborts the save before any mutation.
//! 2. **Conditional requirements** — fields that are mandatory only when
//!    their visibility conditions hold. A hidden field is never required;
//!    visibility and requirement share the same rule evaluation so the two
//!    can never disagree.
//! 3. **Completeness** — invoked only by `submit`: walks every visible
//!    step's requirements across the whole document and accumulates ALL
//!    violations into one list before failing.

use serde_json::{Map, Value};

use crate::descriptor::DocumentDescriptor;
use crate::error::{DocError, DocResult};
use crate::model::Document;
use crate::requirement::{is_present, RequiredFields, RequirementRule};
use crate::visibility::VisibilityRuleSet;

/// Tier 1: shape-check a step payload. The stored document must not be
/// touched if this fails.
pub fn validate_shape(
    descriptor: &DocumentDescriptor,
    step: u32,
    payload: &Map<String, Value>,
) -> DocResult<()> {
    let schema = descriptor
        .schema_for(step)
        .ok_or_else(|| DocError::validation(format!("unknown step {}", step)))?;

    let violations = schema.check(payload);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(DocError::Validation(violations))
    }
}

/// Tier 2: evaluate one step's conditional requirements against a snapshot.
/// Returns human-readable violations; empty means the step is complete.
/// Not a save gate — drafts save incomplete work — but exposed so the
/// presentation layer can show what is still missing on a page.
pub fn check_step_requirements(
    descriptor: &DocumentDescriptor,
    step: u32,
    snapshot: &Map<String, Value>,
) -> Vec<String> {
    let mut violations = Vec::new();
    for rule in descriptor.requirements_for(step) {
        check_rule(rule, &descriptor.visibility, snapshot, &mut violations);
    }
    violations
}

fn check_rule(
    rule: &RequirementRule,
    visibility: &VisibilityRuleSet,
    snapshot: &Map<String, Value>,
    violations: &mut Vec<String>,
) {
    if !rule.applies(snapshot) {
        return;
    }

    match &rule.required {
        RequiredFields::Each(fields) => {
            for field in fields {
                // A field the user cannot see is never required
                if !visibility.is_visible(field, snapshot) {
                    continue;
                }
                if !is_present(snapshot, field) {
                    violations.push(format!("field '{}' is required", field));
                }
            }
        }
        RequiredFields::Group { name, fields } => {
            let visible: Vec<&str> = fields
                .iter()
                .copied()
                .filter(|f| visibility.is_visible(f, snapshot))
                .collect();
            let present = visible
                .iter()
                .filter(|f| is_present(snapshot, f))
                .count();
            // Atomic: all-or-nothing across the visible members
            if present > 0 && present < visible.len() {
                violations.push(format!(
                    "{} is incomplete: {} must all be provided together",
                    name,
                    visible.join(", ")
                ));
            }
        }
    }
}

/// Tier 3: full-document completeness, the submit gate.
///
/// Walks every visible step and accumulates every violation so the caller
/// can report all missing requirements at once.
pub fn validate_completeness(descriptor: &DocumentDescriptor, document: &Document) -> DocResult<()> {
    let snapshot = document.snapshot();
    let mut violations = Vec::new();

    for step in 1..=descriptor.total_steps {
        if !descriptor.is_step_visible(step, &snapshot) {
            continue;
        }
        for rule in descriptor.requirements_for(step) {
            check_rule(rule, &descriptor.visibility, &snapshot, &mut violations);
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(DocError::Validation(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{Condition, ConditionOperator};
    use crate::visibility::VisibilityRule;
    use serde_json::json;

    fn snapshot(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn checked(field: &str) -> Condition {
        Condition::new(field, ConditionOperator::Checked, Value::Null)
    }

    #[test]
    fn test_hidden_field_never_required() {
        // ssn is required when person, but only ever visible when person
        let visibility = VisibilityRuleSet::new().rule(
            "ssn",
            VisibilityRule::show_when(vec![Condition::new(
                "person_entity",
                ConditionOperator::Equals,
                json!("Person"),
            )]),
        );
        let rule = RequirementRule::always(1, vec!["ssn"]);

        let entity_snap = snapshot(&[("person_entity", json!("Entity"))]);
        let mut violations = Vec::new();
        check_rule(&rule, &visibility, &entity_snap, &mut violations);
        assert!(violations.is_empty());

        let person_snap = snapshot(&[("person_entity", json!("Person"))]);
        let mut violations = Vec::new();
        check_rule(&rule, &visibility, &person_snap, &mut violations);
        assert_eq!(violations, vec!["field 'ssn' is required".to_string()]);
    }

    #[test]
    fn test_group_partial_is_single_violation() {
        let visibility = VisibilityRuleSet::new();
        let rule = RequirementRule::group(
            1,
            vec![checked("has_joint_owner")],
            "joint owner signature set",
            vec![
                "joint_owner_signature",
                "joint_owner_printed_name",
                "joint_owner_signature_date",
            ],
        );

        let snap = snapshot(&[
            ("has_joint_owner", json!(true)),
            ("joint_owner_signature", json!("J. Doe")),
        ]);
        let mut violations = Vec::new();
        check_rule(&rule, &visibility, &snap, &mut violations);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("joint owner signature set"));
    }

    #[test]
    fn test_group_all_present_or_all_absent_is_fine() {
        let visibility = VisibilityRuleSet::new();
        let rule = RequirementRule::group(
            1,
            vec![checked("has_joint_owner")],
            "joint owner signature set",
            vec![
                "joint_owner_signature",
                "joint_owner_printed_name",
                "joint_owner_signature_date",
            ],
        );

        let all = snapshot(&[
            ("has_joint_owner", json!(true)),
            ("joint_owner_signature", json!("J. Doe")),
            ("joint_owner_printed_name", json!("Jane Doe")),
            ("joint_owner_signature_date", json!("2024-03-01")),
        ]);
        let mut violations = Vec::new();
        check_rule(&rule, &visibility, &all, &mut violations);
        assert!(violations.is_empty());

        let none = snapshot(&[("has_joint_owner", json!(true))]);
        let mut violations = Vec::new();
        check_rule(&rule, &visibility, &none, &mut violations);
        assert!(violations.is_empty());
    }

    #[test]
    fn test_group_gate_not_applied_when_unchecked() {
        let visibility = VisibilityRuleSet::new();
        let rule = RequirementRule::group(
            1,
            vec![checked("has_joint_owner")],
            "joint owner signature set",
            vec!["joint_owner_signature", "joint_owner_printed_name"],
        );

        let snap = snapshot(&[("joint_owner_signature", json!("stray value"))]);
        let mut violations = Vec::new();
        check_rule(&rule, &visibility, &snap, &mut violations);
        assert!(violations.is_empty());
    }
}
