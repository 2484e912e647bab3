//! Conditional requirement rules.
//!
//! Independent of the shape schemas, these rules say which fields become
//! mandatory at submit time, and under what conditions. Like visibility
//! rules they are data owned by the document-type descriptor and evaluated
//! by one interpreter.

use serde_json::{Map, Value};

use crate::condition::{evaluate_all, Condition};

/// What a rule requires once its conditions hold.
#[derive(Debug, Clone)]
pub enum RequiredFields {
    /// Each listed field must be present; every missing one is its own
    /// violation.
    Each(Vec<&'static str>),

    /// An atomic set (e.g. signature, printed name, date for one signer):
    /// if any member is present, all must be — reported as a single
    /// violation, never one per field. An entirely absent set is fine.
    Group {
        name: &'static str,
        fields: Vec<&'static str>,
    },
}

/// One conditional requirement, scoped to a step.
#[derive(Debug, Clone)]
pub struct RequirementRule {
    pub step: u32,
    /// Empty means the rule always applies.
    pub when: Vec<Condition>,
    pub require_all: bool,
    pub required: RequiredFields,
}

impl RequirementRule {
    /// An unconditional requirement for the given step.
    pub fn always(step: u32, fields: Vec<&'static str>) -> Self {
        Self {
            step,
            when: Vec::new(),
            require_all: true,
            required: RequiredFields::Each(fields),
        }
    }

    /// Fields required only when all the conditions hold.
    pub fn when_all(step: u32, when: Vec<Condition>, fields: Vec<&'static str>) -> Self {
        Self {
            step,
            when,
            require_all: true,
            required: RequiredFields::Each(fields),
        }
    }

    /// Fields required when any one condition holds.
    pub fn when_any(step: u32, when: Vec<Condition>, fields: Vec<&'static str>) -> Self {
        Self {
            step,
            when,
            require_all: false,
            required: RequiredFields::Each(fields),
        }
    }

    /// An all-or-nothing field group, gated by conditions.
    pub fn group(
        step: u32,
        when: Vec<Condition>,
        name: &'static str,
        fields: Vec<&'static str>,
    ) -> Self {
        Self {
            step,
            when,
            require_all: true,
            required: RequiredFields::Group { name, fields },
        }
    }

    /// Does this rule apply under the given snapshot?
    pub fn applies(&self, snapshot: &Map<String, Value>) -> bool {
        self.when.is_empty() || evaluate_all(&self.when, self.require_all, snapshot)
    }
}

/// Whether a field holds a usable value: present, non-null, non-empty.
pub fn is_present(snapshot: &Map<String, Value>, field: &str) -> bool {
    match snapshot.get(field) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::ConditionOperator;
    use serde_json::json;

    fn snapshot(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_empty_when_always_applies() {
        let rule = RequirementRule::always(1, vec!["signature"]);
        assert!(rule.applies(&snapshot(&[])));
    }

    #[test]
    fn test_when_any_applies_on_one_match() {
        let rule = RequirementRule::when_any(
            1,
            vec![
                Condition::new("employment", ConditionOperator::Equals, json!("Employed")),
                Condition::new("employment", ConditionOperator::Equals, json!("Self-Employed")),
            ],
            vec!["occupation"],
        );
        assert!(rule.applies(&snapshot(&[("employment", json!("Self-Employed"))])));
        assert!(!rule.applies(&snapshot(&[("employment", json!("Retired"))])));
    }

    #[test]
    fn test_is_present_rejects_blank_values() {
        let snap = snapshot(&[
            ("blank", json!("")),
            ("spaces", json!("   ")),
            ("empty_list", json!([])),
            ("zero", json!(0)),
            ("flag", json!(false)),
            ("name", json!("Ada")),
        ]);
        assert!(!is_present(&snap, "missing"));
        assert!(!is_present(&snap, "blank"));
        assert!(!is_present(&snap, "spaces"));
        assert!(!is_present(&snap, "empty_list"));
        assert!(is_present(&snap, "zero"));
        assert!(is_present(&snap, "flag"));
        assert!(is_present(&snap, "name"));
    }
}
