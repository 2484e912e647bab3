//! Declarative per-field visibility rules.
//!
//! Each rule carries zero-or-more `show_when` and `hide_when` conditions
//! plus a combination mode. A matched `hide_when` always wins over
//! `show_when`; a field with no rule is always visible. Rules are static
//! data owned by the document-type descriptor, never persisted.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::condition::{evaluate_all, Condition};

/// Visibility rule for one field.
#[derive(Debug, Clone, Default)]
pub struct VisibilityRule {
    pub show_when: Vec<Condition>,
    pub hide_when: Vec<Condition>,
    /// AND the conditions when true, OR them when false.
    pub require_all: bool,
}

impl VisibilityRule {
    pub fn show_when(conditions: Vec<Condition>) -> Self {
        Self {
            show_when: conditions,
            hide_when: Vec::new(),
            require_all: true,
        }
    }

    pub fn hide_when(conditions: Vec<Condition>) -> Self {
        Self {
            show_when: Vec::new(),
            hide_when: conditions,
            require_all: true,
        }
    }

    pub fn any_of(mut self) -> Self {
        self.require_all = false;
        self
    }

    pub fn and_hide_when(mut self, conditions: Vec<Condition>) -> Self {
        self.hide_when = conditions;
        self
    }
}

/// The ordered rule table for one document type.
#[derive(Debug, Clone, Default)]
pub struct VisibilityRuleSet {
    rules: HashMap<String, VisibilityRule>,
}

impl VisibilityRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, field: impl Into<String>, rule: VisibilityRule) -> Self {
        self.rules.insert(field.into(), rule);
        self
    }

    /// Should `field` be drawn (and potentially required) right now?
    pub fn is_visible(&self, field: &str, snapshot: &Map<String, Value>) -> bool {
        let Some(rule) = self.rules.get(field) else {
            return true;
        };

        // Hide wins unconditionally
        if !rule.hide_when.is_empty()
            && evaluate_all(&rule.hide_when, rule.require_all, snapshot)
        {
            return false;
        }

        if !rule.show_when.is_empty()
            && !evaluate_all(&rule.show_when, rule.require_all, snapshot)
        {
            return false;
        }

        true
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

    fn eq(field: &str, value: Value) -> Condition {
        Condition::new(field, ConditionOperator::Equals, value)
    }

    #[test]
    fn test_no_rule_means_visible() {
        let rules = VisibilityRuleSet::new();
        assert!(rules.is_visible("anything", &snapshot(&[])));
    }

    #[test]
    fn test_show_when_gates_visibility() {
        let rules = VisibilityRuleSet::new().rule(
            "ssn",
            VisibilityRule::show_when(vec![eq("person_entity", json!("Person"))]),
        );

        assert!(rules.is_visible("ssn", &snapshot(&[("person_entity", json!("Person"))])));
        assert!(!rules.is_visible("ssn", &snapshot(&[("person_entity", json!("Entity"))])));
        assert!(!rules.is_visible("ssn", &snapshot(&[])));
    }

    #[test]
    fn test_hide_when_beats_show_when() {
        let rules = VisibilityRuleSet::new().rule(
            "ein",
            VisibilityRule::show_when(vec![eq("person_entity", json!("Entity"))])
                .and_hide_when(vec![eq("exempt", json!(true))]),
        );

        let snap = snapshot(&[("person_entity", json!("Entity")), ("exempt", json!(true))]);
        assert!(!rules.is_visible("ein", &snap));

        let snap = snapshot(&[("person_entity", json!("Entity"))]);
        assert!(rules.is_visible("ein", &snap));
    }

    #[test]
    fn test_or_combination() {
        let rules = VisibilityRuleSet::new().rule(
            "occupation",
            VisibilityRule::show_when(vec![
                eq("employment", json!("Employed")),
                eq("employment", json!("Self-Employed")),
            ])
            .any_of(),
        );

        assert!(rules.is_visible("occupation", &snapshot(&[("employment", json!("Employed"))])));
        assert!(rules.is_visible(
            "occupation",
            &snapshot(&[("employment", json!("Self-Employed"))])
        ));
        assert!(!rules.is_visible("occupation", &snapshot(&[("employment", json!("Retired"))])));
    }

    #[test]
    fn test_empty_hide_when_never_hides() {
        let rules = VisibilityRuleSet::new().rule("notes", VisibilityRule::default());
        assert!(rules.is_visible("notes", &snapshot(&[])));
    }
}
