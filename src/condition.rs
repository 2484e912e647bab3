//! Atomic visibility conditions and their evaluator.
//!
//! A condition is `field OP value`, evaluated against a flat snapshot of the
//! current form values. Evaluation is a pure function of the snapshot and
//! fails closed: an unknown shape (e.g. a scalar under an array-only
//! operator) evaluates to `false` rather than accidentally showing or
//! requiring a field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Comparison operator for a single condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    /// Array field contains the expected value (or any of the expected
    /// values when the expectation is itself an array).
    Includes,
    NotIncludes,
    /// Boolean `true` or the string `"Yes"`.
    Checked,
    /// Absent, falsy, boolean `false`, or the string `"No"`.
    NotChecked,
    /// Array field intersects the candidate set; with no candidates, any
    /// non-empty array matches.
    AnyChecked,
    /// Array field is empty or absent.
    NoneChecked,
}

/// One atomic condition against a form snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: ConditionOperator,
    /// Expected value; ignored by the checked-style operators unless they
    /// take a candidate set.
    #[serde(default)]
    pub value: Value,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: ConditionOperator, value: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }

    /// Evaluate this condition against a snapshot of form values.
    pub fn evaluate(&self, snapshot: &Map<String, Value>) -> bool {
        let actual = snapshot.get(&self.field);

        match self.operator {
            ConditionOperator::Equals => actual == Some(&self.value),
            ConditionOperator::NotEquals => actual != Some(&self.value),
            ConditionOperator::Includes => array_includes(actual, &self.value),
            ConditionOperator::NotIncludes => !array_includes(actual, &self.value),
            ConditionOperator::Checked => is_checked(actual),
            ConditionOperator::NotChecked => is_not_checked(actual),
            ConditionOperator::AnyChecked => any_checked(actual, &self.value),
            ConditionOperator::NoneChecked => none_checked(actual),
        }
    }
}

/// Combine a condition list: AND when `require_all`, OR otherwise.
///
/// Callers decide what an empty list means (visibility treats an empty
/// `hide_when` as never hiding, an empty `when` on a requirement as always
/// applying), so this is only called with non-empty lists.
pub fn evaluate_all(
    conditions: &[Condition],
    require_all: bool,
    snapshot: &Map<String, Value>,
) -> bool {
    if require_all {
        conditions.iter().all(|c| c.evaluate(snapshot))
    } else {
        conditions.iter().any(|c| c.evaluate(snapshot))
    }
}

fn array_includes(actual: Option<&Value>, expected: &Value) -> bool {
    let Some(Value::Array(items)) = actual else {
        return false;
    };
    match expected {
        // OR-within-includes: match any of the expected values
        Value::Array(candidates) => candidates.iter().any(|c| items.contains(c)),
        single => items.contains(single),
    }
}

fn is_checked(actual: Option<&Value>) -> bool {
    match actual {
        Some(Value::Bool(true)) => true,
        Some(Value::String(s)) => s == "Yes",
        _ => false,
    }
}

fn is_not_checked(actual: Option<&Value>) -> bool {
    match actual {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(s)) => s.is_empty() || s == "No",
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

fn any_checked(actual: Option<&Value>, candidates: &Value) -> bool {
    let Some(Value::Array(items)) = actual else {
        return false;
    };
    match candidates {
        Value::Array(set) if !set.is_empty() => set.iter().any(|c| items.contains(c)),
        _ => !items.is_empty(),
    }
}

fn none_checked(actual: Option<&Value>) -> bool {
    match actual {
        None | Some(Value::Null) => true,
        Some(Value::Array(items)) => items.is_empty(),
        _ => false,
    }
}
