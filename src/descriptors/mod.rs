//! One descriptor module per document type.
//!
//! These are the only places that know a document type's field lists,
//! visibility rules, and conditional requirements. Everything else in the
//! crate is generic over `DocumentDescriptor`.

pub mod accreditation;
pub mod additional_holder;
pub mod alt_order;
pub mod investor_profile;
pub mod statement;

use crate::condition::{Condition, ConditionOperator};
use serde_json::{json, Value};

// Shared rule-building shorthand for the descriptor modules.

pub(crate) fn eq(field: &str, value: &str) -> Condition {
    Condition::new(field, ConditionOperator::Equals, json!(value))
}

pub(crate) fn checked(field: &str) -> Condition {
    Condition::new(field, ConditionOperator::Checked, Value::Null)
}

pub(crate) fn includes_any(field: &str, values: &[&str]) -> Condition {
    Condition::new(field, ConditionOperator::Includes, json!(values))
}
