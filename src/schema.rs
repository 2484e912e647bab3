//! Permissive per-step shape schemas.
//!
//! A step schema lists the fields a wizard page may send and their expected
//! shapes. Draft saves must never fail for incomplete work, so nothing here
//! is required — a payload only fails shape validation when it names an
//! unknown field or sends a value of the wrong shape. `Null` is accepted for
//! every field (clearing a previously entered value).

use chrono::NaiveDate;
use serde_json::{Map, Value};

/// Expected shape of a single field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Boolean, or the wizard's "Yes"/"No" strings.
    YesNo,
    Number,
    /// ISO `YYYY-MM-DD` date string.
    Date,
    /// Array of strings (multi-select).
    TextArray,
    /// Array of objects — a child collection replaced wholesale on save.
    Rows,
}

/// One field a step may carry.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// The shape schema for one wizard step.
#[derive(Debug, Clone)]
pub struct StepSchema {
    pub step: u32,
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl StepSchema {
    pub fn new(step: u32, title: &'static str, fields: Vec<FieldSpec>) -> Self {
        Self { step, title, fields }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check an incoming payload against this schema. Returns every
    /// violation, not just the first.
    pub fn check(&self, payload: &Map<String, Value>) -> Vec<String> {
        let mut violations = Vec::new();

        for (name, value) in payload {
            let Some(spec) = self.field(name) else {
                violations.push(format!("unknown field '{}' for step {}", name, self.step));
                continue;
            };
            if value.is_null() {
                continue;
            }
            if let Some(problem) = check_kind(spec.kind, value) {
                violations.push(format!("field '{}' {}", name, problem));
            }
        }

        violations
    }
}

fn check_kind(kind: FieldKind, value: &Value) -> Option<&'static str> {
    match kind {
        FieldKind::Text => match value {
            Value::String(_) => None,
            _ => Some("must be a string"),
        },
        FieldKind::YesNo => match value {
            Value::Bool(_) => None,
            Value::String(s) if s.is_empty() || s == "Yes" || s == "No" => None,
            _ => Some("must be a boolean or \"Yes\"/\"No\""),
        },
        FieldKind::Number => match value {
            Value::Number(_) => None,
            _ => Some("must be a number"),
        },
        FieldKind::Date => match value {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => {
                if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() {
                    None
                } else {
                    Some("must be a YYYY-MM-DD date")
                }
            }
            _ => Some("must be a YYYY-MM-DD date"),
        },
        FieldKind::TextArray => match value {
            Value::Array(items) if items.iter().all(|v| v.is_string()) => None,
            _ => Some("must be an array of strings"),
        },
        FieldKind::Rows => match value {
            Value::Array(items) if items.iter().all(|v| v.is_object()) => None,
            _ => Some("must be an array of objects"),
        },
    }
}

/// Shorthand for building field lists in descriptors.
pub fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> StepSchema {
        StepSchema::new(
            1,
            "Identity",
            vec![
                field("first_name", FieldKind::Text),
                field("date_of_birth", FieldKind::Date),
                field("employment_status", FieldKind::TextArray),
                field("related_to_employee", FieldKind::YesNo),
                field("annual_income", FieldKind::Number),
                field("addresses", FieldKind::Rows),
            ],
        )
    }

    fn payload(v: Value) -> Map<String, Value> {
        v.as_object().unwrap().clone()
    }

    #[test]
    fn test_empty_payload_is_valid() {
        assert!(schema().check(&Map::new()).is_empty());
    }

    #[test]
    fn test_partial_payload_is_valid() {
        let p = payload(json!({ "first_name": "Ada" }));
        assert!(schema().check(&p).is_empty());
    }

    #[test]
    fn test_null_clears_any_field() {
        let p = payload(json!({ "date_of_birth": null, "annual_income": null }));
        assert!(schema().check(&p).is_empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let p = payload(json!({ "favorite_color": "blue" }));
        let violations = schema().check(&p);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("favorite_color"));
    }

    #[test]
    fn test_wrong_shapes_all_reported() {
        let p = payload(json!({
            "first_name": 42,
            "date_of_birth": "01/02/1990",
            "employment_status": "Employed",
            "related_to_employee": "maybe",
            "addresses": ["not an object"]
        }));
        assert_eq!(schema().check(&p).len(), 5);
    }

    #[test]
    fn test_valid_shapes_accepted() {
        let p = payload(json!({
            "first_name": "Ada",
            "date_of_birth": "1990-02-01",
            "employment_status": ["Employed"],
            "related_to_employee": "Yes",
            "annual_income": 125000,
            "addresses": [{ "line1": "1 Main St", "city": "Boston" }]
        }));
        assert!(schema().check(&p).is_empty());
    }
}
