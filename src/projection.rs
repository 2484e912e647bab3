//! Flattened field projection for the document-generation webhook.
//!
//! The third-party templating service takes a plain string-keyed map. Holder
//! fields keep their `primary_`/`secondary_` prefix; child rows are keyed
//! `collection_N_field` with 1-based row numbers. The core only produces
//! this map — delivering it is the boundary layer's job.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::model::Document;

/// Flatten a document into template-ready strings.
pub fn flatten(document: &Document) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();

    for (name, value) in &document.snapshot() {
        if let Some(text) = render(value) {
            out.insert(name.clone(), text);
        }
    }

    for (collection, rows) in &document.children {
        for (index, row) in rows.iter().enumerate() {
            let Value::Object(fields) = row else {
                continue;
            };
            for (name, value) in fields {
                if let Some(text) = render(value) {
                    out.insert(format!("{}_{}_{}", collection, index + 1, name), text);
                }
            }
        }
    }

    out
}

/// Render a scalar for the template. Booleans become the wizard's
/// "Yes"/"No"; arrays are joined; nulls and nested objects are skipped.
fn render(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(true) => Some("Yes".to_string()),
        Value::Bool(false) => Some("No".to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(render).collect();
            Some(parts.join(", "))
        }
        Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentKind, HolderType, OwnerRef};
    use serde_json::json;

    #[test]
    fn test_flatten_scalars_and_arrays() {
        let mut doc = Document::new(DocumentKind::InvestorProfile, OwnerRef::User("u1".into()));
        doc.fields.insert("risk_tolerance".into(), json!("Moderate"));
        doc.fields.insert("annual_income".into(), json!(125000));
        doc.fields.insert("has_joint_owner".into(), json!(true));
        doc.fields
            .insert("objectives".into(), json!(["Growth", "Income"]));
        doc.fields.insert("cleared".into(), Value::Null);

        let flat = flatten(&doc);
        assert_eq!(flat["risk_tolerance"], "Moderate");
        assert_eq!(flat["annual_income"], "125000");
        assert_eq!(flat["has_joint_owner"], "Yes");
        assert_eq!(flat["objectives"], "Growth, Income");
        assert!(!flat.contains_key("cleared"));
    }

    #[test]
    fn test_flatten_holder_fields_keep_prefix() {
        let mut doc = Document::new(DocumentKind::InvestorProfile, OwnerRef::User("u1".into()));
        doc.holder_mut_or_insert(HolderType::Primary)
            .fields
            .insert("first_name".into(), json!("Ada"));

        let flat = flatten(&doc);
        assert_eq!(flat["primary_first_name"], "Ada");
    }

    #[test]
    fn test_flatten_child_rows_are_numbered() {
        let mut doc = Document::new(DocumentKind::InvestorProfile, OwnerRef::User("u1".into()));
        doc.children.insert(
            "primary_addresses".into(),
            vec![
                json!({"line1": "1 Main St", "city": "Boston"}),
                json!({"line1": "9 Elm St", "city": "Chicago"}),
            ],
        );

        let flat = flatten(&doc);
        assert_eq!(flat["primary_addresses_1_city"], "Boston");
        assert_eq!(flat["primary_addresses_2_line1"], "9 Elm St");
    }
}
