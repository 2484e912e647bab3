//! Additional account holder: two-step form for an extra signer added to an
//! existing account.

use std::sync::OnceLock;

use super::{checked, eq, includes_any};
use crate::descriptor::{all_steps_visible, DocumentDescriptor};
use crate::model::DocumentKind;
use crate::requirement::RequirementRule;
use crate::schema::{field, FieldKind, StepSchema};
use crate::visibility::{VisibilityRule, VisibilityRuleSet};

const EMPLOYED_STATUSES: &[&str] = &["Employed", "Self-Employed"];

pub fn descriptor() -> &'static DocumentDescriptor {
    static DESCRIPTOR: OnceLock<DocumentDescriptor> = OnceLock::new();
    DESCRIPTOR.get_or_init(build)
}

fn build() -> DocumentDescriptor {
    DocumentDescriptor {
        kind: DocumentKind::AdditionalHolder,
        display_name: "Additional Account Holder",
        total_steps: 2,
        steps: vec![
            StepSchema::new(
                1,
                "Holder Information",
                vec![
                    field("person_entity", FieldKind::Text),
                    field("first_name", FieldKind::Text),
                    field("last_name", FieldKind::Text),
                    field("entity_name", FieldKind::Text),
                    field("ssn", FieldKind::Text),
                    field("ein", FieldKind::Text),
                    field("date_of_birth", FieldKind::Date),
                    field("email", FieldKind::Text),
                    field("employment_status", FieldKind::TextArray),
                    field("occupation", FieldKind::Text),
                    field("related_to_employee", FieldKind::YesNo),
                    field("related_employee_name", FieldKind::Text),
                    field("addresses", FieldKind::Rows),
                ],
            ),
            StepSchema::new(
                2,
                "Signature",
                vec![
                    field("signature", FieldKind::Text),
                    field("printed_name", FieldKind::Text),
                    field("signature_date", FieldKind::Date),
                ],
            ),
        ],
        visibility: VisibilityRuleSet::new()
            .rule("first_name", VisibilityRule::show_when(vec![eq("person_entity", "Person")]))
            .rule("last_name", VisibilityRule::show_when(vec![eq("person_entity", "Person")]))
            .rule("ssn", VisibilityRule::show_when(vec![eq("person_entity", "Person")]))
            .rule("date_of_birth", VisibilityRule::show_when(vec![eq("person_entity", "Person")]))
            .rule("entity_name", VisibilityRule::show_when(vec![eq("person_entity", "Entity")]))
            .rule("ein", VisibilityRule::show_when(vec![eq("person_entity", "Entity")]))
            .rule(
                "occupation",
                VisibilityRule::show_when(vec![includes_any("employment_status", EMPLOYED_STATUSES)]),
            )
            .rule(
                "related_employee_name",
                VisibilityRule::show_when(vec![checked("related_to_employee")]),
            ),
        requirements: vec![
            RequirementRule::always(1, vec!["person_entity", "email"]),
            RequirementRule::when_all(
                1,
                vec![eq("person_entity", "Person")],
                vec!["first_name", "last_name", "ssn", "date_of_birth"],
            ),
            RequirementRule::when_all(
                1,
                vec![eq("person_entity", "Entity")],
                vec!["entity_name", "ein"],
            ),
            RequirementRule::when_all(
                1,
                vec![includes_any("employment_status", EMPLOYED_STATUSES)],
                vec!["occupation"],
            ),
            RequirementRule::when_all(
                1,
                vec![checked("related_to_employee")],
                vec!["related_employee_name"],
            ),
            RequirementRule::always(2, vec!["signature", "printed_name", "signature_date"]),
        ],
        child_collections: &["addresses"],
        holder_steps: &[],
        step_visible: all_steps_visible,
    }
}
