//! Accredited-investor certification: single-step form.

use std::sync::OnceLock;

use super::eq;
use crate::descriptor::{all_steps_visible, DocumentDescriptor};
use crate::model::DocumentKind;
use crate::requirement::RequirementRule;
use crate::schema::{field, FieldKind, StepSchema};
use crate::visibility::{VisibilityRule, VisibilityRuleSet};

pub fn descriptor() -> &'static DocumentDescriptor {
    static DESCRIPTOR: OnceLock<DocumentDescriptor> = OnceLock::new();
    DESCRIPTOR.get_or_init(build)
}

fn build() -> DocumentDescriptor {
    DocumentDescriptor {
        kind: DocumentKind::Accreditation,
        display_name: "Accreditation Certification",
        total_steps: 1,
        steps: vec![StepSchema::new(
            1,
            "Certification",
            vec![
                field("person_entity", FieldKind::Text),
                field("accreditation_basis", FieldKind::TextArray),
                field("ssn", FieldKind::Text),
                field("ein", FieldKind::Text),
                field("attestation_accepted", FieldKind::YesNo),
                field("signature", FieldKind::Text),
                field("printed_name", FieldKind::Text),
                field("signature_date", FieldKind::Date),
            ],
        )],
        visibility: VisibilityRuleSet::new()
            .rule("ssn", VisibilityRule::show_when(vec![eq("person_entity", "Person")]))
            .rule("ein", VisibilityRule::show_when(vec![eq("person_entity", "Entity")])),
        requirements: vec![
            RequirementRule::always(
                1,
                vec![
                    "person_entity",
                    "accreditation_basis",
                    "attestation_accepted",
                    "signature",
                    "printed_name",
                    "signature_date",
                ],
            ),
            RequirementRule::when_all(1, vec![eq("person_entity", "Person")], vec!["ssn"]),
            RequirementRule::when_all(1, vec![eq("person_entity", "Entity")], vec!["ein"]),
        ],
        child_collections: &[],
        holder_steps: &[],
        step_visible: all_steps_visible,
    }
}
