//! Statement of financial condition: two-step form.

use std::sync::OnceLock;

use crate::descriptor::{all_steps_visible, DocumentDescriptor};
use crate::model::DocumentKind;
use crate::requirement::RequirementRule;
use crate::schema::{field, FieldKind, StepSchema};
use crate::visibility::VisibilityRuleSet;

pub fn descriptor() -> &'static DocumentDescriptor {
    static DESCRIPTOR: OnceLock<DocumentDescriptor> = OnceLock::new();
    DESCRIPTOR.get_or_init(build)
}

fn build() -> DocumentDescriptor {
    DocumentDescriptor {
        kind: DocumentKind::Statement,
        display_name: "Statement of Financial Condition",
        total_steps: 2,
        steps: vec![
            StepSchema::new(
                1,
                "Financial Condition",
                vec![
                    field("annual_income", FieldKind::Number),
                    field("liquid_net_worth", FieldKind::Number),
                    field("total_assets", FieldKind::Number),
                    field("total_liabilities", FieldKind::Number),
                    field("income_sources", FieldKind::TextArray),
                    field("liabilities", FieldKind::Rows),
                ],
            ),
            StepSchema::new(
                2,
                "Certification",
                vec![
                    field("certification_accepted", FieldKind::YesNo),
                    field("signature", FieldKind::Text),
                    field("printed_name", FieldKind::Text),
                    field("signature_date", FieldKind::Date),
                ],
            ),
        ],
        visibility: VisibilityRuleSet::new(),
        requirements: vec![
            RequirementRule::always(1, vec!["annual_income", "liquid_net_worth"]),
            RequirementRule::always(
                2,
                vec![
                    "certification_accepted",
                    "signature",
                    "printed_name",
                    "signature_date",
                ],
            ),
        ],
        child_collections: &["liabilities"],
        holder_steps: &[],
        step_visible: all_steps_visible,
    }
}
