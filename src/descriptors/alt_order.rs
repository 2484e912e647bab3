//! Alternative-investment order: a single logical step with several field
//! groups.

use std::sync::OnceLock;

use super::checked;
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
        kind: DocumentKind::AltOrder,
        display_name: "Alternative Investment Order",
        total_steps: 1,
        steps: vec![StepSchema::new(
            1,
            "Order",
            vec![
                field("investment_name", FieldKind::Text),
                field("account_number", FieldKind::Text),
                field("investment_amount", FieldKind::Number),
                field("qualified_account", FieldKind::YesNo),
                field("qualified_account_certification", FieldKind::Text),
                field("acknowledgments", FieldKind::TextArray),
                field("signature", FieldKind::Text),
                field("printed_name", FieldKind::Text),
                field("signature_date", FieldKind::Date),
            ],
        )],
        visibility: VisibilityRuleSet::new().rule(
            "qualified_account_certification",
            VisibilityRule::show_when(vec![checked("qualified_account")]),
        ),
        requirements: vec![
            RequirementRule::always(
                1,
                vec![
                    "investment_name",
                    "investment_amount",
                    "signature",
                    "printed_name",
                    "signature_date",
                ],
            ),
            RequirementRule::when_all(
                1,
                vec![checked("qualified_account")],
                vec!["qualified_account_certification"],
            ),
        ],
        child_collections: &[],
        holder_steps: &[],
        step_visible: all_steps_visible,
    }
}
