//! Investor profile: the seven-step new-account wizard.
//!
//! Steps 3 and 4 route into the Primary and Secondary account-holder
//! sub-entities; their fields appear in snapshots and rules under the
//! `primary_`/`secondary_` prefix. Step 4 is only visible for joint and
//! trust registrations.

use std::sync::OnceLock;

use serde_json::{Map, Value};

use super::{checked, eq, includes_any};
use crate::condition::{Condition, ConditionOperator};
use crate::descriptor::DocumentDescriptor;
use crate::model::{DocumentKind, HolderType};
use crate::requirement::RequirementRule;
use crate::schema::{field, FieldKind, StepSchema};
use crate::visibility::{VisibilityRule, VisibilityRuleSet};

/// Registrations that carry a second signer.
const JOINT_REGISTRATIONS: &[&str] = &[
    "Joint Tenants with Rights of Survivorship",
    "Joint Tenants in Common",
    "Community Property",
    "Trust",
];

const EMPLOYED_STATUSES: &[&str] = &["Employed", "Self-Employed"];

/// Snapshot-prefixed field names for one signer, used by the requirement
/// rules for steps 3 and 4.
struct HolderFieldNames {
    person_entity: &'static str,
    email: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    ssn: &'static str,
    date_of_birth: &'static str,
    entity_name: &'static str,
    ein: &'static str,
    employment_status: &'static str,
    occupation: &'static str,
    related_to_employee: &'static str,
    related_employee_name: &'static str,
}

const PRIMARY_FIELDS: HolderFieldNames = HolderFieldNames {
    person_entity: "primary_person_entity",
    email: "primary_email",
    first_name: "primary_first_name",
    last_name: "primary_last_name",
    ssn: "primary_ssn",
    date_of_birth: "primary_date_of_birth",
    entity_name: "primary_entity_name",
    ein: "primary_ein",
    employment_status: "primary_employment_status",
    occupation: "primary_occupation",
    related_to_employee: "primary_related_to_employee",
    related_employee_name: "primary_related_employee_name",
};

const SECONDARY_FIELDS: HolderFieldNames = HolderFieldNames {
    person_entity: "secondary_person_entity",
    email: "secondary_email",
    first_name: "secondary_first_name",
    last_name: "secondary_last_name",
    ssn: "secondary_ssn",
    date_of_birth: "secondary_date_of_birth",
    entity_name: "secondary_entity_name",
    ein: "secondary_ein",
    employment_status: "secondary_employment_status",
    occupation: "secondary_occupation",
    related_to_employee: "secondary_related_to_employee",
    related_employee_name: "secondary_related_employee_name",
};

pub fn descriptor() -> &'static DocumentDescriptor {
    static DESCRIPTOR: OnceLock<DocumentDescriptor> = OnceLock::new();
    DESCRIPTOR.get_or_init(build)
}

fn build() -> DocumentDescriptor {
    DocumentDescriptor {
        kind: DocumentKind::InvestorProfile,
        display_name: "Investor Profile",
        total_steps: 7,
        steps: steps(),
        visibility: visibility(),
        requirements: requirements(),
        child_collections: &["knowledge_entries", "addresses", "phones"],
        holder_steps: &[(3, HolderType::Primary), (4, HolderType::Secondary)],
        step_visible,
    }
}

fn step_visible(step: u32, snapshot: &Map<String, Value>) -> bool {
    match step {
        // Secondary holder only exists for joint/trust registrations
        4 => Condition::new(
            "account_types",
            ConditionOperator::AnyChecked,
            serde_json::json!(JOINT_REGISTRATIONS),
        )
        .evaluate(snapshot),
        _ => true,
    }
}

fn steps() -> Vec<StepSchema> {
    let holder_fields = || {
        vec![
            field("person_entity", FieldKind::Text),
            field("first_name", FieldKind::Text),
            field("last_name", FieldKind::Text),
            field("entity_name", FieldKind::Text),
            field("ssn", FieldKind::Text),
            field("ein", FieldKind::Text),
            field("date_of_birth", FieldKind::Date),
            field("email", FieldKind::Text),
            field("citizenship", FieldKind::Text),
            field("employment_status", FieldKind::TextArray),
            field("occupation", FieldKind::Text),
            field("employer_name", FieldKind::Text),
            field("related_to_employee", FieldKind::YesNo),
            field("related_employee_name", FieldKind::Text),
            field("addresses", FieldKind::Rows),
            field("phones", FieldKind::Rows),
        ]
    };

    vec![
        StepSchema::new(
            1,
            "Account Registration",
            vec![
                field("account_types", FieldKind::TextArray),
                field("custody_type", FieldKind::Text),
                field("source_of_funds", FieldKind::TextArray),
            ],
        ),
        StepSchema::new(
            2,
            "Investment Profile",
            vec![
                field("objectives", FieldKind::TextArray),
                field("risk_tolerance", FieldKind::Text),
                field("time_horizon", FieldKind::Text),
                field("liquidity_needs", FieldKind::Text),
                field("annual_income", FieldKind::Number),
                field("net_worth", FieldKind::Number),
                field("tax_bracket", FieldKind::Text),
                field("knowledge_entries", FieldKind::Rows),
            ],
        ),
        StepSchema::new(3, "Primary Account Holder", holder_fields()),
        StepSchema::new(4, "Secondary Account Holder", holder_fields()),
        StepSchema::new(
            5,
            "Regulatory Disclosures",
            vec![
                field("qualified_account", FieldKind::YesNo),
                field("qualified_account_certification", FieldKind::Text),
                field("finra_affiliated", FieldKind::YesNo),
                field("finra_firm_name", FieldKind::Text),
                field("public_company_insider", FieldKind::YesNo),
                field("insider_company_symbols", FieldKind::Text),
            ],
        ),
        StepSchema::new(
            6,
            "Trusted Contact",
            vec![
                field("decline_trusted_contact", FieldKind::YesNo),
                field("trusted_contact_name", FieldKind::Text),
                field("trusted_contact_phone", FieldKind::Text),
                field("trusted_contact_email", FieldKind::Text),
                field("trusted_contact_relationship", FieldKind::Text),
            ],
        ),
        StepSchema::new(
            7,
            "Signatures",
            vec![
                field("signature", FieldKind::Text),
                field("printed_name", FieldKind::Text),
                field("signature_date", FieldKind::Date),
                field("has_joint_owner", FieldKind::YesNo),
                field("joint_owner_signature", FieldKind::Text),
                field("joint_owner_printed_name", FieldKind::Text),
                field("joint_owner_signature_date", FieldKind::Date),
            ],
        ),
    ]
}

fn visibility() -> VisibilityRuleSet {
    let mut rules = VisibilityRuleSet::new();

    for prefix in ["primary", "secondary"] {
        let f = |name: &str| format!("{}_{}", prefix, name);
        rules = rules
            .rule(f("first_name"), VisibilityRule::show_when(vec![eq(&f("person_entity"), "Person")]))
            .rule(f("last_name"), VisibilityRule::show_when(vec![eq(&f("person_entity"), "Person")]))
            .rule(f("ssn"), VisibilityRule::show_when(vec![eq(&f("person_entity"), "Person")]))
            .rule(f("date_of_birth"), VisibilityRule::show_when(vec![eq(&f("person_entity"), "Person")]))
            .rule(f("entity_name"), VisibilityRule::show_when(vec![eq(&f("person_entity"), "Entity")]))
            .rule(f("ein"), VisibilityRule::show_when(vec![eq(&f("person_entity"), "Entity")]))
            .rule(
                f("occupation"),
                VisibilityRule::show_when(vec![includes_any(
                    &f("employment_status"),
                    EMPLOYED_STATUSES,
                )]),
            )
            .rule(
                f("employer_name"),
                VisibilityRule::show_when(vec![includes_any(
                    &f("employment_status"),
                    EMPLOYED_STATUSES,
                )]),
            )
            .rule(
                f("related_employee_name"),
                VisibilityRule::show_when(vec![checked(&f("related_to_employee"))]),
            );
    }

    rules = rules
        .rule(
            "qualified_account_certification",
            VisibilityRule::show_when(vec![checked("qualified_account")]),
        )
        .rule(
            "finra_firm_name",
            VisibilityRule::show_when(vec![checked("finra_affiliated")]),
        )
        .rule(
            "insider_company_symbols",
            VisibilityRule::show_when(vec![checked("public_company_insider")]),
        )
        .rule(
            "joint_owner_signature",
            VisibilityRule::show_when(vec![checked("has_joint_owner")]),
        )
        .rule(
            "joint_owner_printed_name",
            VisibilityRule::show_when(vec![checked("has_joint_owner")]),
        )
        .rule(
            "joint_owner_signature_date",
            VisibilityRule::show_when(vec![checked("has_joint_owner")]),
        );

    for name in [
        "trusted_contact_name",
        "trusted_contact_phone",
        "trusted_contact_email",
        "trusted_contact_relationship",
    ] {
        rules = rules.rule(
            name,
            VisibilityRule::hide_when(vec![checked("decline_trusted_contact")]),
        );
    }

    rules
}

fn requirements() -> Vec<RequirementRule> {
    let mut rules = vec![
        RequirementRule::always(1, vec!["account_types"]),
        RequirementRule::always(2, vec!["objectives", "risk_tolerance"]),
    ];

    for (step, f) in [(3, &PRIMARY_FIELDS), (4, &SECONDARY_FIELDS)] {
        rules.push(RequirementRule::always(step, vec![f.person_entity, f.email]));
        rules.push(RequirementRule::when_all(
            step,
            vec![eq(f.person_entity, "Person")],
            vec![f.first_name, f.last_name, f.ssn, f.date_of_birth],
        ));
        rules.push(RequirementRule::when_all(
            step,
            vec![eq(f.person_entity, "Entity")],
            vec![f.entity_name, f.ein],
        ));
        rules.push(RequirementRule::when_all(
            step,
            vec![includes_any(f.employment_status, EMPLOYED_STATUSES)],
            vec![f.occupation],
        ));
        rules.push(RequirementRule::when_all(
            step,
            vec![checked(f.related_to_employee)],
            vec![f.related_employee_name],
        ));
    }

    rules.push(RequirementRule::when_all(
        5,
        vec![checked("qualified_account")],
        vec!["qualified_account_certification"],
    ));
    rules.push(RequirementRule::when_all(
        5,
        vec![checked("finra_affiliated")],
        vec!["finra_firm_name"],
    ));

    rules.push(RequirementRule::always(
        7,
        vec!["signature", "printed_name", "signature_date"],
    ));
    rules.push(RequirementRule::group(
        7,
        vec![checked("has_joint_owner")],
        "joint owner signature set",
        vec![
            "joint_owner_signature",
            "joint_owner_printed_name",
            "joint_owner_signature_date",
        ],
    ));

    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirement::RequiredFields;
    use serde_json::json;

    fn snapshot(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_secondary_step_gated_by_registration() {
        let d = descriptor();

        let individual = snapshot(&[("account_types", json!(["Individual"]))]);
        assert!(!d.is_step_visible(4, &individual));

        let joint = snapshot(&[(
            "account_types",
            json!(["Joint Tenants with Rights of Survivorship"]),
        )]);
        assert!(d.is_step_visible(4, &joint));

        let trust = snapshot(&[("account_types", json!(["Trust"]))]);
        assert!(d.is_step_visible(4, &trust));

        // Every other step is unconditional
        for step in [1, 2, 3, 5, 6, 7] {
            assert!(d.is_step_visible(step, &individual));
        }
    }

    #[test]
    fn test_person_entity_split_visibility() {
        let d = descriptor();

        let person = snapshot(&[("primary_person_entity", json!("Person"))]);
        assert!(d.visibility.is_visible("primary_ssn", &person));
        assert!(!d.visibility.is_visible("primary_ein", &person));

        let entity = snapshot(&[("primary_person_entity", json!("Entity"))]);
        assert!(!d.visibility.is_visible("primary_ssn", &entity));
        assert!(d.visibility.is_visible("primary_ein", &entity));
    }

    #[test]
    fn test_holder_requirements_use_prefixed_snapshot_names() {
        // Steps 3 and 4 validate against the merged snapshot, so every
        // field and condition they reference must carry the signer prefix
        let d = descriptor();
        for (step, prefix) in [(3, "primary_"), (4, "secondary_")] {
            for rule in d.requirements_for(step) {
                if let RequiredFields::Each(fields) = &rule.required {
                    for name in fields {
                        assert!(
                            name.starts_with(prefix),
                            "step {} requirement '{}' lacks the {} prefix",
                            step,
                            name,
                            prefix
                        );
                    }
                }
                for condition in &rule.when {
                    assert!(condition.field.starts_with(prefix));
                }
            }
        }
    }

    #[test]
    fn test_trusted_contact_hidden_when_declined() {
        let d = descriptor();
        let declined = snapshot(&[("decline_trusted_contact", json!("Yes"))]);
        assert!(!d.visibility.is_visible("trusted_contact_name", &declined));
        assert!(d.visibility.is_visible("trusted_contact_name", &snapshot(&[])));
    }
}
