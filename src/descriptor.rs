//! Per-document-type descriptors.
//!
//! Everything type-specific — step schemas, visibility rules, conditional
//! requirements, child collections, holder steps, step-level visibility
//! policy — lives in one descriptor per document type. The lifecycle engine,
//! validator, resolver, and orchestrator are generic over the descriptor and
//! never branch on the document type themselves.

use serde_json::{Map, Value};

use crate::model::{DocumentKind, HolderType};
use crate::requirement::RequirementRule;
use crate::schema::StepSchema;
use crate::visibility::VisibilityRuleSet;

/// Step-level visibility policy: gates whole wizard steps, unlike the
/// per-field rule table. Business policy per document type.
pub type StepVisibilityFn = fn(step: u32, snapshot: &Map<String, Value>) -> bool;

/// Static description of one document type.
#[derive(Debug)]
pub struct DocumentDescriptor {
    pub kind: DocumentKind,
    pub display_name: &'static str,
    pub total_steps: u32,
    pub steps: Vec<StepSchema>,
    pub visibility: VisibilityRuleSet,
    pub requirements: Vec<RequirementRule>,
    /// Child collection names, as they appear in step payloads.
    pub child_collections: &'static [&'static str],
    /// Steps whose payload is routed into an account-holder sub-entity.
    pub holder_steps: &'static [(u32, HolderType)],
    pub step_visible: StepVisibilityFn,
}

impl DocumentDescriptor {
    pub fn schema_for(&self, step: u32) -> Option<&StepSchema> {
        self.steps.iter().find(|s| s.step == step)
    }

    pub fn holder_type_for(&self, step: u32) -> Option<HolderType> {
        self.holder_steps
            .iter()
            .find(|(s, _)| *s == step)
            .map(|(_, t)| *t)
    }

    pub fn is_child_collection(&self, name: &str) -> bool {
        self.child_collections.contains(&name)
    }

    /// Is this whole step visible under the current form values?
    pub fn is_step_visible(&self, step: u32, snapshot: &Map<String, Value>) -> bool {
        (self.step_visible)(step, snapshot)
    }

    /// Requirement rules scoped to one step.
    pub fn requirements_for(&self, step: u32) -> impl Iterator<Item = &RequirementRule> {
        self.requirements.iter().filter(move |r| r.step == step)
    }
}

/// Default step policy: every step is always visible.
pub fn all_steps_visible(_step: u32, _snapshot: &Map<String, Value>) -> bool {
    true
}

/// Look up the static descriptor for a document kind.
pub fn descriptor_for(kind: DocumentKind) -> &'static DocumentDescriptor {
    match kind {
        DocumentKind::InvestorProfile => crate::descriptors::investor_profile::descriptor(),
        DocumentKind::AdditionalHolder => crate::descriptors::additional_holder::descriptor(),
        DocumentKind::AltOrder => crate::descriptors::alt_order::descriptor(),
        DocumentKind::Accreditation => crate::descriptors::accreditation::descriptor(),
        DocumentKind::Statement => crate::descriptors::statement::descriptor(),
    }
}
