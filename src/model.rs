//! Domain model for onboarding documents.
//!
//! A `Document` is one instance of a multi-step form (investor profile,
//! additional holder, alternative-investment order, accreditation
//! certification, or statement of financial condition) owned by exactly one
//! user or client. Field values are dynamic (`serde_json::Value`) because
//! the step schemas and conditional rules are data-driven, not code.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{DocError, DocResult};

// ---------------------------------------------------------------------------
// DocumentKind
// ---------------------------------------------------------------------------

/// The five document types collected during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    InvestorProfile,
    AdditionalHolder,
    AltOrder,
    Accreditation,
    Statement,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvestorProfile => "investor_profile",
            Self::AdditionalHolder => "additional_holder",
            Self::AltOrder => "alt_order",
            Self::Accreditation => "accreditation",
            Self::Statement => "statement",
        }
    }
}

// ---------------------------------------------------------------------------
// OwnerRef
// ---------------------------------------------------------------------------

/// The owner of a document: exactly one of a user id or a client id.
///
/// The boundary layer accepts two optional ids; `from_ids` enforces the
/// exactly-one invariant so the rest of the core never sees an ambiguous
/// owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "owner_type", content = "owner_id", rename_all = "snake_case")]
pub enum OwnerRef {
    User(String),
    Client(String),
}

impl OwnerRef {
    /// Build an owner reference from the boundary layer's optional pair.
    pub fn from_ids(user_id: Option<String>, client_id: Option<String>) -> DocResult<Self> {
        match (user_id, client_id) {
            (Some(u), None) => Ok(Self::User(u)),
            (None, Some(c)) => Ok(Self::Client(c)),
            (Some(_), Some(_)) => Err(DocError::validation(
                "exactly one of userId or clientId must be supplied, not both",
            )),
            (None, None) => Err(DocError::validation(
                "one of userId or clientId must be supplied",
            )),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::User(id) | Self::Client(id) => id,
        }
    }
}

// ---------------------------------------------------------------------------
// DocumentStatus
// ---------------------------------------------------------------------------

/// Review lifecycle status. New documents always start at `Draft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl DocumentStatus {
    pub fn is_draft(&self) -> bool {
        matches!(self, Self::Draft)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

// ---------------------------------------------------------------------------
// Step completion
// ---------------------------------------------------------------------------

/// Per-step completion mark. Set when a step save passes shape validation;
/// never re-verified by later edits to other steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepCompletion {
    pub completed: bool,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// AccountHolder
// ---------------------------------------------------------------------------

/// Which signer an account holder represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolderType {
    Primary,
    Secondary,
}

impl HolderType {
    /// Prefix used when holder fields are merged into a form snapshot.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

/// A Primary or Secondary signer on an investor profile.
///
/// At most one holder exists per (document, holder type). Created lazily
/// when the corresponding wizard step is first saved, merged in place on
/// later saves, and removed only when the parent document is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountHolder {
    pub id: Uuid,
    pub holder_type: HolderType,
    pub fields: Map<String, Value>,
}

impl AccountHolder {
    pub fn new(holder_type: HolderType) -> Self {
        Self {
            id: Uuid::new_v4(),
            holder_type,
            fields: Map::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// One multi-step onboarding document.
///
/// Child collections (addresses, phones, knowledge entries) are owned
/// exclusively by the document and are replaced wholesale on every update —
/// rows have no identity across edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub kind: DocumentKind,
    pub owner: OwnerRef,
    pub status: DocumentStatus,

    /// Top-level field values, keyed by field id.
    pub fields: Map<String, Value>,

    /// Child collection rows, keyed by collection name. Full-replace on update.
    pub children: BTreeMap<String, Vec<Value>>,

    /// Primary/Secondary signers. Only populated for investor profiles.
    pub holders: Vec<AccountHolder>,

    /// Completion mark per step number.
    pub step_completion: BTreeMap<u32, StepCompletion>,

    /// Highest step ever marked completed. Drives the UI resume point only.
    pub last_completed_step: u32,

    /// Stamped on transition into `Submitted`; stale once status reverts.
    pub submitted_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(kind: DocumentKind, owner: OwnerRef) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            owner,
            status: DocumentStatus::Draft,
            fields: Map::new(),
            children: BTreeMap::new(),
            holders: Vec::new(),
            step_completion: BTreeMap::new(),
            last_completed_step: 0,
            submitted_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn holder(&self, holder_type: HolderType) -> Option<&AccountHolder> {
        self.holders.iter().find(|h| h.holder_type == holder_type)
    }

    /// Fetch the holder of the given type, creating it on first use.
    pub fn holder_mut_or_insert(&mut self, holder_type: HolderType) -> &mut AccountHolder {
        if let Some(idx) = self.holders.iter().position(|h| h.holder_type == holder_type) {
            &mut self.holders[idx]
        } else {
            self.holders.push(AccountHolder::new(holder_type));
            self.holders.last_mut().unwrap()
        }
    }

    /// Flatten the document into a single form snapshot for rule evaluation.
    ///
    /// Holder fields are merged under a `primary_`/`secondary_` prefix so
    /// visibility and requirement rules can reference them alongside
    /// top-level fields.
    pub fn snapshot(&self) -> Map<String, Value> {
        let mut snapshot = self.fields.clone();
        for holder in &self.holders {
            let prefix = holder.holder_type.prefix();
            for (name, value) in &holder.fields {
                snapshot.insert(format!("{}_{}", prefix, name), value.clone());
            }
        }
        snapshot
    }
}
