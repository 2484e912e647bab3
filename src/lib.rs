//! # ob-docs
//!
//! Multi-step document lifecycle engine for regulated financial-onboarding
//! paperwork. Five document types — investor profile, additional account
//! holder, alternative-investment order, accreditation certification, and
//! statement of financial condition — share one generic core:
//!
//! - a draft → submitted → approved/rejected state machine, with automatic
//!   reversion to draft on any post-submission edit
//! - a step completion tracker and wizard resume point
//! - a declarative conditional-visibility and conditional-requirement rule
//!   engine (fail-closed, data-driven)
//! - singleton-per-owner document resolution (find current, else create)
//!
//! Each document type contributes only a [`descriptor::DocumentDescriptor`];
//! the state machine, validator, resolver, and orchestrator never branch on
//! the type themselves.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ob_docs::model::{DocumentKind, OwnerRef};
//! use ob_docs::orchestrator::DocumentOrchestrator;
//! use ob_docs::store::MemoryStore;
//! use serde_json::json;
//!
//! # async fn demo() -> ob_docs::error::DocResult<()> {
//! let orchestrator = DocumentOrchestrator::new(DocumentKind::AltOrder, MemoryStore::new());
//! let payload = json!({ "investment_name": "Fund IV" });
//! let (doc, created) = orchestrator
//!     .create_or_update_step1(
//!         OwnerRef::User("user-1".into()),
//!         payload.as_object().unwrap().clone(),
//!     )
//!     .await?;
//! assert!(created);
//! # Ok(())
//! # }
//! ```

// Core error handling
pub mod error;

// Domain model
pub mod model;

// Declarative rule engine
pub mod condition;
pub mod visibility;

// Step progress and lifecycle
pub mod lifecycle;
pub mod progress;

// Validation tiers
pub mod requirement;
pub mod schema;
pub mod validator;

// Per-document-type descriptors
pub mod descriptor;
pub mod descriptors;

// Persistence seam and orchestration
pub mod orchestrator;
pub mod projection;
pub mod resolver;
pub mod store;

pub use error::{DocError, DocResult};
pub use model::{Document, DocumentKind, DocumentStatus, OwnerRef};
pub use orchestrator::{DocumentOrchestrator, DocumentProgress};
