//! The façade used by the boundary layer.
//!
//! One orchestrator per document type, generic over the persistence
//! collaborator. Every write follows the same sequence: load → revert to
//! draft if needed → shape-validate (aborting before any mutation on
//! failure) → apply field and child-collection mutations → mark the step
//! completed → persist. Saving a step is idempotent for the same payload,
//! so the caller may retry freely.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use crate::descriptor::{descriptor_for, DocumentDescriptor};
use crate::error::{DocError, DocResult};
use crate::model::{Document, DocumentKind, DocumentStatus, OwnerRef, StepCompletion};
use crate::projection;
use crate::resolver;
use crate::store::DocumentStore;
use crate::validator;
use crate::{lifecycle, progress};

/// Progress summary for the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentProgress {
    pub status: DocumentStatus,
    pub last_completed_step: u32,
    /// Where to reopen the wizard. A UI hint only.
    pub resume_step: u32,
    pub step_completion: BTreeMap<u32, StepCompletion>,
}

/// Lifecycle façade for one document type.
pub struct DocumentOrchestrator<S: DocumentStore> {
    store: S,
    descriptor: &'static DocumentDescriptor,
}

impl<S: DocumentStore> DocumentOrchestrator<S> {
    pub fn new(kind: DocumentKind, store: S) -> Self {
        Self {
            store,
            descriptor: descriptor_for(kind),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.descriptor.kind
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Upsert into the owner's singleton document via its first step.
    ///
    /// Returns the document and whether this call created it (the boundary
    /// layer answers 201 on creation, 200 thereafter).
    pub async fn create_or_update_step1(
        &self,
        owner: OwnerRef,
        payload: Map<String, Value>,
    ) -> DocResult<(Document, bool)> {
        // Shape-check before resolving so an invalid payload never creates
        // an empty document
        validator::validate_shape(self.descriptor, 1, &payload)?;

        let resolved = resolver::resolve_for_write(&self.store, self.descriptor.kind, owner).await?;
        let created = resolved.created;
        let document = self.save_step(resolved.document, 1, payload).await?;
        Ok((document, created))
    }

    /// Save one step of an existing document.
    pub async fn update_step(
        &self,
        document_id: Uuid,
        step: u32,
        payload: Map<String, Value>,
    ) -> DocResult<Document> {
        let document = self.load(document_id).await?;
        validator::validate_shape(self.descriptor, step, &payload)?;
        self.save_step(document, step, payload).await
    }

    /// Submit the document for review.
    ///
    /// Conflict unless the document is a draft; Validation (with the full
    /// violation list) unless every visible step's requirements are met.
    /// On failure the status and `submitted_at` are untouched.
    pub async fn submit(&self, document_id: Uuid) -> DocResult<Document> {
        let mut document = self.load(document_id).await?;
        lifecycle::ensure_submittable(&document)?;
        validator::validate_completeness(self.descriptor, &document)?;

        lifecycle::mark_submitted(&mut document);
        self.store.update_document(&document).await?;
        Ok(document)
    }

    /// Progress summary: status, completion map, resume point.
    pub async fn get_progress(&self, document_id: Uuid) -> DocResult<DocumentProgress> {
        let document = self.load(document_id).await?;
        Ok(DocumentProgress {
            status: document.status,
            last_completed_step: document.last_completed_step,
            resume_step: progress::resume_step(&document, self.descriptor.total_steps),
            step_completion: document.step_completion,
        })
    }

    /// Delete a draft. Deleting a submitted or reviewed document is a
    /// conflict.
    pub async fn delete(&self, document_id: Uuid) -> DocResult<()> {
        let document = self.load(document_id).await?;
        lifecycle::ensure_deletable(&document)?;
        self.store.delete_document(document_id).await?;
        info!(document_id = %document_id, "draft document deleted");
        Ok(())
    }

    /// Visibility passthroughs, consumed directly by the rendering layer.
    /// The validator uses the same rules, so what is drawn and what is
    /// required can never disagree.
    pub fn is_field_visible(&self, field: &str, snapshot: &Map<String, Value>) -> bool {
        self.descriptor.visibility.is_visible(field, snapshot)
    }

    pub fn is_step_visible(&self, step: u32, snapshot: &Map<String, Value>) -> bool {
        self.descriptor.is_step_visible(step, snapshot)
    }

    /// Violations still outstanding on one step, for in-page hints.
    pub async fn outstanding_for_step(
        &self,
        document_id: Uuid,
        step: u32,
    ) -> DocResult<Vec<String>> {
        let document = self.load(document_id).await?;
        let snapshot = document.snapshot();
        Ok(validator::check_step_requirements(
            self.descriptor,
            step,
            &snapshot,
        ))
    }

    /// Flattened string projection of the document for the PDF templating
    /// webhook. Delivery, retries, and webhook failures are the caller's
    /// concern.
    pub async fn render_projection(&self, document_id: Uuid) -> DocResult<BTreeMap<String, String>> {
        let document = self.load(document_id).await?;
        Ok(projection::flatten(&document))
    }

    async fn load(&self, document_id: Uuid) -> DocResult<Document> {
        self.store
            .load_with_children(document_id)
            .await?
            .ok_or_else(|| DocError::not_found("document", document_id))
    }

    /// Shared write path for step saves. Shape validation has already
    /// passed; nothing below may fail for reasons of payload content.
    async fn save_step(
        &self,
        mut document: Document,
        step: u32,
        payload: Map<String, Value>,
    ) -> DocResult<Document> {
        lifecycle::revert_to_draft(&mut document);

        let holder_type = self.descriptor.holder_type_for(step);
        let mut touched_collections: Vec<(String, Vec<Value>)> = Vec::new();

        for (name, value) in payload {
            if self.descriptor.is_child_collection(&name) {
                let rows = match value {
                    Value::Array(rows) => rows,
                    _ => Vec::new(),
                };
                // Holder-step collections are stored per signer
                let collection = match holder_type {
                    Some(ht) => format!("{}_{}", ht.prefix(), name),
                    None => name,
                };
                document.children.insert(collection.clone(), rows.clone());
                touched_collections.push((collection, rows));
            } else if let Some(ht) = holder_type {
                document.holder_mut_or_insert(ht).fields.insert(name, value);
            } else {
                document.fields.insert(name, value);
            }
        }

        progress::mark_completed(&mut document, step);

        self.store.update_document(&document).await?;
        for (collection, rows) in touched_collections {
            self.store
                .replace_children(document.id, &collection, rows)
                .await?;
        }

        info!(
            document_id = %document.id,
            kind = self.descriptor.kind.as_str(),
            step,
            "step saved"
        );

        self.load(document.id).await
    }
}
