//! Singleton-per-owner document resolution.
//!
//! At most one live document of a given type exists per owner, regardless of
//! status. "Create" is therefore an upsert: the first call creates a draft,
//! every later call reopens the same document (reverting it to draft if a
//! reviewer had already moved it on). The invariant is enforced
//! procedurally — lookup then branch — matching the persistence contract's
//! `find_latest_by_owner`.

use tracing::{debug, info};

use crate::error::DocResult;
use crate::lifecycle;
use crate::model::{Document, DocumentKind, OwnerRef};
use crate::store::DocumentStore;

/// Outcome of resolving an owner's document for a write.
pub struct Resolved {
    pub document: Document,
    /// Whether a brand-new document was created by this resolution.
    pub created: bool,
}

/// Find the owner's current document, reverting it to draft if needed, or
/// create a fresh draft.
pub async fn resolve_for_write(
    store: &dyn DocumentStore,
    kind: DocumentKind,
    owner: OwnerRef,
) -> DocResult<Resolved> {
    if let Some(mut document) = store.find_latest_by_owner(kind, &owner).await? {
        debug!(document_id = %document.id, kind = kind.as_str(), "resolved existing document");
        // A resubmission reopens the existing document, never duplicates it
        lifecycle::revert_to_draft(&mut document);
        return Ok(Resolved {
            document,
            created: false,
        });
    }

    let document = store.create_document(Document::new(kind, owner)).await?;
    info!(document_id = %document.id, kind = kind.as_str(), "created new draft document");
    Ok(Resolved {
        document,
        created: true,
    })
}
