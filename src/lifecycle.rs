//! Document status state machine.
//!
//! ## State Machine
//!
//! ```text
//!             submit              approve
//! Draft ────────────► Submitted ─────────► Approved
//!   ▲                     │    ╲  reject
//!   │      edit any step  │     ╲────────► Rejected
//!   └─────────────────────┴──────────────────┘
//! ```
//!
//! - Documents are created in `Draft` and may only be edited or deleted
//!   while in `Draft`.
//! - Any edit while `Submitted`, `Approved`, or `Rejected` silently reverts
//!   the document to `Draft` — there is no locked terminal state from the
//!   editor's perspective, and no separate withdraw transition.
//! - `submit` is only legal from `Draft`; completeness checking is the
//!   caller's job and happens between the precondition and the stamp.
//! - `approve`/`reject` are only legal from `Submitted`.

use chrono::Utc;
use tracing::info;

use crate::error::{DocError, DocResult};
use crate::model::{Document, DocumentStatus};

/// Revert a non-draft document to `Draft` ahead of an edit.
///
/// Silent by design: no error, no notification. Returns whether a reversion
/// actually happened. `submitted_at` is left in place and simply goes stale.
pub fn revert_to_draft(document: &mut Document) -> bool {
    if document.status.is_draft() {
        return false;
    }
    info!(
        document_id = %document.id,
        from = document.status.as_str(),
        "reverting document to draft on edit"
    );
    document.status = DocumentStatus::Draft;
    true
}

/// Precondition for `submit`: the document must be in `Draft`.
pub fn ensure_submittable(document: &Document) -> DocResult<()> {
    if document.status.is_draft() {
        Ok(())
    } else {
        Err(DocError::conflict("document is not in draft status"))
    }
}

/// Stamp a successful submission. Only called after the completeness check
/// has passed.
pub fn mark_submitted(document: &mut Document) {
    document.status = DocumentStatus::Submitted;
    document.submitted_at = Some(Utc::now());
    info!(document_id = %document.id, "document submitted");
}

/// Reviewer transition: `Submitted` → `Approved`.
pub fn approve(document: &mut Document) -> DocResult<()> {
    review_transition(document, DocumentStatus::Approved)
}

/// Reviewer transition: `Submitted` → `Rejected`.
pub fn reject(document: &mut Document) -> DocResult<()> {
    review_transition(document, DocumentStatus::Rejected)
}

fn review_transition(document: &mut Document, to: DocumentStatus) -> DocResult<()> {
    if document.status != DocumentStatus::Submitted {
        return Err(DocError::conflict(format!(
            "cannot move document from {} to {}",
            document.status.as_str(),
            to.as_str()
        )));
    }
    info!(document_id = %document.id, to = to.as_str(), "review decision recorded");
    document.status = to;
    Ok(())
}

/// Precondition for `delete`: only drafts may be deleted.
pub fn ensure_deletable(document: &Document) -> DocResult<()> {
    if document.status.is_draft() {
        Ok(())
    } else {
        Err(DocError::conflict(format!(
            "cannot delete a {} document",
            document.status.as_str()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentKind, OwnerRef};

    fn doc() -> Document {
        Document::new(DocumentKind::Statement, OwnerRef::User("u1".into()))
    }

    #[test]
    fn test_revert_is_noop_on_draft() {
        let mut doc = doc();
        assert!(!revert_to_draft(&mut doc));
        assert_eq!(doc.status, DocumentStatus::Draft);
    }

    #[test]
    fn test_revert_from_every_non_draft_status() {
        for status in [
            DocumentStatus::Submitted,
            DocumentStatus::Approved,
            DocumentStatus::Rejected,
        ] {
            let mut doc = doc();
            doc.status = status;
            assert!(revert_to_draft(&mut doc));
            assert_eq!(doc.status, DocumentStatus::Draft);
        }
    }

    #[test]
    fn test_submit_requires_draft() {
        let mut doc = doc();
        assert!(ensure_submittable(&doc).is_ok());

        mark_submitted(&mut doc);
        assert_eq!(doc.status, DocumentStatus::Submitted);
        assert!(doc.submitted_at.is_some());
        assert!(matches!(
            ensure_submittable(&doc),
            Err(DocError::Conflict(_))
        ));
    }

    #[test]
    fn test_review_only_from_submitted() {
        let mut doc = doc();
        assert!(approve(&mut doc).is_err());
        assert!(reject(&mut doc).is_err());

        mark_submitted(&mut doc);
        assert!(approve(&mut doc).is_ok());
        assert_eq!(doc.status, DocumentStatus::Approved);

        // Already approved, no second decision
        assert!(reject(&mut doc).is_err());
    }

    #[test]
    fn test_delete_only_from_draft() {
        let mut doc = doc();
        assert!(ensure_deletable(&doc).is_ok());
        mark_submitted(&mut doc);
        assert!(matches!(ensure_deletable(&doc), Err(DocError::Conflict(_))));
    }
}
