//! Persistence collaborator contract.
//!
//! The core only ever talks to storage through `DocumentStore`. The real
//! engine (and its transaction semantics) lives behind this trait; the crate
//! ships `MemoryStore` for tests and embedding callers.
//!
//! Concurrency note: the contract is last-write-wins. Concurrent writers to
//! the same document race on `update_document` and `replace_children`; no
//! version check is performed here.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::DocResult;
use crate::model::{Document, DocumentKind, OwnerRef};

/// Storage operations the lifecycle core depends on.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Most recently created document for an owner, if any. When duplicates
    /// exist the latest wins; the rest are ignored.
    async fn find_latest_by_owner(
        &self,
        kind: DocumentKind,
        owner: &OwnerRef,
    ) -> DocResult<Option<Document>>;

    /// Persist a brand-new document and return it.
    async fn create_document(&self, document: Document) -> DocResult<Document>;

    /// Persist everything about a document except its child collections.
    async fn update_document(&self, document: &Document) -> DocResult<()>;

    /// Delete all rows of one child collection and reinsert the supplied
    /// set. Full-replace, never a diff.
    async fn replace_children(
        &self,
        document_id: Uuid,
        collection: &str,
        rows: Vec<Value>,
    ) -> DocResult<()>;

    /// Full aggregate fetch: the document with every child relation
    /// populated.
    async fn load_with_children(&self, document_id: Uuid) -> DocResult<Option<Document>>;

    /// Delete the document and, by cascade, everything it owns.
    async fn delete_document(&self, document_id: Uuid) -> DocResult<()>;
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory store keyed by document id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<Uuid, Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_latest_by_owner(
        &self,
        kind: DocumentKind,
        owner: &OwnerRef,
    ) -> DocResult<Option<Document>> {
        let documents = self.documents.read().await;
        let latest = documents
            .values()
            .filter(|d| d.kind == kind && &d.owner == owner)
            .max_by_key(|d| d.created_at)
            .cloned();
        Ok(latest)
    }

    async fn create_document(&self, document: Document) -> DocResult<Document> {
        let mut documents = self.documents.write().await;
        documents.insert(document.id, document.clone());
        Ok(document)
    }

    async fn update_document(&self, document: &Document) -> DocResult<()> {
        let mut documents = self.documents.write().await;
        match documents.get_mut(&document.id) {
            Some(existing) => {
                let children = std::mem::take(&mut existing.children);
                *existing = document.clone();
                existing.children = children;
            }
            None => {
                documents.insert(document.id, document.clone());
            }
        }
        Ok(())
    }

    async fn replace_children(
        &self,
        document_id: Uuid,
        collection: &str,
        rows: Vec<Value>,
    ) -> DocResult<()> {
        let mut documents = self.documents.write().await;
        if let Some(document) = documents.get_mut(&document_id) {
            document.children.insert(collection.to_string(), rows);
        }
        Ok(())
    }

    async fn load_with_children(&self, document_id: Uuid) -> DocResult<Option<Document>> {
        let documents = self.documents.read().await;
        Ok(documents.get(&document_id).cloned())
    }

    async fn delete_document(&self, document_id: Uuid) -> DocResult<()> {
        let mut documents = self.documents.write().await;
        documents.remove(&document_id);
        Ok(())
    }
}
