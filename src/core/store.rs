//! The document store trait
//!
//! [`DocumentStore`] is the seam between the invoicing operations and
//! whatever backend holds the documents. The crate ships an in-memory
//! backend; a managed cloud store plugs in behind the same trait. All
//! operations are asynchronous and strictly sequential within one procedure:
//! each call completes before the next statement runs.

use async_trait::async_trait;

use crate::core::batch::{Transaction, WriteBatch};
use crate::core::document::{CollectionRef, Document, DocumentId, DocumentRef, Fields};
use crate::core::error::StoreError;
use crate::core::filter::Filter;

/// Callback handed to [`DocumentStore::run_transaction`].
///
/// Returning `Err` aborts the transaction: the store discards every staged
/// write and surfaces [`StoreError::TransactionAborted`] carrying the error.
pub type TxCallback = Box<dyn FnOnce(&mut Transaction) -> anyhow::Result<()> + Send>;

/// A document database exposing collections of id-keyed documents, atomic
/// multi-document batches, and transactions.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document. `Ok(None)` when it does not exist.
    async fn get(&self, doc: &DocumentRef) -> Result<Option<Document>, StoreError>;

    /// Create or replace a document.
    async fn set(&self, doc: &DocumentRef, fields: Fields) -> Result<(), StoreError>;

    /// Merge fields into an existing document.
    ///
    /// Fails with [`StoreError::NotFound`] when the document does not exist.
    async fn update(&self, doc: &DocumentRef, fields: Fields) -> Result<(), StoreError>;

    /// Delete a document. Deleting a missing document is not an error.
    async fn delete(&self, doc: &DocumentRef) -> Result<(), StoreError>;

    /// Fetch every document in a collection.
    ///
    /// Full scan with no pagination: the whole collection is assumed to fit
    /// in one retrieval.
    async fn list(&self, collection: &CollectionRef) -> Result<Vec<Document>, StoreError>;

    /// List the ids of every document in a collection (same scan limit as
    /// [`DocumentStore::list`]).
    async fn list_ids(
        &self,
        collection: &CollectionRef,
    ) -> Result<Vec<DocumentId>, StoreError>;

    /// Fetch the documents of a collection satisfying every filter.
    async fn query(
        &self,
        collection: &CollectionRef,
        filters: &[Filter],
    ) -> Result<Vec<Document>, StoreError>;

    /// Apply a write batch atomically: every staged set/delete lands
    /// together, or none do.
    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;

    /// Run `callback` with a write-staging transaction handle.
    ///
    /// On `Ok` the staged writes commit atomically; on `Err` they are all
    /// discarded and the error surfaces as
    /// [`StoreError::TransactionAborted`].
    async fn run_transaction(&self, callback: TxCallback) -> Result<(), StoreError>;
}
