//! In-memory implementation of the document store for testing and development
//!
//! Collections are keyed by slash-joined path, documents by id. Uses RwLock
//! for thread-safe access; a batch (or a successful transaction) applies
//! under a single write lock, which gives the same all-or-nothing guarantee
//! a managed document store provides for its batch and transaction
//! primitives.
//!
//! Sub-collections are independent entries in the collection map: deleting a
//! parent document leaves its sub-collection documents in place, so cascades
//! have to be staged manually, one delete per item.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::core::batch::{Transaction, Write, WriteBatch};
use crate::core::document::{CollectionRef, Document, DocumentId, DocumentRef, Fields};
use crate::core::error::StoreError;
use crate::core::filter::{Filter, matches_all};
use crate::core::store::{DocumentStore, TxCallback};

/// Documents of one collection, keyed by id. BTreeMap keeps scan order
/// deterministic.
type Collection = BTreeMap<String, Fields>;

/// In-memory document store.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, Collection>>, StoreError> {
        self.collections.read().map_err(|e| StoreError::Backend {
            message: format!("failed to acquire read lock: {e}"),
        })
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, Collection>>, StoreError> {
        self.collections.write().map_err(|e| StoreError::Backend {
            message: format!("failed to acquire write lock: {e}"),
        })
    }

    /// Apply every write of a batch under one write lock.
    fn apply(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let mut collections = self.write()?;
        for write in batch.writes() {
            match write {
                Write::Set { doc, fields } => {
                    collections
                        .entry(doc.parent().path().to_string())
                        .or_default()
                        .insert(doc.id().as_str().to_string(), fields.clone());
                }
                Write::Delete { doc } => {
                    if let Some(collection) = collections.get_mut(doc.parent().path()) {
                        collection.remove(doc.id().as_str());
                    }
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn get(&self, doc: &DocumentRef) -> Result<Option<Document>, StoreError> {
        let collections = self.read()?;
        Ok(collections
            .get(doc.parent().path())
            .and_then(|collection| collection.get(doc.id().as_str()))
            .map(|fields| Document::new(doc.id().clone(), fields.clone())))
    }

    async fn set(&self, doc: &DocumentRef, fields: Fields) -> Result<(), StoreError> {
        let mut collections = self.write()?;
        collections
            .entry(doc.parent().path().to_string())
            .or_default()
            .insert(doc.id().as_str().to_string(), fields);
        Ok(())
    }

    async fn update(&self, doc: &DocumentRef, fields: Fields) -> Result<(), StoreError> {
        let mut collections = self.write()?;
        let existing = collections
            .get_mut(doc.parent().path())
            .and_then(|collection| collection.get_mut(doc.id().as_str()))
            .ok_or_else(|| StoreError::not_found(doc.path()))?;

        for (key, value) in fields {
            existing.insert(key, value);
        }
        Ok(())
    }

    async fn delete(&self, doc: &DocumentRef) -> Result<(), StoreError> {
        let mut collections = self.write()?;
        if let Some(collection) = collections.get_mut(doc.parent().path()) {
            collection.remove(doc.id().as_str());
        }
        Ok(())
    }

    async fn list(&self, collection: &CollectionRef) -> Result<Vec<Document>, StoreError> {
        let collections = self.read()?;
        Ok(collections
            .get(collection.path())
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document::new(DocumentId::new(id), fields.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_ids(
        &self,
        collection: &CollectionRef,
    ) -> Result<Vec<DocumentId>, StoreError> {
        let collections = self.read()?;
        Ok(collections
            .get(collection.path())
            .map(|docs| docs.keys().map(DocumentId::new).collect())
            .unwrap_or_default())
    }

    async fn query(
        &self,
        collection: &CollectionRef,
        filters: &[Filter],
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.read()?;
        Ok(collections
            .get(collection.path())
            .map(|docs| {
                docs.iter()
                    .filter(|(_, fields)| matches_all(fields, filters))
                    .map(|(id, fields)| Document::new(DocumentId::new(id), fields.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        self.apply(batch)
    }

    async fn run_transaction(&self, callback: TxCallback) -> Result<(), StoreError> {
        let mut tx = Transaction::new();
        match callback(&mut tx) {
            Ok(()) => self.apply(tx.into_batch()),
            Err(source) => {
                // Staged writes drop here; nothing reached the store.
                Err(StoreError::TransactionAborted { source })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let store = InMemoryStore::new();
        let doc = CollectionRef::new("notasFiscais").new_doc();

        store
            .set(&doc, fields(json!({ "nomeCliente": "João Silva" })))
            .await
            .unwrap();

        let stored = store.get(&doc).await.unwrap().unwrap();
        assert_eq!(stored.get("nomeCliente"), Some(&json!("João Silva")));
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = InMemoryStore::new();
        let doc = CollectionRef::new("notasFiscais").doc("missing");
        assert!(store.get(&doc).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = InMemoryStore::new();
        let doc = CollectionRef::new("notasFiscais").new_doc();
        store
            .set(&doc, fields(json!({ "a": 1, "b": 2 })))
            .await
            .unwrap();

        store.update(&doc, fields(json!({ "b": 3 }))).await.unwrap();

        let stored = store.get(&doc).await.unwrap().unwrap();
        assert_eq!(stored.get("a"), Some(&json!(1)));
        assert_eq!(stored.get("b"), Some(&json!(3)));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = InMemoryStore::new();
        let doc = CollectionRef::new("notasFiscais").doc("missing");

        let err = store.update(&doc, Fields::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = InMemoryStore::new();
        let doc = CollectionRef::new("notasFiscais").doc("missing");
        store.delete(&doc).await.unwrap();
    }

    #[tokio::test]
    async fn test_batch_applies_all_writes() {
        let store = InMemoryStore::new();
        let col = CollectionRef::new("notasFiscais");
        let (a, b) = (col.new_doc(), col.new_doc());
        store.set(&b, fields(json!({ "x": 1 }))).await.unwrap();

        let mut batch = WriteBatch::new();
        batch.set(a.clone(), fields(json!({ "x": 2 })));
        batch.delete(b.clone());
        store.commit(batch).await.unwrap();

        assert!(store.get(&a).await.unwrap().is_some());
        assert!(store.get(&b).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_parent_delete_leaves_subcollection() {
        let store = InMemoryStore::new();
        let invoice = CollectionRef::new("notasFiscais").new_doc();
        let item = invoice.collection("items").new_doc();

        store.set(&invoice, Fields::new()).await.unwrap();
        store.set(&item, Fields::new()).await.unwrap();
        store.delete(&invoice).await.unwrap();

        // The store performs no cascade; the item survives its parent.
        assert!(store.get(&item).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_transaction_commit_applies_writes() {
        let store = InMemoryStore::new();
        let col = CollectionRef::new("tx");
        let (a, b) = (col.new_doc(), col.new_doc());
        let (a2, b2) = (a.clone(), b.clone());

        store
            .run_transaction(Box::new(move |tx| {
                tx.set(a2, fields(json!({ "a": 1 })));
                tx.set(b2, fields(json!({ "a": 2 })));
                Ok(())
            }))
            .await
            .unwrap();

        assert!(store.get(&a).await.unwrap().is_some());
        assert!(store.get(&b).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_transaction_error_discards_writes() {
        let store = InMemoryStore::new();
        let col = CollectionRef::new("tx");
        let (c, d) = (col.new_doc(), col.new_doc());
        let (c2, d2) = (c.clone(), d.clone());

        let err = store
            .run_transaction(Box::new(move |tx| {
                tx.set(c2, fields(json!({ "a": 3 })));
                tx.set(d2, fields(json!({ "a": 4 })));
                anyhow::bail!("forced rollback")
            }))
            .await
            .unwrap_err();

        assert!(err.is_aborted());
        assert!(store.get(&c).await.unwrap().is_none());
        assert!(store.get(&d).await.unwrap().is_none());
        assert!(store.list(&col).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_filters_documents() {
        let store = InMemoryStore::new();
        let col = CollectionRef::new("items");
        store
            .set(&col.new_doc(), fields(json!({ "codProduto": "P001" })))
            .await
            .unwrap();
        store
            .set(&col.new_doc(), fields(json!({ "codProduto": "P002" })))
            .await
            .unwrap();

        let hits = store
            .query(&col, &[Filter::eq("codProduto", json!("P001"))])
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].get("codProduto"), Some(&json!("P001")));
    }

    #[tokio::test]
    async fn test_list_unknown_collection_is_empty() {
        let store = InMemoryStore::new();
        let col = CollectionRef::new("nothing");
        assert!(store.list(&col).await.unwrap().is_empty());
        assert!(store.list_ids(&col).await.unwrap().is_empty());
    }
}
