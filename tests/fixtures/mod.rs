//! Shared test fixtures for the integration tests
//!
//! Builds an in-memory store with the default collection layout and exposes
//! reference helpers for reaching into the persisted documents directly.

#![allow(dead_code)]

use invoice_store::prelude::*;

/// Fresh store plus an operations surface bound to it.
pub fn store_and_ops() -> (Arc<InMemoryStore>, InvoiceOps<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let ops = InvoiceOps::new(store.clone(), StoreConfig::default());
    (store, ops)
}

/// Reference to an invoice document under the default layout.
pub fn invoice_ref(id: &DocumentId) -> DocumentRef {
    CollectionRef::new("notasFiscais").doc(id.clone())
}

/// Reference to an invoice's item sub-collection under the default layout.
pub fn items_collection(id: &DocumentId) -> CollectionRef {
    invoice_ref(id).collection("items")
}

/// The flat collection used by the transaction demonstrations.
pub fn tx_collection() -> CollectionRef {
    CollectionRef::new("tx")
}

/// Fetch and deserialize an invoice, panicking when it does not exist.
pub async fn fetch_invoice(store: &InMemoryStore, id: &DocumentId) -> Invoice {
    store
        .get(&invoice_ref(id))
        .await
        .expect("store read should succeed")
        .expect("invoice should exist")
        .to()
        .expect("invoice should deserialize")
}
