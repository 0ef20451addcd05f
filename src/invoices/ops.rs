//! Invoice operations: create, update, cascade delete, id listing, and the
//! transaction demonstrations
//!
//! Each operation is an independent entry point, a single linear sequence of
//! store calls. The store is an injected dependency held by [`InvoiceOps`],
//! never ambient state.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::{Value, json};

use crate::config::StoreConfig;
use crate::core::batch::WriteBatch;
use crate::core::document::{CollectionRef, DocumentId, Fields, to_fields};
use crate::core::error::StoreError;
use crate::core::store::DocumentStore;
use crate::invoices::dates::purchase_date;
use crate::invoices::model::{Invoice, InvoiceItem};

/// Fixed replacement address written by the update procedure.
const UPDATED_DELIVERY_ADDRESS: &str = "Av. B, 456";

/// Outcome of a transaction demonstration, reported as a value rather than
/// only a log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxOutcome {
    /// The callback completed; every staged write persisted together.
    Committed,
    /// The callback errored; the store discarded every staged write.
    RolledBack,
}

/// The invoicing operations surface, bound to an injected store and a
/// collection layout.
#[derive(Clone)]
pub struct InvoiceOps<S> {
    pub(crate) store: Arc<S>,
    pub(crate) config: StoreConfig,
}

impl<S: DocumentStore> InvoiceOps<S> {
    pub fn new(store: Arc<S>, config: StoreConfig) -> Self {
        Self { store, config }
    }

    pub(crate) fn invoices(&self) -> CollectionRef {
        CollectionRef::new(&self.config.invoices_collection)
    }

    fn tx_collection(&self) -> CollectionRef {
        CollectionRef::new(&self.config.tx_collection)
    }

    /// Create a new invoice dated day 15 of `month` in the fiscal year, with
    /// the fixed pair of items, and return its id.
    ///
    /// The invoice shell (total 0) and both items land in one atomic batch;
    /// the items are then re-read and their sum written back with a separate
    /// update. The two steps are not atomic as a whole: a crash in between
    /// leaves the total at 0 while items exist. The total is never
    /// recomputed after this point.
    pub async fn create_with_items(&self, month: u32) -> Result<DocumentId, StoreError> {
        let invoice_ref = self.invoices().new_doc();
        let invoice = Invoice {
            customer_tax_id: "12345678900".to_string(),
            customer_name: "João Silva".to_string(),
            delivery_address: "Rua A, 123".to_string(),
            purchased_at: purchase_date(self.config.fiscal_year, month),
            total: Decimal::ZERO,
        };

        let items_ref = invoice_ref.collection(&self.config.items_subcollection);
        let mut batch = WriteBatch::new();
        batch.set(invoice_ref.clone(), to_fields(&invoice)?);
        for item in fixture_items() {
            batch.set(items_ref.new_doc(), to_fields(&item)?);
        }
        self.store.commit(batch).await?;

        // Second round-trip: re-read the items and write the recomputed sum.
        let mut total = Decimal::ZERO;
        for doc in self.store.list(&items_ref).await? {
            total += doc.to::<InvoiceItem>()?.unit_price;
        }
        let mut patch = Fields::new();
        patch.insert("totalNota".to_string(), serde_json::to_value(total)?);
        self.store.update(&invoice_ref, patch).await?;

        tracing::info!(invoice_id = %invoice_ref.id(), %total, "invoice created");
        Ok(invoice_ref.id().clone())
    }

    /// Overwrite the delivery address of an existing invoice.
    ///
    /// Fails with [`StoreError::NotFound`] when the id does not reference an
    /// existing invoice. Items and total are untouched.
    pub async fn update_delivery_address(&self, id: &DocumentId) -> Result<(), StoreError> {
        let mut patch = Fields::new();
        patch.insert(
            "enderecoEntrega".to_string(),
            Value::String(UPDATED_DELIVERY_ADDRESS.to_string()),
        );
        self.store.update(&self.invoices().doc(id.clone()), patch).await?;

        tracing::info!(invoice_id = %id, "delivery address updated");
        Ok(())
    }

    /// Delete an invoice together with every item it owns, in one atomic
    /// batch.
    ///
    /// The store does not cascade, so the item references are listed first
    /// and each staged as a delete alongside the invoice itself. An invoice
    /// with zero items deletes through a one-op batch.
    pub async fn delete_cascade(&self, id: &DocumentId) -> Result<(), StoreError> {
        let invoice_ref = self.invoices().doc(id.clone());
        let items_ref = invoice_ref.collection(&self.config.items_subcollection);

        let mut batch = WriteBatch::new();
        for item_id in self.store.list_ids(&items_ref).await? {
            batch.delete(items_ref.doc(item_id));
        }
        batch.delete(invoice_ref);
        self.store.commit(batch).await?;

        tracing::info!(invoice_id = %id, "invoice and items deleted");
        Ok(())
    }

    /// List the ids of every invoice. Full scan, no pagination.
    pub async fn list_ids(&self) -> Result<Vec<DocumentId>, StoreError> {
        self.store.list_ids(&self.invoices()).await
    }

    /// Commit-path demonstration: one transaction staging two documents in
    /// the tx collection. Both persist together.
    pub async fn transaction_commit_demo(&self) -> Result<TxOutcome, StoreError> {
        let col = self.tx_collection();
        let (a, b) = (col.new_doc(), col.new_doc());

        self.store
            .run_transaction(Box::new(move |tx| {
                tx.set(a, demo_fields(1, "a"));
                tx.set(b, demo_fields(2, "b"));
                Ok(())
            }))
            .await?;

        tracing::info!("transaction committed");
        Ok(TxOutcome::Committed)
    }

    /// Rollback-path demonstration: one transaction staging two documents,
    /// then erroring before it concludes. The store discards both writes;
    /// the abort is absorbed here and reported as [`TxOutcome::RolledBack`].
    ///
    /// Any error other than the abort still propagates.
    pub async fn transaction_rollback_demo(&self) -> Result<TxOutcome, StoreError> {
        let col = self.tx_collection();
        let (c, d) = (col.new_doc(), col.new_doc());

        let result = self
            .store
            .run_transaction(Box::new(move |tx| {
                tx.set(c, demo_fields(3, "c"));
                tx.set(d, demo_fields(4, "d"));
                anyhow::bail!("forced rollback")
            }))
            .await;

        match result {
            Ok(()) => Ok(TxOutcome::Committed),
            Err(StoreError::TransactionAborted { source }) => {
                tracing::info!(reason = %source, "transaction rolled back");
                Ok(TxOutcome::RolledBack)
            }
            Err(err) => Err(err),
        }
    }
}

/// The fixed pair of items every created invoice carries.
fn fixture_items() -> [InvoiceItem; 2] {
    [
        InvoiceItem {
            product_code: "P001".to_string(),
            description: "Caneta Azul".to_string(),
            unit_price: Decimal::new(250, 2),
        },
        InvoiceItem {
            product_code: "P002".to_string(),
            description: "Caderno 100fls".to_string(),
            unit_price: Decimal::new(1500, 2),
        },
    ]
}

fn demo_fields(a: i64, b: &str) -> Fields {
    match json!({ "a": a, "b": b }) {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}
