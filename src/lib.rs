//! # invoice-store
//!
//! Invoice operations over a document store: CRUD, atomic batches,
//! transactions, and monthly sales queries.
//!
//! ## Features
//!
//! - **Store seam**: a [`core::DocumentStore`] trait modeling a managed
//!   document database (get/set/update/delete, full-collection scans,
//!   filtered queries, atomic multi-document batches, transactions)
//! - **In-memory backend**: thread-safe [`storage::InMemoryStore`] honoring
//!   the same batch/transaction atomicity contract
//! - **Invoicing surface**: independent procedures over invoices and their
//!   item sub-collections (create-with-items, address update, cascade
//!   delete, id listing)
//! - **Analytical queries**: invoices per month, product sales in the fixed
//!   January window, revenue for a chosen month
//! - **Explicit transaction outcomes**: the commit/rollback demonstrations
//!   report [`invoices::TxOutcome`] instead of only logging
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use invoice_store::prelude::*;
//!
//! let store = Arc::new(InMemoryStore::new());
//! let ops = InvoiceOps::new(store, StoreConfig::default());
//!
//! let id = ops.create_with_items(1).await?;   // January invoice, total 17.00
//! ops.update_delivery_address(&id).await?;
//! let per_month = ops.invoices_per_month().await?;
//! ops.delete_cascade(&id).await?;
//! ```

pub mod config;
pub mod core;
pub mod invoices;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        CollectionRef, Document, DocumentId, DocumentRef, DocumentStore, Fields, Filter,
        FilterOp, StoreError, Transaction, WriteBatch, to_fields,
    };

    // === Storage ===
    pub use crate::storage::InMemoryStore;

    // === Domain ===
    pub use crate::invoices::{Invoice, InvoiceItem, InvoiceOps, ProductSales, TxOutcome};

    // === Config ===
    pub use crate::config::StoreConfig;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use rust_decimal::Decimal;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
