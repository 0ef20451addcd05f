//! Core module containing the store-facing primitives

pub mod batch;
pub mod document;
pub mod error;
pub mod filter;
pub mod store;

pub use batch::{Transaction, Write, WriteBatch};
pub use document::{CollectionRef, Document, DocumentId, DocumentRef, Fields, to_fields};
pub use error::StoreError;
pub use filter::{Filter, FilterOp, matches_all};
pub use store::{DocumentStore, TxCallback};
