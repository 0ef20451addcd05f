//! The invoicing domain: models, operations, and analytical queries

mod dates;
pub mod model;
pub mod ops;
pub mod queries;

pub use model::{Invoice, InvoiceItem};
pub use ops::{InvoiceOps, TxOutcome};
pub use queries::ProductSales;
