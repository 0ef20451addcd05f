//! Invoice and line-item models
//!
//! The structs are serde-renamed onto the persisted field names, so a typed
//! round-trip through the store reads and writes the exact document layout
//! the collection has always held. Document ids live outside the field map,
//! on the store reference.
//!
//! Money is `rust_decimal::Decimal`, serialized as a JSON string ("2.50"),
//! which keeps sums exact: 2.50 + 15.00 is 17.00, never 16.999....

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A top-level invoice document.
///
/// Invariant at creation time: `total` equals the sum of the item unit
/// prices. The total is recomputed once, right after creation, and never
/// again after item changes; reads of `total` inherit that staleness.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Customer tax id (CPF/CNPJ).
    #[serde(rename = "cpfCnpj")]
    pub customer_tax_id: String,

    #[serde(rename = "nomeCliente")]
    pub customer_name: String,

    #[serde(rename = "enderecoEntrega")]
    pub delivery_address: String,

    /// Purchase timestamp; all query windows compare against this field.
    #[serde(rename = "dataCompra")]
    pub purchased_at: DateTime<Utc>,

    /// Stored sum of the item unit prices.
    #[serde(rename = "totalNota")]
    pub total: Decimal,
}

/// A line item owned by exactly one invoice, stored in its `items`
/// sub-collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    #[serde(rename = "codProduto")]
    pub product_code: String,

    #[serde(rename = "descrProduto")]
    pub description: String,

    /// Unit price, non-negative.
    #[serde(rename = "valorUnitario")]
    pub unit_price: Decimal,
}
