//! Analytical queries over the invoice collection
//!
//! Three read-only procedures: invoices bucketed per month, sales of one
//! product inside the fixed January window, and revenue for a chosen month.
//! The month windows are half-open, `[month start, next month start)`.

use chrono::{DateTime, Datelike, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::core::error::StoreError;
use crate::core::filter::Filter;
use crate::core::store::DocumentStore;
use crate::invoices::dates::month_start;
use crate::invoices::model::{Invoice, InvoiceItem};
use crate::invoices::ops::InvoiceOps;

/// Accumulated sales of one product code within a query window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductSales {
    /// Number of matching items.
    pub quantity: u64,
    /// Sum of the matching items' unit prices.
    pub total: Decimal,
}

impl<S: DocumentStore> InvoiceOps<S> {
    /// Count invoices per `"year-month"` bucket of their purchase timestamp.
    ///
    /// Reads the whole collection in one retrieval; buckets appear in scan
    /// order, keyed with the month unpadded ("2025-1").
    pub async fn invoices_per_month(&self) -> Result<IndexMap<String, u64>, StoreError> {
        let mut counts = IndexMap::new();
        for doc in self.store.list(&self.invoices()).await? {
            let invoice: Invoice = doc.to()?;
            let purchased = invoice.purchased_at;
            let key = format!("{}-{}", purchased.year(), purchased.month());
            *counts.entry(key).or_insert(0u64) += 1;
        }
        Ok(counts)
    }

    /// Count and sum the sales of `product_code` across invoices purchased
    /// in January of the fiscal year.
    ///
    /// One item query runs per invoice in the window. Fine while item counts
    /// stay small; at scale the per-invoice round-trips dominate latency.
    pub async fn product_sales(&self, product_code: &str) -> Result<ProductSales, StoreError> {
        let start = month_start(self.config.fiscal_year, 1);
        let end = month_start(self.config.fiscal_year, 2);
        let invoices = self.invoices_in_window(start, end).await?;

        let mut sales = ProductSales::default();
        for doc in &invoices {
            let items_ref = self
                .invoices()
                .doc(doc.id().clone())
                .collection(&self.config.items_subcollection);
            let matches = self
                .store
                .query(
                    &items_ref,
                    &[Filter::eq(
                        "codProduto",
                        Value::String(product_code.to_string()),
                    )],
                )
                .await?;

            sales.quantity += matches.len() as u64;
            for item in matches {
                sales.total += item.to::<InvoiceItem>()?.unit_price;
            }
        }

        tracing::debug!(
            product_code,
            quantity = sales.quantity,
            total = %sales.total,
            "product sales accumulated"
        );
        Ok(sales)
    }

    /// Sum the stored totals of every invoice purchased in `month` of the
    /// fiscal year.
    ///
    /// Sums `totalNota` as stored, without recomputing from items, so a
    /// total gone stale since creation is reported as-is.
    pub async fn monthly_revenue(&self, month: u32) -> Result<Decimal, StoreError> {
        let start = month_start(self.config.fiscal_year, month);
        let end = month_start(self.config.fiscal_year, month + 1);

        let mut revenue = Decimal::ZERO;
        for doc in self.invoices_in_window(start, end).await? {
            revenue += doc.to::<Invoice>()?.total;
        }
        Ok(revenue)
    }

    /// Invoices whose purchase timestamp falls in `[start, end)`.
    async fn invoices_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<crate::core::document::Document>, StoreError> {
        self.store
            .query(
                &self.invoices(),
                &[
                    Filter::gte("dataCompra", serde_json::to_value(start)?),
                    Filter::lt("dataCompra", serde_json::to_value(end)?),
                ],
            )
            .await
    }
}
