//! End-to-end walkthrough of the invoicing operations
//!
//! Runs every procedure in sequence against an in-memory store: create an
//! invoice with its items, list ids, update the delivery address, run both
//! transaction demonstrations, run the three analytical queries, and finally
//! delete the invoice cascade.
//!
//! ```bash
//! cargo run --example invoice_ops
//! ```

use invoice_store::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let store = Arc::new(InMemoryStore::new());
    let config = StoreConfig::default();
    let invoices = CollectionRef::new(&config.invoices_collection);
    let ops = InvoiceOps::new(store.clone(), config);

    // Create one invoice per demonstrated month.
    let january_id = ops.create_with_items(1).await?;
    ops.create_with_items(1).await?;
    ops.create_with_items(3).await?;

    let ids = ops.list_ids().await?;
    tracing::info!(count = ids.len(), "existing invoices");

    ops.update_delivery_address(&january_id).await?;
    if let Some(doc) = store.get(&invoices.doc(january_id.clone())).await? {
        let invoice: Invoice = doc.to()?;
        tracing::info!(
            address = %invoice.delivery_address,
            total = %invoice.total,
            "invoice after update"
        );
    }

    let committed = ops.transaction_commit_demo().await?;
    let rolled_back = ops.transaction_rollback_demo().await?;
    tracing::info!(?committed, ?rolled_back, "transaction demonstrations");

    let per_month = ops.invoices_per_month().await?;
    for (month, count) in &per_month {
        tracing::info!(month = %month, count = *count, "invoices per month");
    }

    let sales = ops.product_sales("P001").await?;
    tracing::info!(
        quantity = sales.quantity,
        total = %sales.total,
        "P001 sales in January"
    );

    let revenue = ops.monthly_revenue(1).await?;
    tracing::info!(revenue = %format!("{revenue:.2}"), "January revenue");

    ops.delete_cascade(&january_id).await?;
    tracing::info!(remaining = ops.list_ids().await?.len(), "after cascade delete");

    Ok(())
}
