//! Integration tests for the transaction demonstrations: the commit path
//! persists both staged documents, the rollback path persists neither.

mod fixtures;

use fixtures::*;
use invoice_store::prelude::*;

#[tokio::test]
async fn commit_demo_persists_both_documents() {
    let (store, ops) = store_and_ops();

    let outcome = ops.transaction_commit_demo().await.unwrap();

    assert_eq!(outcome, TxOutcome::Committed);
    let docs = store.list(&tx_collection()).await.unwrap();
    assert_eq!(docs.len(), 2);
    for doc in &docs {
        assert!(doc.get("a").is_some());
        assert!(doc.get("b").is_some());
    }
}

#[tokio::test]
async fn rollback_demo_persists_nothing() {
    let (store, ops) = store_and_ops();

    let outcome = ops.transaction_rollback_demo().await.unwrap();

    assert_eq!(outcome, TxOutcome::RolledBack);
    assert!(store.list(&tx_collection()).await.unwrap().is_empty());
}

#[tokio::test]
async fn rollback_after_commit_leaves_committed_documents() {
    let (store, ops) = store_and_ops();

    ops.transaction_commit_demo().await.unwrap();
    let outcome = ops.transaction_rollback_demo().await.unwrap();

    assert_eq!(outcome, TxOutcome::RolledBack);
    // Only the committed pair survives.
    assert_eq!(store.list(&tx_collection()).await.unwrap().len(), 2);
}

#[tokio::test]
async fn rollback_demo_does_not_surface_the_forced_error() {
    let (_, ops) = store_and_ops();

    // The abort is absorbed into the outcome value; the call itself is Ok.
    let result = ops.transaction_rollback_demo().await;
    assert!(result.is_ok());
}
