//! Write batches and transaction staging
//!
//! A [`WriteBatch`] is an ordered list of sets and deletes that a store
//! commits atomically; it has no read capability. A [`Transaction`] stages
//! the same write vocabulary on behalf of a transaction callback: the store
//! commits the staged writes when the callback returns `Ok`, and discards
//! them all when it returns `Err`.

use crate::core::document::{DocumentRef, Fields};

/// A single staged write.
#[derive(Clone, Debug)]
pub enum Write {
    /// Create or replace the document with the given fields.
    Set { doc: DocumentRef, fields: Fields },
    /// Delete the document (idempotent).
    Delete { doc: DocumentRef },
}

/// An atomic multi-document write: all staged operations apply together or
/// not at all.
#[derive(Clone, Debug, Default)]
pub struct WriteBatch {
    writes: Vec<Write>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a create-or-replace of `doc`.
    pub fn set(&mut self, doc: DocumentRef, fields: Fields) -> &mut Self {
        self.writes.push(Write::Set { doc, fields });
        self
    }

    /// Stage a delete of `doc`.
    pub fn delete(&mut self, doc: DocumentRef) -> &mut Self {
        self.writes.push(Write::Delete { doc });
        self
    }

    pub fn writes(&self) -> &[Write] {
        &self.writes
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

/// Write-staging handle passed to a transaction callback.
///
/// The handle cannot commit by itself; the store applies the staged writes
/// atomically after the callback returns `Ok`. Reads belong outside the
/// callback, through the normal store operations.
#[derive(Debug, Default)]
pub struct Transaction {
    staged: WriteBatch,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a create-or-replace of `doc`.
    pub fn set(&mut self, doc: DocumentRef, fields: Fields) -> &mut Self {
        self.staged.set(doc, fields);
        self
    }

    /// Stage a delete of `doc`.
    pub fn delete(&mut self, doc: DocumentRef) -> &mut Self {
        self.staged.delete(doc);
        self
    }

    /// Consume the handle, yielding the staged writes for the store to
    /// commit.
    pub fn into_batch(self) -> WriteBatch {
        self.staged
    }
}
