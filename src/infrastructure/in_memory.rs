use crate::domain::ports::TransactionSource;
use crate::domain::snapshot::Snapshot;
use crate::domain::transaction::Transaction;
use crate::error::Result;
use async_trait::async_trait;

/// A transaction source serving a fixed, already loaded snapshot.
///
/// Every fetch hands out a clone of the same `Arc`-backed snapshot, so
/// concurrent callers share the records without copying or locking.
/// Ideal for testing or for datasets loaded by the caller.
#[derive(Default, Clone)]
pub struct InMemoryTransactionSource {
    snapshot: Snapshot,
}

impl InMemoryTransactionSource {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            snapshot: Snapshot::new(transactions),
        }
    }

    /// A source for which no dataset was ever loaded.
    pub fn unloaded() -> Self {
        Self {
            snapshot: Snapshot::empty(),
        }
    }
}

#[async_trait]
impl TransactionSource for InMemoryTransactionSource {
    async fn fetch_all(&self) -> Result<Snapshot> {
        Ok(self.snapshot.clone())
    }
}
