use super::transaction::Transaction;
use std::ops::Deref;
use std::sync::Arc;

/// An immutable transaction collection shared read-only between callers.
///
/// Cloning a `Snapshot` only bumps a reference count. An absent dataset is
/// represented by [`Snapshot::empty`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    transactions: Arc<[Transaction]>,
}

impl Snapshot {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: transactions.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl Deref for Snapshot {
    type Target = [Transaction];

    fn deref(&self) -> &Self::Target {
        &self.transactions
    }
}
