use crate::domain::transaction::Transaction;
use crate::error::{QueryError, Result};
use std::io::Read;

/// Reads transactions from a CSV source.
///
/// The header row uses the dataset field names (`mtn`, `amount`,
/// `senderFullName`, ...). Empty cells in the issue columns deserialize as
/// absent values.
pub struct TransactionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> TransactionReader<R> {
    /// Creates a new `TransactionReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes transactions.
    pub fn transactions(self) -> impl Iterator<Item = Result<Transaction>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(QueryError::from))
    }

    /// Reads every row, failing on the first malformed one.
    pub fn read_all(self) -> Result<Vec<Transaction>> {
        self.transactions().collect()
    }
}
