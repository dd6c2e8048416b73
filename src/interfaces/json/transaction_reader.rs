use crate::domain::transaction::Transaction;
use crate::error::Result;
use std::io::{BufReader, Read};

/// Reads a JSON document holding an array of transaction records.
///
/// A document consisting of `null` means no dataset was published and reads
/// as an empty collection.
pub struct TransactionReader<R: Read> {
    source: BufReader<R>,
}

impl<R: Read> TransactionReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source: BufReader::new(source),
        }
    }

    pub fn read_all(self) -> Result<Vec<Transaction>> {
        let transactions: Option<Vec<Transaction>> = serde_json::from_reader(self.source)?;
        Ok(transactions.unwrap_or_default())
    }
}
