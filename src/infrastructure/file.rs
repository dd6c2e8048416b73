use crate::domain::ports::TransactionSource;
use crate::domain::snapshot::Snapshot;
use crate::domain::transaction::Transaction;
use crate::error::{QueryError, Result};
use crate::interfaces::csv::transaction_reader::TransactionReader as CsvReader;
use crate::interfaces::json::transaction_reader::TransactionReader as JsonReader;
use async_trait::async_trait;
use std::fs::File;
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;
use tokio::task::spawn_blocking;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Json,
    Csv,
}

impl DatasetFormat {
    /// `.csv` files are read as CSV, everything else as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// A transaction source backed by a dataset file on disk.
///
/// The file is read at most once: the first successful fetch publishes the
/// snapshot and later fetches reuse it. A failed load is not cached, so the
/// next fetch tries again.
pub struct FileTransactionSource {
    path: PathBuf,
    format: DatasetFormat,
    snapshot: OnceCell<Snapshot>,
}

impl FileTransactionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = DatasetFormat::from_path(&path);
        Self::with_format(path, format)
    }

    pub fn with_format(path: impl Into<PathBuf>, format: DatasetFormat) -> Self {
        Self {
            path: path.into(),
            format,
            snapshot: OnceCell::new(),
        }
    }

    async fn load(&self) -> Result<Snapshot> {
        let path = self.path.clone();
        let format = self.format;
        info!(path = %path.display(), ?format, "loading transaction dataset");

        let transactions = spawn_blocking(move || read_dataset(&path, format))
            .await
            .map_err(|error| QueryError::unavailable(self.path.display().to_string(), error))?
            .map_err(|error| QueryError::unavailable(self.path.display().to_string(), error))?;

        info!(transactions = transactions.len(), "transaction dataset loaded");
        Ok(Snapshot::new(transactions))
    }
}

fn read_dataset(path: &Path, format: DatasetFormat) -> Result<Vec<Transaction>> {
    let file = File::open(path)?;
    match format {
        DatasetFormat::Json => JsonReader::new(file).read_all(),
        DatasetFormat::Csv => CsvReader::new(file).read_all(),
    }
}

#[async_trait]
impl TransactionSource for FileTransactionSource {
    async fn fetch_all(&self) -> Result<Snapshot> {
        self.snapshot.get_or_try_init(|| self.load()).await.cloned()
    }
}
