use super::snapshot::Snapshot;
use crate::error::Result;
use async_trait::async_trait;

/// The single capability the query engine consumes: fetching every record.
///
/// Implementations either return the complete collection (possibly empty) or
/// fail as a whole with `QueryError::DataSourceUnavailable`; they never
/// return a partial snapshot.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Snapshot>;
}

pub type TransactionSourceBox = Box<dyn TransactionSource>;
pub type TransactionSourceFactory = Box<dyn Fn() -> TransactionSourceBox + Send + Sync>;
