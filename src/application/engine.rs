use crate::domain::ports::TransactionSourceBox;
use crate::domain::queries::{self, Summary};
use crate::domain::snapshot::Snapshot;
use crate::domain::transaction::{IssueId, Transaction};
use crate::error::Result;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// The entry point for answering analytical questions about transactions.
///
/// `TransactionQueryEngine` owns a [`TransactionSource`](crate::domain::ports::TransactionSource)
/// and fetches a fresh snapshot for every query, so a failing source fails
/// each query with the source's error. Callers that want several answers
/// from the same data should take a [`snapshot`](Self::snapshot) once and use
/// [`crate::domain::queries`] directly.
pub struct TransactionQueryEngine {
    source: TransactionSourceBox,
}

impl TransactionQueryEngine {
    /// Creates a new `TransactionQueryEngine` reading from `source`.
    pub fn new(source: TransactionSourceBox) -> Self {
        Self { source }
    }

    /// Fetches the current snapshot from the underlying source.
    pub async fn snapshot(&self) -> Result<Snapshot> {
        let snapshot = self.source.fetch_all().await?;
        debug!(transactions = snapshot.len(), "fetched transaction snapshot");
        Ok(snapshot)
    }

    /// # Errors
    ///
    /// Returns `QueryError::AmountOverflow` when the sum leaves the `Decimal` range.
    pub async fn total_amount(&self) -> Result<Decimal> {
        queries::total_amount(&self.snapshot().await?)
    }

    pub async fn total_amount_sent_by(&self, sender: &str) -> Result<Decimal> {
        queries::total_amount_sent_by(&self.snapshot().await?, sender)
    }

    pub async fn max_amount(&self) -> Result<Decimal> {
        Ok(queries::max_amount(&self.snapshot().await?))
    }

    pub async fn count_unique_clients(&self) -> Result<usize> {
        Ok(queries::count_unique_clients(&self.snapshot().await?))
    }

    pub async fn has_open_compliance_issue(&self, client: &str) -> Result<bool> {
        Ok(queries::has_open_compliance_issue(&self.snapshot().await?, client))
    }

    pub async fn transactions_by_beneficiary(&self) -> Result<BTreeMap<String, Vec<Transaction>>> {
        Ok(queries::transactions_by_beneficiary(&self.snapshot().await?))
    }

    pub async fn unsolved_issue_ids(&self) -> Result<BTreeSet<IssueId>> {
        Ok(queries::unsolved_issue_ids(&self.snapshot().await?))
    }

    pub async fn solved_issue_messages(&self) -> Result<Vec<String>> {
        Ok(queries::solved_issue_messages(&self.snapshot().await?))
    }

    pub async fn top_by_amount(&self, n: usize) -> Result<Vec<Transaction>> {
        Ok(queries::top_by_amount(&self.snapshot().await?, n))
    }

    pub async fn top3_by_amount(&self) -> Result<Vec<Transaction>> {
        Ok(queries::top3_by_amount(&self.snapshot().await?))
    }

    /// # Errors
    ///
    /// Returns `QueryError::NotFound` when the source holds no records and
    /// `QueryError::AmountOverflow` when a sender's total leaves the `Decimal` range.
    pub async fn top_sender(&self) -> Result<String> {
        queries::top_sender(&self.snapshot().await?)
    }

    pub async fn summary(&self) -> Result<Summary> {
        Ok(queries::summarize(&self.snapshot().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::TransactionSource;
    use crate::domain::transaction::TransferId;
    use crate::error::QueryError;
    use crate::infrastructure::in_memory::InMemoryTransactionSource;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    struct UnavailableSource;

    #[async_trait]
    impl TransactionSource for UnavailableSource {
        async fn fetch_all(&self) -> Result<Snapshot> {
            Err(QueryError::unavailable("test", "connection refused"))
        }
    }

    fn transaction(
        mtn: TransferId,
        amount: Decimal,
        sender: &str,
        beneficiary: &str,
    ) -> Transaction {
        Transaction {
            mtn,
            amount,
            sender_full_name: sender.to_string(),
            sender_age: 30,
            beneficiary_full_name: beneficiary.to_string(),
            beneficiary_age: 40,
            issue_id: None,
            issue_solved: Some(true),
            issue_message: None,
        }
    }

    fn engine() -> TransactionQueryEngine {
        TransactionQueryEngine::new(Box::new(InMemoryTransactionSource::new(vec![
            transaction(1, dec!(20.5), "Grace Burgess", "Tom Shelby"),
            transaction(2, dec!(10.0), "Tom Shelby", "Grace Burgess"),
            transaction(2, dec!(10.0), "Tom Shelby", "Grace Burgess"),
        ])))
    }

    #[tokio::test]
    async fn test_engine_delegates_to_queries() {
        let engine = engine();

        assert_eq!(engine.total_amount().await.unwrap(), dec!(40.5));
        assert_eq!(
            engine.total_amount_sent_by("Tom Shelby").await.unwrap(),
            dec!(20.0)
        );
        assert_eq!(engine.max_amount().await.unwrap(), dec!(20.5));
        assert_eq!(engine.count_unique_clients().await.unwrap(), 2);
        assert!(!engine.has_open_compliance_issue("Tom Shelby").await.unwrap());
        let grouped = engine.transactions_by_beneficiary().await.unwrap();
        assert_eq!(grouped["Grace Burgess"].len(), 2);
        assert_eq!(engine.top3_by_amount().await.unwrap().len(), 2);
        assert_eq!(engine.top_by_amount(1).await.unwrap()[0].mtn, 1);
        assert_eq!(engine.top_sender().await.unwrap(), "Grace Burgess");
    }

    #[tokio::test]
    async fn test_repeated_queries_are_identical() {
        let engine = engine();

        let first = engine.summary().await.unwrap();
        let second = engine.summary().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_unloaded_dataset_yields_defaults() {
        let engine = TransactionQueryEngine::new(Box::new(InMemoryTransactionSource::unloaded()));

        assert_eq!(engine.total_amount().await.unwrap(), Decimal::ZERO);
        assert_eq!(engine.max_amount().await.unwrap(), Decimal::ZERO);
        assert_eq!(engine.count_unique_clients().await.unwrap(), 0);
        assert!(engine.unsolved_issue_ids().await.unwrap().is_empty());
        assert!(engine.solved_issue_messages().await.unwrap().is_empty());
        assert!(matches!(engine.top_sender().await, Err(QueryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_amount_overflow_is_propagated() {
        let engine = TransactionQueryEngine::new(Box::new(InMemoryTransactionSource::new(vec![
            transaction(1, Decimal::MAX, "Tom Shelby", "Grace Burgess"),
            transaction(2, Decimal::MAX, "Tom Shelby", "Grace Burgess"),
        ])));

        assert!(matches!(
            engine.total_amount().await,
            Err(QueryError::AmountOverflow(_))
        ));
        assert!(matches!(
            engine.total_amount_sent_by("Tom Shelby").await,
            Err(QueryError::AmountOverflow(_))
        ));
        assert!(matches!(
            engine.top_sender().await,
            Err(QueryError::AmountOverflow(_))
        ));
        assert_eq!(engine.max_amount().await.unwrap(), Decimal::MAX);
    }

    #[tokio::test]
    async fn test_unavailable_source_fails_every_query() {
        let engine = TransactionQueryEngine::new(Box::new(UnavailableSource));

        assert!(matches!(
            engine.total_amount().await,
            Err(QueryError::DataSourceUnavailable { .. })
        ));
        assert!(matches!(
            engine.has_open_compliance_issue("Tom Shelby").await,
            Err(QueryError::DataSourceUnavailable { .. })
        ));
        assert!(matches!(
            engine.top_sender().await,
            Err(QueryError::DataSourceUnavailable { .. })
        ));
        assert!(engine.summary().await.is_err());
    }
}
