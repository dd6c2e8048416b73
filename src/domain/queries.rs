//! Pure analytical queries over a transaction collection.
//!
//! Every function takes the full collection and derives its answer without
//! side effects, so calling any of them repeatedly on the same slice yields the
//! same result. An empty slice stands for both "no records" and "no dataset
//! loaded"; each query documents its default for that case.

use super::transaction::{IssueId, Transaction, TransferId};
use crate::error::{QueryError, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

fn checked_sum<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Result<Decimal> {
    transactions.into_iter().try_fold(Decimal::ZERO, add_amount)
}

fn add_amount(sum: Decimal, tx: &Transaction) -> Result<Decimal> {
    sum.checked_add(tx.amount).ok_or_else(|| {
        QueryError::AmountOverflow(format!("adding {} from transfer {}", tx.amount, tx.mtn))
    })
}

/// Sum of all amounts. Zero for an empty collection.
///
/// # Errors
///
/// Returns `QueryError::AmountOverflow` when the sum leaves the `Decimal` range.
pub fn total_amount(transactions: &[Transaction]) -> Result<Decimal> {
    checked_sum(transactions)
}

/// Sum of the amounts sent by `sender` (exact, case-sensitive match).
pub fn total_amount_sent_by(transactions: &[Transaction], sender: &str) -> Result<Decimal> {
    checked_sum(transactions.iter().filter(|tx| tx.sender_full_name == sender))
}

/// Highest single amount, or zero when there are no records.
pub fn max_amount(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .map(|tx| tx.amount)
        .max()
        .unwrap_or(Decimal::ZERO)
}

/// Number of distinct names appearing as sender or beneficiary.
///
/// A name seen in both roles is counted once.
pub fn count_unique_clients(transactions: &[Transaction]) -> usize {
    transactions
        .iter()
        .flat_map(|tx| {
            [
                tx.sender_full_name.as_str(),
                tx.beneficiary_full_name.as_str(),
            ]
        })
        .collect::<HashSet<_>>()
        .len()
}

/// Whether `client` is a party (sender or beneficiary) to at least one
/// transfer with an open compliance issue.
pub fn has_open_compliance_issue(transactions: &[Transaction], client: &str) -> bool {
    transactions
        .iter()
        .any(|tx| tx.involves(client) && tx.has_open_issue())
}

/// Groups records by beneficiary name. Each group keeps source order.
pub fn transactions_by_beneficiary(
    transactions: &[Transaction],
) -> BTreeMap<String, Vec<Transaction>> {
    let mut grouped: BTreeMap<String, Vec<Transaction>> = BTreeMap::new();
    for tx in transactions {
        grouped
            .entry(tx.beneficiary_full_name.clone())
            .or_default()
            .push(tx.clone());
    }
    grouped
}

/// Ids of all open compliance issues.
pub fn unsolved_issue_ids(transactions: &[Transaction]) -> BTreeSet<IssueId> {
    transactions
        .iter()
        .filter(|tx| tx.has_open_issue())
        .filter_map(|tx| tx.issue_id)
        .collect()
}

/// Messages of solved compliance issues in source order, duplicates included.
///
/// A solved issue without a message contributes nothing.
pub fn solved_issue_messages(transactions: &[Transaction]) -> Vec<String> {
    transactions
        .iter()
        .filter(|tx| tx.has_solved_issue())
        .filter_map(|tx| tx.issue_message.clone())
        .collect()
}

/// The `n` largest transfers, sorted by amount descending.
///
/// Rows are first deduplicated by transfer id, keeping the first row seen for
/// each id, so a transfer reported under several issues takes one slot. Equal
/// amounts keep their encounter order.
pub fn top_by_amount(transactions: &[Transaction], n: usize) -> Vec<Transaction> {
    let mut seen: HashSet<TransferId> = HashSet::new();
    let mut distinct: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| seen.insert(tx.mtn))
        .collect();

    // `sort_by` is stable
    distinct.sort_by(|a, b| b.amount.cmp(&a.amount));

    distinct.into_iter().take(n).cloned().collect()
}

pub fn top3_by_amount(transactions: &[Transaction]) -> Vec<Transaction> {
    top_by_amount(transactions, 3)
}

/// The sender with the greatest aggregate amount sent.
///
/// Ties go to the sender encountered first.
///
/// # Errors
///
/// Returns `QueryError::NotFound` when there are no records and
/// `QueryError::AmountOverflow` when a sender's total leaves the `Decimal`
/// range.
pub fn top_sender(transactions: &[Transaction]) -> Result<String> {
    let mut totals: Vec<(&str, Decimal)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for tx in transactions {
        match positions.entry(tx.sender_full_name.as_str()) {
            Entry::Occupied(entry) => {
                let total = &mut totals[*entry.get()].1;
                *total = add_amount(*total, tx)?;
            }
            Entry::Vacant(entry) => {
                entry.insert(totals.len());
                totals.push((tx.sender_full_name.as_str(), tx.amount));
            }
        }
    }

    let mut best: Option<(&str, Decimal)> = None;
    for (sender, total) in totals {
        match best {
            Some((_, best_total)) if best_total >= total => {}
            _ => best = Some((sender, total)),
        }
    }

    let (sender, _) =
        best.ok_or_else(|| QueryError::NotFound("no sender in an empty dataset".to_string()))?;
    Ok(sender.to_string())
}

/// Every aggregate over one snapshot, computed together.
#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub transaction_count: usize,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub total_amount: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub max_amount: Decimal,
    pub unique_clients: usize,
    pub unsolved_issue_ids: BTreeSet<IssueId>,
    pub solved_issue_messages: Vec<String>,
    pub top3_by_amount: Vec<Transaction>,
    pub top_sender: Option<String>,
}

pub fn summarize(transactions: &[Transaction]) -> Summary {
    Summary {
        transaction_count: transactions.len(),
        total_amount: total_amount(transactions).ok(),
        max_amount: max_amount(transactions),
        unique_clients: count_unique_clients(transactions),
        unsolved_issue_ids: unsolved_issue_ids(transactions),
        solved_issue_messages: solved_issue_messages(transactions),
        top3_by_amount: top3_by_amount(transactions),
        top_sender: top_sender(transactions).ok(),
    }
}
