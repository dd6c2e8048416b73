#![allow(dead_code)]

use rust_decimal::Decimal;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use transaction_insights::domain::transaction::{IssueId, Transaction, TransferId};

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn transaction(
    mtn: TransferId,
    amount: Decimal,
    sender: &str,
    beneficiary: &str,
    issue: Option<(IssueId, bool)>,
) -> Transaction {
    Transaction {
        mtn,
        amount,
        sender_full_name: sender.to_string(),
        sender_age: 30,
        beneficiary_full_name: beneficiary.to_string(),
        beneficiary_age: 40,
        issue_id: issue.map(|(id, _)| id),
        issue_solved: Some(issue.is_none_or(|(_, solved)| solved)),
        issue_message: issue.map(|(id, _)| format!("issue {id}")),
    }
}

/// Writes `contents` to a temporary file carrying the given extension.
pub fn dataset_file(contents: &str, extension: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(&format!(".{extension}"))
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
