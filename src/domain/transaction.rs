use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Money transfer network identifier. Not unique across rows: the same
/// transfer is reported once per associated compliance issue.
pub type TransferId = i64;
pub type IssueId = i32;

/// A single reported transfer event, optionally carrying a compliance issue.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub mtn: TransferId,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub sender_full_name: String,
    pub sender_age: u32,
    pub beneficiary_full_name: String,
    pub beneficiary_age: u32,
    #[serde(default)]
    pub issue_id: Option<IssueId>,
    #[serde(default)]
    pub issue_solved: Option<bool>,
    #[serde(default)]
    pub issue_message: Option<String>,
}

impl Transaction {
    /// An issue is open only when an issue id is present and the row is
    /// explicitly marked unsolved.
    pub fn has_open_issue(&self) -> bool {
        self.issue_id.is_some() && self.issue_solved == Some(false)
    }

    pub fn has_solved_issue(&self) -> bool {
        self.issue_id.is_some() && self.issue_solved == Some(true)
    }

    /// Whether `name` is either party of the transfer.
    pub fn involves(&self, name: &str) -> bool {
        self.sender_full_name == name || self.beneficiary_full_name == name
    }
}
