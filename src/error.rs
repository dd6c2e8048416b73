use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Amount overflow: {0}")]
    AmountOverflow(String),
    #[error("Data source '{source_name}' unavailable: {reason}")]
    DataSourceUnavailable { source_name: String, reason: String },
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl QueryError {
    pub fn unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::DataSourceUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;
