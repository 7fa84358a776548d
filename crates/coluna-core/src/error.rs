use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ColunaError {
    #[error("no textual/string columns found")]
    NoTextualColumns,

    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("column '{0}' not found in dataset")]
    UnknownColumn(String),

    #[error("failed to load spreadsheet from {path}: {reason}")]
    Load { path: PathBuf, reason: String },

    #[error("unsupported spreadsheet format: {0}. Supported: csv, txt, xlsx, xlsm, xlsb, xls, ods")]
    UnsupportedFormat(String),

    #[error("failed to load detector config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid detector config: {0}")]
    ConfigInvalid(String),

    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
