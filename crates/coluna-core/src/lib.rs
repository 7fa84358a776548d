pub mod brazil;
pub mod config;
pub mod contacts;
pub mod detect;
pub mod error;
pub mod load;
pub mod model;
pub mod names;
pub mod ner;
pub mod normalize;

pub use brazil::{is_valid_cnpj, is_valid_cpf};
pub use detect::outcome::{ColumnDetection, DetectionReport, ScoreTable, Target};
pub use detect::ColumnClassifier;
pub use error::ColunaError;
pub use model::{Cell, Column, Dataset};

/// Detect the column holding a person's full name, with the default
/// configuration and built-in recognizer.
pub fn detect_name_column(dataset: &Dataset) -> Result<ColumnDetection, ColunaError> {
    ColumnClassifier::default().detect_name(dataset)
}

/// Detect the column holding Brazilian phone numbers.
pub fn detect_brazil_phone_column(dataset: &Dataset) -> Result<ColumnDetection, ColunaError> {
    ColumnClassifier::default().detect_phone(dataset)
}

/// Detect the column holding the passive pole's CPF/CNPJ.
pub fn detect_passive_pole_document_column(
    dataset: &Dataset,
) -> Result<ColumnDetection, ColunaError> {
    ColumnClassifier::default().detect_document(dataset)
}

/// Run all three detectors over one dataset.
pub fn detect_columns(dataset: &Dataset) -> Result<DetectionReport, ColunaError> {
    ColumnClassifier::default().detect_all(dataset)
}
