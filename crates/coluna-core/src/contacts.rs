use serde::{Deserialize, Serialize};

use crate::brazil::{BrPhone, Document};
use crate::detect::outcome::DetectionReport;
use crate::error::ColunaError;
use crate::model::{Column, Dataset};

/// One row of the detected name/document/phone columns, normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Zero-based data row.
    pub row: usize,
    pub name: Option<String>,
    /// The document cell as written.
    pub document_raw: Option<String>,
    /// Present when the cell holds 11 or 14 digits.
    pub document: Option<Document>,
    pub document_valid: bool,
    pub phone: Option<BrPhone>,
}

impl Contact {
    /// A document cell was filled but does not hold a valid CPF/CNPJ.
    /// Rows with no document at all do not count.
    pub fn has_invalid_document(&self) -> bool {
        self.document_raw.is_some() && !self.document_valid
    }
}

/// Walk the rows of the three detected columns and normalize each one.
/// Rows where all three cells are missing are skipped.
pub fn extract_contacts(
    dataset: &Dataset,
    report: &DetectionReport,
) -> Result<Vec<Contact>, ColunaError> {
    let name = lookup(dataset, &report.name.best)?;
    let document = lookup(dataset, &report.document.best)?;
    let phone = lookup(dataset, &report.phone.best)?;

    let text_at = |column: &Column, row: usize| {
        column.cells[row]
            .to_text()
            .map(|s| s.trim().to_string())
    };

    let mut contacts = Vec::new();
    for row in 0..dataset.row_count() {
        let name = text_at(name, row);
        let document_raw = text_at(document, row);
        let phone_raw = text_at(phone, row);
        if name.is_none() && document_raw.is_none() && phone_raw.is_none() {
            continue;
        }

        let parsed = document_raw.as_deref().and_then(|d| Document::parse(d).ok());
        contacts.push(Contact {
            row,
            name,
            document_valid: parsed.as_ref().is_some_and(Document::is_valid),
            document: parsed,
            document_raw,
            phone: phone_raw.as_deref().map(BrPhone::parse),
        });
    }

    let invalid = contacts
        .iter()
        .filter(|c| c.has_invalid_document())
        .count();
    tracing::info!(contacts = contacts.len(), invalid_documents = invalid, "extracted contacts");
    Ok(contacts)
}

fn lookup<'a>(dataset: &'a Dataset, name: &str) -> Result<&'a Column, ColunaError> {
    dataset
        .column(name)
        .ok_or_else(|| ColunaError::UnknownColumn(name.to_string()))
}
