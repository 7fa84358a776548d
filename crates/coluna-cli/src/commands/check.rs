use coluna_core::brazil::{BrPhone, Document};
use coluna_core::error::ColunaError;
use serde::Serialize;

use crate::output;

/// One `coluna document` result.
#[derive(Debug, Serialize)]
pub struct DocumentCheck {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
    pub formatted: Option<String>,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentCheck {
    pub fn new(input: &str) -> Self {
        match Document::parse(input) {
            Ok(doc) => DocumentCheck {
                input: input.to_string(),
                formatted: Some(doc.formatted()),
                valid: doc.is_valid(),
                document: Some(doc),
                error: None,
            },
            Err(e) => DocumentCheck {
                input: input.to_string(),
                document: None,
                formatted: None,
                valid: false,
                error: Some(e.to_string()),
            },
        }
    }
}

pub fn documents(values: &[String], output_format: &str) -> Result<(), ColunaError> {
    let checks: Vec<DocumentCheck> = values.iter().map(|v| DocumentCheck::new(v)).collect();

    match output_format {
        "json" => output::json::print(&checks)?,
        _ => output::table::print_documents(&checks),
    }

    Ok(())
}

pub fn phones(values: &[String], output_format: &str) -> Result<(), ColunaError> {
    let phones: Vec<BrPhone> = values.iter().map(|v| BrPhone::parse(v)).collect();

    match output_format {
        "json" => output::json::print(&phones)?,
        _ => output::table::print_phones(&phones),
    }

    Ok(())
}
