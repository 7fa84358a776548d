use coluna_core::contacts::extract_contacts;
use coluna_core::error::ColunaError;
use coluna_core::load::{load_path, LoadOptions};
use std::path::{Path, PathBuf};

use crate::output;
use crate::DetectArgs;

pub fn run(
    input_file: &Path,
    options: &LoadOptions,
    args: &DetectArgs,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), ColunaError> {
    let classifier = super::classifier(args)?;
    let dataset = load_path(input_file, options)?;
    let report = classifier.detect_all(&dataset)?;
    let contacts = extract_contacts(&dataset, &report)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&contacts)?;
            std::fs::write(&path, json)?;
            let invalid = contacts.iter().filter(|c| c.has_invalid_document()).count();
            eprintln!(
                "Extracted {} contact(s) from columns '{}', '{}', '{}', written to {}",
                contacts.len(),
                report.name.best,
                report.document.best,
                report.phone.best,
                path.display()
            );
            if invalid > 0 {
                eprintln!("  {invalid} contact(s) with an invalid CPF/CNPJ");
            }
        }
        None => match output_format {
            "json" => output::json::print(&contacts)?,
            _ => output::table::print_contacts(&report, &contacts),
        },
    }

    Ok(())
}
