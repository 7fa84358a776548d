use coluna_core::error::ColunaError;
use coluna_core::load::{load_path, LoadOptions};
use std::path::Path;

use crate::output;
use crate::DetectArgs;

pub fn run(
    input_file: &Path,
    options: &LoadOptions,
    args: &DetectArgs,
    output_format: &str,
) -> Result<(), ColunaError> {
    let classifier = super::classifier(args)?;
    let dataset = load_path(input_file, options)?;
    let report = classifier.detect_all(&dataset)?;

    match output_format {
        "json" => output::json::print(&report)?,
        _ => output::table::print_report(&report),
    }

    Ok(())
}
