use coluna_core::detect::column_summaries;
use coluna_core::detect::outcome::ColumnSummary;
use coluna_core::error::ColunaError;
use coluna_core::load::{load_path, LoadOptions};
use serde::Serialize;
use std::path::Path;

use crate::output;

#[derive(Serialize)]
pub struct Inspection {
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
}

pub fn run(input_file: &Path, options: &LoadOptions, output_format: &str) -> Result<(), ColunaError> {
    let dataset = load_path(input_file, options)?;
    let inspection = Inspection {
        rows: dataset.row_count(),
        columns: column_summaries(&dataset),
    };

    match output_format {
        "json" => output::json::print(&inspection)?,
        _ => output::table::print_inspection(inspection.rows, &inspection.columns),
    }

    Ok(())
}
