use std::io::Cursor;
use std::path::PathBuf;

use calamine::{Data, Reader};

use crate::error::ColunaError;
use crate::model::{Cell, Dataset};

use super::{unique_headers, LoadOptions};

fn load_error(reason: String) -> ColunaError {
    ColunaError::Load {
        path: PathBuf::from("<workbook>"),
        reason,
    }
}

/// Read one sheet of an xlsx/xls/ods workbook. The first row of the sheet's
/// used range is the header.
pub fn parse_workbook(bytes: &[u8], options: &LoadOptions) -> Result<Dataset, ColunaError> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| load_error(format!("failed to open workbook: {e}")))?;

    let sheet_names = workbook.sheet_names();
    let sheet = match &options.sheet {
        Some(wanted) => sheet_names
            .iter()
            .find(|s| *s == wanted)
            .cloned()
            .ok_or_else(|| {
                load_error(format!(
                    "sheet '{wanted}' not found (available: {})",
                    sheet_names.join(", ")
                ))
            })?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| load_error("workbook has no sheets".into()))?,
    };

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| load_error(format!("failed to read sheet '{sheet}': {e}")))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(header_text).collect(),
        None => return Dataset::new(Vec::new()),
    };
    let headers = unique_headers(headers);
    let body: Vec<Vec<Cell>> = rows.map(|r| r.iter().map(to_cell).collect()).collect();

    tracing::debug!(sheet = %sheet, rows = body.len(), "parsed worksheet");
    Dataset::from_rows(headers, body)
}

fn header_text(cell: &Data) -> String {
    to_cell(cell).to_text().map(|s| s.into_owned()).unwrap_or_default()
}

fn to_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::from(s.as_str()),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::DateTime(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::DateTime(s.clone()),
    }
}
