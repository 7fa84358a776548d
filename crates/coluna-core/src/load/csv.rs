use std::borrow::Cow;
use std::path::PathBuf;

use crate::error::ColunaError;
use crate::model::{Cell, Column, Dataset};

use super::{unique_headers, LoadOptions};

/// Tokens read as missing values.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parse CSV bytes into a [`Dataset`].
///
/// The text is read as UTF-8 (BOM stripped), falling back to Latin-1. The
/// first record is the header. Unless `all_text` is set, a column whose
/// non-missing cells all parse as integers, floats or booleans is stored with
/// that type.
pub fn parse_csv(bytes: &[u8], options: &LoadOptions) -> Result<Dataset, ColunaError> {
    let text = decode(bytes);
    let delimiter = options
        .delimiter
        .unwrap_or_else(|| sniff_delimiter(&text));

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let headers = unique_headers(headers);

    let mut columns: Vec<Vec<Cell>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(|e| ColunaError::Load {
            path: PathBuf::from("<csv>"),
            reason: e.to_string(),
        })?;
        for (i, column) in columns.iter_mut().enumerate() {
            column.push(raw_cell(record.get(i).unwrap_or("")));
        }
    }

    if !options.all_text {
        for column in &mut columns {
            infer_types(column);
        }
    }

    let rows = columns.first().map(Vec::len).unwrap_or(0);
    tracing::debug!(delimiter = %char::from(delimiter), rows, "parsed csv");

    Dataset::new(
        headers
            .into_iter()
            .zip(columns)
            .map(|(name, cells)| Column::new(name, cells))
            .collect(),
    )
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => {
            tracing::debug!("csv is not valid UTF-8, reading as Latin-1");
            Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect())
        }
    }
}

/// `;` when the header line has more semicolons than commas, else `,`.
fn sniff_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or("");
    let semicolons = header.matches(';').count();
    let commas = header.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

fn raw_cell(value: &str) -> Cell {
    if NA_TOKENS.contains(&value.trim()) {
        Cell::Empty
    } else {
        Cell::text(value)
    }
}

fn infer_types(column: &mut [Cell]) {
    let texts = || {
        column.iter().filter_map(|c| match c {
            Cell::Text(s) => Some(s.trim()),
            _ => None,
        })
    };
    if texts().next().is_none() {
        return;
    }

    let convert: fn(&str) -> Option<Cell> = if texts().all(|s| parse_int(s).is_some()) {
        |s| parse_int(s).map(Cell::Int)
    } else if texts().all(|s| parse_float(s).is_some()) {
        |s| parse_float(s).map(Cell::Float)
    } else if texts().all(|s| parse_bool(s).is_some()) {
        |s| parse_bool(s).map(Cell::Bool)
    } else {
        return;
    };

    for cell in column.iter_mut() {
        if let Cell::Text(s) = cell {
            if let Some(typed) = convert(s.trim()) {
                *cell = typed;
            }
        }
    }
}

fn parse_int(s: &str) -> Option<i64> {
    s.parse::<i64>().ok()
}

fn parse_float(s: &str) -> Option<f64> {
    s.parse::<f64>().ok()
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "True" | "TRUE" | "true" => Some(true),
        "False" | "FALSE" | "false" => Some(false),
        _ => None,
    }
}
