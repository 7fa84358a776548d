pub mod csv;
pub mod workbook;

use std::collections::HashSet;
use std::path::Path;

use crate::error::ColunaError;
use crate::model::Dataset;

/// How a spreadsheet is turned into a [`Dataset`].
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Workbook sheet to read; the first sheet when unset.
    pub sheet: Option<String>,
    /// Keep every CSV cell as text instead of inferring numeric columns.
    pub all_text: bool,
    /// CSV delimiter; sniffed from the header line when unset.
    pub delimiter: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Workbook,
}

impl SheetFormat {
    pub fn from_path(path: &Path) -> Result<SheetFormat, ColunaError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "csv" | "txt" => Ok(SheetFormat::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(SheetFormat::Workbook),
            _ => Err(ColunaError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Load a spreadsheet file, dispatching on its extension.
pub fn load_path(path: &Path, options: &LoadOptions) -> Result<Dataset, ColunaError> {
    let format = SheetFormat::from_path(path)?;
    let bytes = std::fs::read(path).map_err(|e| ColunaError::Load {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let dataset = load_bytes(&bytes, format, options).map_err(|e| match e {
        ColunaError::Load { reason, .. } => ColunaError::Load {
            path: path.to_path_buf(),
            reason,
        },
        other => other,
    })?;
    tracing::info!(
        path = %path.display(),
        rows = dataset.row_count(),
        columns = dataset.columns().len(),
        "loaded spreadsheet"
    );
    Ok(dataset)
}

/// Load spreadsheet bytes of a known format.
pub fn load_bytes(
    bytes: &[u8],
    format: SheetFormat,
    options: &LoadOptions,
) -> Result<Dataset, ColunaError> {
    match format {
        SheetFormat::Csv => csv::parse_csv(bytes, options),
        SheetFormat::Workbook => workbook::parse_workbook(bytes, options),
    }
}

/// Blank headers become `Unnamed: {i}`; repeats get `.1`, `.2`, ... suffixes.
pub(crate) fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(raw.len());
    for (i, header) in raw.into_iter().enumerate() {
        let base = match header.trim() {
            "" => format!("Unnamed: {i}"),
            h => h.to_string(),
        };
        let mut name = base.clone();
        let mut n = 1;
        while seen.contains(&name) {
            name = format!("{base}.{n}");
            n += 1;
        }
        if name != base {
            tracing::warn!(original = %base, renamed = %name, "duplicate column header renamed");
        }
        seen.insert(name.clone());
        out.push(name);
    }
    out
}
