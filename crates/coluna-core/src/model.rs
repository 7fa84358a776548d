use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use crate::error::ColunaError;

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Date/time as rendered by the reader (ISO-like text).
    DateTime(String),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Cell {
        Cell::Text(s.into())
    }

    /// True for empty cells and for text that is blank after trimming.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Coerce the cell to text for analysis. Missing cells yield `None`.
    ///
    /// Integral floats render without a fractional part, so a CPF stored as a
    /// spreadsheet number (`12345678909.0`) reads back as `12345678909`.
    pub fn to_text(&self) -> Option<Cow<'_, str>> {
        if self.is_missing() {
            return None;
        }
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(Cow::Borrowed(s.as_str())),
            Cell::Int(i) => Some(Cow::Owned(i.to_string())),
            Cell::Float(f) => Some(Cow::Owned(format_float(*f))),
            Cell::Bool(b) => Some(Cow::Owned(if *b { "True" } else { "False" }.to_string())),
            Cell::DateTime(s) => Some(Cow::Borrowed(s.as_str())),
        }
    }

    fn kind(&self) -> Option<ColumnKind> {
        if self.is_missing() {
            return None;
        }
        Some(match self {
            Cell::Text(_) => ColumnKind::Text,
            Cell::Int(_) | Cell::Float(_) => ColumnKind::Numeric,
            Cell::Bool(_) => ColumnKind::Boolean,
            Cell::DateTime(_) => ColumnKind::DateTime,
            Cell::Empty => ColumnKind::Empty,
        })
    }
}

fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{}", f as i64)
    } else {
        format!("{f}")
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(s) => write!(f, "{s}"),
            None => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s)
        }
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Cell::Empty)
    }
}

/// Storage type of a column, inferred from its non-missing cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Numeric,
    Boolean,
    DateTime,
    Empty,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Text => write!(f, "text"),
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Boolean => write!(f, "boolean"),
            ColumnKind::DateTime => write!(f, "datetime"),
            ColumnKind::Empty => write!(f, "empty"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Convenience constructor for text columns; empty strings become `Cell::Empty`.
    pub fn from_strs(name: impl Into<String>, values: &[&str]) -> Self {
        Self::new(name, values.iter().map(|v| Cell::from(*v)).collect())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Non-missing values coerced to text, in row order.
    pub fn values(&self) -> impl Iterator<Item = Cow<'_, str>> {
        self.cells.iter().filter_map(Cell::to_text)
    }

    pub fn non_missing_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_missing()).count()
    }

    /// Text columns hold at least one text cell, or a mix of kinds.
    pub fn kind(&self) -> ColumnKind {
        let mut seen: Option<ColumnKind> = None;
        for kind in self.cells.iter().filter_map(Cell::kind) {
            match seen {
                None => seen = Some(kind),
                Some(prev) if prev == kind => {}
                Some(_) => return ColumnKind::Text,
            }
            if kind == ColumnKind::Text {
                return ColumnKind::Text;
            }
        }
        seen.unwrap_or(ColumnKind::Empty)
    }
}

/// A rectangular table of uniquely named columns.
///
/// Deserialization goes through [`Dataset::new`], so ragged or duplicate
/// columns are rejected there too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataset")]
pub struct Dataset {
    columns: Vec<Column>,
}

#[derive(Deserialize)]
struct RawDataset {
    columns: Vec<Column>,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = ColunaError;

    fn try_from(raw: RawDataset) -> Result<Self, Self::Error> {
        Dataset::new(raw.columns)
    }
}

impl Dataset {
    pub fn new(columns: Vec<Column>) -> Result<Self, ColunaError> {
        let mut names = HashSet::new();
        for col in &columns {
            if !names.insert(col.name.as_str()) {
                return Err(ColunaError::InvalidDataset(format!(
                    "duplicate column name '{}'",
                    col.name
                )));
            }
        }
        if let Some(first) = columns.first() {
            if let Some(ragged) = columns.iter().find(|c| c.len() != first.len()) {
                return Err(ColunaError::InvalidDataset(format!(
                    "column '{}' has {} rows, expected {} (as in '{}')",
                    ragged.name,
                    ragged.len(),
                    first.len(),
                    first.name
                )));
            }
        }
        Ok(Self { columns })
    }

    /// Build from row-major data. Short rows are padded with `Cell::Empty`,
    /// cells beyond the header width are dropped.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self, ColunaError> {
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|h| Column::new(h, Vec::with_capacity(rows.len())))
            .collect();
        let mut dropped = 0;
        for row in rows {
            let mut cells = row.into_iter();
            for col in columns.iter_mut() {
                col.cells.push(cells.next().unwrap_or(Cell::Empty));
            }
            dropped += cells.filter(|c| !c.is_missing()).count();
        }
        if dropped > 0 {
            tracing::warn!(dropped, "cells beyond the header width were dropped");
        }
        Self::new(columns)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    /// Columns eligible for detection, in original order.
    ///
    /// A dataset with zero rows carries only header evidence, so every column
    /// is eligible there.
    pub fn textual_columns(&self) -> Vec<&Column> {
        if self.row_count() == 0 {
            return self.columns.iter().collect();
        }
        self.columns
            .iter()
            .filter(|c| c.kind() == ColumnKind::Text)
            .collect()
    }
}
