use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::ColumnKind;

/// What a detector is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// A person's full name.
    Name,
    /// A Brazilian telephone number.
    Phone,
    /// CPF/CNPJ of the passive pole (defendant).
    Document,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Name => write!(f, "Full name"),
            Target::Phone => write!(f, "Phone"),
            Target::Document => write!(f, "Passive-pole CPF/CNPJ"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnScore {
    pub column: String,
    pub score: f64,
}

/// Scores keyed by column name, in the dataset's column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable {
    entries: Vec<ColumnScore>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: impl Into<String>, score: f64) {
        self.entries.push(ColumnScore {
            column: column.into(),
            score,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.column == column)
            .map(|e| e.score)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnScore> {
        self.entries.iter()
    }

    /// Highest score; the earliest column wins ties.
    pub fn best(&self) -> Option<&ColumnScore> {
        let mut best: Option<&ColumnScore> = None;
        for entry in &self.entries {
            match best {
                Some(b) if entry.score <= b.score => {}
                _ => best = Some(entry),
            }
        }
        best
    }

    /// Scores sorted descending. The sort is stable, so tied columns keep
    /// their original order.
    pub fn ranked(&self) -> Vec<ColumnScore> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }
}

/// Outcome of one detector over a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDetection {
    pub target: Target,
    /// Column with the highest score.
    pub best: String,
    /// Every eligible column, highest score first.
    pub scores: Vec<ColumnScore>,
}

impl ColumnDetection {
    /// `None` when the table is empty.
    pub fn from_table(target: Target, table: &ScoreTable) -> Option<Self> {
        let best = table.best()?.column.clone();
        Some(Self {
            target,
            best,
            scores: table.ranked(),
        })
    }

    pub fn best_score(&self) -> f64 {
        self.scores.first().map(|s| s.score).unwrap_or(0.0)
    }

    pub fn score_of(&self, column: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|s| s.column == column)
            .map(|s| s.score)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub kind: ColumnKind,
    /// Whether detectors consider this column.
    pub eligible: bool,
    pub non_missing: usize,
}

/// All three detections for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
    pub name: ColumnDetection,
    pub phone: ColumnDetection,
    pub document: ColumnDetection,
}

impl DetectionReport {
    pub fn detections(&self) -> [&ColumnDetection; 3] {
        [&self.name, &self.phone, &self.document]
    }
}
