use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::brazil::{is_valid_cnpj, is_valid_cpf, only_digits};
use crate::config::schema::DocumentConfig;
use crate::model::Column;
use crate::normalize::strip_accents_lower;

static CPF_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{3}\.?\d{3}\.?\d{3}-?\d{2}\b").expect("static regex"));
static CNPJ_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{2}\.?\d{3}\.?\d{3}/?\d{4}-?\d{2}\b").expect("static regex"));
/// Phone-shaped values, only used as negative evidence.
static PHONE_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\(?\d{2}\)?\s*\d{4,5}-?\d{4}\s*$").expect("static regex")
});

const LABEL_EXACT: &str = "polo passivo";
const LABEL_PARTIAL: &str = "passivo";

/// Evidence extracted from a single cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentCandidate {
    pub cpf_format: bool,
    pub cnpj_format: bool,
    pub cpf_valid: bool,
    pub cnpj_valid: bool,
    pub phone_like: bool,
}

impl DocumentCandidate {
    pub fn from_value(value: &str) -> Self {
        let v = value.trim();
        let digits = only_digits(v);
        let cpf_valid = digits.len() == 11 && is_valid_cpf(&digits);
        DocumentCandidate {
            cpf_format: CPF_SHAPE.is_match(v),
            cnpj_format: CNPJ_SHAPE.is_match(v),
            cpf_valid,
            cnpj_valid: !cpf_valid && digits.len() == 14 && is_valid_cnpj(&digits),
            phone_like: PHONE_LIKE.is_match(v),
        }
    }
}

/// Per-column aggregate of [`DocumentCandidate`]s plus the label bonus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentEvidence {
    pub non_missing: usize,
    pub cpf_valid: usize,
    pub cnpj_valid: usize,
    pub cpf_format: usize,
    pub cnpj_format: usize,
    pub phone_like: usize,
    pub header_bonus: f64,
}

impl DocumentEvidence {
    pub fn collect(column: &Column, config: &DocumentConfig) -> Self {
        let mut evidence = DocumentEvidence {
            header_bonus: header_bonus(column, config),
            ..Default::default()
        };
        for value in column.values() {
            let c = DocumentCandidate::from_value(&value);
            evidence.non_missing += 1;
            evidence.cpf_valid += usize::from(c.cpf_valid);
            evidence.cnpj_valid += usize::from(c.cnpj_valid);
            evidence.cpf_format += usize::from(c.cpf_format);
            evidence.cnpj_format += usize::from(c.cnpj_format);
            evidence.phone_like += usize::from(c.phone_like);
        }
        evidence
    }

    /// Unbounded score; only the relative order between columns matters.
    /// With no values the label bonus alone decides.
    pub fn score(&self, config: &DocumentConfig) -> f64 {
        if self.non_missing == 0 {
            return self.header_bonus;
        }
        let n = self.non_missing as f64;
        let rate = |count: usize| count as f64 / n;
        config.valid_weight * (rate(self.cpf_valid) + rate(self.cnpj_valid))
            + config.format_weight * (rate(self.cpf_format) + rate(self.cnpj_format))
            - config.phone_penalty * rate(self.phone_like)
            + self.header_bonus
    }
}

/// Bonus for "polo passivo"/"passivo" in the column name, plus a smaller one
/// when the first of the leading values carries the label (header text stored
/// as a data row).
pub fn header_bonus(column: &Column, config: &DocumentConfig) -> f64 {
    let name = strip_accents_lower(&column.name);
    let mut bonus = if name.contains(LABEL_EXACT) {
        config.header_exact_bonus
    } else if name.contains(LABEL_PARTIAL) {
        config.header_partial_bonus
    } else {
        0.0
    };

    let top_label = column
        .cells
        .iter()
        .take(config.header_probe_rows)
        .find_map(|c| c.to_text())
        .map(|v| strip_accents_lower(&v))
        .unwrap_or_default();
    if top_label.contains(LABEL_EXACT) {
        bonus += config.first_row_exact_bonus;
    } else if top_label.contains(LABEL_PARTIAL) {
        bonus += config.first_row_partial_bonus;
    }

    bonus
}

/// Score a column for "holds the passive pole's CPF/CNPJ". Not clamped.
pub fn score_document_column(column: &Column, config: &DocumentConfig) -> f64 {
    let evidence = DocumentEvidence::collect(column, config);
    let score = evidence.score(config);
    tracing::debug!(column = %column.name, ?evidence, score, "document evidence");
    score
}
