use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::config::schema::PhoneConfig;
use crate::model::Column;

/// Optional +55, optional area code, then a 9-digit mobile or 8-digit
/// landline subscriber block. A separator must also be present; see
/// [`has_separator`].
static STRICT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:\+?55[\s.-]?)?(?:\(?0?\d{2}\)?[\s.-]?)?(?:9\d{4}[\s.-]?\d{4}|[2-9]\d{3}[\s.-]?\d{4})$",
    )
    .expect("static regex")
});
static LOOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\+?55)?\d{10,11}$").expect("static regex"));
static CPF_FORMATTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}\.\d{3}\.\d{3}-\d{2}$").expect("static regex"));
static CPF_BARE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{11}$").expect("static regex"));

/// Pattern hit counts over the non-empty values of a column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneCounts {
    pub non_empty: usize,
    pub strict: usize,
    pub loose: usize,
    pub cpf_formatted: usize,
    pub cpf_bare: usize,
}

impl PhoneCounts {
    pub fn tally(column: &Column) -> Self {
        let mut counts = PhoneCounts::default();
        for value in column.values() {
            let v = value.trim();
            if v.is_empty() {
                continue;
            }
            counts.non_empty += 1;
            if is_strict_phone(v) {
                counts.strict += 1;
            }
            if LOOSE.is_match(v) {
                counts.loose += 1;
            }
            if CPF_FORMATTED.is_match(v) {
                counts.cpf_formatted += 1;
            }
            if CPF_BARE.is_match(v) {
                counts.cpf_bare += 1;
            }
        }
        counts
    }

    /// Weighted hits over non-empty values, clamped to [0, 1].
    pub fn score(&self, config: &PhoneConfig) -> f64 {
        if self.non_empty == 0 {
            return 0.0;
        }
        let raw = config.strict * self.strict as f64 + config.loose * self.loose as f64
            - config.cpf_formatted_penalty * self.cpf_formatted as f64
            - config.cpf_bare_penalty * self.cpf_bare as f64;
        (raw / self.non_empty as f64).clamp(0.0, 1.0)
    }
}

/// A formatted phone number: the strict layout plus at least one separator.
pub fn is_strict_phone(value: &str) -> bool {
    has_separator(value) && STRICT.is_match(value)
}

fn has_separator(value: &str) -> bool {
    value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '.' | '-'))
}

/// Score a column for "holds Brazilian phone numbers", in [0, 1].
///
/// Formatted CPFs are penalized hardest; bare 11-digit values count both as
/// loose phones and as bare CPFs.
pub fn score_phone_column(column: &Column, config: &PhoneConfig) -> f64 {
    let counts = PhoneCounts::tally(column);
    let score = counts.score(config);
    tracing::debug!(column = %column.name, ?counts, score, "phone counts");
    score
}
