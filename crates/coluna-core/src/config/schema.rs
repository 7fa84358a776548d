use serde::{Deserialize, Serialize};

pub const NAME_WEIGHT_NON_NULL: f64 = 0.10;
pub const NAME_WEIGHT_ALPHA: f64 = 0.15;
pub const NAME_WEIGHT_TITLE: f64 = 0.15;
pub const NAME_WEIGHT_MULTI_TOKEN: f64 = 0.15;
pub const NAME_WEIGHT_LENGTH: f64 = 0.10;
pub const NAME_WEIGHT_DICTIONARY: f64 = 0.15;
pub const NAME_WEIGHT_ENTITY: f64 = 0.20;

pub const NAME_SAMPLE_LIMIT: usize = 500;
pub const NAME_ENTITY_SAMPLE_LIMIT: usize = 100;
pub const NAME_MIN_LENGTH: usize = 8;
pub const NAME_MAX_LENGTH: usize = 40;

pub const PHONE_WEIGHT_STRICT: f64 = 1.00;
pub const PHONE_WEIGHT_LOOSE: f64 = 0.50;
pub const PHONE_PENALTY_CPF_FORMATTED: f64 = 0.70;
pub const PHONE_PENALTY_CPF_BARE: f64 = 0.40;

pub const DOC_WEIGHT_VALID: f64 = 100.0;
pub const DOC_WEIGHT_FORMAT: f64 = 25.0;
pub const DOC_PENALTY_PHONE_LIKE: f64 = 60.0;
pub const DOC_BONUS_HEADER_EXACT: f64 = 30.0;
pub const DOC_BONUS_HEADER_PARTIAL: f64 = 20.0;
pub const DOC_BONUS_FIRST_ROW_EXACT: f64 = 15.0;
pub const DOC_BONUS_FIRST_ROW_PARTIAL: f64 = 8.0;
pub const DOC_HEADER_PROBE_ROWS: usize = 3;

/// All tunable constants of the three detectors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub name: NameConfig,
    pub phone: PhoneConfig,
    pub document: DocumentConfig,
}

/// Weights of the seven name signals. Must sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameWeights {
    pub non_null: f64,
    pub alpha: f64,
    pub title: f64,
    pub multi_token: f64,
    pub length: f64,
    pub dictionary: f64,
    pub entity: f64,
}

impl Default for NameWeights {
    fn default() -> Self {
        Self {
            non_null: NAME_WEIGHT_NON_NULL,
            alpha: NAME_WEIGHT_ALPHA,
            title: NAME_WEIGHT_TITLE,
            multi_token: NAME_WEIGHT_MULTI_TOKEN,
            length: NAME_WEIGHT_LENGTH,
            dictionary: NAME_WEIGHT_DICTIONARY,
            entity: NAME_WEIGHT_ENTITY,
        }
    }
}

impl NameWeights {
    /// `(field, weight)` pairs in signal order.
    pub fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("non_null", self.non_null),
            ("alpha", self.alpha),
            ("title", self.title),
            ("multi_token", self.multi_token),
            ("length", self.length),
            ("dictionary", self.dictionary),
            ("entity", self.entity),
        ]
    }

    pub fn sum(&self) -> f64 {
        self.entries().iter().map(|(_, w)| w).sum()
    }
}

/// How the values handed to the entity recognizer are picked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EntitySampling {
    /// The first N sampled values.
    #[default]
    Head,
    /// N values drawn by a shuffle seeded with `seed`.
    Seeded { seed: u64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameConfig {
    pub weights: NameWeights,
    /// Cap on non-missing values analysed per column.
    pub sample_limit: usize,
    /// Cap on values joined for entity recognition.
    pub entity_sample_limit: usize,
    pub entity_sampling: EntitySampling,
    /// Inclusive character-length window of a plausible full name.
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for NameConfig {
    fn default() -> Self {
        Self {
            weights: NameWeights::default(),
            sample_limit: NAME_SAMPLE_LIMIT,
            entity_sample_limit: NAME_ENTITY_SAMPLE_LIMIT,
            entity_sampling: EntitySampling::default(),
            min_length: NAME_MIN_LENGTH,
            max_length: NAME_MAX_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneConfig {
    pub strict: f64,
    pub loose: f64,
    pub cpf_formatted_penalty: f64,
    pub cpf_bare_penalty: f64,
}

impl Default for PhoneConfig {
    fn default() -> Self {
        Self {
            strict: PHONE_WEIGHT_STRICT,
            loose: PHONE_WEIGHT_LOOSE,
            cpf_formatted_penalty: PHONE_PENALTY_CPF_FORMATTED,
            cpf_bare_penalty: PHONE_PENALTY_CPF_BARE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Per unit rate of checksum-valid CPFs plus CNPJs.
    pub valid_weight: f64,
    /// Per unit rate of CPF- plus CNPJ-shaped values.
    pub format_weight: f64,
    /// Per unit rate of phone-shaped values, subtracted.
    pub phone_penalty: f64,
    /// Column name contains "polo passivo".
    pub header_exact_bonus: f64,
    /// Column name contains "passivo" only.
    pub header_partial_bonus: f64,
    /// First data value contains "polo passivo".
    pub first_row_exact_bonus: f64,
    /// First data value contains "passivo" only.
    pub first_row_partial_bonus: f64,
    /// Leading rows searched for an embedded header label.
    pub header_probe_rows: usize,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            valid_weight: DOC_WEIGHT_VALID,
            format_weight: DOC_WEIGHT_FORMAT,
            phone_penalty: DOC_PENALTY_PHONE_LIKE,
            header_exact_bonus: DOC_BONUS_HEADER_EXACT,
            header_partial_bonus: DOC_BONUS_HEADER_PARTIAL,
            first_row_exact_bonus: DOC_BONUS_FIRST_ROW_EXACT,
            first_row_partial_bonus: DOC_BONUS_FIRST_ROW_PARTIAL,
            header_probe_rows: DOC_HEADER_PROBE_ROWS,
        }
    }
}
