pub mod schema;

use crate::error::ColunaError;
use schema::DetectorConfig;
use std::path::Path;

/// Tolerance on the name-weight sum.
const WEIGHT_SUM_EPSILON: f64 = 1e-6;

/// Load a detector config from a JSON file.
pub fn load_config(path: &Path) -> Result<DetectorConfig, ColunaError> {
    let content = std::fs::read_to_string(path).map_err(|e| ColunaError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse a detector config from a JSON string. Missing fields take defaults.
pub fn parse_config(json: &str, source: &Path) -> Result<DetectorConfig, ColunaError> {
    let config: DetectorConfig =
        serde_json::from_str(json).map_err(|e| ColunaError::ConfigLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a detector config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<DetectorConfig, ColunaError> {
    let config: DetectorConfig = serde_json::from_str(json).map_err(ColunaError::Json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate that a config is well-formed.
pub fn validate_config(config: &DetectorConfig) -> Result<(), ColunaError> {
    let name = &config.name;
    for (field, weight) in name.weights.entries() {
        if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
            return Err(ColunaError::ConfigInvalid(format!(
                "name weight '{field}' must be within [0, 1], got {weight}"
            )));
        }
    }
    let sum = name.weights.sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
        return Err(ColunaError::ConfigInvalid(format!(
            "name weights must sum to 1.0, got {sum}"
        )));
    }
    if name.sample_limit == 0 || name.entity_sample_limit == 0 {
        return Err(ColunaError::ConfigInvalid(
            "name sample limits must be greater than zero".into(),
        ));
    }
    if name.min_length > name.max_length {
        return Err(ColunaError::ConfigInvalid(format!(
            "name min_length ({}) exceeds max_length ({})",
            name.min_length, name.max_length
        )));
    }

    let phone = &config.phone;
    non_negative(
        "phone",
        &[
            ("strict", phone.strict),
            ("loose", phone.loose),
            ("cpf_formatted_penalty", phone.cpf_formatted_penalty),
            ("cpf_bare_penalty", phone.cpf_bare_penalty),
        ],
    )?;

    let doc = &config.document;
    non_negative(
        "document",
        &[
            ("valid_weight", doc.valid_weight),
            ("format_weight", doc.format_weight),
            ("phone_penalty", doc.phone_penalty),
            ("header_exact_bonus", doc.header_exact_bonus),
            ("header_partial_bonus", doc.header_partial_bonus),
            ("first_row_exact_bonus", doc.first_row_exact_bonus),
            ("first_row_partial_bonus", doc.first_row_partial_bonus),
        ],
    )?;
    if doc.header_probe_rows == 0 {
        return Err(ColunaError::ConfigInvalid(
            "document header_probe_rows must be greater than zero".into(),
        ));
    }

    Ok(())
}

fn non_negative(section: &str, values: &[(&str, f64)]) -> Result<(), ColunaError> {
    for (field, value) in values {
        if !value.is_finite() || *value < 0.0 {
            return Err(ColunaError::ConfigInvalid(format!(
                "{section} '{field}' must be a finite non-negative number, got {value}"
            )));
        }
    }
    Ok(())
}
