use coluna_core::config::schema::{DetectorConfig, EntitySampling};
use coluna_core::error::ColunaError;
use std::path::Path;

pub fn show(file: Option<&Path>) -> Result<(), ColunaError> {
    let config = match file {
        Some(path) => coluna_core::config::load_config(path)?,
        None => DetectorConfig::default(),
    };
    crate::output::json::print(&config)
}

pub fn schema() -> Result<(), ColunaError> {
    let defaults = serde_json::to_string_pretty(&DetectorConfig::default())?;
    println!(
        r#"Detector config JSON schema
===========================

Every field is optional; missing fields take the defaults shown below.

name (object)      Full-name detector
  weights           Weights of the seven signals, each in [0, 1], summing to 1.0:
    non_null        Non-missing cells over all rows
    alpha           Values made of letters once accents/punctuation are folded
    title           Values in Title Case
    multi_token     Values with two or more tokens
    length          Values within [min_length, max_length] characters
    dictionary      Values whose first token is a known given name
    entity          PERSON entities over all recognized entities
  sample_limit      Non-missing values analysed per column (> 0)
  entity_sample_limit
                    Values handed to the entity recognizer (> 0)
  entity_sampling   {{"mode": "head"}} or {{"mode": "seeded", "seed": N}}
  min_length, max_length
                    Inclusive plausible length window

phone (object)     Phone detector, per-value weights (>= 0)
  strict            Formatted number with a separator
  loose             10 or 11 bare digits, optional 55 prefix
  cpf_formatted_penalty
                    ###.###.###-## values, subtracted
  cpf_bare_penalty  Exactly 11 bare digits, subtracted

document (object)  Passive-pole CPF/CNPJ detector (>= 0, score not clamped)
  valid_weight      Times the checksum-valid CPF + CNPJ rate
  format_weight     Times the CPF-shaped + CNPJ-shaped rate
  phone_penalty     Times the phone-shaped rate, subtracted
  header_exact_bonus, header_partial_bonus
                    Column name contains "polo passivo" / "passivo"
  first_row_exact_bonus, first_row_partial_bonus
                    First value within header_probe_rows contains the label
  header_probe_rows Leading rows searched for an embedded header (> 0)

Defaults:
{defaults}"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), ColunaError> {
    let config = coluna_core::config::load_config(file)?;

    println!("Config '{}' is valid.", file.display());
    println!("  Name weights:");
    for (field, weight) in config.name.weights.entries() {
        println!("    {field:<12} {weight:.3}");
    }
    let sampling = match config.name.entity_sampling {
        EntitySampling::Head => "head".to_string(),
        EntitySampling::Seeded { seed } => format!("seeded ({seed})"),
    };
    println!(
        "  Samples: {} values, {} for entities ({sampling})",
        config.name.sample_limit, config.name.entity_sample_limit
    );

    // Legal but probably unintended settings
    let mut warnings = Vec::new();
    for (field, weight) in config.name.weights.entries() {
        if weight == 0.0 {
            warnings.push(format!("name signal '{field}' has weight 0 and is ignored"));
        }
    }
    if config.name.entity_sample_limit > config.name.sample_limit {
        warnings.push(format!(
            "entity_sample_limit ({}) exceeds sample_limit ({}); only {} values can be drawn",
            config.name.entity_sample_limit, config.name.sample_limit, config.name.sample_limit
        ));
    }
    if config.document.header_partial_bonus > config.document.header_exact_bonus {
        warnings.push("header_partial_bonus exceeds header_exact_bonus".to_string());
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {w}");
        }
    }

    Ok(())
}
