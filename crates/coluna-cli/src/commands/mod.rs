pub mod check;
pub mod config;
pub mod detect;
pub mod extract;
pub mod inspect;

use std::sync::Arc;

use coluna_core::config::schema::{DetectorConfig, EntitySampling};
use coluna_core::error::ColunaError;
use coluna_core::names::GivenNames;
use coluna_core::ColumnClassifier;

use crate::DetectArgs;

/// Build a classifier from `--config`, `--names` and `--seed`.
pub fn classifier(args: &DetectArgs) -> Result<ColumnClassifier, ColunaError> {
    let mut config = match &args.config {
        Some(path) => coluna_core::config::load_config(path)?,
        None => DetectorConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.name.entity_sampling = EntitySampling::Seeded { seed };
    }

    let mut classifier = ColumnClassifier::new().with_config(config);
    if let Some(path) = &args.names {
        let names = GivenNames::load(path)?;
        if names.is_empty() {
            tracing::warn!(path = %path.display(), "given-name dictionary is empty");
        }
        classifier = classifier.with_names(Arc::new(names));
    }
    Ok(classifier)
}
