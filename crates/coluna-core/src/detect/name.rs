use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::config::schema::{EntitySampling, NameConfig, NameWeights};
use crate::model::Column;
use crate::names::GivenNames;
use crate::ner::{EntityLabel, EntityRecognizer};
use crate::normalize::{clean_letters, is_title_case};

/// The seven per-column signals of the name detector, each in [0, 1].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameSignals {
    /// Non-missing cells over all rows.
    pub non_null: f64,
    /// Sampled values made of letters once accents and punctuation are folded.
    pub alpha: f64,
    pub title: f64,
    /// Sampled values with two or more tokens.
    pub multi_token: f64,
    /// Sampled values within the length window.
    pub length: f64,
    /// Sampled values whose first token is a known given name.
    pub dictionary: f64,
    /// PERSON entities over all entities found in the entity sample.
    pub entity: f64,
}

impl NameSignals {
    pub fn weighted(&self, w: &NameWeights) -> f64 {
        let score = w.non_null * self.non_null
            + w.alpha * self.alpha
            + w.title * self.title
            + w.multi_token * self.multi_token
            + w.length * self.length
            + w.dictionary * self.dictionary
            + w.entity * self.entity;
        score.clamp(0.0, 1.0)
    }
}

/// Compute the name signals for one column. `None` when the column has no
/// non-missing values.
pub fn name_signals(
    column: &Column,
    config: &NameConfig,
    names: &GivenNames,
    recognizer: &dyn EntityRecognizer,
) -> Option<NameSignals> {
    let sample: Vec<Cow<'_, str>> = column.values().take(config.sample_limit).collect();
    if sample.is_empty() {
        return None;
    }

    let non_null = column.non_missing_count() as f64 / column.len() as f64;
    let alpha = ratio(&sample, |v| {
        let cleaned = clean_letters(v).replace(' ', "");
        !cleaned.is_empty() && cleaned.chars().all(|c| c.is_ascii_alphabetic())
    });
    let title = ratio(&sample, is_title_case);
    let multi_token = ratio(&sample, |v| v.split_whitespace().nth(1).is_some());
    let length = ratio(&sample, |v| {
        (config.min_length..=config.max_length).contains(&v.chars().count())
    });
    let dictionary = ratio(&sample, |v| names.first_token_matches(v));
    let entity = entity_ratio(&sample, config, recognizer);

    Some(NameSignals {
        non_null,
        alpha,
        title,
        multi_token,
        length,
        dictionary,
        entity,
    })
}

/// Score a column for "holds a person's full name", in [0, 1].
///
/// Columns without non-missing values score exactly 0.0.
pub fn score_name_column(
    column: &Column,
    config: &NameConfig,
    names: &GivenNames,
    recognizer: &dyn EntityRecognizer,
) -> f64 {
    match name_signals(column, config, names, recognizer) {
        Some(signals) => {
            let score = signals.weighted(&config.weights);
            tracing::debug!(column = %column.name, ?signals, score, "name signals");
            score
        }
        None => 0.0,
    }
}

fn ratio<F>(sample: &[Cow<'_, str>], pred: F) -> f64
where
    F: Fn(&str) -> bool,
{
    let hits = sample.iter().filter(|v| pred(&v[..])).count();
    hits as f64 / sample.len() as f64
}

fn entity_ratio(
    sample: &[Cow<'_, str>],
    config: &NameConfig,
    recognizer: &dyn EntityRecognizer,
) -> f64 {
    let limit = config.entity_sample_limit.min(sample.len());
    let picked: Vec<&str> = match config.entity_sampling {
        EntitySampling::Head => sample[..limit].iter().map(|v| v.as_ref()).collect(),
        EntitySampling::Seeded { seed } => {
            let mut rng = StdRng::seed_from_u64(seed);
            sample
                .choose_multiple(&mut rng, limit)
                .map(|v| v.as_ref())
                .collect()
        }
    };

    let entities = recognizer.recognize(&picked.join("\n"));
    let persons = entities
        .iter()
        .filter(|e| e.label == EntityLabel::Person)
        .count();
    persons as f64 / entities.len().max(1) as f64
}
