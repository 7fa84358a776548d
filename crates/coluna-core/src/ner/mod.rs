pub mod heuristic;

use serde::{Deserialize, Serialize};

pub use heuristic::HeuristicRecognizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityLabel {
    Person,
    Organization,
    Location,
    Misc,
}

/// A span of text recognized as a named entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

/// Trait for named-entity recognition backends.
///
/// Implementations must be deterministic and free of shared mutable state:
/// detectors may call them concurrently.
pub trait EntityRecognizer: Send + Sync {
    /// Recognize entities in `text`. Newlines separate independent values.
    fn recognize(&self, text: &str) -> Vec<Entity>;

    /// Name of this recognition backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
