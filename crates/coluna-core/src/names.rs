use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use crate::error::ColunaError;
use crate::normalize::clean_letters;

const BUILTIN_GIVEN_NAMES: &str = include_str!("../data/given-names.txt");

static BUILTIN: LazyLock<Arc<GivenNames>> =
    LazyLock::new(|| Arc::new(GivenNames::from_text(BUILTIN_GIVEN_NAMES)));

/// Reference set of given names, keyed by accent-stripped lowercase form.
#[derive(Debug, Clone, Default)]
pub struct GivenNames {
    keys: HashSet<String>,
}

impl GivenNames {
    /// The embedded dictionary, built on first use and shared read-only.
    pub fn builtin() -> Arc<GivenNames> {
        Arc::clone(&BUILTIN)
    }

    /// Parse one name per line. Blank lines and `#` comments are skipped.
    pub fn from_text(text: &str) -> Self {
        let keys = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(name_key)
            .filter(|k| !k.is_empty())
            .collect();
        Self { keys }
    }

    pub fn load(path: &Path) -> Result<Self, ColunaError> {
        let text = std::fs::read_to_string(path).map_err(|e| ColunaError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_text(&text))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Accent- and case-insensitive lookup.
    pub fn contains(&self, name: &str) -> bool {
        self.keys.contains(&name_key(name))
    }

    /// Whether the first whitespace token of `value` is a known given name.
    pub fn first_token_matches(&self, value: &str) -> bool {
        value
            .split_whitespace()
            .next()
            .map(|token| self.contains(token))
            .unwrap_or(false)
    }
}

fn name_key(s: &str) -> String {
    clean_letters(s)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
