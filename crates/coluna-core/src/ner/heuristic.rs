use std::sync::Arc;

use super::{Entity, EntityLabel, EntityRecognizer};
use crate::names::GivenNames;
use crate::normalize::strip_accents_lower;

/// Lowercase connectors allowed inside a capitalized run ("Maria da Silva").
const PARTICLES: &[&str] = &["da", "de", "do", "das", "dos", "e"];

/// Tokens that mark a run as a company or institution. Bare "sa" and "me"
/// are left out: after accent folding they collide with the surname "Sá".
const ORG_MARKERS: &[&str] = &[
    "ltda", "s/a", "s.a", "eireli", "epp", "banco", "bank", "cia", "companhia",
    "comercio", "industria", "servicos", "associacao", "instituto", "fundacao", "empresa",
    "grupo", "holding", "condominio", "cooperativa", "sociedade", "ministerio", "secretaria",
    "prefeitura", "tribunal", "universidade", "hospital", "clinica", "escola", "igreja", "inc",
    "llc",
];

/// First tokens that mark a run as an address or place.
const LOC_MARKERS: &[&str] = &[
    "rua", "r", "avenida", "av", "travessa", "tv", "praca", "rodovia", "estrada", "alameda",
    "largo", "bairro", "vila", "jardim", "parque", "cidade", "estado", "municipio", "distrito",
];

/// Rule-based recognizer for Portuguese person names.
///
/// Entities are maximal runs of capitalized, digit-free tokens within a line
/// (commas, semicolons, colons, pipes and parentheses also end a run).
/// Lowercase particles may join two capitalized tokens.
pub struct HeuristicRecognizer {
    names: Arc<GivenNames>,
}

impl HeuristicRecognizer {
    pub fn new(names: Arc<GivenNames>) -> Self {
        Self { names }
    }

    fn label(&self, tokens: &[&str]) -> EntityLabel {
        let keys: Vec<String> = tokens.iter().map(|t| strip_accents_lower(t)).collect();

        if keys.iter().any(|k| ORG_MARKERS.contains(&k.as_str())) {
            return EntityLabel::Organization;
        }
        if keys
            .first()
            .is_some_and(|k| LOC_MARKERS.contains(&k.as_str()))
        {
            return EntityLabel::Location;
        }
        if tokens.first().is_some_and(|t| self.names.contains(t)) {
            return EntityLabel::Person;
        }

        let capitalized: Vec<&&str> = tokens.iter().filter(|t| !is_particle(t)).collect();
        let alphabetic = capitalized
            .iter()
            .all(|t| t.chars().all(|c| c.is_alphabetic() || c == '\'' || c == '-'));
        if capitalized.len() >= 2 && alphabetic {
            EntityLabel::Person
        } else {
            EntityLabel::Misc
        }
    }

    fn flush(&self, run: &mut Vec<&str>, entities: &mut Vec<Entity>) {
        if !run.is_empty() {
            entities.push(Entity {
                text: run.join(" "),
                label: self.label(run),
            });
            run.clear();
        }
    }
}

impl Default for HeuristicRecognizer {
    fn default() -> Self {
        Self::new(GivenNames::builtin())
    }
}

impl EntityRecognizer for HeuristicRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();

        let boundaries = |c: char| matches!(c, '\n' | '\r' | ',' | ';' | ':' | '|' | '(' | ')');
        for segment in text.split(boundaries) {
            let mut run: Vec<&str> = Vec::new();
            let mut pending: Vec<&str> = Vec::new();

            for raw in segment.split_whitespace() {
                let token = raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '/');
                if token.is_empty() {
                    pending.clear();
                    self.flush(&mut run, &mut entities);
                    continue;
                }

                let capitalized = token.chars().next().is_some_and(char::is_uppercase);
                let has_digit = token.chars().any(|c| c.is_ascii_digit());

                if capitalized && !has_digit {
                    run.append(&mut pending);
                    run.push(token);
                } else if !run.is_empty() && is_particle(token) {
                    pending.push(token);
                } else {
                    pending.clear();
                    self.flush(&mut run, &mut entities);
                }
            }
            self.flush(&mut run, &mut entities);
        }

        entities
    }

    fn backend_name(&self) -> &str {
        "heuristic"
    }
}

fn is_particle(token: &str) -> bool {
    PARTICLES.contains(&token.to_lowercase().as_str())
}
