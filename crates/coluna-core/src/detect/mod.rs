pub mod document;
pub mod name;
pub mod outcome;
pub mod phone;

use std::sync::Arc;

use crate::config::schema::DetectorConfig;
use crate::error::ColunaError;
use crate::model::{Column, Dataset};
use crate::names::GivenNames;
use crate::ner::{EntityRecognizer, HeuristicRecognizer};
use outcome::{ColumnDetection, ColumnSummary, DetectionReport, ScoreTable, Target};

/// Scores dataset columns for the three targets.
///
/// Holds only read-only state, so one classifier can serve many threads.
pub struct ColumnClassifier {
    config: DetectorConfig,
    names: Arc<GivenNames>,
    recognizer: Arc<dyn EntityRecognizer>,
}

impl Default for ColumnClassifier {
    fn default() -> Self {
        let names = GivenNames::builtin();
        Self {
            config: DetectorConfig::default(),
            recognizer: Arc::new(HeuristicRecognizer::new(Arc::clone(&names))),
            names,
        }
    }
}

impl ColumnClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: DetectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the given-name dictionary. The built-in recognizer is rebuilt
    /// over the new dictionary; call [`with_recognizer`](Self::with_recognizer)
    /// afterwards to install a different backend.
    pub fn with_names(mut self, names: Arc<GivenNames>) -> Self {
        self.recognizer = Arc::new(HeuristicRecognizer::new(Arc::clone(&names)));
        self.names = names;
        self
    }

    pub fn with_recognizer(mut self, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        self.recognizer = recognizer;
        self
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn recognizer_name(&self) -> &str {
        self.recognizer.backend_name()
    }

    pub fn score_name(&self, column: &Column) -> f64 {
        name::score_name_column(
            column,
            &self.config.name,
            &self.names,
            self.recognizer.as_ref(),
        )
    }

    pub fn score_phone(&self, column: &Column) -> f64 {
        phone::score_phone_column(column, &self.config.phone)
    }

    pub fn score_document(&self, column: &Column) -> f64 {
        document::score_document_column(column, &self.config.document)
    }

    /// Detect the column holding a person's full name.
    pub fn detect_name(&self, dataset: &Dataset) -> Result<ColumnDetection, ColunaError> {
        self.detect(dataset, Target::Name, |c| self.score_name(c))
    }

    /// Detect the column holding Brazilian phone numbers.
    pub fn detect_phone(&self, dataset: &Dataset) -> Result<ColumnDetection, ColunaError> {
        self.detect(dataset, Target::Phone, |c| self.score_phone(c))
    }

    /// Detect the column holding the passive pole's CPF/CNPJ.
    pub fn detect_document(&self, dataset: &Dataset) -> Result<ColumnDetection, ColunaError> {
        self.detect(dataset, Target::Document, |c| self.score_document(c))
    }

    /// Run all three detectors.
    pub fn detect_all(&self, dataset: &Dataset) -> Result<DetectionReport, ColunaError> {
        Ok(DetectionReport {
            rows: dataset.row_count(),
            columns: column_summaries(dataset),
            name: self.detect_name(dataset)?,
            phone: self.detect_phone(dataset)?,
            document: self.detect_document(dataset)?,
        })
    }

    fn detect<F>(
        &self,
        dataset: &Dataset,
        target: Target,
        score: F,
    ) -> Result<ColumnDetection, ColunaError>
    where
        F: Fn(&Column) -> f64,
    {
        let mut table = ScoreTable::new();
        for column in dataset.textual_columns() {
            table.push(column.name.clone(), score(column));
        }
        let detection =
            ColumnDetection::from_table(target, &table).ok_or(ColunaError::NoTextualColumns)?;
        tracing::info!(
            detector = %target,
            column = %detection.best,
            score = detection.best_score(),
            candidates = table.len(),
            "best column"
        );
        Ok(detection)
    }
}

/// Kind, eligibility and fill of every column, in dataset order.
pub fn column_summaries(dataset: &Dataset) -> Vec<ColumnSummary> {
    let eligible: Vec<&str> = dataset
        .textual_columns()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    dataset
        .columns()
        .iter()
        .map(|c| ColumnSummary {
            name: c.name.clone(),
            kind: c.kind(),
            eligible: eligible.contains(&c.name.as_str()),
            non_missing: c.non_missing_count(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;
    use crate::ner::{Entity, EntityLabel};

    struct EveryLinePerson;

    impl EntityRecognizer for EveryLinePerson {
        fn recognize(&self, text: &str) -> Vec<Entity> {
            text.lines()
                .map(|l| Entity {
                    text: l.to_string(),
                    label: EntityLabel::Person,
                })
                .collect()
        }

        fn backend_name(&self) -> &str {
            "every-line"
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            Column::new("id", vec![Cell::Int(1), Cell::Int(2)]),
            Column::from_strs("cliente", &["Maria Souza", "Pedro Lima"]),
            Column::from_strs("fone", &["(11) 98765-4321", "(21) 3333-4444"]),
            Column::from_strs("cpf", &["111.444.777-35", "529.982.247-25"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_numeric_only_dataset_fails() {
        let ds = Dataset::new(vec![Column::new("n", vec![Cell::Int(1)])]).unwrap();
        let err = ColumnClassifier::new().detect_name(&ds).unwrap_err();
        assert!(matches!(err, ColunaError::NoTextualColumns));
        assert_eq!(err.to_string(), "no textual/string columns found");
    }

    #[test]
    fn test_detect_all_picks_each_column() {
        let report = ColumnClassifier::new().detect_all(&dataset()).unwrap();
        assert_eq!(report.name.best, "cliente");
        assert_eq!(report.phone.best, "fone");
        assert_eq!(report.document.best, "cpf");
        assert_eq!(report.rows, 2);
        assert_eq!(report.name.scores.len(), 3);
        assert!(!report.columns[0].eligible);
    }

    #[test]
    fn test_recognizer_is_injected() {
        let classifier = ColumnClassifier::new().with_recognizer(Arc::new(EveryLinePerson));
        assert_eq!(classifier.recognizer_name(), "every-line");
        let fone = dataset().column("fone").cloned().unwrap();
        // entity 0.20 + non-null 0.10 + multi-token 0.15 + length 0.10
        let s = classifier.score_name(&fone);
        assert!((s - 0.55).abs() < 1e-9);
    }

    #[test]
    fn test_zero_row_dataset_uses_header_evidence() {
        let ds = Dataset::new(vec![
            Column::new("Nome", vec![]),
            Column::new("CPF Polo Passivo", vec![]),
        ])
        .unwrap();
        let report = ColumnClassifier::new().detect_all(&ds).unwrap();
        assert_eq!(report.name.best, "Nome");
        assert_eq!(report.name.best_score(), 0.0);
        assert_eq!(report.document.best, "CPF Polo Passivo");
        assert_eq!(report.document.score_of("CPF Polo Passivo"), Some(30.0));
    }
}
