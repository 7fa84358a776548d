//! Integration tests for the column detectors over whole datasets.
//!
//! Datasets are synthetic and built in-process; the loader tests write
//! temporary CSV and XLSX files.

use std::io::Write;
use std::sync::{Arc, Mutex};

use coluna_core::brazil::document::cpf_check_digits;
use coluna_core::contacts::extract_contacts;
use coluna_core::load::{load_path, LoadOptions};
use coluna_core::ner::{Entity, EntityLabel, EntityRecognizer};
use coluna_core::model::ColumnKind;
use coluna_core::{
    detect_brazil_phone_column, detect_columns, detect_name_column,
    detect_passive_pole_document_column, Cell, Column, ColumnClassifier, ColunaError, Dataset,
};

const FIRST: &[&str] = &[
    "Maria", "João", "Ana", "Pedro", "Lucas", "Juliana", "Carlos", "Fernanda", "Rafael", "José",
];
const LAST: &[&str] = &[
    "Silva", "Souza", "Oliveira", "Santos", "Pereira", "Costa", "Rodrigues", "Almeida",
];

fn full_name(i: usize) -> String {
    let first = FIRST[i % FIRST.len()];
    let last = LAST[i % LAST.len()];
    if i % 2 == 0 {
        format!("{first} {last}")
    } else {
        let middle = LAST[(i + 3) % LAST.len()];
        format!("{first} {middle} {last}")
    }
}

fn valid_cpf(i: usize) -> String {
    let base = format!("{:09}", 100_000_000 + i * 7_919);
    let mut digits = [0u8; 9];
    for (d, b) in digits.iter_mut().zip(base.bytes()) {
        *d = b - b'0';
    }
    let [c1, c2] = cpf_check_digits(&digits);
    format!(
        "{}.{}.{}-{c1}{c2}",
        &base[0..3],
        &base[3..6],
        &base[6..9]
    )
}

fn mobile(i: usize) -> String {
    format!("+55 11 9{:04}-{:04}", 1000 + i, 2000 + i)
}

fn scenario(rows: usize) -> Dataset {
    let names: Vec<String> = (0..rows).map(full_name).collect();
    let docs: Vec<String> = (0..rows).map(valid_cpf).collect();
    let phones: Vec<String> = (0..rows).map(mobile).collect();
    Dataset::new(vec![
        Column::new("Nome Completo", names.into_iter().map(Cell::from).collect()),
        Column::new("Documento", docs.into_iter().map(Cell::from).collect()),
        Column::new("Celular", phones.into_iter().map(Cell::from).collect()),
    ])
    .unwrap()
}

/// Two-sheet workbook: a numeric "Resumo" sheet first, then "Contatos" with
/// a blank header over the CPF column and a numeric "Valor" column.
fn contacts_workbook(rows: usize) -> Vec<u8> {
    use rust_xlsxwriter::{Workbook, Worksheet};

    let mut summary = Worksheet::new();
    summary.set_name("Resumo").unwrap();
    summary.write_string(0, 0, "Total").unwrap();
    summary.write_number(1, 0, rows as f64).unwrap();

    let mut contacts = Worksheet::new();
    contacts.set_name("Contatos").unwrap();
    contacts.write_string(0, 0, "Nome").unwrap();
    contacts.write_string(0, 2, "Telefone").unwrap();
    contacts.write_string(0, 3, "Valor").unwrap();
    for i in 0..rows {
        let r = i as u32 + 1;
        contacts.write_string(r, 0, &full_name(i)).unwrap();
        contacts.write_string(r, 1, &valid_cpf(i)).unwrap();
        contacts
            .write_string(r, 2, &format!("(11) 9{:04}-{:04}", 3000 + i, 4000 + i))
            .unwrap();
        contacts.write_number(r, 3, (i * 10) as f64).unwrap();
    }

    let mut workbook = Workbook::new();
    workbook.push_worksheet(summary);
    workbook.push_worksheet(contacts);
    workbook.save_to_buffer().unwrap()
}

fn xlsx_file(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

/// Records every text handed to the recognizer and tags each line as a person.
#[derive(Default)]
struct RecordingRecognizer {
    seen: Mutex<Vec<String>>,
}

impl EntityRecognizer for RecordingRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        self.seen.lock().unwrap().push(text.to_string());
        text.lines()
            .map(|l| Entity {
                text: l.to_string(),
                label: EntityLabel::Person,
            })
            .collect()
    }

    fn backend_name(&self) -> &str {
        "recording"
    }
}

// ---------------------------------------------------------------------------
// Test 1: Each detector picks its column in a 50-row dataset
// ---------------------------------------------------------------------------
#[test]
fn end_to_end_scenario_picks_matching_columns() {
    let ds = scenario(50);

    let name = detect_name_column(&ds).unwrap();
    assert_eq!(name.best, "Nome Completo");
    assert!(name.best_score() > 0.9, "name score {}", name.best_score());

    let phone = detect_brazil_phone_column(&ds).unwrap();
    assert_eq!(phone.best, "Celular");
    assert_eq!(phone.best_score(), 1.0);

    let doc = detect_passive_pole_document_column(&ds).unwrap();
    assert_eq!(doc.best, "Documento");
    assert!((doc.best_score() - 125.0).abs() < 1e-9);
}

// ---------------------------------------------------------------------------
// Test 2: Scores come back ranked, one per eligible column
// ---------------------------------------------------------------------------
#[test]
fn score_tables_are_complete_and_ranked() {
    let report = detect_columns(&scenario(20)).unwrap();
    for detection in report.detections() {
        assert_eq!(detection.scores.len(), 3);
        assert_eq!(detection.scores[0].column, detection.best);
        assert!(detection
            .scores
            .windows(2)
            .all(|w| w[0].score >= w[1].score));
    }
}

// ---------------------------------------------------------------------------
// Test 3: Repeated runs give identical reports
// ---------------------------------------------------------------------------
#[test]
fn detection_is_deterministic() {
    let ds = scenario(50);
    let a = detect_columns(&ds).unwrap();
    let b = detect_columns(&ds).unwrap();
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// Test 4: "Polo Passivo" header beats a neutral name by the header bonus
// ---------------------------------------------------------------------------
#[test]
fn passive_pole_header_dominates_neutral_column() {
    let values = ["sem documento", "pendente", "n/d", "aguardando"];
    let ds = Dataset::new(vec![
        Column::from_strs("Documento", &values),
        Column::from_strs("Polo Passivo (CPF/CNPJ)", &values),
    ])
    .unwrap();

    let doc = detect_passive_pole_document_column(&ds).unwrap();
    assert_eq!(doc.best, "Polo Passivo (CPF/CNPJ)");
    let labeled = doc.score_of("Polo Passivo (CPF/CNPJ)").unwrap();
    let neutral = doc.score_of("Documento").unwrap();
    assert!(labeled - neutral >= 20.0);
}

// ---------------------------------------------------------------------------
// Test 5: Formatted CPFs lose to formatted phones under the phone detector
// ---------------------------------------------------------------------------
#[test]
fn formatted_cpfs_score_below_formatted_phones() {
    let cpfs: Vec<String> = (0..100).map(valid_cpf).collect();
    let phones: Vec<String> = (0..100)
        .map(|i| format!("(21) 3{:03}-{:04}", i, 5000 + i))
        .collect();
    let ds = Dataset::new(vec![
        Column::new("cpf", cpfs.into_iter().map(Cell::from).collect()),
        Column::new("telefone", phones.into_iter().map(Cell::from).collect()),
    ])
    .unwrap();

    let phone = detect_brazil_phone_column(&ds).unwrap();
    assert_eq!(phone.best, "telefone");
    assert!(phone.score_of("cpf").unwrap() < phone.score_of("telefone").unwrap());
    assert_eq!(phone.score_of("cpf"), Some(0.0));
}

// ---------------------------------------------------------------------------
// Test 6: A dataset without text columns is rejected by every detector
// ---------------------------------------------------------------------------
#[test]
fn numeric_dataset_has_no_candidates() {
    let ds = Dataset::new(vec![
        Column::new("id", vec![Cell::Int(1), Cell::Int(2)]),
        Column::new("valor", vec![Cell::Float(1.5), Cell::Empty]),
    ])
    .unwrap();
    for result in [
        detect_name_column(&ds),
        detect_brazil_phone_column(&ds),
        detect_passive_pole_document_column(&ds),
    ] {
        let err = result.unwrap_err();
        assert!(matches!(err, ColunaError::NoTextualColumns));
    }
}

// ---------------------------------------------------------------------------
// Test 7: Injected recognizer sees at most 100 newline-joined values
// ---------------------------------------------------------------------------
#[test]
fn recognizer_receives_bounded_sample() {
    let recognizer = Arc::new(RecordingRecognizer::default());
    let classifier = ColumnClassifier::new().with_recognizer(recognizer.clone());
    assert_eq!(classifier.recognizer_name(), "recording");

    let detection = classifier.detect_name(&scenario(150)).unwrap();
    assert_eq!(detection.best, "Nome Completo");

    let seen = recognizer.seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    for text in seen.iter() {
        assert_eq!(text.lines().count(), 100);
    }
    assert!(seen[0].starts_with("Maria Silva\nJoão "));
}

// ---------------------------------------------------------------------------
// Test 8: CSV on disk through loading, detection and contact extraction
// ---------------------------------------------------------------------------
#[test]
fn csv_file_round_through_contacts() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "Nome;CPF/CNPJ Polo Passivo;Telefone;Valor").unwrap();
    for i in 0..10 {
        writeln!(
            file,
            "{};{};(11) 9{:04}-{:04};{}",
            full_name(i),
            valid_cpf(i),
            3000 + i,
            4000 + i,
            i * 10
        )
        .unwrap();
    }
    writeln!(file, ";;;").unwrap();
    file.flush().unwrap();

    let ds = load_path(file.path(), &LoadOptions::default()).unwrap();
    assert_eq!(ds.row_count(), 11);

    let report = ColumnClassifier::new().detect_all(&ds).unwrap();
    assert_eq!(report.name.best, "Nome");
    assert_eq!(report.document.best, "CPF/CNPJ Polo Passivo");
    assert_eq!(report.phone.best, "Telefone");
    assert!(report.columns.iter().any(|c| c.name == "Valor" && !c.eligible));

    let contacts = extract_contacts(&ds, &report).unwrap();
    assert_eq!(contacts.len(), 10);
    assert!(contacts.iter().all(|c| c.document_valid));
    assert_eq!(
        contacts[0].phone.as_ref().unwrap().e164.as_deref(),
        Some("+5511930004000")
    );
}

// ---------------------------------------------------------------------------
// Test 9: Header-only CSV falls back to label evidence
// ---------------------------------------------------------------------------
#[test]
fn header_only_csv_uses_labels() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "Nome,Polo Passivo,Telefone").unwrap();
    file.flush().unwrap();

    let ds = load_path(file.path(), &LoadOptions::default()).unwrap();
    let report = detect_columns(&ds).unwrap();
    assert_eq!(report.rows, 0);
    assert_eq!(report.document.best, "Polo Passivo");
    assert_eq!(report.name.best_score(), 0.0);
    assert_eq!(report.phone.best_score(), 0.0);
}

// ---------------------------------------------------------------------------
// Test 10: Unknown extensions are refused before reading
// ---------------------------------------------------------------------------
#[test]
fn unsupported_extension_is_an_error() {
    let file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    let err = load_path(file.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, ColunaError::UnsupportedFormat(_)));
}

// ---------------------------------------------------------------------------
// Test 11: XLSX sheet selection, blank header naming and eligibility
// ---------------------------------------------------------------------------
#[test]
fn xlsx_named_sheet_flows_through_detection() {
    let file = xlsx_file(&contacts_workbook(12));
    let options = LoadOptions {
        sheet: Some("Contatos".into()),
        ..LoadOptions::default()
    };

    let ds = load_path(file.path(), &options).unwrap();
    let names: Vec<&str> = ds.columns().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Nome", "Unnamed: 1", "Telefone", "Valor"]);
    assert_eq!(ds.row_count(), 12);
    assert_eq!(ds.column("Valor").unwrap().kind(), ColumnKind::Numeric);

    let report = detect_columns(&ds).unwrap();
    assert_eq!(report.name.best, "Nome");
    assert_eq!(report.document.best, "Unnamed: 1");
    assert_eq!(report.phone.best, "Telefone");
    assert!(report.columns.iter().any(|c| c.name == "Valor" && !c.eligible));
    assert_eq!(report.name.scores.len(), 3);
}

// ---------------------------------------------------------------------------
// Test 12: Without a sheet name the first sheet is read
// ---------------------------------------------------------------------------
#[test]
fn xlsx_defaults_to_first_sheet() {
    let file = xlsx_file(&contacts_workbook(3));
    let ds = load_path(file.path(), &LoadOptions::default()).unwrap();
    assert_eq!(ds.columns().len(), 1);
    assert_eq!(ds.columns()[0].name, "Total");
    assert_eq!(ds.columns()[0].cells, vec![Cell::Float(3.0)]);
}

// ---------------------------------------------------------------------------
// Test 13: An unknown sheet name is a load error naming the file
// ---------------------------------------------------------------------------
#[test]
fn xlsx_unknown_sheet_is_a_load_error() {
    let file = xlsx_file(&contacts_workbook(3));
    let options = LoadOptions {
        sheet: Some("Planilha9".into()),
        ..LoadOptions::default()
    };

    let err = load_path(file.path(), &options).unwrap_err();
    match &err {
        ColunaError::Load { path, reason } => {
            assert_eq!(path, file.path());
            assert!(reason.contains("sheet 'Planilha9' not found"), "{reason}");
            assert!(reason.contains("Resumo, Contatos"), "{reason}");
        }
        other => panic!("expected a load error, got {other:?}"),
    }
}
