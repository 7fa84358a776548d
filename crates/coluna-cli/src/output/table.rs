use coluna_core::brazil::BrPhone;
use coluna_core::contacts::Contact;
use coluna_core::detect::outcome::{ColumnDetection, ColumnSummary, DetectionReport, Target};

use crate::commands::check::DocumentCheck;

pub fn print_report(report: &DetectionReport) {
    println!("{} row(s), {} column(s)\n", report.rows, report.columns.len());
    for detection in report.detections() {
        print_detection(detection);
    }

    let skipped: Vec<&str> = report
        .columns
        .iter()
        .filter(|c| !c.eligible)
        .map(|c| c.name.as_str())
        .collect();
    if !skipped.is_empty() {
        println!("Not considered (non-text): {}", skipped.join(", "));
    }
}

fn print_detection(detection: &ColumnDetection) {
    println!("=== {} ===\n", detection.target);
    println!("  Best: {}\n", detection.best);

    let width = detection
        .scores
        .iter()
        .map(|s| s.column.chars().count())
        .max()
        .unwrap_or(10);
    for s in &detection.scores {
        let marker = if s.column == detection.best { " *" } else { "" };
        println!(
            "  {:<width$}  {}{}",
            s.column,
            format_score(detection.target, s.score),
            marker,
            width = width
        );
    }
    println!();
}

/// Bounded scores get four decimals; the unbounded document score two.
fn format_score(target: Target, score: f64) -> String {
    match target {
        Target::Name | Target::Phone => format!("{score:>7.4}"),
        Target::Document => format!("{score:>8.2}"),
    }
}

pub fn print_inspection(rows: usize, columns: &[ColumnSummary]) {
    println!("{rows} row(s), {} column(s)\n", columns.len());

    let width = columns
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);
    println!("  {:<width$}  {:<9}  {:>8}  Eligible", "Column", "Kind", "Filled");
    for c in columns {
        println!(
            "  {:<width$}  {:<9}  {:>8}  {}",
            c.name,
            c.kind.to_string(),
            c.non_missing,
            if c.eligible { "yes" } else { "no" },
        );
    }
}

pub fn print_contacts(report: &DetectionReport, contacts: &[Contact]) {
    println!(
        "Columns: name '{}', document '{}', phone '{}'\n",
        report.name.best, report.document.best, report.phone.best
    );

    let name_width = contacts
        .iter()
        .filter_map(|c| c.name.as_ref())
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);
    println!(
        "  {:>5}  {:<name_width$}  {:<20}  {:<6}  Phone",
        "Row", "Name", "Document", "Valid"
    );
    for c in contacts {
        let document = match (&c.document, &c.document_raw) {
            (Some(doc), _) => doc.formatted(),
            (None, Some(raw)) => raw.clone(),
            (None, None) => "-".to_string(),
        };
        let phone = c
            .phone
            .as_ref()
            .map(|p| p.e164.clone().unwrap_or_else(|| p.raw.clone()))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:>5}  {:<name_width$}  {:<20}  {:<6}  {}",
            c.row + 1,
            c.name.as_deref().unwrap_or("-"),
            document,
            if c.document_valid { "yes" } else { "no" },
            phone,
        );
    }

    let invalid = contacts.iter().filter(|c| c.has_invalid_document()).count();
    println!("\n{} contact(s), {invalid} with an invalid CPF/CNPJ", contacts.len());
}

pub fn print_documents(checks: &[DocumentCheck]) {
    for check in checks {
        match (&check.document, &check.error) {
            (Some(doc), _) => println!(
                "  {}  {} {}  {}",
                check.input,
                doc.kind(),
                doc.formatted(),
                if check.valid { "valid" } else { "INVALID check digits" }
            ),
            (None, Some(err)) => println!("  {}  {err}", check.input),
            (None, None) => println!("  {}", check.input),
        }
    }
}

pub fn print_phones(phones: &[BrPhone]) {
    for phone in phones {
        let kind = if phone.is_mobile() {
            "mobile"
        } else if phone.area_code().is_some() {
            "landline"
        } else {
            "unknown"
        };
        println!(
            "  {}  digits {}  national {}  e164 {}  ({kind})",
            phone.raw,
            phone.digits,
            phone.national,
            phone.e164.as_deref().unwrap_or("-"),
        );
    }
}
