use coluna_core::brazil::document::{cnpj_check_digits, cpf_check_digits};
use coluna_core::config::schema::{DetectorConfig, NameWeights};
use coluna_core::config::validate_config;
use coluna_core::{is_valid_cnpj, is_valid_cpf, Cell, Column, ColumnClassifier, Dataset};
use proptest::prelude::*;

fn column(name: &str, values: &[String]) -> Column {
    Column::new(name, values.iter().map(|v| Cell::from(v.as_str())).collect())
}

fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

fn all_same(digits: &[u8]) -> bool {
    digits.iter().all(|d| *d == digits[0])
}

/// Mix of names, phones, documents and noise.
fn cell_value() -> impl Strategy<Value = String> {
    prop_oneof![
        ".{0,40}",
        "[A-Z][a-z]{2,10}( [A-Z][a-z]{2,10}){0,3}",
        r"\(?[0-9]{2}\)? ?9?[0-9]{4}-?[0-9]{4}",
        r"[0-9]{3}\.?[0-9]{3}\.?[0-9]{3}-?[0-9]{2}",
        "[0-9]{8,14}",
        Just(String::new()),
    ]
}

fn weights() -> impl Strategy<Value = NameWeights> {
    proptest::collection::vec(0.0f64..1.0, 7).prop_filter_map("all-zero weights", |raw| {
        let total: f64 = raw.iter().sum();
        if total <= 1e-9 {
            return None;
        }
        let w: Vec<f64> = raw.iter().map(|x| x / total).collect();
        Some(NameWeights {
            non_null: w[0],
            alpha: w[1],
            title: w[2],
            multi_token: w[3],
            length: w[4],
            dictionary: w[5],
            entity: w[6],
        })
    })
}

proptest! {
    #[test]
    fn name_and_phone_scores_are_bounded(values in proptest::collection::vec(cell_value(), 0..40)) {
        let classifier = ColumnClassifier::new();
        let col = column("c", &values);
        let name = classifier.score_name(&col);
        let phone = classifier.score_phone(&col);
        prop_assert!((0.0..=1.0).contains(&name), "name score {}", name);
        prop_assert!((0.0..=1.0).contains(&phone), "phone score {}", phone);
        prop_assert!(classifier.score_document(&col).is_finite());
    }

    #[test]
    fn name_score_bounded_under_any_weights(
        w in weights(),
        values in proptest::collection::vec(cell_value(), 1..30),
    ) {
        let mut config = DetectorConfig::default();
        config.name.weights = w;
        prop_assert!(validate_config(&config).is_ok());
        let classifier = ColumnClassifier::new().with_config(config);
        let score = classifier.score_name(&column("c", &values));
        prop_assert!((0.0..=1.0).contains(&score), "score {}", score);
    }

    #[test]
    fn detection_is_deterministic(
        a in proptest::collection::vec(cell_value(), 5),
        b in proptest::collection::vec(cell_value(), 5),
    ) {
        let ds = Dataset::new(vec![column("a", &a), column("b", &b)]).unwrap();
        let classifier = ColumnClassifier::new();
        let first = classifier.detect_all(&ds);
        let second = classifier.detect_all(&ds);
        match (first, second) {
            (Ok(x), Ok(y)) => prop_assert_eq!(x, y),
            (Err(_), Err(_)) => {}
            _ => prop_assert!(false, "runs disagree"),
        }
    }

    #[test]
    fn missing_only_columns_score_zero(blanks in proptest::collection::vec(" {0,5}", 0..20)) {
        let classifier = ColumnClassifier::new();
        let col = column("c", &blanks);
        prop_assert_eq!(classifier.score_name(&col), 0.0);
        prop_assert_eq!(classifier.score_phone(&col), 0.0);
    }

    #[test]
    fn generated_cpf_is_valid(base in proptest::array::uniform9(0u8..10)) {
        let [c1, c2] = cpf_check_digits(&base);
        let mut digits = base.to_vec();
        digits.extend([c1, c2]);
        let cpf = digits_to_string(&digits);
        prop_assert_eq!(is_valid_cpf(&cpf), !all_same(&digits));
    }

    #[test]
    fn perturbed_cpf_check_digit_is_invalid(base in proptest::array::uniform9(0u8..10), bump in 1u8..10) {
        let [c1, c2] = cpf_check_digits(&base);
        let mut digits = base.to_vec();
        digits.extend([c1, (c2 + bump) % 10]);
        prop_assert!(!is_valid_cpf(&digits_to_string(&digits)));
    }

    #[test]
    fn generated_cnpj_is_valid(base in proptest::array::uniform12(0u8..10)) {
        let [c1, c2] = cnpj_check_digits(&base);
        let mut digits = base.to_vec();
        digits.extend([c1, c2]);
        let cnpj = digits_to_string(&digits);
        prop_assert_eq!(is_valid_cnpj(&cnpj), !all_same(&digits));
    }

    #[test]
    fn perturbed_cnpj_check_digit_is_invalid(base in proptest::array::uniform12(0u8..10), bump in 1u8..10) {
        let [c1, c2] = cnpj_check_digits(&base);
        let mut digits = base.to_vec();
        digits.extend([(c1 + bump) % 10, c2]);
        prop_assert!(!is_valid_cnpj(&digits_to_string(&digits)));
    }

    #[test]
    fn validators_never_panic(s in ".{0,30}") {
        let _ = is_valid_cpf(&s);
        let _ = is_valid_cnpj(&s);
    }
}

#[test]
fn known_documents() {
    assert!(is_valid_cpf("11144477735"));
    assert!(!is_valid_cpf("11111111111"));
    assert!(is_valid_cnpj("11222333000181"));
    assert!(!is_valid_cnpj("11222333000182"));
}
