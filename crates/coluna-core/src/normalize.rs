use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Decompose (NFKD) and drop combining marks: "João" -> "Joao".
pub fn strip_accents(s: &str) -> String {
    s.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Accent-stripped lowercase form used for header matching.
pub fn strip_accents_lower(s: &str) -> String {
    strip_accents(s).to_lowercase()
}

/// Fold to ASCII letters and spaces only, trimmed.
///
/// Anything that does not survive NFKD as an ASCII letter or space is
/// dropped, so digits, punctuation and non-Latin scripts disappear.
pub fn clean_letters(s: &str) -> String {
    let folded: String = s
        .nfkd()
        .filter(|c| c.is_ascii_alphabetic() || *c == ' ')
        .collect();
    folded.trim().to_string()
}

/// Title-case check with the usual cased/uncased transition rules.
///
/// Uppercase letters may only follow uncased characters and lowercase
/// letters only cased ones; at least one cased character is required.
/// "Maria Silva" passes, "Maria da Silva" and "MARIA" do not.
pub fn is_title_case(s: &str) -> bool {
    let mut cased_seen = false;
    let mut prev_cased = false;
    for c in s.chars() {
        if c.is_uppercase() {
            if prev_cased {
                return false;
            }
            prev_cased = true;
            cased_seen = true;
        } else if c.is_lowercase() {
            if !prev_cased {
                return false;
            }
            prev_cased = true;
            cased_seen = true;
        } else {
            prev_cased = false;
        }
    }
    cased_seen
}
