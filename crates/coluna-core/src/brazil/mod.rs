pub mod document;
pub mod phone;

pub use document::{is_valid_cnpj, is_valid_cpf, Document, DocumentKind};
pub use phone::BrPhone;

/// Keep ASCII digits only: "111.444.777-35" -> "11144477735".
pub fn only_digits(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}
