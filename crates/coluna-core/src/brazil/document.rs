use serde::{Deserialize, Serialize};
use std::fmt;

use super::only_digits;
use crate::error::ColunaError;

const CNPJ_WEIGHTS_FIRST: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const CNPJ_WEIGHTS_SECOND: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Cpf,
    Cnpj,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Cpf => write!(f, "CPF"),
            DocumentKind::Cnpj => write!(f, "CNPJ"),
        }
    }
}

/// A CPF or CNPJ, identified by its digit count.
///
/// Only built through [`Document::parse`]; deserialized values are parsed
/// again from their digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDocument")]
pub struct Document {
    kind: DocumentKind,
    digits: String,
}

#[derive(Deserialize)]
struct RawDocument {
    kind: DocumentKind,
    digits: String,
}

impl TryFrom<RawDocument> for Document {
    type Error = ColunaError;

    fn try_from(raw: RawDocument) -> Result<Self, Self::Error> {
        let doc = Document::parse(&raw.digits)?;
        if doc.kind != raw.kind {
            return Err(ColunaError::InvalidDocument(format!(
                "'{}' is a {}, not a {}",
                raw.digits, doc.kind, raw.kind
            )));
        }
        Ok(doc)
    }
}

impl Document {
    /// Classify by digit count: 11 digits is a CPF, 14 a CNPJ.
    ///
    /// Punctuation is ignored. The checksum is not enforced here; see
    /// [`Document::is_valid`].
    pub fn parse(raw: &str) -> Result<Document, ColunaError> {
        let digits = only_digits(raw);
        let kind = match digits.len() {
            11 => DocumentKind::Cpf,
            14 => DocumentKind::Cnpj,
            n => {
                return Err(ColunaError::InvalidDocument(format!(
                    "document must contain 11 (CPF) or 14 (CNPJ) digits, got {n} in '{}'",
                    raw.trim()
                )))
            }
        };
        Ok(Document { kind, digits })
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// The 11 or 14 digits, without punctuation.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn is_valid(&self) -> bool {
        match self.kind {
            DocumentKind::Cpf => is_valid_cpf(&self.digits),
            DocumentKind::Cnpj => is_valid_cnpj(&self.digits),
        }
    }

    /// Canonical layout: `###.###.###-##` or `##.###.###/####-##`.
    pub fn formatted(&self) -> String {
        let d = &self.digits;
        match self.kind {
            DocumentKind::Cpf => format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11]),
            DocumentKind::Cnpj => format!(
                "{}.{}.{}/{}-{}",
                &d[0..2],
                &d[2..5],
                &d[5..8],
                &d[8..12],
                &d[12..14]
            ),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.formatted())
    }
}

/// Compute the two CPF check digits for the first nine digits.
pub fn cpf_check_digits(base: &[u8; 9]) -> [u8; 2] {
    let first = cpf_digit(base);
    let mut ten = [0u8; 10];
    ten[..9].copy_from_slice(base);
    ten[9] = first;
    [first, cpf_digit(&ten)]
}

/// Weights run from `len + 1` down to 2; remainder 10 maps to 0.
fn cpf_digit(digits: &[u8]) -> u8 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| (top - i as u32) * u32::from(*d))
        .sum();
    let r = (sum * 10) % 11;
    if r == 10 {
        0
    } else {
        r as u8
    }
}

/// Compute the two CNPJ check digits for the first twelve digits.
pub fn cnpj_check_digits(base: &[u8; 12]) -> [u8; 2] {
    let first = cnpj_digit(base, &CNPJ_WEIGHTS_FIRST);
    let mut thirteen = [0u8; 13];
    thirteen[..12].copy_from_slice(base);
    thirteen[12] = first;
    [first, cnpj_digit(&thirteen, &CNPJ_WEIGHTS_SECOND)]
}

fn cnpj_digit(digits: &[u8], weights: &[u32]) -> u8 {
    let sum: u32 = digits
        .iter()
        .zip(weights)
        .map(|(d, w)| u32::from(*d) * w)
        .sum();
    let r = sum % 11;
    if r < 2 {
        0
    } else {
        (11 - r) as u8
    }
}

/// Validate a CPF. Punctuation is ignored; exactly 11 digits are required and
/// repeated-digit strings are rejected regardless of checksum.
pub fn is_valid_cpf(s: &str) -> bool {
    let Some(nums) = digit_values::<11>(s) else {
        return false;
    };
    let mut base = [0u8; 9];
    base.copy_from_slice(&nums[..9]);
    cpf_check_digits(&base) == [nums[9], nums[10]]
}

/// Validate a CNPJ. Punctuation is ignored; exactly 14 digits are required and
/// repeated-digit strings are rejected regardless of checksum.
pub fn is_valid_cnpj(s: &str) -> bool {
    let Some(nums) = digit_values::<14>(s) else {
        return false;
    };
    let mut base = [0u8; 12];
    base.copy_from_slice(&nums[..12]);
    cnpj_check_digits(&base) == [nums[12], nums[13]]
}

fn digit_values<const N: usize>(s: &str) -> Option<[u8; N]> {
    let digits = only_digits(s);
    if digits.len() != N {
        return None;
    }
    let mut out = [0u8; N];
    for (slot, b) in out.iter_mut().zip(digits.bytes()) {
        *slot = b - b'0';
    }
    if out.iter().all(|d| *d == out[0]) {
        return None;
    }
    Some(out)
}
