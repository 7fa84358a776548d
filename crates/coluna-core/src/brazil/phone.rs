use serde::{Deserialize, Serialize};

use super::only_digits;

/// A Brazilian phone number normalized from free-form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrPhone {
    pub raw: String,
    /// Every digit of the input, country code included.
    pub digits: String,
    /// Area code plus subscriber, without the `55` country code.
    pub national: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e164: Option<String>,
}

impl BrPhone {
    pub fn parse(raw: &str) -> BrPhone {
        let digits = only_digits(raw);
        let has_country_code = digits.starts_with("55") && matches!(digits.len(), 12 | 13);
        let national = if has_country_code {
            digits[2..].to_string()
        } else {
            digits.clone()
        };

        let e164 = matches!(national.len(), 10 | 11).then(|| format!("+55{national}"));

        BrPhone {
            raw: raw.to_string(),
            digits,
            national,
            e164,
        }
    }

    /// Two-digit area code (DDD), when the national number carries one.
    pub fn area_code(&self) -> Option<&str> {
        matches!(self.national.len(), 10 | 11).then(|| &self.national[..2])
    }

    /// Eleven-digit national numbers whose subscriber starts with 9.
    pub fn is_mobile(&self) -> bool {
        self.national.len() == 11 && self.national.as_bytes()[2] == b'9'
    }

    /// Keys for matching the same line written with or without the mobile 9:
    /// the last 10 and the last 11 national digits.
    pub fn match_keys(&self) -> (String, String) {
        (tail(&self.national, 10), tail(&self.national, 11))
    }
}

fn tail(s: &str, n: usize) -> String {
    s[s.len().saturating_sub(n)..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_with_country_code() {
        let p = BrPhone::parse("+55 (11) 98765-4321");
        assert_eq!(p.digits, "5511987654321");
        assert_eq!(p.national, "11987654321");
        assert_eq!(p.e164.as_deref(), Some("+5511987654321"));
        assert_eq!(p.area_code(), Some("11"));
        assert!(p.is_mobile());
    }

    #[test]
    fn test_landline_without_country_code() {
        let p = BrPhone::parse("(21) 3333-4444");
        assert_eq!(p.national, "2133334444");
        assert_eq!(p.e164.as_deref(), Some("+552133334444"));
        assert!(!p.is_mobile());
    }

    #[test]
    fn test_short_number_has_no_e164() {
        let p = BrPhone::parse("3333-4444");
        assert_eq!(p.national, "33334444");
        assert!(p.e164.is_none());
        assert!(p.area_code().is_none());
    }

    #[test]
    fn test_match_keys() {
        let p = BrPhone::parse("11 98765-4321");
        assert_eq!(
            p.match_keys(),
            ("1987654321".to_string(), "11987654321".to_string())
        );
        let short = BrPhone::parse("4321");
        assert_eq!(short.match_keys(), ("4321".to_string(), "4321".to_string()));
    }
}
