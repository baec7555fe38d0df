//! Common regex patterns for Portuguese transcript extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Numerals, optionally preceded by a currency marker. Alternatives in order:
    // spoken decimal ("5 e 90"), dot-grouped thousands ("1.200,50", "1.234.567",
    // "1.234.56"), plain decimal or integer ("50,90", "50.90", "42500").
    pub static ref NUMERAL: Regex = Regex::new(
        r"(?i:R\$\s*)?(?P<num>\b\d{1,2}\s+(?i:e)\s+\d{2}\b|\d{1,3}(?:\.\d{3})+(?:[.,]\d+)?\b|\d+(?:[.,]\d+)?)"
    ).unwrap();

    // Spoken decimal split into its integer and cents parts
    pub static ref SPOKEN_DECIMAL: Regex = Regex::new(
        r"^(\d{1,2})\s+(?i:e)\s+(\d{2})$"
    ).unwrap();

    // Odometer reading written with dot-grouped thousands ("42.500")
    pub static ref GROUPED_INTEGER: Regex = Regex::new(
        r"^\d{1,3}(?:\.\d{3})+$"
    ).unwrap();

    // Odometer keyword immediately followed by a reading
    pub static ref ODOMETER_READING: Regex = Regex::new(
        r"(?i)\b(?:km|kms|quilometragem|kilometragem|od[oô]metro|hod[oô]metro)(?:\s+atual)?\s*:?\s*(\d+(?:\.\d{3})*)"
    ).unwrap();

    // Word tokens of normalized text
    pub static ref WORD: Regex = Regex::new(
        r"[a-z0-9]+"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numerals(text: &str) -> Vec<&str> {
        NUMERAL
            .captures_iter(text)
            .map(|c| c.name("num").unwrap().as_str())
            .collect()
    }

    #[test]
    fn test_numeral_shapes() {
        assert_eq!(numerals("1.200,50"), vec!["1.200,50"]);
        assert_eq!(numerals("1.234.567"), vec!["1.234.567"]);
        assert_eq!(numerals("total 1.234.56"), vec!["1.234.56"]);
        assert_eq!(numerals("50,90 e 50.90"), vec!["50,90", "50.90"]);
        assert_eq!(numerals("km 42500"), vec!["42500"]);
    }

    #[test]
    fn test_numeral_currency_prefix_not_in_group() {
        let caps = NUMERAL.captures("paguei R$ 35,00").unwrap();
        assert_eq!(&caps[0], "R$ 35,00");
        assert_eq!(&caps["num"], "35,00");
    }

    #[test]
    fn test_spoken_decimal() {
        assert_eq!(numerals("litro 5 e 90, total 50"), vec!["5 e 90", "50"]);
        // Three-digit integer part is never a spoken decimal
        assert_eq!(numerals("150 e 90"), vec!["150", "90"]);
        // Cents must be exactly two digits
        assert_eq!(numerals("5 e 9"), vec!["5", "9"]);
    }

    #[test]
    fn test_spoken_decimal_any_case() {
        assert_eq!(numerals("litro 5 E 90"), vec!["5 E 90"]);
        assert_eq!(&SPOKEN_DECIMAL.captures("5 E 90").unwrap()[2], "90");
    }

    #[test]
    fn test_grouped_thousands_needs_full_group() {
        assert_eq!(numerals("1.2345"), vec!["1.2345"]);
    }

    #[test]
    fn test_odometer_reading() {
        let caps = ODOMETER_READING.captures("Hodômetro: 42.500").unwrap();
        assert_eq!(&caps[1], "42.500");

        let caps = ODOMETER_READING.captures("km atual 98000").unwrap();
        assert_eq!(&caps[1], "98000");

        assert!(ODOMETER_READING.captures("50 reais").is_none());
    }
}
