//! Numeral extraction for Portuguese (pt-BR) transcripts.

use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

use super::keywords::{LITERS_TERMS, ODOMETER_TERMS};
use super::normalize::normalize;
use super::patterns::{GROUPED_INTEGER, NUMERAL, SPOKEN_DECIMAL};
use super::FieldExtractor;

/// A numeral found in a transcript.
///
/// `start..end` are byte offsets of the numeral (without any currency marker)
/// in the original, non-normalized transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumericToken {
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub start: usize,
    pub end: usize,
}

impl NumericToken {
    /// The numeral as written in `text`.
    pub fn source<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }

    /// Value of an odometer reading.
    ///
    /// Odometers are integral, so "42.500" reads as 42500 here even though a
    /// single dot is a decimal point everywhere else.
    pub fn odometer_value(&self, text: &str) -> Decimal {
        let source = self.source(text);
        if GROUPED_INTEGER.is_match(source) {
            Decimal::from_str(&source.replace('.', "")).unwrap_or(self.value)
        } else {
            self.value
        }
    }
}

/// Numeral extractor.
pub struct NumericExtractor;

impl NumericExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NumericExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NumericExtractor {
    type Output = NumericToken;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut tokens = Vec::new();

        for caps in NUMERAL.captures_iter(text) {
            let Some(num) = caps.name("num") else {
                continue;
            };

            // "50 e 10 litros" is two quantities, not 50.10
            if let Some(parts) = SPOKEN_DECIMAL.captures(num.as_str()) {
                if followed_by_unit(&text[num.end()..]) {
                    tokens.extend(parts.iter().skip(1).flatten().filter_map(|part| {
                        token_at(part.as_str(), num.start() + part.start(), num.start() + part.end())
                    }));
                    continue;
                }
            }

            tokens.extend(token_at(num.as_str(), num.start(), num.end()));
        }

        tokens
    }
}

fn token_at(source: &str, start: usize, end: usize) -> Option<NumericToken> {
    Some(NumericToken {
        value: parse_ptbr_number(source)?,
        start,
        end,
    })
}

/// Whether the next word of `rest` is a liters or odometer unit.
fn followed_by_unit(rest: &str) -> bool {
    let word: String = rest
        .trim_start()
        .chars()
        .take_while(|c| c.is_alphanumeric())
        .collect();
    let word = normalize(&word);

    !word.is_empty() && (LITERS_TERMS.matches(&word) || ODOMETER_TERMS.matches(&word))
}

/// Extract every numeral of `text`, left to right.
pub fn extract_numbers(text: &str) -> Vec<NumericToken> {
    NumericExtractor::new().extract_all(text)
}

/// Parse a pt-BR numeral ("1.200,50", "50,90", "50.90", "1.234.567", "5 e 90").
///
/// A comma is always the decimal separator. Without one, a single dot is a
/// decimal point; with several, they are thousands separators when the last
/// group has three digits, otherwise only the last one is a decimal point.
pub fn parse_ptbr_number(s: &str) -> Option<Decimal> {
    let s = s.trim();

    if let Some(caps) = SPOKEN_DECIMAL.captures(s) {
        let units = Decimal::from_str(&caps[1]).ok()?;
        let cents = Decimal::from_str(&caps[2]).ok()?;
        return Some(units + cents / Decimal::ONE_HUNDRED);
    }

    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        match cleaned.matches('.').count() {
            0 | 1 => cleaned,
            _ => {
                let last_dot = cleaned.rfind('.')?;
                let (integer, fraction) = cleaned.split_at(last_dot);
                if fraction.len() == 4 {
                    cleaned.replace('.', "")
                } else {
                    format!("{}{}", integer.replace('.', ""), fraction)
                }
            }
        }
    };

    Decimal::from_str(&normalized).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_ptbr_number() {
        assert_eq!(parse_ptbr_number("1.200,50"), Some(dec("1200.50")));
        assert_eq!(parse_ptbr_number("50,90"), Some(dec("50.90")));
        assert_eq!(parse_ptbr_number("50.90"), Some(dec("50.90")));
        assert_eq!(parse_ptbr_number("1.234.567"), Some(dec("1234567")));
        assert_eq!(parse_ptbr_number("42500"), Some(dec("42500")));
    }

    #[test]
    fn test_parse_single_dot_is_decimal() {
        assert_eq!(parse_ptbr_number("1.200"), Some(dec("1.2")));
    }

    #[test]
    fn test_parse_multiple_dots_short_last_group() {
        assert_eq!(parse_ptbr_number("1.234.56"), Some(dec("1234.56")));
    }

    #[test]
    fn test_parse_spoken_decimal() {
        assert_eq!(parse_ptbr_number("5 e 90"), Some(dec("5.90")));
        assert_eq!(parse_ptbr_number("50 e 05"), Some(dec("50.05")));
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_ptbr_number(""), None);
        assert_eq!(parse_ptbr_number("abc"), None);
        assert_eq!(parse_ptbr_number("1,2,3"), None);
    }

    #[test]
    fn test_extract_numbers_offsets() {
        let text = "coloquei R$ 50, preço 5,89";
        let tokens = extract_numbers(text);

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].value, dec("50"));
        assert_eq!(tokens[0].source(text), "50");
        assert_eq!(tokens[1].value, dec("5.89"));
        assert_eq!(tokens[1].source(text), "5,89");
        assert!(tokens[0].end <= tokens[1].start);
    }

    #[test]
    fn test_extract_numbers_grouped_with_short_last_group() {
        let text = "total 1.234.56";
        let tokens = extract_numbers(text);

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].value, dec("1234.56"));
        assert_eq!(tokens[0].source(text), "1.234.56");
    }

    #[test]
    fn test_extract_spoken_decimal_any_case() {
        let tokens = extract_numbers("litro 5 E 90");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].value, dec("5.90"));
    }

    #[test]
    fn test_spoken_decimal_before_unit_is_split() {
        let text = "paguei 50 e 10 litros";
        let tokens = extract_numbers(text);

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].value, dec("50"));
        assert_eq!(tokens[0].source(text), "50");
        assert_eq!(tokens[1].value, dec("10"));
        assert_eq!(tokens[1].source(text), "10");

        let tokens = extract_numbers("5 e 90 o litro");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].value, dec("5.90"));
    }

    #[test]
    fn test_extract_numbers_none() {
        assert!(extract_numbers("cinquenta reais").is_empty());
        assert_eq!(NumericExtractor::new().extract("oi"), None);
    }

    #[test]
    fn test_overlong_numeral_is_dropped() {
        let text = "999999999999999999999999999999999 e 10";
        let tokens = extract_numbers(text);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].value, dec("10"));
    }

    #[test]
    fn test_odometer_value() {
        let text = "km 42.500";
        let token = extract_numbers(text)[0];
        assert_eq!(token.value, dec("42.5"));
        assert_eq!(token.odometer_value(text), dec("42500"));

        let text = "km 98000";
        let token = extract_numbers(text)[0];
        assert_eq!(token.odometer_value(text), dec("98000"));
    }
}
