//! Amount resolution for generic transactions.

use rust_decimal::Decimal;

use super::cardinal::parse_cardinal;
use super::numbers::NumericExtractor;
use super::patterns::WORD;
use super::FieldExtractor;

const REAIS: &[&str] = &["real", "reais"];
const CENTAVOS: &[&str] = &["centavo", "centavos"];
const MAX_CENTS: u64 = 99;

/// Resolve the amount of a transaction transcript.
///
/// The first numeral wins. Without digits, the spoken amount is composed from
/// the words before "reais" (integer part) and the words between "reais" and
/// "centavos" (cents, capped at 99).
pub fn resolve_amount(raw: &str, normalized: &str) -> Option<Decimal> {
    if let Some(token) = NumericExtractor::new().extract(raw) {
        return Some(token.value);
    }

    resolve_spoken_amount(normalized)
}

/// Compose an amount from spelled-out words in a normalized transcript.
pub fn resolve_spoken_amount(normalized: &str) -> Option<Decimal> {
    let words: Vec<&str> = WORD.find_iter(normalized).map(|m| m.as_str()).collect();

    let reais_at = words.iter().position(|w| REAIS.contains(w));
    let centavos_at = words.iter().position(|w| CENTAVOS.contains(w));

    let (integer, cents) = match (reais_at, centavos_at) {
        (Some(r), Some(c)) if c > r => (parse_cardinal(&words[..r]), parse_cardinal(&words[r + 1..c])),
        (Some(r), _) => (parse_cardinal(&words[..r]), None),
        (None, Some(c)) => (None, parse_cardinal(&words[..c])),
        (None, None) => (parse_cardinal(&words), None),
    };

    if integer.is_none() && cents.is_none() {
        return None;
    }

    let integer = Decimal::from(integer.unwrap_or(0));
    let cents = Decimal::from(cents.unwrap_or(0).min(MAX_CENTS));
    Some(integer + cents / Decimal::ONE_HUNDRED)
}

/// Format an amount in Brazilian style (R$ 1.234,56).
pub fn format_brl_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.abs());
    let parts: Vec<&str> = s.split('.').collect();

    if parts.len() != 2 {
        return format!("R$ {}", s);
    }

    let integer_part = parts[0];
    let decimal_part = parts[1];

    // Add thousand separators
    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("{}R$ {},{}", sign, formatted, decimal_part)
}
