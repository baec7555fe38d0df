//! Fuel entry parser: assigns the numbers of a refueling transcript to
//! price per liter, liters, total cost and odometer reading.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::models::config::ExtractionConfig;
use crate::models::fuel::{FuelField, ParsedFuelEntry};

use super::rules::candidates::{
    best_per_field, claim, min_price, price_range_score, priority, range_candidates, Candidate,
};
use super::rules::context::TokenContext;
use super::rules::keywords::{LITERS_TERMS, ODOMETER_TERMS, PRICE_TERMS, SINGULAR_LITER, TOTAL_TERMS};
use super::rules::normalize::NormalizedText;
use super::rules::numbers::{extract_numbers, NumericToken};
use super::rules::patterns::ODOMETER_READING;
use super::TranscriptParser;

/// What the plausibility repair did to a price that was not below the total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "action")]
pub enum PriceRepair {
    /// Another unclaimed token became the price.
    Replaced { from_token: usize, to_token: usize },
    /// No safe alternative; the price was left out.
    Dropped { token: usize },
}

/// Full account of a fuel transcript resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelResolution {
    /// Numerals of the transcript, left to right.
    pub tokens: Vec<NumericToken>,
    /// Winning assignments, at most one per field and per token.
    pub assignments: Vec<Candidate>,
    /// Outcome of the price plausibility repair, if it ran.
    pub repair: Option<PriceRepair>,
    /// Whether the odometer came from the "km <number>" fallback.
    pub odometer_fallback: bool,
    /// The assembled entry.
    pub entry: Option<ParsedFuelEntry>,
}

/// Fuel entry parser.
#[derive(Debug, Clone)]
pub struct FuelEntryParser {
    config: ExtractionConfig,
}

impl FuelEntryParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self::with_config(ExtractionConfig::default())
    }

    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Set the keyword context radius in characters.
    pub fn with_context_radius(mut self, radius: usize) -> Self {
        self.config.context_radius = radius;
        self
    }

    /// Enable or disable the "km <number>" fallback.
    pub fn with_odometer_fallback(mut self, enabled: bool) -> Self {
        self.config.odometer_fallback = enabled;
        self
    }

    /// Enable or disable the price plausibility repair.
    pub fn with_price_repair(mut self, enabled: bool) -> Self {
        self.config.repair_price = enabled;
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Resolve a transcript, keeping the intermediate assignments.
    pub fn resolve(&self, transcript: &str) -> FuelResolution {
        info!("Parsing fuel entry from {} characters of text", transcript.len());

        let text = NormalizedText::new(transcript);
        let tokens = extract_numbers(transcript);
        debug!("Found {} numeric tokens", tokens.len());

        let ctx = TokenContext::new(&text, &tokens, self.config.context_radius);
        let candidates = self.score(&ctx, &tokens);
        let best = best_per_field(&candidates);
        let mut assignments = claim(&best);

        let repair = if self.config.repair_price {
            repair_price(&ctx, &tokens, &mut assignments)
        } else {
            None
        };

        let mut odometer_fallback = false;
        if self.config.odometer_fallback && !assignments.iter().any(|a| a.field == FuelField::KmCurrent) {
            if let Some(index) = find_odometer_reading(transcript, &tokens, &assignments) {
                debug!("Odometer reading taken from token {} by fallback", index);
                assignments.push(Candidate::new(FuelField::KmCurrent, index, 0.0));
                odometer_fallback = true;
            }
        }

        let entry = ParsedFuelEntry::assemble(assignments.iter().map(|a| {
            let token = &tokens[a.token_index];
            let value = match a.field {
                FuelField::KmCurrent => token.odometer_value(transcript),
                _ => token.value,
            };
            (a.field, value)
        }));

        debug!(
            "Resolved {} fuel fields",
            entry.as_ref().map_or(0, ParsedFuelEntry::field_count)
        );

        FuelResolution {
            tokens,
            assignments,
            repair,
            odometer_fallback,
            entry,
        }
    }

    /// Keyword pass, then value-range pass for tokens no keyword spoke for.
    fn score(&self, ctx: &TokenContext<'_, '_>, tokens: &[NumericToken]) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for (index, token) in tokens.iter().enumerate() {
            if ctx.has_hit(index, &ODOMETER_TERMS) {
                trace!("Token {} locked to odometer", index);
                candidates.push(Candidate::new(FuelField::KmCurrent, index, priority::KEYWORD));
                continue;
            }

            let before = candidates.len();

            let price_hits = ctx.hits(index, &PRICE_TERMS);
            if !price_hits.is_empty() {
                let p = if price_hits.contains(&SINGULAR_LITER) {
                    priority::SINGULAR_LITER
                } else {
                    priority::KEYWORD
                };
                candidates.push(Candidate::new(FuelField::PricePerLiter, index, p));
            }

            if ctx.has_hit(index, &LITERS_TERMS) {
                candidates.push(Candidate::new(FuelField::Liters, index, priority::KEYWORD));
            }

            if token.value >= Decimal::TEN && ctx.has_hit(index, &TOTAL_TERMS) {
                candidates.push(Candidate::new(FuelField::TotalCost, index, priority::KEYWORD));
            }

            if candidates.len() == before {
                candidates.extend(range_candidates(index, token.value));
            }
        }

        trace!("Candidates: {:?}", candidates);
        candidates
    }
}

impl Default for FuelEntryParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptParser for FuelEntryParser {
    type Output = ParsedFuelEntry;

    fn parse(&self, transcript: &str) -> Option<ParsedFuelEntry> {
        self.resolve(transcript).entry
    }
}

/// Replace or drop a price per liter that is not below the total cost.
fn repair_price(
    ctx: &TokenContext<'_, '_>,
    tokens: &[NumericToken],
    assignments: &mut Vec<Candidate>,
) -> Option<PriceRepair> {
    let price_at = assignments.iter().position(|a| a.field == FuelField::PricePerLiter)?;
    let total = assignments.iter().find(|a| a.field == FuelField::TotalCost)?;

    let price_token = assignments[price_at].token_index;
    let total_value = tokens[total.token_index].value;
    if tokens[price_token].value < total_value {
        return None;
    }

    let claimed: Vec<usize> = assignments.iter().map(|a| a.token_index).collect();
    let alternative = tokens
        .iter()
        .enumerate()
        .filter(|(i, t)| !claimed.contains(i) && t.value >= min_price() && t.value < total_value)
        .map(|(i, t)| {
            let keyword = if ctx.has_hit(i, &PRICE_TERMS) {
                priority::REPAIR_KEYWORD_BONUS
            } else {
                0.0
            };
            (i, keyword + price_range_score(t.value))
        })
        .filter(|(_, score)| *score > 0.0)
        .max_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

    match alternative {
        Some((index, score)) => {
            debug!("Price token {} not below total, replaced by token {}", price_token, index);
            assignments[price_at] = Candidate::new(FuelField::PricePerLiter, index, score);
            Some(PriceRepair::Replaced {
                from_token: price_token,
                to_token: index,
            })
        }
        None => {
            debug!("Price token {} not below total and no alternative, dropped", price_token);
            assignments.remove(price_at);
            Some(PriceRepair::Dropped { token: price_token })
        }
    }
}

/// Token right after an odometer keyword that no field has claimed.
fn find_odometer_reading(
    transcript: &str,
    tokens: &[NumericToken],
    assignments: &[Candidate],
) -> Option<usize> {
    ODOMETER_READING.captures_iter(transcript).find_map(|caps| {
        let reading = caps.get(1)?;
        let index = tokens
            .iter()
            .position(|t| t.start < reading.end() && reading.start() < t.end)?;
        let claimed = assignments.iter().any(|a| a.token_index == index);
        (!claimed).then_some(index)
    })
}

/// Parse a fuel transcript with default settings.
pub fn parse_fuel_entry(transcript: &str) -> Option<ParsedFuelEntry> {
    FuelEntryParser::new().parse(transcript)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_total_price_and_odometer() {
        let entry = parse_fuel_entry("coloquei 50 reais, preço do litro 5 e 90, km atual 42500").unwrap();

        assert_eq!(
            entry,
            ParsedFuelEntry {
                price_per_liter: Some(d("5.9")),
                total_cost: Some(d("50")),
                liters: None,
                km_current: Some(d("42500")),
            }
        );
    }

    #[test]
    fn test_liters_and_total_in_separate_clauses() {
        let entry = parse_fuel_entry("abasteci 40 litros, 200 reais").unwrap();

        assert_eq!(entry.liters, Some(d("40")));
        assert_eq!(entry.total_cost, Some(d("200")));
        assert_eq!(entry.price_per_liter, None);
    }

    #[test]
    fn test_shared_clause_loses_a_field() {
        // Both numbers see "litros" and "reais"; the later one wins both
        // fields and the weaker field is not reassigned to 40
        let resolution = FuelEntryParser::new().resolve("abasteci 40 litros por 200 reais");
        let entry = resolution.entry.unwrap();

        assert_eq!(entry.liters, Some(d("200")));
        assert_eq!(entry.total_cost, None);
        assert_eq!(resolution.assignments.len(), 1);
    }

    #[test]
    fn test_grouped_total_with_short_last_group() {
        let resolution = FuelEntryParser::new().resolve("total 1.234.56");

        assert_eq!(resolution.tokens.len(), 1);
        assert_eq!(resolution.entry.unwrap().total_cost, Some(d("1234.56")));
    }

    #[test]
    fn test_spoken_decimal_price_any_case() {
        let entry = parse_fuel_entry("Preço do litro 5 E 90, total 50").unwrap();

        assert_eq!(
            entry,
            ParsedFuelEntry {
                price_per_liter: Some(d("5.9")),
                total_cost: Some(d("50")),
                liters: None,
                km_current: None,
            }
        );
    }

    #[test]
    fn test_spoken_pair_before_liters_is_not_a_decimal() {
        let entry = parse_fuel_entry("paguei 50 e 10 litros, total 80").unwrap();

        assert_eq!(entry.liters, Some(d("10")));
        assert_eq!(entry.total_cost, Some(d("80")));
        assert_eq!(entry.price_per_liter, None);
    }

    #[test]
    fn test_bare_price_from_value_range() {
        let entry = parse_fuel_entry("paguei 200 reais, 40 litros, a 5,00").unwrap();

        assert_eq!(entry.total_cost, Some(d("200")));
        assert_eq!(entry.liters, Some(d("40")));
        assert_eq!(entry.price_per_liter, Some(d("5")));
    }

    #[test]
    fn test_singular_litro_marks_price() {
        let entry = parse_fuel_entry("gasolina a 6,19 o litro").unwrap();
        assert_eq!(entry.price_per_liter, Some(d("6.19")));
        assert_eq!(entry.liters, None);
    }

    #[test]
    fn test_small_numbers_never_total_from_keywords() {
        let resolution = FuelEntryParser::new().resolve("paguei 5 reais");
        let entry = resolution.entry.unwrap();

        assert_eq!(entry.total_cost, None);
        assert_eq!(entry.price_per_liter, Some(d("5")));
    }

    #[test]
    fn test_price_dropped_when_no_alternative() {
        let resolution = FuelEntryParser::new().resolve("preço do litro 80, total 50");
        let entry = resolution.entry.clone().unwrap();

        assert_eq!(entry.total_cost, Some(d("50")));
        assert_eq!(entry.price_per_liter, None);
        assert_eq!(resolution.repair, Some(PriceRepair::Dropped { token: 0 }));
    }

    #[test]
    fn test_price_replaced_by_unclaimed_token() {
        let resolution = FuelEntryParser::new()
            .resolve("abasteci 10 litros, paguei 50 reais, preço do litro 60, 4,99");
        let entry = resolution.entry.clone().unwrap();

        assert_eq!(entry.price_per_liter, Some(d("4.99")));
        assert_eq!(entry.total_cost, Some(d("50")));
        assert_eq!(entry.liters, Some(d("10")));
        assert_eq!(
            resolution.repair,
            Some(PriceRepair::Replaced {
                from_token: 2,
                to_token: 3
            })
        );
    }

    #[test]
    fn test_replacement_with_any_price_keyword_gets_bonus() {
        let resolution =
            FuelEntryParser::new().resolve("total 50, preço do litro 60, preço 12 no outro posto");
        let price = resolution
            .assignments
            .iter()
            .find(|a| a.field == FuelField::PricePerLiter)
            .copied()
            .unwrap();

        assert_eq!(price.token_index, 2);
        assert_eq!(
            price.priority,
            priority::REPAIR_KEYWORD_BONUS + priority::PRICE_RANGE_WIDE
        );
        assert_eq!(resolution.entry.unwrap().price_per_liter, Some(d("12")));
    }

    #[test]
    fn test_repair_disabled_keeps_price() {
        let entry = FuelEntryParser::new()
            .with_price_repair(false)
            .parse("preço do litro 80, total 50")
            .unwrap();
        assert_eq!(entry.price_per_liter, Some(d("80")));
    }

    #[test]
    fn test_odometer_with_grouped_thousands() {
        let entry = parse_fuel_entry("hodômetro 42.500, total 150").unwrap();
        assert_eq!(entry.km_current, Some(d("42500")));
        assert_eq!(entry.total_cost, Some(d("150")));
    }

    #[test]
    fn test_odometer_fallback() {
        // With a three-character radius "km" is out of reach of the scoring
        // pass and 98000 is left unclaimed behind the stronger total
        let parser = FuelEntryParser::new().with_context_radius(3);
        let resolution = parser.resolve("R$150, km    98000");
        let entry = resolution.entry.clone().unwrap();

        assert!(resolution.odometer_fallback);
        assert_eq!(entry.km_current, Some(d("98000")));
        assert_eq!(entry.total_cost, Some(d("150")));

        let resolution = parser.with_odometer_fallback(false).resolve("R$150, km    98000");
        assert!(!resolution.odometer_fallback);
        assert_eq!(resolution.entry.and_then(|e| e.km_current), None);
    }

    #[test]
    fn test_unrecognized_is_none() {
        assert_eq!(parse_fuel_entry("oi"), None);
        assert_eq!(parse_fuel_entry("enchi o tanque"), None);
        assert_eq!(parse_fuel_entry(""), None);
    }

    #[test]
    fn test_assignments_are_injective() {
        let transcripts = [
            "coloquei 50 reais, preço do litro 5 e 90, km atual 42500",
            "abasteci 40 litros por 200 reais",
            "50 50 50 50",
            "paguei 5 reais 5 reais 5 reais",
            "abasteci 10 litros, paguei 50 reais, preço do litro 60, 4,99",
            "km 1000 km 2000 litro 3 litros 4",
        ];

        for transcript in transcripts {
            let resolution = FuelEntryParser::new().resolve(transcript);
            let mut seen = HashSet::new();
            for a in &resolution.assignments {
                assert!(seen.insert(a.token_index), "token reused in {:?}", transcript);
            }
        }
    }

    #[test]
    fn test_price_never_at_or_above_total() {
        let transcripts = [
            "preço do litro 80, total 50",
            "litro 30 reais 20",
            "total 10, preço 12, 11",
        ];

        for transcript in transcripts {
            if let Some(entry) = parse_fuel_entry(transcript) {
                if let (Some(price), Some(total)) = (entry.price_per_liter, entry.total_cost) {
                    assert!(price < total, "{:?} gave {:?}", transcript, entry);
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let transcript = "abasteci 35 litros, 6,09 o litro, deu 213 reais, km 81.230";
        let first = FuelEntryParser::new().resolve(transcript);
        for _ in 0..10 {
            assert_eq!(FuelEntryParser::new().resolve(transcript), first);
        }
    }
}
