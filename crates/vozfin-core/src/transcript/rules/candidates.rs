//! Candidate scoring and greedy field assignment for fuel entries.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::trace;

use crate::models::fuel::FuelField;

/// Priorities of the scoring passes.
pub mod priority {
    /// Price keyword with the singular "litro".
    pub const SINGULAR_LITER: f32 = 4.0;
    /// Any other keyword hit.
    pub const KEYWORD: f32 = 3.0;
    /// Price-like value in [1, 10).
    pub const PRICE_RANGE: f32 = 2.5;
    /// Price-like value in [0.5, 1).
    pub const PRICE_RANGE_LOW: f32 = 2.0;
    /// Price-like value in [10, 15].
    pub const PRICE_RANGE_WIDE: f32 = 0.75;
    /// Price-like value in (15, 25].
    pub const PRICE_RANGE_WIDEST: f32 = 0.5;
    /// Value-only total or liters guess.
    pub const WEAK: f32 = 1.0;
    /// Added to a price replacement that has any price keyword in reach.
    pub const REPAIR_KEYWORD_BONUS: f32 = 4.0;
}

/// Proposed assignment of a token to a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub field: FuelField,
    pub token_index: usize,
    pub priority: f32,
}

impl Candidate {
    pub fn new(field: FuelField, token_index: usize, priority: f32) -> Self {
        Self {
            field,
            token_index,
            priority,
        }
    }

    /// Higher priority first, then the later token, then field order.
    fn rank(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.token_index.cmp(&self.token_index))
            .then_with(|| self.field.cmp(&other.field))
    }
}

fn dec(units: i64, scale: u32) -> Decimal {
    Decimal::new(units, scale)
}

/// Smallest value treated as a plausible price per liter.
pub fn min_price() -> Decimal {
    dec(5, 1)
}

/// How price-like a bare value is; 0 when it is not.
pub fn price_range_score(value: Decimal) -> f32 {
    if value < min_price() {
        0.0
    } else if value < dec(1, 0) {
        priority::PRICE_RANGE_LOW
    } else if value < dec(10, 0) {
        priority::PRICE_RANGE
    } else if value <= dec(15, 0) {
        priority::PRICE_RANGE_WIDE
    } else if value <= dec(25, 0) {
        priority::PRICE_RANGE_WIDEST
    } else {
        0.0
    }
}

/// Value-range candidates for a token without keyword context.
pub fn range_candidates(token_index: usize, value: Decimal) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    let price = price_range_score(value);
    if price > 0.0 {
        candidates.push(Candidate::new(FuelField::PricePerLiter, token_index, price));
    }
    if value >= dec(10, 0) {
        candidates.push(Candidate::new(FuelField::TotalCost, token_index, priority::WEAK));
    }
    if value > Decimal::ZERO && value <= dec(200, 0) {
        candidates.push(Candidate::new(FuelField::Liters, token_index, priority::WEAK));
    }

    candidates
}

/// Keep the best candidate of each field: highest priority, ties to the
/// later token. Returned in field order.
pub fn best_per_field(candidates: &[Candidate]) -> Vec<Candidate> {
    FuelField::ALL
        .iter()
        .filter_map(|field| {
            candidates
                .iter()
                .filter(|c| c.field == *field)
                .min_by(|a, b| a.rank(b))
                .copied()
        })
        .collect()
}

/// Resolve fields greedily in rank order; a field whose token was already
/// claimed by a stronger field stays unresolved.
pub fn claim(best: &[Candidate]) -> Vec<Candidate> {
    let mut order = best.to_vec();
    order.sort_by(|a, b| a.rank(b));

    let mut claimed = BTreeSet::new();
    let mut resolved = Vec::with_capacity(order.len());

    for candidate in order {
        if !claimed.insert(candidate.token_index) {
            trace!(
                "{} loses token {} to an earlier claim",
                candidate.field, candidate.token_index
            );
            continue;
        }
        resolved.push(candidate);
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_price_range_score() {
        assert_eq!(price_range_score(d("0.4")), 0.0);
        assert_eq!(price_range_score(d("0.5")), 2.0);
        assert_eq!(price_range_score(d("5.89")), 2.5);
        assert_eq!(price_range_score(d("10")), 0.75);
        assert_eq!(price_range_score(d("15")), 0.75);
        assert_eq!(price_range_score(d("20")), 0.5);
        assert_eq!(price_range_score(d("25.01")), 0.0);
    }

    #[test]
    fn test_range_candidates() {
        let fields: Vec<FuelField> = range_candidates(0, d("5.90")).iter().map(|c| c.field).collect();
        assert_eq!(fields, vec![FuelField::PricePerLiter, FuelField::Liters]);

        let fields: Vec<FuelField> = range_candidates(0, d("150")).iter().map(|c| c.field).collect();
        assert_eq!(fields, vec![FuelField::TotalCost, FuelField::Liters]);

        let fields: Vec<FuelField> = range_candidates(0, d("42500")).iter().map(|c| c.field).collect();
        assert_eq!(fields, vec![FuelField::TotalCost]);

        assert!(range_candidates(0, Decimal::ZERO).is_empty());
    }

    #[test]
    fn test_best_per_field_prefers_later_token_on_tie() {
        let candidates = vec![
            Candidate::new(FuelField::TotalCost, 0, 3.0),
            Candidate::new(FuelField::TotalCost, 2, 3.0),
            Candidate::new(FuelField::TotalCost, 1, 1.0),
        ];
        let best = best_per_field(&candidates);
        assert_eq!(best, vec![Candidate::new(FuelField::TotalCost, 2, 3.0)]);
    }

    #[test]
    fn test_claim_is_first_claim_wins() {
        // Price claims token 1 first; total's best is the same token and is not
        // reassigned to its runner-up.
        let best = vec![
            Candidate::new(FuelField::PricePerLiter, 1, 4.0),
            Candidate::new(FuelField::TotalCost, 1, 3.0),
            Candidate::new(FuelField::Liters, 0, 1.0),
        ];
        let resolved = claim(&best);

        assert_eq!(
            resolved,
            vec![
                Candidate::new(FuelField::PricePerLiter, 1, 4.0),
                Candidate::new(FuelField::Liters, 0, 1.0),
            ]
        );
    }

    #[test]
    fn test_claim_tie_order() {
        // Same priority and token: field order decides
        let best = vec![
            Candidate::new(FuelField::Liters, 0, 3.0),
            Candidate::new(FuelField::TotalCost, 0, 3.0),
        ];
        let resolved = claim(&best);
        assert_eq!(resolved, vec![Candidate::new(FuelField::Liters, 0, 3.0)]);
    }
}
