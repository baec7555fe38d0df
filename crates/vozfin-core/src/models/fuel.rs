//! Fuel refueling records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A refueling entry extracted from a spoken transcript.
///
/// Every field is optional: an absent field means it could not be inferred,
/// never that it is zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFuelEntry {
    /// Price per liter in reais.
    #[serde(default, with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub price_per_liter: Option<Decimal>,

    /// Total paid for the refueling.
    #[serde(default, with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<Decimal>,

    /// Liters pumped.
    #[serde(default, with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub liters: Option<Decimal>,

    /// Current odometer reading in km.
    #[serde(default, with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub km_current: Option<Decimal>,
}

impl ParsedFuelEntry {
    /// Assemble an entry from resolved fields.
    ///
    /// Returns `None` when no field resolved, so "not understood" stays
    /// distinguishable from "understood but incomplete".
    pub fn assemble(fields: impl IntoIterator<Item = (FuelField, Decimal)>) -> Option<Self> {
        let mut entry = Self::default();
        for (field, value) in fields {
            entry.set(field, value);
        }

        if entry.is_empty() { None } else { Some(entry) }
    }

    pub fn get(&self, field: FuelField) -> Option<Decimal> {
        match field {
            FuelField::KmCurrent => self.km_current,
            FuelField::PricePerLiter => self.price_per_liter,
            FuelField::Liters => self.liters,
            FuelField::TotalCost => self.total_cost,
        }
    }

    pub fn set(&mut self, field: FuelField, value: Decimal) {
        let slot = match field {
            FuelField::KmCurrent => &mut self.km_current,
            FuelField::PricePerLiter => &mut self.price_per_liter,
            FuelField::Liters => &mut self.liters,
            FuelField::TotalCost => &mut self.total_cost,
        };
        *slot = Some(value);
    }

    /// Number of fields that were inferred.
    pub fn field_count(&self) -> usize {
        FuelField::ALL
            .iter()
            .filter(|f| self.get(**f).is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.field_count() == 0
    }
}

/// Semantic slots a number in a fuel transcript can fill.
///
/// Declaration order is the tie-break order when two fields resolve with the
/// same priority on the same token position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FuelField {
    KmCurrent,
    PricePerLiter,
    Liters,
    TotalCost,
}

impl FuelField {
    pub const ALL: [FuelField; 4] = [
        FuelField::KmCurrent,
        FuelField::PricePerLiter,
        FuelField::Liters,
        FuelField::TotalCost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FuelField::KmCurrent => "kmCurrent",
            FuelField::PricePerLiter => "pricePerLiter",
            FuelField::Liters => "liters",
            FuelField::TotalCost => "totalCost",
        }
    }
}

impl std::fmt::Display for FuelField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
