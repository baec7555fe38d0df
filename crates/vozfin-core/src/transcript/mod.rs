//! Transcript extraction module.

mod fuel;
mod transaction;
pub mod rules;

pub use fuel::{parse_fuel_entry, FuelEntryParser, FuelResolution, PriceRepair};
pub use transaction::{parse_transaction, TransactionParser};

use crate::error::ExtractionError;

/// Trait for transcript parsers.
pub trait TranscriptParser {
    /// The record this parser produces.
    type Output;

    /// Parse a transcript; `None` when nothing usable was recognized.
    fn parse(&self, transcript: &str) -> Option<Self::Output>;

    /// Parse a transcript, reporting an unusable one as an error.
    fn parse_strict(&self, transcript: &str) -> Result<Self::Output, ExtractionError> {
        self.parse(transcript).ok_or(ExtractionError::NoData)
    }
}
