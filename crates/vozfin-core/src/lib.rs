//! Core library for Portuguese voice transcript extraction.
//!
//! This crate provides:
//! - Text normalization and Portuguese-locale numeral extraction
//! - Spelled-out cardinal number parsing ("mil e duzentos reais")
//! - Income/expense classification with category and platform detection
//! - Fuel entry disambiguation (price per liter, liters, total cost, odometer)
//!
//! Every parse is a pure, deterministic function of the transcript.

pub mod error;
pub mod models;
pub mod transcript;

pub use error::{ExtractionError, Result, VozError};
pub use models::config::{ExtractionConfig, OutputConfig, OutputFormat, VozConfig};
pub use models::fuel::{FuelField, ParsedFuelEntry};
pub use models::transaction::{ExpenseCategory, ParsedTransaction, Platform, TransactionType};
pub use transcript::{
    parse_fuel_entry, parse_transaction, FuelEntryParser, FuelResolution, PriceRepair,
    TransactionParser, TranscriptParser,
};
