//! Generic income/expense transaction parser.

use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::transaction::{ParsedTransaction, TransactionType};

use super::rules::amounts::resolve_amount;
use super::rules::keywords::{categorize, classify, detect_platform};
use super::rules::normalize::normalize;
use super::TranscriptParser;

/// Income/expense parser.
#[derive(Debug, Clone, Default)]
pub struct TransactionParser;

impl TransactionParser {
    pub fn new() -> Self {
        Self
    }
}

impl TranscriptParser for TransactionParser {
    type Output = ParsedTransaction;

    fn parse(&self, transcript: &str) -> Option<ParsedTransaction> {
        info!("Parsing transaction from {} characters of text", transcript.len());

        let normalized = normalize(transcript);
        let Some(kind) = classify(&normalized) else {
            debug!("No income or expense vocabulary found");
            return None;
        };

        let amount = resolve_amount(transcript, &normalized);
        let description = transcript.trim();

        let transaction = match kind {
            TransactionType::Expense => {
                let category = categorize(&normalized);
                debug!("Expense of {:?} in {}", amount, category);
                ParsedTransaction::expense(amount, description, category)
            }
            TransactionType::Income => {
                let platform = detect_platform(&normalized);
                debug!("Income of {:?} from {:?}", amount, platform);
                ParsedTransaction::income(amount, description, platform)
            }
        };

        Some(transaction)
    }

    fn parse_strict(&self, transcript: &str) -> Result<ParsedTransaction, ExtractionError> {
        self.parse(transcript)
            .ok_or_else(|| ExtractionError::Unrecognized(transcript.trim().to_string()))
    }
}

/// Parse a transaction transcript.
pub fn parse_transaction(transcript: &str) -> Option<ParsedTransaction> {
    TransactionParser::new().parse(transcript)
}
