//! Rule-based building blocks for Portuguese transcripts.

pub mod amounts;
pub mod candidates;
pub mod cardinal;
pub mod context;
pub mod keywords;
pub mod normalize;
pub mod numbers;
pub mod patterns;

pub use amounts::{format_brl_amount, resolve_amount, resolve_spoken_amount};
pub use cardinal::parse_cardinal;
pub use keywords::{categorize, classify, detect_platform, Lexicon, MatchMode};
pub use normalize::{normalize, NormalizedText};
pub use numbers::{extract_numbers, parse_ptbr_number, NumericExtractor, NumericToken};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field, left to right.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}
