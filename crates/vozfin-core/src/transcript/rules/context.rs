//! Keyword context around numerals.
//!
//! A token's context is the text within `radius` characters of it, clipped
//! to its clause. Every token of a clause sees the keywords in its reach, so
//! in "40 litros por 200 reais" both numbers see "litros" and "reais".

use super::keywords::Lexicon;
use super::normalize::NormalizedText;
use super::numbers::NumericToken;

/// Keyword lookups for the numerals of one transcript.
pub struct TokenContext<'t, 'a> {
    text: &'t NormalizedText<'a>,
    tokens: &'t [NumericToken],
    radius: usize,
}

impl<'t, 'a> TokenContext<'t, 'a> {
    pub fn new(text: &'t NormalizedText<'a>, tokens: &'t [NumericToken], radius: usize) -> Self {
        Self { text, tokens, radius }
    }

    /// Raw byte range of the clause holding token `index`.
    pub fn clause(&self, index: usize) -> (usize, usize) {
        let raw = self.text.raw();
        let token = &self.tokens[index];

        let start = raw[..token.start]
            .char_indices()
            .rev()
            .find(|(i, c)| is_clause_break(raw, *i, *c))
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);

        let end = raw[token.end..]
            .char_indices()
            .find(|(i, c)| is_clause_break(raw, token.end + i, *c))
            .map(|(i, _)| token.end + i)
            .unwrap_or(raw.len());

        (start, end)
    }

    /// Raw byte range of the context window of token `index`.
    pub fn window(&self, index: usize) -> (usize, usize) {
        let raw = self.text.raw();
        let token = &self.tokens[index];
        let (clause_start, clause_end) = self.clause(index);

        let start = back_chars(raw, token.start, self.radius).max(clause_start);
        let end = forward_chars(raw, token.end, self.radius).min(clause_end);
        (start, end)
    }

    /// Terms of `lexicon` found in the context of token `index`.
    pub fn hits(&self, index: usize, lexicon: &Lexicon) -> Vec<&'static str> {
        let (window_start, window_end) = self.window(index);

        lexicon
            .occurrences(self.text.search())
            .into_iter()
            .filter_map(|(start, end, term)| {
                let (raw_start, raw_end) = self.text.raw_range(start, end);
                let counts = raw_start >= window_start
                    && raw_end <= window_end
                    && !self.overlaps_token(raw_start, raw_end);
                counts.then_some(term)
            })
            .collect()
    }

    /// Whether any term of `lexicon` is in the context of token `index`.
    pub fn has_hit(&self, index: usize, lexicon: &Lexicon) -> bool {
        !self.hits(index, lexicon).is_empty()
    }

    fn overlaps_token(&self, start: usize, end: usize) -> bool {
        self.tokens.iter().any(|t| start < t.end && t.start < end)
    }
}

/// Punctuation ending a clause. Separators inside numerals ("5,90") don't count.
fn is_clause_break(raw: &str, at: usize, c: char) -> bool {
    match c {
        '\n' => true,
        ',' | ';' | '.' | '!' | '?' => {
            let prev_digit = raw[..at].chars().next_back().is_some_and(|p| p.is_ascii_digit());
            let next_digit = raw[at + c.len_utf8()..]
                .chars()
                .next()
                .is_some_and(|n| n.is_ascii_digit());
            !(prev_digit && next_digit)
        }
        _ => false,
    }
}

/// Byte offset `n` characters before `from`.
fn back_chars(text: &str, from: usize, n: usize) -> usize {
    if n == 0 {
        return from;
    }
    text[..from]
        .char_indices()
        .rev()
        .nth(n - 1)
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset `n` characters after `from`.
fn forward_chars(text: &str, from: usize, n: usize) -> usize {
    text[from..]
        .char_indices()
        .nth(n)
        .map(|(i, _)| from + i)
        .unwrap_or(text.len())
}
