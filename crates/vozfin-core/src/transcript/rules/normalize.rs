//! Diacritic-insensitive views of a transcript.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lower-case, decompose and drop combining marks.
///
/// `"Preço do LITRO"` becomes `"preco do litro"`.
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// A transcript with both its raw and search-normalized forms.
///
/// Numeral patterns run on [`raw`](Self::raw) because they need the original
/// punctuation; keyword lookups run on [`search`](Self::search). Every byte of
/// the search form maps back to the raw byte offset it came from, so keyword
/// hits can be compared against numeral offsets.
#[derive(Debug, Clone)]
pub struct NormalizedText<'a> {
    raw: &'a str,
    search: String,
    origin: Vec<usize>,
}

impl<'a> NormalizedText<'a> {
    pub fn new(raw: &'a str) -> Self {
        let mut search = String::with_capacity(raw.len());
        let mut origin = Vec::with_capacity(raw.len() + 1);

        for (offset, c) in raw.char_indices() {
            let folded: String = c
                .to_lowercase()
                .nfd()
                .filter(|m| !is_combining_mark(*m))
                .collect();
            search.push_str(&folded);
            origin.extend(std::iter::repeat_n(offset, folded.len()));
        }
        origin.push(raw.len());

        Self { raw, search, origin }
    }

    /// The untouched transcript.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// The lower-cased, diacritic-free transcript.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Map a byte range of the search form back to a raw byte range.
    pub fn raw_range(&self, start: usize, end: usize) -> (usize, usize) {
        (self.origin[start], self.origin[end])
    }
}
