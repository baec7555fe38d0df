//! Spelled-out Portuguese cardinal numbers ("mil e duzentos", "cinquenta").
//!
//! Words are expected in normalized form (lower-case, no diacritics), so
//! "três" is looked up as "tres" and "milhão" as "milhao".

const UNITS: &[(&str, u64)] = &[
    ("zero", 0),
    ("um", 1),
    ("uma", 1),
    ("dois", 2),
    ("duas", 2),
    ("tres", 3),
    ("quatro", 4),
    ("cinco", 5),
    ("seis", 6),
    ("sete", 7),
    ("oito", 8),
    ("nove", 9),
];

const TEENS: &[(&str, u64)] = &[
    ("dez", 10),
    ("onze", 11),
    ("doze", 12),
    ("treze", 13),
    ("quatorze", 14),
    ("catorze", 14),
    ("quinze", 15),
    ("dezesseis", 16),
    ("dezasseis", 16),
    ("dezessete", 17),
    ("dezassete", 17),
    ("dezoito", 18),
    ("dezenove", 19),
    ("dezanove", 19),
];

const TENS: &[(&str, u64)] = &[
    ("vinte", 20),
    ("trinta", 30),
    ("quarenta", 40),
    ("cinquenta", 50),
    ("cincoenta", 50),
    ("sessenta", 60),
    ("setenta", 70),
    ("oitenta", 80),
    ("noventa", 90),
];

// "cem" is exactly one hundred, "cento" starts 101..=199; both add 100.
const HUNDREDS: &[(&str, u64)] = &[
    ("cem", 100),
    ("cento", 100),
    ("duzentos", 200),
    ("duzentas", 200),
    ("trezentos", 300),
    ("trezentas", 300),
    ("quatrocentos", 400),
    ("quatrocentas", 400),
    ("quinhentos", 500),
    ("quinhentas", 500),
    ("seiscentos", 600),
    ("seiscentas", 600),
    ("setecentos", 700),
    ("setecentas", 700),
    ("oitocentos", 800),
    ("oitocentas", 800),
    ("novecentos", 900),
    ("novecentas", 900),
];

const SCALES: &[(&str, u64)] = &[
    ("mil", 1_000),
    ("milhao", 1_000_000),
    ("milhoes", 1_000_000),
];

const CONNECTOR: &str = "e";

fn lookup(table: &[(&str, u64)], word: &str) -> Option<u64> {
    table.iter().find(|(name, _)| *name == word).map(|(_, v)| *v)
}

/// Additive value of a unit, teen, ten or hundred word.
fn group_value(word: &str) -> Option<u64> {
    lookup(UNITS, word)
        .or_else(|| lookup(TEENS, word))
        .or_else(|| lookup(TENS, word))
        .or_else(|| lookup(HUNDREDS, word))
}

/// Parse a sequence of normalized words as a Portuguese cardinal.
///
/// Unit, teen, ten and hundred words add into the current group; a scale word
/// multiplies the group (one when empty, so "mil" alone is 1000) into the
/// total. The connector "e" and unknown words are skipped. Returns `None`
/// when no number word was found, which keeps "zero" distinguishable from
/// "nothing to parse".
pub fn parse_cardinal<S: AsRef<str>>(words: &[S]) -> Option<u64> {
    let mut total: u64 = 0;
    let mut group: u64 = 0;
    let mut found_any = false;

    for word in words {
        let word = word.as_ref();
        if word == CONNECTOR {
            continue;
        }

        if let Some(value) = group_value(word) {
            group = group.saturating_add(value);
            found_any = true;
        } else if let Some(scale) = lookup(SCALES, word) {
            let multiplier = if group == 0 { 1 } else { group };
            total = total.saturating_add(multiplier.saturating_mul(scale));
            group = 0;
            found_any = true;
        }
    }

    if found_any {
        Some(total.saturating_add(group))
    } else {
        None
    }
}
