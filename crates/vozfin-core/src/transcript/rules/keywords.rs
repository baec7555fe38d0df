//! Keyword lexicons and transcript classification.
//!
//! All terms are written in normalized form (see [`super::normalize`]).

use crate::models::transaction::{ExpenseCategory, Platform, TransactionType};

/// How a lexicon term has to line up with word boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// The term must start a word; it may continue ("ganh" matches "ganhei").
    WordPrefix,
    /// The term must be a whole word ("litro" does not match "litros").
    WholeWord,
}

/// An immutable set of normalized keywords.
#[derive(Debug, Clone, Copy)]
pub struct Lexicon {
    pub terms: &'static [&'static str],
    pub mode: MatchMode,
}

impl Lexicon {
    pub const fn new(terms: &'static [&'static str], mode: MatchMode) -> Self {
        Self { terms, mode }
    }

    /// Whether any term occurs in `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.terms.iter().any(|term| self.contains(text, term))
    }

    /// Byte ranges of every occurrence of every term in `text`.
    pub fn occurrences(&self, text: &str) -> Vec<(usize, usize, &'static str)> {
        let mut found = Vec::new();
        for term in self.terms {
            for (start, _) in text.match_indices(term) {
                let end = start + term.len();
                if self.is_aligned(text, term, start, end) {
                    found.push((start, end, *term));
                }
            }
        }
        found.sort_by_key(|(start, end, _)| (*start, *end));
        found
    }

    fn contains(&self, text: &str, term: &str) -> bool {
        text.match_indices(term)
            .any(|(start, _)| self.is_aligned(text, term, start, start + term.len()))
    }

    fn is_aligned(&self, text: &str, term: &str, start: usize, end: usize) -> bool {
        // Boundaries only matter on a side where the term itself is a word character
        let starts_word = term.chars().next().is_some_and(char::is_alphanumeric);
        let ends_word = term.chars().last().is_some_and(char::is_alphanumeric);

        let left_ok = !starts_word
            || text[..start]
                .chars()
                .next_back()
                .is_none_or(|c| !c.is_alphanumeric());

        let right_ok = self.mode == MatchMode::WordPrefix
            || !ends_word
            || text[end..].chars().next().is_none_or(|c| !c.is_alphanumeric());

        // A numeric term ("99") never matches part of a longer numeral
        let starts_digit = term.chars().next().is_some_and(|c| c.is_ascii_digit());
        let ends_digit = term.chars().last().is_some_and(|c| c.is_ascii_digit());
        let inside_numeral = (starts_digit && continues_numeral(text[..start].chars().rev()))
            || (ends_digit && continues_numeral(text[end..].chars()));

        left_ok && right_ok && !inside_numeral
    }
}

/// Whether the characters next to a digit extend it: another digit, or a
/// decimal separator followed by one.
fn continues_numeral(mut chars: impl Iterator<Item = char>) -> bool {
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('.' | ',') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// Generic spending vocabulary.
pub const EXPENSE_HINTS: Lexicon = Lexicon::new(
    &[
        // fuel
        "gasolina", "combustivel", "etanol", "alcool", "diesel", "gnv", "abasteci", "posto",
        // tolls
        "pedagio",
        // maintenance
        "manutencao", "oficina", "mecanico", "pneu", "oleo", "revisao", "conserto", "lavagem",
        "lava jato", "borracharia",
        // food
        "almoco", "jantar", "lanche", "comida", "cafe", "refeicao", "restaurante",
        // parking, insurance, financing
        "estacionamento", "seguro", "financiamento", "parcela", "prestacao", "aluguel", "ipva",
        "licenciamento", "multa",
        // spend verbs
        "gastei", "paguei", "comprei", "despesa", "gasto",
    ],
    MatchMode::WordPrefix,
);

/// Earning vocabulary and platform names.
pub const INCOME_HINTS: Lexicon = Lexicon::new(
    &[
        "ganhei", "ganho", "recebi", "recebido", "faturei", "faturamento", "lucrei", "corrida",
        "viagem", "viagens", "entrega", "gorjeta", "uber", "99", "indriver", "in driver", "ifood",
    ],
    MatchMode::WordPrefix,
);

/// Expense vocabulary specific enough to win over income vocabulary.
pub const SPECIFIC_EXPENSE: Lexicon = Lexicon::new(
    &[
        "gasolina", "combustivel", "etanol", "alcool", "diesel", "gnv", "abasteci", "pedagio",
        "manutencao", "oficina", "mecanico", "pneu", "revisao", "conserto", "oleo",
    ],
    MatchMode::WordPrefix,
);

/// Odometer vocabulary for fuel entries.
pub const ODOMETER_TERMS: Lexicon = Lexicon::new(
    &["km", "kms", "quilometragem", "kilometragem", "odometro", "hodometro"],
    MatchMode::WholeWord,
);

/// The singular "litro" ("5,90 o litro") marks a price, never a quantity.
pub const SINGULAR_LITER: &str = "litro";

/// Price-per-liter vocabulary for fuel entries.
pub const PRICE_TERMS: Lexicon = Lexicon::new(
    &[SINGULAR_LITER, "preco", "unitario"],
    MatchMode::WholeWord,
);

/// Quantity vocabulary for fuel entries.
pub const LITERS_TERMS: Lexicon = Lexicon::new(&["litros", "l", "lt", "lts"], MatchMode::WholeWord);

/// Total-cost vocabulary for fuel entries.
pub const TOTAL_TERMS: Lexicon = Lexicon::new(
    &[
        "total", "paguei", "gastei", "reais", "real", "r$", "tanque", "deu", "ficou", "coloquei",
        "abasteci", "custou", "valor",
    ],
    MatchMode::WholeWord,
);

const FUEL_CATEGORY: Lexicon = Lexicon::new(
    &["gasolina", "combustivel", "etanol", "alcool", "diesel", "gnv", "abasteci", "posto"],
    MatchMode::WordPrefix,
);

const TOLL_CATEGORY: Lexicon = Lexicon::new(&["pedagio"], MatchMode::WordPrefix);

const FOOD_CATEGORY: Lexicon = Lexicon::new(
    &["almoco", "jantar", "lanche", "comida", "cafe", "refeicao", "restaurante"],
    MatchMode::WordPrefix,
);

const MAINTENANCE_CATEGORY: Lexicon = Lexicon::new(
    &[
        "manutencao", "oficina", "mecanico", "pneu", "oleo", "revisao", "conserto", "lavagem",
        "lava jato", "borracharia",
    ],
    MatchMode::WordPrefix,
);

const UBER: Lexicon = Lexicon::new(&["uber"], MatchMode::WordPrefix);
const NINETY_NINE: Lexicon = Lexicon::new(&["99"], MatchMode::WholeWord);
const INDRIVER: Lexicon = Lexicon::new(&["indriver", "in driver", "indrive"], MatchMode::WordPrefix);
const IFOOD: Lexicon = Lexicon::new(&["ifood", "i food"], MatchMode::WordPrefix);

impl ExpenseCategory {
    /// Keywords of the category; `None` for the catch-all.
    pub fn lexicon(&self) -> Option<&'static Lexicon> {
        match self {
            ExpenseCategory::Fuel => Some(&FUEL_CATEGORY),
            ExpenseCategory::Toll => Some(&TOLL_CATEGORY),
            ExpenseCategory::Food => Some(&FOOD_CATEGORY),
            ExpenseCategory::Maintenance => Some(&MAINTENANCE_CATEGORY),
            ExpenseCategory::Other => None,
        }
    }
}

impl Platform {
    pub fn lexicon(&self) -> &'static Lexicon {
        match self {
            Platform::Uber => &UBER,
            Platform::NinetyNine => &NINETY_NINE,
            Platform::InDriver => &INDRIVER,
            Platform::IFood => &IFOOD,
        }
    }
}

/// Classify a normalized transcript as income or expense.
///
/// When both vocabularies match, the transcript is an expense only if it
/// names a fuel, toll, maintenance or oil term; otherwise it is income.
pub fn classify(normalized: &str) -> Option<TransactionType> {
    let expense = EXPENSE_HINTS.matches(normalized);
    let income = INCOME_HINTS.matches(normalized);

    match (expense, income) {
        (true, true) if SPECIFIC_EXPENSE.matches(normalized) => Some(TransactionType::Expense),
        (true, true) => Some(TransactionType::Income),
        (true, false) => Some(TransactionType::Expense),
        (false, true) => Some(TransactionType::Income),
        (false, false) => None,
    }
}

/// First category whose keywords occur, or [`ExpenseCategory::Other`].
pub fn categorize(normalized: &str) -> ExpenseCategory {
    ExpenseCategory::ALL
        .into_iter()
        .find(|category| {
            category
                .lexicon()
                .is_none_or(|lexicon| lexicon.matches(normalized))
        })
        .unwrap_or(ExpenseCategory::Other)
}

/// First platform named in the transcript.
pub fn detect_platform(normalized: &str) -> Option<Platform> {
    Platform::ALL
        .into_iter()
        .find(|platform| platform.lexicon().matches(normalized))
}
