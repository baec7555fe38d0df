//! Generic income/expense transaction records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A transaction extracted from a spoken transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTransaction {
    /// Income or expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    /// Amount in reais, if one could be inferred.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,

    /// Free-text description (the trimmed transcript).
    pub description: String,

    /// Expense category. Only set for expenses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ExpenseCategory>,

    /// Ride-hailing platform. Only set for income.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
}

impl ParsedTransaction {
    /// Build an expense record.
    pub fn expense(
        amount: Option<Decimal>,
        description: impl Into<String>,
        category: ExpenseCategory,
    ) -> Self {
        Self {
            transaction_type: TransactionType::Expense,
            amount,
            description: description.into(),
            category: Some(category),
            platform: None,
        }
    }

    /// Build an income record.
    pub fn income(
        amount: Option<Decimal>,
        description: impl Into<String>,
        platform: Option<Platform>,
    ) -> Self {
        Self {
            transaction_type: TransactionType::Income,
            amount,
            description: description.into(),
            category: None,
            platform,
        }
    }
}

/// Direction of money flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money earned (rides, deliveries, tips).
    Income,
    /// Money spent (fuel, tolls, food, maintenance).
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expense categories, in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    #[serde(rename = "Combustível")]
    Fuel,
    #[serde(rename = "Pedágio")]
    Toll,
    #[serde(rename = "Alimentação")]
    Food,
    #[serde(rename = "Manutenção")]
    Maintenance,
    #[serde(rename = "Outros")]
    Other,
}

impl ExpenseCategory {
    /// All categories in the order they are tried.
    pub const ALL: [ExpenseCategory; 5] = [
        ExpenseCategory::Fuel,
        ExpenseCategory::Toll,
        ExpenseCategory::Food,
        ExpenseCategory::Maintenance,
        ExpenseCategory::Other,
    ];

    /// Display name as shown in the expense form.
    pub fn display(&self) -> &'static str {
        match self {
            ExpenseCategory::Fuel => "Combustível",
            ExpenseCategory::Toll => "Pedágio",
            ExpenseCategory::Food => "Alimentação",
            ExpenseCategory::Maintenance => "Manutenção",
            ExpenseCategory::Other => "Outros",
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display())
    }
}

/// Ride-hailing and delivery platforms, in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "Uber")]
    Uber,
    #[serde(rename = "99")]
    NinetyNine,
    #[serde(rename = "InDriver")]
    InDriver,
    #[serde(rename = "iFood")]
    IFood,
}

impl Platform {
    /// All platforms in the order they are tried.
    pub const ALL: [Platform; 4] = [
        Platform::Uber,
        Platform::NinetyNine,
        Platform::InDriver,
        Platform::IFood,
    ];

    pub fn display(&self) -> &'static str {
        match self {
            Platform::Uber => "Uber",
            Platform::NinetyNine => "99",
            Platform::InDriver => "InDriver",
            Platform::IFood => "iFood",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_to_display_name() {
        let json = serde_json::to_string(&ExpenseCategory::Fuel).unwrap();
        assert_eq!(json, "\"Combustível\"");

        let parsed: ExpenseCategory = serde_json::from_str("\"Manutenção\"").unwrap();
        assert_eq!(parsed, ExpenseCategory::Maintenance);
    }

    #[test]
    fn test_platform_display() {
        assert_eq!(Platform::NinetyNine.to_string(), "99");
        assert_eq!(Platform::IFood.to_string(), "iFood");
    }

    #[test]
    fn test_transaction_json_shape() {
        let tx = ParsedTransaction::income(
            Some(Decimal::new(80, 0)),
            "Ganhei 80 reais na Uber",
            Some(Platform::Uber),
        );
        let value = serde_json::to_value(&tx).unwrap();

        assert_eq!(value["type"], "income");
        assert_eq!(value["amount"], 80.0);
        assert_eq!(value["platform"], "Uber");
        assert!(value.get("category").is_none());
    }

    #[test]
    fn test_missing_amount_serializes_as_null() {
        let tx = ParsedTransaction::expense(None, "paguei o pedágio", ExpenseCategory::Toll);
        let value = serde_json::to_value(&tx).unwrap();

        assert!(value["amount"].is_null());
        assert_eq!(value["category"], "Pedágio");
    }
}
