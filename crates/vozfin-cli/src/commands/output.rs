//! Rendering of parsed records as JSON, CSV or plain text.

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use console::style;
use rust_decimal::Decimal;
use serde::Serialize;

use vozfin_core::models::config;
use vozfin_core::transcript::rules::format_brl_amount;
use vozfin_core::{ParsedFuelEntry, ParsedTransaction};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl From<OutputFormat> for config::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => config::OutputFormat::Json,
            OutputFormat::Csv => config::OutputFormat::Csv,
            OutputFormat::Text => config::OutputFormat::Text,
        }
    }
}

/// A record the CLI knows how to print.
pub trait Render: Serialize {
    /// CSV column names.
    const CSV_HEADER: &'static [&'static str];

    /// CSV fields, in header order.
    fn csv_fields(&self) -> Vec<String>;

    /// Human-readable summary.
    fn text(&self) -> String;
}

fn decimal_field(value: Option<Decimal>) -> String {
    value.map(|v| v.normalize().to_string()).unwrap_or_default()
}

impl Render for ParsedTransaction {
    const CSV_HEADER: &'static [&'static str] =
        &["type", "amount", "category", "platform", "description"];

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.transaction_type.to_string(),
            decimal_field(self.amount),
            self.category.map(|c| c.to_string()).unwrap_or_default(),
            self.platform.map(|p| p.to_string()).unwrap_or_default(),
            self.description.clone(),
        ]
    }

    fn text(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Type:        {}\n", self.transaction_type));
        match self.amount {
            Some(amount) => output.push_str(&format!("Amount:      {}\n", format_brl_amount(amount))),
            None => output.push_str("Amount:      -\n"),
        }
        if let Some(category) = self.category {
            output.push_str(&format!("Category:    {}\n", category));
        }
        if let Some(platform) = self.platform {
            output.push_str(&format!("Platform:    {}\n", platform));
        }
        output.push_str(&format!("Description: {}\n", self.description));

        output
    }
}

impl Render for ParsedFuelEntry {
    const CSV_HEADER: &'static [&'static str] =
        &["price_per_liter", "liters", "total_cost", "km_current"];

    fn csv_fields(&self) -> Vec<String> {
        vec![
            decimal_field(self.price_per_liter),
            decimal_field(self.liters),
            decimal_field(self.total_cost),
            decimal_field(self.km_current),
        ]
    }

    fn text(&self) -> String {
        let mut output = String::new();

        if let Some(price) = self.price_per_liter {
            output.push_str(&format!("Price per liter: {}\n", format_brl_amount(price)));
        }
        if let Some(liters) = self.liters {
            output.push_str(&format!("Liters:          {} L\n", liters.normalize()));
        }
        if let Some(total) = self.total_cost {
            output.push_str(&format!("Total cost:      {}\n", format_brl_amount(total)));
        }
        if let Some(km) = self.km_current {
            output.push_str(&format!("Odometer:        {} km\n", km.normalize()));
        }

        output
    }
}

/// Serialize a value as JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Render records as a CSV table; `None` rows are left blank.
pub fn to_csv<'a, T: Render + 'a>(
    rows: impl IntoIterator<Item = Option<&'a T>>,
) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(T::CSV_HEADER)?;

    for row in rows {
        match row {
            Some(record) => wtr.write_record(record.csv_fields())?,
            None => wtr.write_record(vec![""; T::CSV_HEADER.len()])?,
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

/// Render a single, possibly missing, record.
pub fn render<T: Render>(
    record: Option<&T>,
    format: config::OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        config::OutputFormat::Json => to_json(&record, pretty),
        config::OutputFormat::Csv => to_csv(std::iter::once(record)),
        config::OutputFormat::Text => Ok(record
            .map(Render::text)
            .unwrap_or_else(|| "Nothing recognized.\n".to_string())),
    }
}

/// Write output to a file, or to stdout.
pub fn write_output(path: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content)?;
            eprintln!(
                "{} Output written to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => println!("{}", content.trim_end()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vozfin_core::{ExpenseCategory, Platform};

    #[test]
    fn test_transaction_csv() {
        let tx = ParsedTransaction::expense(
            Some(Decimal::new(5000, 2)),
            "Gastei 50 reais de gasolina",
            ExpenseCategory::Fuel,
        );
        let csv = to_csv(std::iter::once(Some(&tx))).unwrap();

        assert_eq!(
            csv,
            "type,amount,category,platform,description\n\
             expense,50,Combustível,,Gastei 50 reais de gasolina\n"
        );
    }

    #[test]
    fn test_missing_record_csv_row_is_blank() {
        let rows: Vec<Option<&ParsedFuelEntry>> = vec![None];
        let csv = to_csv(rows).unwrap();
        assert_eq!(csv, "price_per_liter,liters,total_cost,km_current\n,,,\n");
    }

    #[test]
    fn test_fuel_text() {
        let entry = ParsedFuelEntry {
            price_per_liter: Some(Decimal::new(590, 2)),
            total_cost: Some(Decimal::new(50, 0)),
            liters: None,
            km_current: Some(Decimal::new(42500, 0)),
        };
        let text = entry.text();

        assert!(text.contains("Price per liter: R$ 5,90"));
        assert!(text.contains("Total cost:      R$ 50,00"));
        assert!(text.contains("Odometer:        42500 km"));
        assert!(!text.contains("Liters"));
    }

    #[test]
    fn test_render_missing_json_is_null() {
        let json = render::<ParsedTransaction>(None, config::OutputFormat::Json, false).unwrap();
        assert_eq!(json, "null");
    }

    #[test]
    fn test_income_text() {
        let tx = ParsedTransaction::income(None, "recebi da uber", Some(Platform::Uber));
        let text = tx.text();
        assert!(text.contains("Amount:      -"));
        assert!(text.contains("Platform:    Uber"));
    }
}
