//! WASM bindings for Portuguese voice transcript extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! Unrecognized transcripts come back as `null`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use vozfin_core::transcript::rules::{format_brl_amount, normalize, resolve_amount};
use vozfin_core::{ExtractionConfig, FuelEntryParser, TransactionParser, TranscriptParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(value: Option<T>) -> Result<JsValue, JsValue> {
    match value {
        Some(value) => {
            serde_wasm_bindgen::to_value(&value).map_err(|e| JsValue::from_str(&e.to_string()))
        }
        None => Ok(JsValue::NULL),
    }
}

/// Extract an income or expense from a transcript.
#[wasm_bindgen(js_name = parseTransaction)]
pub fn parse_transaction(transcript: &str) -> Result<JsValue, JsValue> {
    to_js(vozfin_core::parse_transaction(transcript))
}

/// Extract a refueling entry from a transcript.
#[wasm_bindgen(js_name = parseFuelEntry)]
pub fn parse_fuel_entry(transcript: &str) -> Result<JsValue, JsValue> {
    to_js(vozfin_core::parse_fuel_entry(transcript))
}

/// Read an amount written in digits ("1.200,50") or words ("cinquenta reais").
#[wasm_bindgen(js_name = parseAmount)]
pub fn parse_amount(text: &str) -> Option<f64> {
    resolve_amount(text, &normalize(text)).and_then(|d| d.to_f64())
}

/// Format an amount in Brazilian style (R$ 1.234,56).
#[wasm_bindgen(js_name = formatAmount)]
pub fn format_amount(amount: f64) -> String {
    match Decimal::try_from(amount) {
        Ok(amount) => format_brl_amount(amount.round_dp(2)),
        Err(_) => format!("R$ {:.2}", amount),
    }
}

/// Configurable transcript extractor for browser use.
#[wasm_bindgen]
pub struct TranscriptExtractor {
    config: ExtractionConfig,
}

#[wasm_bindgen]
impl TranscriptExtractor {
    /// Create an extractor with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// Characters of context read on each side of a number.
    #[wasm_bindgen(js_name = setContextRadius)]
    pub fn set_context_radius(&mut self, radius: usize) {
        self.config.context_radius = radius;
    }

    #[wasm_bindgen(js_name = setOdometerFallback)]
    pub fn set_odometer_fallback(&mut self, enabled: bool) {
        self.config.odometer_fallback = enabled;
    }

    #[wasm_bindgen(js_name = setPriceRepair)]
    pub fn set_price_repair(&mut self, enabled: bool) {
        self.config.repair_price = enabled;
    }

    #[wasm_bindgen(js_name = parseTransaction)]
    pub fn parse_transaction(&self, transcript: &str) -> Result<JsValue, JsValue> {
        to_js(TransactionParser::new().parse(transcript))
    }

    #[wasm_bindgen(js_name = parseFuelEntry)]
    pub fn parse_fuel_entry(&self, transcript: &str) -> Result<JsValue, JsValue> {
        to_js(self.fuel_parser().parse(transcript))
    }

    /// Fuel resolution with tokens, assignments and repairs.
    #[wasm_bindgen(js_name = explainFuelEntry)]
    pub fn explain_fuel_entry(&self, transcript: &str) -> Result<JsValue, JsValue> {
        to_js(Some(self.fuel_parser().resolve(transcript)))
    }
}

impl TranscriptExtractor {
    fn fuel_parser(&self) -> FuelEntryParser {
        FuelEntryParser::with_config(self.config.clone())
    }
}

impl Default for TranscriptExtractor {
    fn default() -> Self {
        Self::new()
    }
}
