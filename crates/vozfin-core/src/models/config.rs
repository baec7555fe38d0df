//! Configuration structures for transcript extraction.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, VozError};

/// Main configuration for vozfin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VozConfig {
    /// Transcript extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output configuration (used by the CLI).
    pub output: OutputConfig,
}

/// Transcript extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Characters of context read on each side of a number.
    pub context_radius: usize,

    /// Look for "km <number>" when scoring found no odometer reading.
    pub odometer_fallback: bool,

    /// Replace or drop a price per liter that is not below the total.
    pub repair_price: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            context_radius: 25,
            odometer_fallback: true,
            repair_price: true,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
        }
    }
}

/// Output formats understood by the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Text,
}

impl VozConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the parsers cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.extraction.context_radius == 0 {
            return Err(VozError::Config(
                "extraction.context_radius must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
