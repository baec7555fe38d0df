//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod output;
pub mod parse;

use std::path::Path;

use clap::ValueEnum;
use tracing::debug;

use vozfin_core::models::config::VozConfig;

/// Kind of transcript to parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TranscriptKind {
    /// Generic income or expense
    #[value(alias = "tx")]
    Transaction,
    /// Refueling entry
    Fuel,
}

/// Load the configuration from `path`, or from the default location when it
/// exists, or fall back to defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<VozConfig> {
    if let Some(path) = path {
        debug!("Loading config from {}", path);
        return Ok(VozConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(VozConfig::from_file(&default_path)?)
    } else {
        Ok(VozConfig::default())
    }
}
