//! Parse command - extract a record from a single transcript.

use std::io::{self, Read};
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{debug, info};

use vozfin_core::models::config::VozConfig;
use vozfin_core::{ExtractionError, FuelEntryParser, TransactionParser, TranscriptParser};

use super::output::{self, OutputFormat, Render};
use super::{load_config, TranscriptKind};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Kind of transcript
    #[arg(value_enum)]
    kind: TranscriptKind,

    /// Transcript text (default: read from stdin)
    text: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Show how the numbers of a fuel transcript were assigned
    #[arg(long)]
    explain: bool,

    /// Fail when nothing is recognized
    #[arg(long)]
    strict: bool,
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let transcript = match args.text.as_deref() {
        Some(text) if text != "-" => text.to_string(),
        _ => {
            debug!("Reading transcript from stdin");
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    info!("Parsing {:?} transcript", args.kind);

    let content = match args.kind {
        TranscriptKind::Transaction => {
            if args.explain {
                anyhow::bail!("--explain is only available for fuel transcripts");
            }
            parse_one(&TransactionParser::new(), &transcript, &args, &config)?
        }
        TranscriptKind::Fuel => {
            let parser = FuelEntryParser::with_config(config.extraction.clone());
            if args.explain {
                let resolution = parser.resolve(&transcript);
                if args.strict && resolution.entry.is_none() {
                    return Err(ExtractionError::NoData.into());
                }
                output::to_json(&resolution, config.output.pretty)?
            } else {
                parse_one(&parser, &transcript, &args, &config)?
            }
        }
    };

    output::write_output(args.output.as_deref(), &content)
}

fn parse_one<P>(
    parser: &P,
    transcript: &str,
    args: &ParseArgs,
    config: &VozConfig,
) -> anyhow::Result<String>
where
    P: TranscriptParser,
    P::Output: Render,
{
    let record = if args.strict {
        Some(parser.parse_strict(transcript)?)
    } else {
        parser.parse(transcript)
    };

    if record.is_none() {
        eprintln!("{} Nothing recognized in transcript", style("ℹ").blue());
    }

    let format = args.format.map_or(config.output.format, Into::into);
    output::render(record.as_ref(), format, config.output.pretty)
}
