//! Batch command - parse transcript files, one transcript per line.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, ValueEnum};
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, warn};

use vozfin_core::{FuelEntryParser, TransactionParser, TranscriptParser};

use super::output::{self, Render};
use super::{load_config, TranscriptKind};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Kind of transcripts
    #[arg(value_enum)]
    kind: TranscriptKind,

    /// Input files or glob patterns
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: BatchFormat,

    /// Leave unrecognized transcripts out of the output
    #[arg(long)]
    recognized_only: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum BatchFormat {
    /// JSON array
    Json,
    /// CSV table
    Csv,
}

/// One transcript line read from an input file.
struct Transcript {
    file: String,
    line: usize,
    text: String,
}

/// Result of parsing one transcript.
#[derive(Serialize)]
struct BatchRecord<T> {
    file: String,
    line: usize,
    transcript: String,
    result: Option<T>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files = expand_inputs(&args.inputs)?;
    let transcripts = read_transcripts(&files)?;

    eprintln!(
        "{} Found {} transcripts in {} files",
        style("ℹ").blue(),
        transcripts.len(),
        files.len()
    );

    let content = match args.kind {
        TranscriptKind::Transaction => {
            process(&TransactionParser::new(), transcripts, &args, config.output.pretty)?
        }
        TranscriptKind::Fuel => {
            let parser = FuelEntryParser::with_config(config.extraction.clone());
            process(&parser, transcripts, &args, config.output.pretty)?
        }
    };

    output::write_output(args.output.as_deref(), &content)?;

    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        files.len(),
        start.elapsed()
    );

    Ok(())
}

/// Expand glob patterns into a sorted, deduplicated file list.
fn expand_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in inputs {
        let before = files.len();
        for entry in glob(pattern)? {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(path) => debug!("Skipping {}", path.display()),
                Err(e) => warn!("Cannot read {}: {}", e.path().display(), e),
            }
        }
        if files.len() == before {
            anyhow::bail!("No matching files found for pattern: {}", pattern);
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn read_transcripts(files: &[PathBuf]) -> anyhow::Result<Vec<Transcript>> {
    let mut transcripts = Vec::new();

    for path in files {
        let content = fs::read_to_string(path)?;
        let file = path.display().to_string();

        for (index, line) in content.lines().enumerate() {
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            transcripts.push(Transcript {
                file: file.clone(),
                line: index + 1,
                text: text.to_string(),
            });
        }
    }

    Ok(transcripts)
}

fn process<P>(
    parser: &P,
    transcripts: Vec<Transcript>,
    args: &BatchArgs,
    pretty: bool,
) -> anyhow::Result<String>
where
    P: TranscriptParser,
    P::Output: Render,
{
    let pb = ProgressBar::new(transcripts.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} transcripts")?
            .progress_chars("=>-"),
    );

    let mut records = Vec::with_capacity(transcripts.len());
    let mut recognized = 0;

    for transcript in transcripts {
        let result = parser.parse(&transcript.text);
        if result.is_some() {
            recognized += 1;
        } else {
            debug!("{}:{} not recognized", transcript.file, transcript.line);
        }
        pb.inc(1);

        if result.is_none() && args.recognized_only {
            continue;
        }
        records.push(BatchRecord {
            file: transcript.file,
            line: transcript.line,
            transcript: transcript.text,
            result,
        });
    }

    pb.finish_and_clear();

    eprintln!(
        "   {} recognized, {} not recognized",
        style(recognized).green(),
        style(pb.length().unwrap_or(0) - recognized).yellow()
    );

    match args.format {
        BatchFormat::Json => output::to_json(&records, pretty),
        BatchFormat::Csv => to_csv(&records),
    }
}

fn to_csv<T: Render>(records: &[BatchRecord<T>]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["file", "line", "transcript"];
    header.extend_from_slice(T::CSV_HEADER);
    wtr.write_record(&header)?;

    for record in records {
        let mut row = vec![
            record.file.clone(),
            record.line.to_string(),
            record.transcript.clone(),
        ];
        match &record.result {
            Some(result) => row.extend(result.csv_fields()),
            None => row.extend(T::CSV_HEADER.iter().map(|_| String::new())),
        }
        wtr.write_record(&row)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}
