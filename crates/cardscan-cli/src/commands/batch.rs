//! Batch processing command for multiple card files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use cardscan_core::{BusinessCard, BusinessCardParser, CardParser};

use super::config::load_config;
use super::output::{format_card, OutputFormat, CSV_HEADER};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching .txt files
    #[arg(required = true)]
    input: String,

    /// Output directory (default: records go to stdout)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    card: Option<BusinessCard>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = Arc::new(BusinessCardParser::new().with_config(config.extraction));
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut handles = Vec::with_capacity(files.len());

    for path in files {
        let permit = Arc::clone(&semaphore).acquire_owned().await?;
        let parser = Arc::clone(&parser);
        let pb = overall_pb.clone();

        handles.push(tokio::task::spawn_blocking(move || {
            let file_start = Instant::now();
            let result = process_single_file(&path, &parser);
            let processing_time_ms = file_start.elapsed().as_millis() as u64;
            drop(permit);
            pb.inc(1);

            match result {
                Ok(card) => ProcessResult {
                    path,
                    card: Some(card),
                    error: None,
                    processing_time_ms,
                },
                Err(e) => ProcessResult {
                    path,
                    card: None,
                    error: Some(e.to_string()),
                    processing_time_ms,
                },
            }
        }));
    }

    // Awaited in submission order so outputs follow the glob order
    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = handle.await?;
        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                anyhow::bail!("Processing failed: {}: {}", result.path.display(), error_msg);
            }
        }
        results.push(result);
    }

    overall_pb.finish_and_clear();

    let successful: Vec<_> = results.iter().filter(|r| r.card.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    match &args.output_dir {
        Some(output_dir) => write_outputs(output_dir, &successful, args.format)?,
        None => print!("{}", format_stream(&successful, args.format)?),
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(path: &Path, parser: &BusinessCardParser) -> anyhow::Result<BusinessCard> {
    let text = fs::read_to_string(path)?;
    if text.trim().is_empty() {
        anyhow::bail!("No text in file");
    }

    Ok(parser.parse(&text))
}

fn write_outputs(
    output_dir: &Path,
    results: &[&ProcessResult],
    format: OutputFormat,
) -> anyhow::Result<()> {
    for result in results {
        let Some(card) = &result.card else {
            continue;
        };

        let output_name = result
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("card");
        let output_path = output_dir.join(format!("{}.{}", output_name, format.extension()));

        if output_path == result.path {
            anyhow::bail!(
                "Output would overwrite input {}; choose another output directory",
                result.path.display()
            );
        }

        fs::write(&output_path, format_card(card, format)?)?;
        debug!("Wrote output to {}", output_path.display());
    }

    Ok(())
}

/// All records as one stream: JSON lines, a single CSV table, or text blocks.
fn format_stream(results: &[&ProcessResult], format: OutputFormat) -> anyhow::Result<String> {
    let cards = results
        .iter()
        .filter_map(|r| r.card.as_ref().map(|card| (&r.path, card)));

    match format {
        OutputFormat::Json => {
            let mut output = String::new();
            for (_, card) in cards {
                output.push_str(&serde_json::to_string(card)?);
                output.push('\n');
            }
            Ok(output)
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.write_record(CSV_HEADER)?;
            for (_, card) in cards {
                wtr.write_record(card.fields().map(|(_, value)| value))?;
            }
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => {
            let mut output = String::new();
            for (path, card) in cards {
                output.push_str(&format!("# {}\n", path.display()));
                output.push_str(&format_card(card, format)?);
                output.push('\n');
            }
            Ok(output)
        }
    }
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status"];
    header.extend(CSV_HEADER);
    header.extend(["processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let time_ms = result.processing_time_ms.to_string();

        let mut record = vec![filename];
        match &result.card {
            Some(card) => {
                record.push("success");
                record.extend(card.fields().map(|(_, value)| value));
                record.extend([time_ms.as_str(), ""]);
            }
            None => {
                record.push("error");
                record.extend([""; 7]);
                record.extend([time_ms.as_str(), result.error.as_deref().unwrap_or("")]);
            }
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
