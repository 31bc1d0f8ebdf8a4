//! Batch processing command for multiple shipping bill files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use tradedoc_core::{GridScanner, ShippingBill, TextExtractor};

use super::output::{render, OutputFormat};
use super::source::{extract_shipping_bill, DocumentKind};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
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
    bill: Option<ShippingBill>,
    error: Option<String>,
    processing_time_ms: u64,
}

/// Extractors shared by the workers.
struct Extractors {
    grid: GridScanner,
    text: TextExtractor,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| DocumentKind::from_path(p).is_some())
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

    let extractors = Arc::new(Extractors {
        grid: GridScanner::new(),
        text: TextExtractor::new(),
    });

    // Up to `jobs` files in flight; results keep input order.
    let mut results = Vec::with_capacity(files.len());
    for chunk in files.chunks(args.jobs.max(1)) {
        let handles: Vec<_> = chunk
            .iter()
            .map(|path| {
                let path = path.clone();
                let extractors = Arc::clone(&extractors);
                tokio::task::spawn_blocking(move || {
                    let file_start = Instant::now();
                    let result = extract_shipping_bill(&path, &extractors.grid, &extractors.text);
                    (result, file_start.elapsed().as_millis() as u64)
                })
            })
            .collect();

        for (path, handle) in chunk.iter().zip(handles) {
            let (result, processing_time_ms) = match handle.await {
                Ok(done) => done,
                Err(e) => (Err(anyhow::anyhow!("Task join error: {}", e)), 0),
            };

            match result {
                Ok(bill) => results.push(ProcessResult {
                    path: path.clone(),
                    bill: Some(bill),
                    error: None,
                    processing_time_ms,
                }),
                Err(e) => {
                    let error_msg = e.to_string();
                    if args.continue_on_error {
                        warn!("Failed to process {}: {}", path.display(), error_msg);
                        results.push(ProcessResult {
                            path: path.clone(),
                            bill: None,
                            error: Some(error_msg),
                            processing_time_ms,
                        });
                    } else {
                        error!("Failed to process {}: {}", path.display(), error_msg);
                        anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                    }
                }
            }

            overall_pb.inc(1);
        }
    }

    overall_pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.bill.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            if let Some(bill) = &result.bill {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("shipping_bill");
                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                let content = render(
                    std::slice::from_ref(bill),
                    args.format,
                    config.output.pretty_json,
                    true,
                )?;
                fs::write(&output_path, content)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
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

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "sb_no",
        "sb_date",
        "port_code",
        "invoice_value",
        "currency",
        "fob",
        "missing_fields",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(bill) = &result.bill {
            wtr.write_record([
                filename,
                "success",
                bill.sb_no.as_deref().unwrap_or(""),
                &bill.sb_date.map(|d| d.to_string()).unwrap_or_default(),
                bill.port_code.as_deref().unwrap_or(""),
                &bill.invoice_value.map(|v| v.to_string()).unwrap_or_default(),
                bill.currency.as_deref().unwrap_or(""),
                &bill.fob.map(|v| v.to_string()).unwrap_or_default(),
                &bill.missing_fields().len().to_string(),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
