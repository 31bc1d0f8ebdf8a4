//! Shipping bill command - extract one shipping bill from a document.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use tradedoc_core::{GridScanner, TextExtractor};

use super::output::{emit, render, report_issues, OutputFormat};
use super::source::extract_shipping_bill;

/// Arguments for the shipping-bill command.
#[derive(Args)]
pub struct ShippingBillArgs {
    /// Input file (xlsx, pdf or txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Validate extracted data
    #[arg(long)]
    validate: bool,

    /// List fields that could not be located
    #[arg(long)]
    show_missing: bool,
}

pub async fn run(args: ShippingBillArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let bill = extract_shipping_bill(&args.input, &GridScanner::new(), &TextExtractor::new())?;

    if bill.is_empty() {
        eprintln!(
            "{} No shipping bill fields found in {}",
            style("⚠").yellow(),
            args.input.display()
        );
    }

    if args.validate {
        report_issues("shipping bill", &bill.validate());
    }

    let output = render(
        std::slice::from_ref(&bill),
        args.format,
        config.output.pretty_json,
        true,
    )?;
    emit(&output, args.output.as_deref())?;

    if args.show_missing {
        let missing = bill.missing_fields();
        eprintln!();
        eprintln!(
            "{} Missing fields ({}): {}",
            style("ℹ").blue(),
            missing.len(),
            missing.join(", ")
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
