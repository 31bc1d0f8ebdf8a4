//! Import command - parse the import sheet of a BE workbook.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use tradedoc_core::ImportSheetParser;

use super::output::{emit, render, report_issues, OutputFormat};
use super::source::read_workbook;

/// Arguments for the import command.
#[derive(Args)]
pub struct ImportArgs {
    /// Input workbook (xlsx, xls, ods)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Validate extracted lines
    #[arg(long)]
    validate: bool,
}

pub async fn run(args: ImportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let workbook = read_workbook(&args.input)?;
    let parser = ImportSheetParser::with_layout(config.import);
    let lines = parser.parse(&workbook)?;

    if args.validate {
        for line in &lines {
            report_issues(&line.be_no, &line.validate());
        }
    }

    let output = render(&lines, args.format, config.output.pretty_json, false)?;
    emit(&output, args.output.as_deref())?;

    eprintln!(
        "{} {} import lines extracted",
        style("ℹ").blue(),
        lines.len()
    );
    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
