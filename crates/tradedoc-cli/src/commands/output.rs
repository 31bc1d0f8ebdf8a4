//! Rendering extracted records as JSON, CSV or plain text.

use std::fs;
use std::path::Path;

use console::style;
use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Render records in the requested format. JSON keeps a single record
/// as an object when `single` is set.
pub fn render<T: Serialize>(
    records: &[T],
    format: OutputFormat,
    pretty: bool,
    single: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let value = match (single, records.first()) {
                (true, Some(record)) => serde_json::to_value(record)?,
                _ => serde_json::to_value(records)?,
            };
            if pretty {
                Ok(serde_json::to_string_pretty(&value)?)
            } else {
                Ok(serde_json::to_string(&value)?)
            }
        }
        OutputFormat::Csv => format_csv(records),
        OutputFormat::Text => format_text(records),
    }
}

fn format_csv<T: Serialize>(records: &[T]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in records {
        wtr.serialize(record)?;
    }
    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

/// One aligned `name  value` line per populated field, records separated by a
/// blank line.
fn format_text<T: Serialize>(records: &[T]) -> anyhow::Result<String> {
    let mut output = String::new();

    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        if let Value::Object(fields) = serde_json::to_value(record)? {
            let width = fields.keys().map(String::len).max().unwrap_or(0);
            for (name, value) in &fields {
                let text = match value {
                    Value::Null => continue,
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                output.push_str(&format!("{:width$}  {}\n", name, text, width = width));
            }
        }
    }

    Ok(output)
}

/// Write to a file, or print to stdout.
pub fn emit(content: &str, output: Option<&Path>) -> anyhow::Result<()> {
    if let Some(output_path) = output {
        fs::write(output_path, content)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", content);
    }
    Ok(())
}

/// Print validation issues to stderr.
pub fn report_issues(label: &str, issues: &[String]) {
    if issues.is_empty() {
        return;
    }
    eprintln!("{}", style(format!("Validation issues ({}):", label)).yellow());
    for issue in issues {
        eprintln!("  - {}", issue);
    }
}
