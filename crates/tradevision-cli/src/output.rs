use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::metadata::Envelope;

/// Column-aligned rows for `--format table`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.len()).collect();
        for row in &self.rows {
            for (index, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(index) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }

        let header: Vec<String> = self.headers.iter().map(|h| h.to_string()).collect();
        write_row(out, &header, &widths)?;
        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        write_row(out, &rule, &widths)?;
        for row in &self.rows {
            write_row(out, row, &widths)?;
        }
        Ok(())
    }
}

fn write_row<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> Result<(), CliError> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:>width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())?;
    Ok(())
}

pub fn render<W: Write>(
    out: &mut W,
    envelope: &Envelope<Value>,
    table: Option<&Table>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Ndjson => {
            writeln!(out, "{}", serde_json::to_string(envelope)?)?;
        }
        OutputFormat::Table => match table {
            Some(table) => {
                table.render(out)?;
                for warning in &envelope.meta.warnings {
                    writeln!(out, "warning: {warning}")?;
                }
            }
            None => writeln!(out, "{}", serde_json::to_string_pretty(&envelope.data)?)?,
        },
    }

    Ok(())
}

/// Emit one incremental event (used by the live loop).
pub fn emit_event<W: Write, T: Serialize>(
    out: &mut W,
    event: &T,
    table_line: Option<String>,
    format: OutputFormat,
) -> Result<(), CliError> {
    match (format, table_line) {
        (OutputFormat::Table, Some(line)) => writeln!(out, "{line}")?,
        _ => writeln!(out, "{}", serde_json::to_string(event)?)?,
    }
    out.flush()?;
    Ok(())
}

pub fn price(value: f64) -> String {
    format!("{value:.2}")
}

pub fn signed_pct(value: f64) -> String {
    format!("{value:+.2}%")
}
