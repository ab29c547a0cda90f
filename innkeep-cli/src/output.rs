//! Listing output in table, JSON, CSV and TSV form.
//!
//! Commands collect their rows into a [`Listing`] and hand over a
//! serializable value for the JSON form; the format comes from `--format`,
//! then `output_format` in the configuration, then `table`.

use crate::error::CliError;
use clap::ValueEnum;
use innkeep::config::OutputFormat;
use innkeep::Config;
use serde::Serialize;
use std::io::Write;

/// `--format` values.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FormatArg {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated values)
    Tsv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Tsv => OutputFormat::Tsv,
        }
    }
}

/// Picks the flag, then the configured format, then `table`.
pub fn resolve_format(arg: Option<FormatArg>, config: &Config) -> OutputFormat {
    arg.map(OutputFormat::from)
        .or(config.output_format)
        .unwrap_or_default()
}

/// Rows of text under fixed column headers.
pub struct Listing {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Listing {
    /// An empty listing with `headers`.
    pub fn new<S: ToString>(headers: &[S]) -> Self {
        Self {
            headers: headers.iter().map(ToString::to_string).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row; empty cells print as `-` in tables.
    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Writes the listing to stdout in `format`, using `json` for JSON.
    pub fn print<T: Serialize + ?Sized>(
        &self,
        format: OutputFormat,
        json: &T,
    ) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        match format {
            OutputFormat::Table => self.write_table(&mut handle),
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut handle, json)?;
                writeln!(handle)?;
                Ok(())
            }
            OutputFormat::Csv => self.write_delimited(&mut handle, b','),
            OutputFormat::Tsv => self.write_delimited(&mut handle, b'\t'),
        }
    }

    fn write_table(&self, out: &mut impl Write) -> Result<(), CliError> {
        let header_line = self
            .headers
            .iter()
            .map(|s| s.to_uppercase())
            .collect::<Vec<_>>()
            .join("\t");
        writeln!(out, "{header_line}")?;

        for row in &self.rows {
            let line = row
                .iter()
                .map(|cell| if cell.is_empty() { "-" } else { cell.as_str() })
                .collect::<Vec<_>>()
                .join("\t");
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    fn write_delimited(&self, out: &mut impl Write, delimiter: u8) -> Result<(), CliError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(out);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
