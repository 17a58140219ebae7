pub mod report;

use crate::error::{BidsMapError, Result};
use crate::types::SeriesDescriptor;
use clap::{Parser, ValueEnum};
use std::io::BufRead;
use std::path::PathBuf;

/// Command-line arguments for bidsmap
#[derive(Parser, Debug)]
#[command(name = "bidsmap")]
#[command(about = "Classify the DICOM series of a study into BIDS acquisitions")]
#[command(version)]
pub struct Cli {
    /// Mapping table (TOML)
    #[arg(short, long, value_name = "TOML")]
    pub config: PathBuf,

    /// Series list, one description per line, optionally followed by a tab
    /// and the Series Instance UID. Reads stdin if omitted or "-".
    #[arg(value_name = "SERIES_FILE")]
    pub series_file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Report overlapping patterns in the mapping table and exit
    #[arg(long)]
    pub lint: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

/// Reads a series list, one series per line
///
/// A line holds the description, optionally followed by a tab and the
/// Series Instance UID. Line endings are stripped but other whitespace is
/// kept, since descriptions are compared exactly. Blank lines are skipped.
pub fn read_series_list<R: BufRead>(reader: R) -> Result<Vec<SeriesDescriptor>> {
    let mut series = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split('\t');
        let description = fields.next().unwrap_or_default();
        let uid = fields.next();
        if fields.next().is_some() {
            return Err(BidsMapError::InvalidInput(format!(
                "line {}: expected a description and at most one UID, separated by a tab",
                index + 1
            )));
        }

        let descriptor = SeriesDescriptor::new(description);
        series.push(match uid.map(str::trim).filter(|uid| !uid.is_empty()) {
            Some(uid) => descriptor.with_uid(uid),
            None => descriptor,
        });
    }

    Ok(series)
}
