use bidsmap_core::cli::{read_series_list, Cli, OutputFormat};
use bidsmap_core::{
    lint, ClassificationResult, MappingTable, SeriesClassifier, SeriesDescriptor, TextReport,
};
use clap::Parser;
use log::{error, info, warn};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::process;

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    let table = match MappingTable::from_file(&cli.config) {
        Ok(table) => table,
        Err(e) => {
            error!("Failed to load mapping table: {}", e);
            eprintln!(
                "Error: Failed to load mapping table {}: {}",
                cli.config.display(),
                e
            );
            process::exit(1);
        }
    };

    let findings = lint(&table);
    if cli.lint {
        for finding in &findings {
            println!("{}", finding);
        }
        if findings.is_empty() {
            println!("No overlapping patterns found");
        }
        return;
    }
    for finding in &findings {
        warn!("{}", finding);
    }

    let series = match load_series(cli.series_file.as_deref()) {
        Ok(series) => series,
        Err(e) => {
            error!("Failed to read series list: {}", e);
            eprintln!("Error: Failed to read series list: {}", e);
            process::exit(1);
        }
    };

    info!("Classifying {} series", series.len());

    let result = SeriesClassifier::new(&table).classify(&series);

    if !result.unknown.is_empty() {
        warn!("{} series matched no pattern", result.unknown.len());
    }

    output_result(&result, cli.format);
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn load_series(path: Option<&Path>) -> bidsmap_core::Result<Vec<SeriesDescriptor>> {
    match path {
        Some(path) if path != Path::new("-") => {
            info!("Reading series list from {}", path.display());
            read_series_list(BufReader::new(File::open(path)?))
        }
        _ => {
            info!("Reading series list from stdin");
            read_series_list(io::stdin().lock())
        }
    }
}

fn output_result(result: &ClassificationResult, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            print!("{}", TextReport::new(result));
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match serde_json::to_string_pretty(result) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialize to JSON: {}", e);
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_series_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "localizer").unwrap();
        writeln!(file, "3D_T1_MPRAGE\t1.2.3").unwrap();

        let series = load_series(Some(file.path())).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].series_instance_uid.as_deref(), Some("1.2.3"));
    }

    #[test]
    fn test_load_series_missing_file() {
        let err = load_series(Some(Path::new("/nonexistent/series.txt"))).unwrap_err();
        assert!(matches!(err, bidsmap_core::BidsMapError::IoError(_)));
    }
}
