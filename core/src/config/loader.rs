use super::{MappingTable, MappingTableBuilder};
use crate::error::{BidsMapError, Result};
use log::info;
use serde::Deserialize;
use std::path::Path;

/// On-disk layout of a mapping table
///
/// ```toml
/// ignored_series = ["localizer"]
/// ignored_suffixes = ["_ND"]
///
/// [mappings.anat]
/// T1w = "*T1*"
/// T2w = ["*T2*", "*t2_spc*"]
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMappingTable {
    #[serde(default)]
    ignored_series: Vec<String>,

    #[serde(default)]
    ignored_suffixes: Vec<String>,

    // Kept as a raw table: with `preserve_order` it iterates in file order
    #[serde(default)]
    mappings: toml::Table,
}

/// A single pattern or a list of patterns
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PatternSpec {
    One(String),
    Many(Vec<String>),
}

impl PatternSpec {
    fn into_vec(self) -> Vec<String> {
        match self {
            PatternSpec::One(pattern) => vec![pattern],
            PatternSpec::Many(patterns) => patterns,
        }
    }
}

impl MappingTable {
    /// Parses and validates a mapping table from TOML text
    ///
    /// Scan types and file names keep the order they are written in, which
    /// is the order patterns are tried in.
    ///
    /// # Errors
    ///
    /// Returns [`BidsMapError::ConfigParse`] for malformed TOML or an
    /// unexpected shape, and the [`MappingTableBuilder::build`] errors for
    /// empty names, empty pattern lists and invalid patterns.
    ///
    /// # Example
    ///
    /// ```
    /// use bidsmap_core::MappingTable;
    ///
    /// let table = MappingTable::from_toml_str(r#"
    ///     ignored_series = ["localizer"]
    ///
    ///     [mappings.anat]
    ///     T1w = "*T1*"
    ///     T2w = ["*T2*", "*t2_spc*"]
    /// "#).unwrap();
    ///
    /// assert!(table.is_ignored("localizer"));
    /// assert_eq!(table.pattern_count(), 3);
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let raw: RawMappingTable = toml::from_str(contents)?;

        let mut builder = raw
            .ignored_series
            .into_iter()
            .fold(MappingTable::builder(), |b, s| b.ignore_series(s));
        builder = raw
            .ignored_suffixes
            .into_iter()
            .fold(builder, |b, s| b.ignore_suffix(s));

        for (scan_type, files) in raw.mappings {
            builder = add_scan_type(builder, scan_type, files)?;
        }

        builder.build()
    }

    /// Reads and validates a mapping table from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let table = Self::from_toml_str(&contents)?;

        info!(
            "Loaded mapping table from {}: {} scan types, {} patterns, {} ignored series, {} ignored suffixes",
            path.display(),
            table.scan_types().len(),
            table.pattern_count(),
            table.ignored_series().len(),
            table.ignored_suffixes().len()
        );

        Ok(table)
    }
}

fn add_scan_type(
    mut builder: MappingTableBuilder,
    scan_type: String,
    files: toml::Value,
) -> Result<MappingTableBuilder> {
    let toml::Value::Table(files) = files else {
        return Err(BidsMapError::ConfigParse(format!(
            "mappings.{} must be a table of file names",
            scan_type
        )));
    };

    for (file_name, spec) in files {
        let patterns = spec
            .try_into::<PatternSpec>()
            .map_err(|_| {
                BidsMapError::ConfigParse(format!(
                    "mappings.{}.{} must be a pattern string or a list of pattern strings",
                    scan_type, file_name
                ))
            })?
            .into_vec();
        builder = builder.mapping(scan_type.as_str(), file_name, patterns);
    }

    Ok(builder)
}
