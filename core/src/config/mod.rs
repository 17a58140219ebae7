//! DICOM series to BIDS mapping table
//!
//! The table holds three things:
//! - exact series descriptions to ignore
//! - suffixes trimmed (once) from a description before pattern matching
//! - an ordered mapping scan type -> file name -> glob patterns
//!
//! Declaration order is match precedence. Tables are built once, either with
//! [`MappingTable::builder`] or loaded from TOML, and are read-only afterwards.

mod loader;
mod overlap;

pub use overlap::{lint, ShadowedPattern};

use crate::error::{BidsMapError, Result};
use crate::matching::GlobPattern;
use crate::types::BidsAcquisition;
use std::collections::HashSet;

/// One output file of a scan type and the patterns that select it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMapping {
    acquisition: BidsAcquisition,
    patterns: Vec<GlobPattern>,
}

impl FileMapping {
    /// Acquisition identity assigned to matching series
    pub fn acquisition(&self) -> &BidsAcquisition {
        &self.acquisition
    }

    pub fn file_name(&self) -> &str {
        &self.acquisition.file_name
    }

    /// Patterns in declaration order (never empty)
    pub fn patterns(&self) -> &[GlobPattern] {
        &self.patterns
    }
}

/// All file mappings of one BIDS scan type, in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTypeMapping {
    scan_type: String,
    files: Vec<FileMapping>,
}

impl ScanTypeMapping {
    pub fn scan_type(&self) -> &str {
        &self.scan_type
    }

    pub fn files(&self) -> &[FileMapping] {
        &self.files
    }
}

/// Validated, immutable mapping table
///
/// # Example
///
/// ```
/// use bidsmap_core::MappingTable;
///
/// let table = MappingTable::builder()
///     .ignore_series("localizer")
///     .ignore_suffix("_ND")
///     .mapping("anat", "T1w", ["*T1*"])
///     .mapping("func", "task-rest_bold", ["*rest*", "*RS_fMRI*"])
///     .build()
///     .unwrap();
///
/// assert!(table.is_ignored("localizer"));
/// assert_eq!(table.scan_types().len(), 2);
/// assert_eq!(table.pattern_count(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    scan_types: Vec<ScanTypeMapping>,
    ignored_series: HashSet<String>,
    ignored_suffixes: Vec<String>,
}

impl MappingTable {
    /// Starts building a table programmatically
    pub fn builder() -> MappingTableBuilder {
        MappingTableBuilder::default()
    }

    /// Scan types in declaration order
    pub fn scan_types(&self) -> &[ScanTypeMapping] {
        &self.scan_types
    }

    /// Exact series descriptions excluded from mapping
    pub fn ignored_series(&self) -> &HashSet<String> {
        &self.ignored_series
    }

    /// Suffixes trimmed before matching, in declaration order
    pub fn ignored_suffixes(&self) -> &[String] {
        &self.ignored_suffixes
    }

    /// Checks a raw (untrimmed) description against the ignore list
    pub fn is_ignored(&self, description: &str) -> bool {
        self.ignored_series.contains(description)
    }

    /// Iterates over every pattern with its acquisition, in match precedence order
    pub fn patterns(&self) -> impl Iterator<Item = (&BidsAcquisition, &GlobPattern)> + '_ {
        self.scan_types
            .iter()
            .flat_map(|scan_type| scan_type.files.iter())
            .flat_map(|file| {
                file.patterns
                    .iter()
                    .map(move |pattern| (&file.acquisition, pattern))
            })
    }

    /// Total number of patterns across all file mappings
    pub fn pattern_count(&self) -> usize {
        self.patterns().count()
    }
}

/// Builder for [`MappingTable`]
///
/// Collects raw strings; all validation happens in [`build`](Self::build).
/// Mappings added under an existing scan type are appended to it, keeping
/// the position of its first appearance.
#[derive(Debug, Clone, Default)]
pub struct MappingTableBuilder {
    scan_types: Vec<(String, Vec<(String, Vec<String>)>)>,
    ignored_series: Vec<String>,
    ignored_suffixes: Vec<String>,
}

impl MappingTableBuilder {
    /// Builder: ignore series with exactly this description
    pub fn ignore_series(mut self, description: impl Into<String>) -> Self {
        self.ignored_series.push(description.into());
        self
    }

    /// Builder: add a suffix trimmed before matching
    pub fn ignore_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.ignored_suffixes.push(suffix.into());
        self
    }

    /// Builder: map series matching any of `patterns` to `scan_type`/`file_name`
    pub fn mapping<I, P>(
        mut self,
        scan_type: impl Into<String>,
        file_name: impl Into<String>,
        patterns: I,
    ) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let scan_type = scan_type.into();
        let entry: (String, Vec<String>) = (
            file_name.into(),
            patterns.into_iter().map(Into::into).collect(),
        );

        match self.scan_types.iter_mut().find(|(name, _)| *name == scan_type) {
            Some((_, files)) => files.push(entry),
            None => self.scan_types.push((scan_type, vec![entry])),
        }
        self
    }

    /// Validates and compiles the table
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a scan type, file name or ignored suffix is empty
    /// - a file mapping has no patterns
    /// - a pattern is not valid glob syntax
    pub fn build(self) -> Result<MappingTable> {
        let mut scan_types = Vec::with_capacity(self.scan_types.len());

        for (scan_type, raw_files) in self.scan_types {
            if scan_type.is_empty() {
                return Err(BidsMapError::EmptyName("scan type".to_string()));
            }

            let mut files = Vec::with_capacity(raw_files.len());
            for (file_name, raw_patterns) in raw_files {
                if file_name.is_empty() {
                    return Err(BidsMapError::EmptyName(format!(
                        "file name under scan type '{}'",
                        scan_type
                    )));
                }
                if raw_patterns.is_empty() {
                    return Err(BidsMapError::EmptyPatterns {
                        scan_type: scan_type.clone(),
                        file_name,
                    });
                }

                let patterns = raw_patterns
                    .iter()
                    .map(|p| GlobPattern::new(p))
                    .collect::<Result<Vec<_>>>()?;

                files.push(FileMapping {
                    acquisition: BidsAcquisition::new(scan_type.clone(), file_name),
                    patterns,
                });
            }

            scan_types.push(ScanTypeMapping { scan_type, files });
        }

        if self.ignored_suffixes.iter().any(|s| s.is_empty()) {
            return Err(BidsMapError::EmptyName("ignored suffix".to_string()));
        }

        Ok(MappingTable {
            scan_types,
            ignored_series: self.ignored_series.into_iter().collect(),
            ignored_suffixes: self.ignored_suffixes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_order() {
        let table = MappingTable::builder()
            .mapping("func", "task-rest_bold", ["*rest*"])
            .mapping("anat", "T1w", ["*T1*"])
            .mapping("func", "task-motor_bold", ["*motor*"])
            .build()
            .unwrap();

        let scan_types: Vec<&str> = table
            .scan_types()
            .iter()
            .map(|s| s.scan_type())
            .collect();
        assert_eq!(scan_types, vec!["func", "anat"]);

        let func_files: Vec<&str> = table.scan_types()[0]
            .files()
            .iter()
            .map(|f| f.file_name())
            .collect();
        assert_eq!(func_files, vec!["task-rest_bold", "task-motor_bold"]);
    }

    #[test]
    fn test_patterns_iteration_order() {
        let table = MappingTable::builder()
            .mapping("anat", "T1w", ["a", "b"])
            .mapping("anat", "T2w", ["c"])
            .mapping("dwi", "dwi", ["d"])
            .build()
            .unwrap();

        let order: Vec<(String, &str)> = table
            .patterns()
            .map(|(acq, p)| (acq.to_string(), p.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("anat/T1w".to_string(), "a"),
                ("anat/T1w".to_string(), "b"),
                ("anat/T2w".to_string(), "c"),
                ("dwi/dwi".to_string(), "d"),
            ]
        );
        assert_eq!(table.pattern_count(), 4);
    }

    #[test]
    fn test_is_ignored_is_exact() {
        let table = MappingTable::builder()
            .ignore_series("localizer")
            .build()
            .unwrap();

        assert!(table.is_ignored("localizer"));
        assert!(!table.is_ignored("localizer_ND"));
        assert!(!table.is_ignored("Localizer"));
    }

    #[test]
    fn test_empty_patterns_rejected() {
        let err = MappingTable::builder()
            .mapping("anat", "T1w", Vec::<String>::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, BidsMapError::EmptyPatterns { .. }));
    }

    #[test]
    fn test_empty_names_rejected() {
        let err = MappingTable::builder()
            .mapping("", "T1w", ["*T1*"])
            .build()
            .unwrap_err();
        assert!(matches!(err, BidsMapError::EmptyName(_)));

        let err = MappingTable::builder()
            .mapping("anat", "", ["*T1*"])
            .build()
            .unwrap_err();
        assert!(matches!(err, BidsMapError::EmptyName(_)));

        let err = MappingTable::builder()
            .ignore_suffix("")
            .build()
            .unwrap_err();
        assert!(matches!(err, BidsMapError::EmptyName(_)));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = MappingTable::builder()
            .mapping("fmap", "epi", ["echo[9-1]"])
            .build()
            .unwrap_err();
        assert!(matches!(err, BidsMapError::InvalidPattern { .. }));
    }

    #[test]
    fn test_table_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MappingTable>();
    }
}
