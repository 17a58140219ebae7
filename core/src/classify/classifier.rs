use super::ClassificationResult;
use crate::config::MappingTable;
use crate::matching::find_acquisition;
use crate::types::{BidsAcquisition, SeriesDescriptor};
use log::debug;

/// Classification of a single series
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Description is on the ignore list
    Ignored,
    /// Description matched a pattern of this acquisition
    Mapped(BidsAcquisition),
    /// Description matched nothing
    Unknown,
}

/// Classifies the series of a study against a mapping table
///
/// The classifier borrows the table and keeps no state between calls, so
/// one table can serve any number of studies, from any number of threads.
///
/// # Example
///
/// ```
/// use bidsmap_core::{BidsAcquisition, MappingTable, SeriesClassifier, SeriesDescriptor};
///
/// let table = MappingTable::builder()
///     .ignore_series("localizer")
///     .mapping("anat", "T1w", ["*T1*"])
///     .build()
///     .unwrap();
///
/// let series = vec![
///     SeriesDescriptor::new("localizer"),
///     SeriesDescriptor::new("3D_T1_MPRAGE"),
///     SeriesDescriptor::new("unknown_seq"),
/// ];
///
/// let result = SeriesClassifier::new(&table).classify(&series);
///
/// assert_eq!(result.ignored, vec![SeriesDescriptor::new("localizer")]);
/// assert_eq!(
///     result.get(&BidsAcquisition::new("anat", "T1w")),
///     Some(&[SeriesDescriptor::new("3D_T1_MPRAGE")][..])
/// );
/// assert_eq!(result.unknown, vec![SeriesDescriptor::new("unknown_seq")]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SeriesClassifier<'a> {
    table: &'a MappingTable,
}

impl<'a> SeriesClassifier<'a> {
    /// Creates a classifier over a mapping table
    pub fn new(table: &'a MappingTable) -> Self {
        Self { table }
    }

    /// Classifies a single series
    ///
    /// The ignore list is checked against the raw description first and
    /// takes precedence over any pattern. Otherwise the description (with
    /// one ignored suffix trimmed) is matched against the table.
    pub fn classify_series(&self, series: &SeriesDescriptor) -> Classification {
        if self.table.is_ignored(&series.description) {
            return Classification::Ignored;
        }

        match find_acquisition(self.table, &series.description) {
            Some(acquisition) => Classification::Mapped(acquisition),
            None => Classification::Unknown,
        }
    }

    /// Classifies all series of a study and sorts the result
    ///
    /// Never fails: a series that matches nothing is reported as unknown.
    pub fn classify(&self, series_list: &[SeriesDescriptor]) -> ClassificationResult {
        let mut result = ClassificationResult::new();

        for series in series_list {
            let classification = self.classify_series(series);
            debug!("{} -> {:?}", series, classification);
            result.insert(series.clone(), classification);
        }

        result.sort();

        debug!(
            "Classified {} series: {} mapped to {} acquisitions, {} ignored, {} unknown",
            series_list.len(),
            result.mapped_count(),
            result.mapped.len(),
            result.ignored.len(),
            result.unknown.len()
        );

        result
    }
}
