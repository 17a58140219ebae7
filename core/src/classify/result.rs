use super::Classification;
use crate::types::{BidsAcquisition, SeriesDescriptor};
use std::collections::BTreeMap;

/// Outcome of classifying the series of one study
///
/// Every classified series lands in exactly one bucket. Mapped acquisitions
/// are always ordered by `(scan_type, file_name)`; their series keep the
/// order they were classified in. [`sort`](Self::sort) orders the ignored
/// and unknown buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationResult {
    /// Series per BIDS acquisition, for acquisitions with at least one series
    pub mapped: BTreeMap<BidsAcquisition, Vec<SeriesDescriptor>>,

    /// Series whose description is on the ignore list
    pub ignored: Vec<SeriesDescriptor>,

    /// Series that matched no pattern
    pub unknown: Vec<SeriesDescriptor>,
}

impl ClassificationResult {
    /// Creates an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a series to the bucket named by its classification
    pub fn insert(&mut self, series: SeriesDescriptor, classification: Classification) {
        match classification {
            Classification::Ignored => self.ignored.push(series),
            Classification::Mapped(acquisition) => {
                self.mapped.entry(acquisition).or_default().push(series)
            }
            Classification::Unknown => self.unknown.push(series),
        }
    }

    /// Sorts the ignored and unknown buckets
    ///
    /// Only presentation order changes, never bucket membership. Sorting an
    /// already sorted result is a no-op.
    pub fn sort(&mut self) {
        self.ignored.sort();
        self.unknown.sort();
    }

    /// Returns the series mapped to an acquisition
    pub fn get(&self, acquisition: &BidsAcquisition) -> Option<&[SeriesDescriptor]> {
        self.mapped.get(acquisition).map(Vec::as_slice)
    }

    /// Number of mapped series across all acquisitions
    pub fn mapped_count(&self) -> usize {
        self.mapped.values().map(Vec::len).sum()
    }

    /// Number of series across all buckets
    pub fn total(&self) -> usize {
        self.mapped_count() + self.ignored.len() + self.unknown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(feature = "json")]
impl serde::Serialize for ClassificationResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::Serialize;

        #[derive(Serialize)]
        struct MappedJson<'a> {
            scan_type: &'a str,
            file_name: &'a str,
            series: &'a [SeriesDescriptor],
        }

        #[derive(Serialize)]
        struct ResultJson<'a> {
            mapped: Vec<MappedJson<'a>>,
            ignored: &'a [SeriesDescriptor],
            unknown: &'a [SeriesDescriptor],
        }

        ResultJson {
            mapped: self
                .mapped
                .iter()
                .map(|(acquisition, series)| MappedJson {
                    scan_type: &acquisition.scan_type,
                    file_name: &acquisition.file_name,
                    series,
                })
                .collect(),
            ignored: &self.ignored,
            unknown: &self.unknown,
        }
        .serialize(serializer)
    }
}
