use std::fmt;

/// Resolved BIDS destination of a series
///
/// Ordered by scan type, then file name, which is the order mapped series
/// are reported in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct BidsAcquisition {
    /// BIDS data type directory (e.g. "anat", "func", "dwi")
    pub scan_type: String,

    /// Output file name token within the scan type (e.g. "T1w")
    pub file_name: String,
}

impl BidsAcquisition {
    /// Creates a new acquisition identity
    pub fn new(scan_type: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            scan_type: scan_type.into(),
            file_name: file_name.into(),
        }
    }
}

impl fmt::Display for BidsAcquisition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.scan_type, self.file_name)
    }
}
