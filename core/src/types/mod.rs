//! Core type definitions for series classification
//!
//! - [`SeriesDescriptor`]: One DICOM series of a study, identified by its description
//! - [`BidsAcquisition`]: A BIDS destination (scan type + file name)

mod acquisition;
mod series;

pub use acquisition::BidsAcquisition;
pub use series::SeriesDescriptor;
