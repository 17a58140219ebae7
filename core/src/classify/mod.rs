//! Study-level series classification
//!
//! Buckets every series of a study into mapped, ignored or unknown, and
//! orders the buckets deterministically.

mod classifier;
mod result;

pub use classifier::{Classification, SeriesClassifier};
pub use result::ClassificationResult;
