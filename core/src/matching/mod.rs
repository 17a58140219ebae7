//! Series description matching
//!
//! Glob patterns, ignored-suffix trimming and first-match-wins lookup
//! against a [`MappingTable`](crate::config::MappingTable).

pub mod glob;
pub mod matcher;
pub mod suffix;

pub use glob::GlobPattern;
pub use matcher::find_acquisition;
pub use suffix::trim_suffix;
