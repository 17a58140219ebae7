pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod matching;
pub mod types;

pub use classify::{Classification, ClassificationResult, SeriesClassifier};
pub use cli::report::TextReport;
pub use config::{
    lint, FileMapping, MappingTable, MappingTableBuilder, ScanTypeMapping, ShadowedPattern,
};
pub use error::{BidsMapError, Result};
pub use matching::{find_acquisition, trim_suffix, GlobPattern};
pub use types::*;
