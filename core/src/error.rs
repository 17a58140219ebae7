use thiserror::Error;

/// Result type for bidsmap operations
pub type Result<T> = std::result::Result<T, BidsMapError>;

/// Error types for bidsmap operations
///
/// Classification itself never fails; these errors come from loading the
/// mapping table and reading series lists.
#[derive(Error, Debug)]
pub enum BidsMapError {
    /// Mapping table could not be parsed
    #[error("Config error: {0}")]
    ConfigParse(String),

    /// Glob pattern with invalid syntax
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// File entry without any pattern
    #[error("No patterns for {scan_type}/{file_name}")]
    EmptyPatterns { scan_type: String, file_name: String },

    /// Empty scan type or file name
    #[error("Empty name: {0}")]
    EmptyName(String),

    /// Malformed series list
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<toml::de::Error> for BidsMapError {
    fn from(e: toml::de::Error) -> Self {
        BidsMapError::ConfigParse(e.to_string().trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BidsMapError::InvalidPattern {
            pattern: "[z-a]".to_string(),
            reason: "reversed range".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid pattern '[z-a]': reversed range");

        let err = BidsMapError::EmptyPatterns {
            scan_type: "anat".to_string(),
            file_name: "T1w".to_string(),
        };
        assert_eq!(err.to_string(), "No patterns for anat/T1w");
    }
}
