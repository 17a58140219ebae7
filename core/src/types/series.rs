use std::fmt;

/// One imaging series within a study
///
/// Only the series description takes part in classification. The optional
/// Series Instance UID breaks ties when two series share a description, so
/// the derived ordering (description first, then UID) is total.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct SeriesDescriptor {
    /// Raw SeriesDescription (0008,103E) value
    pub description: String,

    /// Series Instance UID (0020,000E), if the loader provides one
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub series_instance_uid: Option<String>,
}

impl SeriesDescriptor {
    /// Creates a series descriptor from its description alone
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            series_instance_uid: None,
        }
    }

    /// Builder: attach a Series Instance UID
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.series_instance_uid = Some(uid.into());
        self
    }
}

impl fmt::Display for SeriesDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.series_instance_uid {
            Some(uid) => write!(f, "{} ({})", self.description, uid),
            None => write!(f, "{}", self.description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_by_description() {
        let a = SeriesDescriptor::new("T1w_MPRAGE");
        let b = SeriesDescriptor::new("bold_rest");
        // Uppercase sorts before lowercase in byte order
        assert!(a < b);
    }

    #[test]
    fn test_uid_breaks_ties() {
        let bare = SeriesDescriptor::new("localizer");
        let first = SeriesDescriptor::new("localizer").with_uid("1.2.3");
        let second = SeriesDescriptor::new("localizer").with_uid("1.2.4");

        assert!(bare < first);
        assert!(first < second);
        assert_ne!(first, second);
    }

    #[test]
    fn test_display() {
        assert_eq!(SeriesDescriptor::new("dwi_AP").to_string(), "dwi_AP");
        assert_eq!(
            SeriesDescriptor::new("dwi_AP").with_uid("1.2.3").to_string(),
            "dwi_AP (1.2.3)"
        );
    }
}
