use crate::config::MappingTable;
use crate::matching::suffix::trim_suffix;
use crate::types::BidsAcquisition;
use log::debug;

/// Resolves a series description to its BIDS acquisition
///
/// The description is first trimmed of one ignored suffix, then tested
/// against every pattern of the table in declaration order: scan types,
/// then file entries, then patterns. The first pattern that matches wins,
/// so a general pattern declared before a specific one shadows it.
///
/// Returns `None` if no pattern matches.
///
/// # Example
///
/// ```
/// use bidsmap_core::{find_acquisition, BidsAcquisition, MappingTable};
///
/// let table = MappingTable::builder()
///     .ignore_suffix("_ND")
///     .mapping("anat", "T1w", ["*T1*"])
///     .mapping("anat", "T2w", ["*T2*"])
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     find_acquisition(&table, "3D_T1_MPRAGE_ND"),
///     Some(BidsAcquisition::new("anat", "T1w"))
/// );
/// assert_eq!(find_acquisition(&table, "localizer"), None);
/// ```
pub fn find_acquisition(table: &MappingTable, description: &str) -> Option<BidsAcquisition> {
    let trimmed = trim_suffix(description, table.ignored_suffixes());

    let (acquisition, pattern) = table
        .patterns()
        .find(|(_, pattern)| pattern.matches(trimmed))?;

    debug!(
        "'{}' matched pattern '{}' -> {}",
        description, pattern, acquisition
    );
    Some(acquisition.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> MappingTable {
        MappingTable::builder()
            .ignore_suffix("_moco")
            .mapping("anat", "T1w", ["T1*"])
            .mapping("anat", "UNIT1", ["T1w"])
            .mapping("func", "task-rest_bold", ["rest_bold", "*rest*"])
            .mapping("dwi", "dwi", ["dwi_[AP][AP]"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_first_match_wins() {
        // "T1*" is declared first, so it takes "T1w" even though
        // the literal "T1w" pattern is more specific
        assert_eq!(
            find_acquisition(&table(), "T1w"),
            Some(BidsAcquisition::new("anat", "T1w"))
        );
    }

    #[test]
    fn test_later_pattern_in_same_entry() {
        assert_eq!(
            find_acquisition(&table(), "resting_state"),
            Some(BidsAcquisition::new("func", "task-rest_bold"))
        );
    }

    #[test]
    fn test_match_after_trim() {
        assert_eq!(
            find_acquisition(&table(), "rest_bold_moco"),
            Some(BidsAcquisition::new("func", "task-rest_bold"))
        );
        assert_eq!(
            find_acquisition(&table(), "dwi_AP_moco"),
            Some(BidsAcquisition::new("dwi", "dwi"))
        );
    }

    #[test]
    fn test_trim_applied_once() {
        // "dwi_AP_moco_moco" trims to "dwi_AP_moco", which the anchored pattern rejects
        assert_eq!(find_acquisition(&table(), "dwi_AP_moco_moco"), None);
    }

    #[test]
    fn test_whole_string_match() {
        assert_eq!(find_acquisition(&table(), "my_dwi_AP"), None);
        assert_eq!(find_acquisition(&table(), "t1_mprage"), None);
    }

    #[test]
    fn test_empty_table() {
        let table = MappingTable::default();
        assert_eq!(find_acquisition(&table, "T1w"), None);
    }
}
