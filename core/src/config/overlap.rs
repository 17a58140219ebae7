use super::MappingTable;
use crate::types::BidsAcquisition;
use std::fmt;

/// A pattern that an earlier pattern of another acquisition can pre-empt
///
/// Some series the later pattern was written for are taken by the earlier
/// one, because the first matching pattern wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowedPattern {
    pub earlier: BidsAcquisition,
    pub earlier_pattern: String,
    pub later: BidsAcquisition,
    pub later_pattern: String,
    /// Description both patterns match
    pub example: String,
}

impl fmt::Display for ShadowedPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pattern '{}' ({}) overlaps earlier pattern '{}' ({}), e.g. '{}'",
            self.later_pattern, self.later, self.earlier_pattern, self.earlier, self.example
        )
    }
}

/// Finds patterns that an earlier pattern may shadow
///
/// For every pattern, a sample description it matches is built and tested
/// against all patterns declared before it. A hit on a pattern mapping to a
/// different acquisition is reported. The check is advisory: it can miss
/// overlaps, and it never changes how descriptions are matched.
///
/// # Example
///
/// ```
/// use bidsmap_core::{lint, MappingTable};
///
/// let table = MappingTable::builder()
///     .mapping("anat", "T1w", ["T1*"])
///     .mapping("anat", "UNIT1", ["T1w_UNI"])
///     .build()
///     .unwrap();
///
/// let findings = lint(&table);
/// assert_eq!(findings.len(), 1);
/// assert_eq!(findings[0].later_pattern, "T1w_UNI");
/// ```
pub fn lint(table: &MappingTable) -> Vec<ShadowedPattern> {
    let patterns: Vec<_> = table.patterns().collect();
    let mut findings = Vec::new();

    for (i, (later, later_pattern)) in patterns.iter().enumerate() {
        let Some(sample) = later_pattern.sample() else {
            continue;
        };

        let shadowing = patterns[..i]
            .iter()
            .find(|(earlier, pattern)| earlier != later && pattern.matches(&sample));

        if let Some((earlier, earlier_pattern)) = shadowing {
            findings.push(ShadowedPattern {
                earlier: (*earlier).clone(),
                earlier_pattern: earlier_pattern.to_string(),
                later: (*later).clone(),
                later_pattern: later_pattern.to_string(),
                example: sample,
            });
        }
    }

    findings
}
