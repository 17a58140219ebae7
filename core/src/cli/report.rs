use crate::classify::ClassificationResult;
use crate::types::SeriesDescriptor;
use std::fmt;

/// Text report formatter for a classification result
///
/// Lists mapped acquisitions with their series, then the ignored and
/// unknown series for operator review, then a summary.
pub struct TextReport<'a> {
    result: &'a ClassificationResult,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(result: &'a ClassificationResult) -> Self {
        Self { result }
    }
}

fn write_series_list(f: &mut fmt::Formatter<'_>, series: &[SeriesDescriptor]) -> fmt::Result {
    if series.is_empty() {
        writeln!(f, "  (none)")?;
    }
    for s in series {
        writeln!(f, "  {}", s)?;
    }
    Ok(())
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BIDS Acquisitions")?;
        writeln!(f, "=================")?;
        writeln!(f)?;

        if self.result.mapped.is_empty() {
            writeln!(f, "  (none)")?;
            writeln!(f)?;
        }
        for (acquisition, series) in &self.result.mapped {
            writeln!(f, "{}:", acquisition)?;
            write_series_list(f, series)?;
            writeln!(f)?;
        }

        writeln!(f, "Ignored Series")?;
        writeln!(f, "--------------")?;
        write_series_list(f, &self.result.ignored)?;
        writeln!(f)?;

        writeln!(f, "Unknown Series")?;
        writeln!(f, "--------------")?;
        write_series_list(f, &self.result.unknown)?;
        writeln!(f)?;

        writeln!(f, "Summary")?;
        writeln!(f, "-------")?;
        writeln!(
            f,
            "Mapped:   {} ({} acquisitions)",
            self.result.mapped_count(),
            self.result.mapped.len()
        )?;
        writeln!(f, "Ignored:  {}", self.result.ignored.len())?;
        writeln!(f, "Unknown:  {}", self.result.unknown.len())?;
        writeln!(f, "Total:    {}", self.result.total())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classification;
    use crate::types::BidsAcquisition;

    #[test]
    fn test_text_report_format() {
        let mut result = ClassificationResult::new();
        result.insert(
            SeriesDescriptor::new("3D_T1_MPRAGE").with_uid("1.2.3"),
            Classification::Mapped(BidsAcquisition::new("anat", "T1w")),
        );
        result.insert(SeriesDescriptor::new("localizer"), Classification::Ignored);

        let report = TextReport::new(&result);
        let output = format!("{}", report);

        assert!(output.contains("anat/T1w:\n  3D_T1_MPRAGE (1.2.3)\n"));
        assert!(output.contains("Ignored Series\n--------------\n  localizer\n"));
        assert!(output.contains("Unknown Series\n--------------\n  (none)\n"));
        assert!(output.contains("Mapped:   1 (1 acquisitions)"));
        assert!(output.contains("Total:    2"));
    }

    #[test]
    fn test_text_report_empty() {
        let result = ClassificationResult::new();
        let output = TextReport::new(&result).to_string();

        assert!(output.starts_with("BIDS Acquisitions\n=================\n\n  (none)\n"));
        assert!(output.contains("Total:    0"));
    }
}
