/// Removes the first matching ignored suffix from a series description
///
/// Suffixes are tried in definition order and at most one is removed, even
/// if the trimmed description ends with another listed suffix. Returns the
/// description unchanged when no suffix matches.
///
/// # Example
///
/// ```
/// use bidsmap_core::trim_suffix;
///
/// let suffixes = vec!["_moco".to_string()];
/// assert_eq!(trim_suffix("bold_moco_moco", &suffixes), "bold_moco");
/// assert_eq!(trim_suffix("bold", &suffixes), "bold");
/// ```
pub fn trim_suffix<'a>(description: &'a str, suffixes: &[String]) -> &'a str {
    suffixes
        .iter()
        .find_map(|suffix| description.strip_suffix(suffix.as_str()))
        .unwrap_or(description)
}
