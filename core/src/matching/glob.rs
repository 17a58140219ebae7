use crate::error::{BidsMapError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Placeholder used for `?` when building a sample string
const SAMPLE_CHAR: char = 'x';

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(char),
    AnyChar,
    AnySequence,
    Class(CharClass),
}

/// Bracket expression: `[abc]`, `[a-z]`, `[!0-9]`
#[derive(Debug, Clone, PartialEq, Eq)]
struct CharClass {
    negated: bool,
    ranges: Vec<(char, char)>,
}

impl CharClass {
    fn admits(&self, c: char) -> bool {
        let in_ranges = self
            .ranges
            .iter()
            .any(|&(start, end)| start <= c && c <= end);
        in_ranges != self.negated
    }

    fn first_admitted(&self) -> Option<char> {
        if self.negated {
            (' '..='~').find(|&c| self.admits(c))
        } else {
            self.ranges.first().map(|&(start, _)| start)
        }
    }
}

/// Shell-style glob pattern matched against a whole series description
///
/// Supported syntax:
/// - `*` matches any run of characters, including none
/// - `?` matches exactly one character
/// - `[abc]`, `[a-z]` match one character from the set
/// - `[!abc]` matches one character outside the set
///
/// A `[` without a closing `]` is a literal character. Matching is
/// case-sensitive and anchored at both ends.
///
/// # Example
///
/// ```
/// use bidsmap_core::GlobPattern;
///
/// let pattern = GlobPattern::new("*T1*").unwrap();
/// assert!(pattern.matches("3D_T1_MPRAGE"));
/// assert!(!pattern.matches("3D_t1_MPRAGE"));
///
/// let pattern = GlobPattern::new("dwi_[AP][AP]").unwrap();
/// assert!(pattern.matches("dwi_AP"));
/// assert!(!pattern.matches("dwi_AP_run2"));
/// ```
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    tokens: Vec<Token>,
    regex: Regex,
}

impl GlobPattern {
    /// Compiles a glob pattern
    ///
    /// # Errors
    ///
    /// Returns [`BidsMapError::InvalidPattern`] if a character class contains
    /// a reversed range such as `[z-a]`.
    pub fn new(pattern: &str) -> Result<Self> {
        let tokens = parse(pattern)?;
        let regex = Regex::new(&to_regex(&tokens)).map_err(|e| BidsMapError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            source: pattern.to_string(),
            tokens,
            regex,
        })
    }

    /// Returns the pattern as written in the mapping table
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Checks whether the whole of `text` matches this pattern
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Returns true if the pattern has no wildcards or character classes
    pub fn is_literal(&self) -> bool {
        self.tokens.iter().all(|t| matches!(t, Token::Literal(_)))
    }

    /// Builds one string this pattern is guaranteed to match
    ///
    /// `*` expands to nothing, `?` to a placeholder, and a class to the first
    /// character it admits. Returns `None` for a negated class that excludes
    /// every printable ASCII character.
    pub(crate) fn sample(&self) -> Option<String> {
        let mut out = String::with_capacity(self.source.len());
        for token in &self.tokens {
            match token {
                Token::Literal(c) => out.push(*c),
                Token::AnyChar => out.push(SAMPLE_CHAR),
                Token::AnySequence => {}
                Token::Class(class) => out.push(class.first_admitted()?),
            }
        }
        Some(out)
    }
}

impl PartialEq for GlobPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for GlobPattern {}

impl FromStr for GlobPattern {
    type Err = BidsMapError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

fn parse(pattern: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '*' => {
                // Consecutive stars are equivalent to one
                if tokens.last() != Some(&Token::AnySequence) {
                    tokens.push(Token::AnySequence);
                }
            }
            '?' => tokens.push(Token::AnyChar),
            '[' => match find_class_end(&chars, i) {
                Some(end) => {
                    tokens.push(Token::Class(parse_class(pattern, &chars[i..end])?));
                    i = end + 1;
                }
                None => tokens.push(Token::Literal('[')),
            },
            _ => tokens.push(Token::Literal(c)),
        }
    }

    Ok(tokens)
}

/// Finds the `]` closing a class whose body starts at `start`
///
/// A `]` directly after `[` or `[!` belongs to the set.
fn find_class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    while j < chars.len() && chars[j] != ']' {
        j += 1;
    }
    (j < chars.len()).then_some(j)
}

fn parse_class(pattern: &str, body: &[char]) -> Result<CharClass> {
    let (negated, body) = match body.split_first() {
        Some((&'!', rest)) => (true, rest),
        _ => (false, body),
    };

    let mut ranges = Vec::new();
    let mut k = 0;
    while k < body.len() {
        let start = body[k];
        // A '-' at either end of the set is literal
        if k + 2 < body.len() && body[k + 1] == '-' {
            let end = body[k + 2];
            if end < start {
                return Err(BidsMapError::InvalidPattern {
                    pattern: pattern.to_string(),
                    reason: format!("reversed character range {}-{}", start, end),
                });
            }
            ranges.push((start, end));
            k += 3;
        } else {
            ranges.push((start, start));
            k += 1;
        }
    }

    Ok(CharClass { negated, ranges })
}

fn to_regex(tokens: &[Token]) -> String {
    let mut re = String::from("(?s)^");
    for token in tokens {
        match token {
            Token::Literal(c) => re.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
            Token::AnyChar => re.push('.'),
            Token::AnySequence => re.push_str(".*"),
            Token::Class(class) => {
                re.push('[');
                if class.negated {
                    re.push('^');
                }
                for &(start, end) in &class.ranges {
                    push_class_char(&mut re, start);
                    if start != end {
                        re.push('-');
                        push_class_char(&mut re, end);
                    }
                }
                re.push(']');
            }
        }
    }
    re.push('$');
    re
}

fn push_class_char(re: &mut String, c: char) {
    re.push_str(&format!("\\x{{{:X}}}", c as u32));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("*T1*", "3D_T1_MPRAGE", true)]
    #[case("*T1*", "T1", true)]
    #[case("*T1*", "t1_mprage", false)]
    #[case("T1w", "T1w", true)]
    #[case("T1w", "T1w_run2", false)]
    #[case("T1w", "my_T1w", false)]
    #[case("bold_run?", "bold_run1", true)]
    #[case("bold_run?", "bold_run", false)]
    #[case("bold_run?", "bold_run12", false)]
    #[case("dwi_[AP][AP]", "dwi_PA", true)]
    #[case("dwi_[AP][AP]", "dwi_LR", false)]
    #[case("echo[1-3]", "echo2", true)]
    #[case("echo[1-3]", "echo4", false)]
    #[case("echo[!1-3]", "echo4", true)]
    #[case("echo[!1-3]", "echo1", false)]
    #[case("fmap[", "fmap[", true)]
    #[case("[]]x", "]x", true)]
    #[case("[!]]x", "ax", true)]
    #[case("[!]]x", "]x", false)]
    #[case("a[-z]", "a-", true)]
    #[case("a.b", "a.b", true)]
    #[case("a.b", "axb", false)]
    #[case("(T1)+", "(T1)+", true)]
    #[case("**", "", true)]
    #[case("*", "multi\nline", true)]
    fn test_matches(#[case] pattern: &str, #[case] text: &str, #[case] expected: bool) {
        let glob = GlobPattern::new(pattern).unwrap();
        assert_eq!(glob.matches(text), expected, "{} vs {:?}", pattern, text);
    }

    #[test]
    fn test_reversed_range_rejected() {
        let err = GlobPattern::new("echo[3-1]").unwrap_err();
        assert!(matches!(err, BidsMapError::InvalidPattern { .. }));
    }

    #[test]
    fn test_is_literal() {
        assert!(GlobPattern::new("T1w").unwrap().is_literal());
        assert!(GlobPattern::new("fmap[").unwrap().is_literal());
        assert!(!GlobPattern::new("T1*").unwrap().is_literal());
        assert!(!GlobPattern::new("T[12]w").unwrap().is_literal());
    }

    #[rstest]
    #[case("T1*", "T1")]
    #[case("*bold?", "boldx")]
    #[case("echo[2-4]", "echo2")]
    #[case("echo[! ]", "echo!")]
    #[case("T1w", "T1w")]
    fn test_sample(#[case] pattern: &str, #[case] expected: &str) {
        let glob = GlobPattern::new(pattern).unwrap();
        let sample = glob.sample().unwrap();
        assert_eq!(sample, expected);
        assert!(glob.matches(&sample));
    }

    #[test]
    fn test_from_str_and_display() {
        let glob: GlobPattern = "*_SBRef".parse().unwrap();
        assert_eq!(glob.to_string(), "*_SBRef");
        assert_eq!(glob.as_str(), "*_SBRef");
        assert_eq!(glob, GlobPattern::new("*_SBRef").unwrap());
    }
}
