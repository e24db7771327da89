//! Line patterns for recognizing states.
//!
//! A `Pattern` recognizes a line when its regular expression matches at the
//! start of the line. The rest of the line may be anything: matching is
//! prefix-anchored, not full-string.

use regex::{Captures, Regex};
use std::fmt;

/// Compiled regular expression that recognizes lines by prefix.
///
/// # Example
///
/// ```rust
/// use linestate::core::Pattern;
///
/// let header = Pattern::new(r"#+\s").unwrap();
///
/// assert!(header.is_match("## Section"));
/// assert!(!header.is_match("text with ## inside"));
/// ```
#[derive(Clone)]
pub struct Pattern {
    source: String,
    anchored: Regex,
}

impl Pattern {
    /// Compile a pattern from regular-expression source text.
    ///
    /// The source is validated as written, then compiled a second time
    /// anchored to the start of the input.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source)?;
        Ok(Self {
            source: source.to_string(),
            anchored: anchor(source)?,
        })
    }

    /// The source text this pattern was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Check whether the pattern matches at the start of `line`.
    pub fn is_match(&self, line: &str) -> bool {
        self.anchored.is_match(line)
    }

    /// Capture groups for a match at the start of `line`, if any.
    ///
    /// ```rust
    /// use linestate::core::Pattern;
    ///
    /// let pattern = Pattern::new(r"(?P<level>[A-Z]+): ").unwrap();
    /// let caps = pattern.captures("WARN: disk almost full").unwrap();
    /// assert_eq!(&caps["level"], "WARN");
    /// ```
    pub fn captures<'l>(&self, line: &'l str) -> Option<Captures<'l>> {
        self.anchored.captures(line)
    }
}

fn anchor(source: &str) -> Result<Regex, regex::Error> {
    // A trailing `(?x)` comment swallows the closing paren; a newline ends
    // the comment and is ignored in verbose mode.
    Regex::new(&format!(r"\A(?:{source})"))
        .or_else(|_| Regex::new(&format!("\\A(?:{source}\n)")))
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source()).finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source())
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source() == other.source()
    }
}

impl Eq for Pattern {}
