//! Shared pattern catalog for entity extraction.
//!
//! Every heuristic regex lives here so that tuning one is a single change,
//! whichever site handler or cascade tier uses it.

use once_cell::sync::Lazy;
use regex::Regex;

/// `local@domain.tld` with a TLD of two or more letters. Word boundaries
/// are ASCII-only, so a non-ASCII letter next to the address does not hide it.
pub static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}(?-u:\b)").expect("email pattern")
});

/// North American numbers such as `(555) 123-4567`, `555.123.4567` or `5551234567`.
pub static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}").expect("phone pattern")
});

/// Two or more capitalized words, e.g. "John Smith".
pub static PERSON_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z][a-z]+(?: [A-Z][a-z]+)+").expect("name pattern"));

pub static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").expect("digit pattern"));

/// Separators between name tokens when a blob has no email or phone to cut at.
pub static NAME_TOKEN_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,\s]+").expect("separator pattern"));

/// One optional trailing punctuation mark plus trailing whitespace.
pub static TRAILING_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,.:;]?\s*$").expect("trailing punctuation pattern"));

/// Builds the `"<address> - <SiteName>"` page title pattern for a site.
pub fn title_suffix_pattern(site_name: &str) -> Option<Regex> {
    Regex::new(&format!(r"(?i)(.*?)\s*-\s*{}", regex::escape(site_name))).ok()
}

/// True when text looks like a street address: a street number and a
/// comma-separated locality.
pub fn looks_like_address(text: &str) -> bool {
    DIGIT.is_match(text) && text.contains(',')
}
