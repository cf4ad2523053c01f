//! String utilities shared by the parser, type detector, filter engine and exporter.
//! All helpers operate on borrowed text and only allocate when the input needs changing.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::cmp::Ordering;

/// Byte-order mark prepended to UTF-8 text by spreadsheet tools.
pub const BOM: char = '\u{FEFF}';

/// Splits text into alternating runs of ASCII digits and non-digits.
static CHUNK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+|[^0-9]+").expect("Hardcode regex pattern"));

/// Removes a single leading byte-order mark, if present.
#[inline]
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}

/// Removes thousands-separator commas from a numeric string.
pub(crate) fn strip_thousands(value: &str) -> Cow<'_, str> {
    if value.contains(',') {
        Cow::Owned(value.replace(',', ""))
    } else {
        Cow::Borrowed(value)
    }
}

/// Checks whether `haystack` contains `needle`, ignoring case.
/// `needle` must already be lowercased.
#[inline]
pub(crate) fn contains_lowercase(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(needle)
}

/// Compares two strings so that embedded digit runs order by numeric value
/// ("file9" < "file10"). Non-digit runs compare by code point, so callers wanting
/// a case-insensitive order lowercase both sides first.
pub(crate) fn natural_cmp(left: &str, right: &str) -> Ordering {
    let mut left_chunks = CHUNK_PATTERN.find_iter(left);
    let mut right_chunks = CHUNK_PATTERN.find_iter(right);
    loop {
        match (left_chunks.next(), right_chunks.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(left), Some(right)) => {
                let ordering = compare_chunks(left.as_str(), right.as_str());
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

/// Compares two chunks numerically when both are digit runs, lexically otherwise.
fn compare_chunks(left: &str, right: &str) -> Ordering {
    if is_digits(left) && is_digits(right) {
        // Arbitrary length: strip leading zeros, then longer means larger.
        let left = left.trim_start_matches('0');
        let right = right.trim_start_matches('0');
        left.len().cmp(&right.len()).then_with(|| left.cmp(right))
    } else {
        left.cmp(right)
    }
}

#[inline]
fn is_digits(chunk: &str) -> bool {
    chunk.bytes().all(|byte| byte.is_ascii_digit())
}
