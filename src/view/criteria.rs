use crate::helpers::string::contains_lowercase;
use crate::table::field;

/// Criteria for filtering rows of a table.
///
/// Matching is a case-insensitive substring test. Needles are lowercased once
/// here; empty needles are dropped since they match everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Criteria {
    /// Global search needle, matched against every field of a row.
    search: Option<String>,

    /// Per-column needles as (column index, needle); all must match.
    column_filters: Vec<(usize, String)>,
}

impl Criteria {
    /// Creates criteria from a global search string and per-column filter strings.
    /// `column_filters[i]` applies to column `i`; pass an empty slice for no filters.
    pub fn new(search: &str, column_filters: &[String]) -> Self {
        let search = Some(search.to_lowercase()).filter(|needle| !needle.is_empty());
        let column_filters = column_filters
            .iter()
            .enumerate()
            .filter(|(_, needle)| !needle.is_empty())
            .map(|(col, needle)| (col, needle.to_lowercase()))
            .collect();
        Self {
            search,
            column_filters,
        }
    }

    /// Returns true if the criteria accept every row.
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.column_filters.is_empty()
    }

    /// Checks if a row satisfies the criteria.
    /// The global search needs one matching field; every column filter must match
    /// its own column, where a missing field reads as empty.
    pub fn accept(&self, row: &[String]) -> bool {
        if let Some(needle) = &self.search {
            if !row.iter().any(|value| contains_lowercase(value, needle)) {
                return false;
            }
        }
        self.column_filters
            .iter()
            .all(|(col, needle)| contains_lowercase(field(row, *col), needle))
    }
}
