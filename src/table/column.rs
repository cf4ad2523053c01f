use crate::delimited::Row;
use crate::table::field;
use crate::table::value::{parse_date, parse_number};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::debug;

/// Number of leading data rows sampled for type detection.
pub const SAMPLE_ROWS: usize = 500;

/// Share of non-empty sampled values that must parse for a column to get a type,
/// as a fraction `numerator / denominator` (inclusive).
pub const TYPE_THRESHOLD: (usize, usize) = (4, 5);

/// Coarse data types inferred for a column.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Numeric values, thousands separators allowed
    Number,
    /// Calendar dates or date/times
    Date,
    /// Anything else
    #[default]
    String,
}

impl ColumnType {
    /// Returns the lowercase name of the column type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Number => "number",
            ColumnType::Date => "date",
            ColumnType::String => "string",
        }
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-column types of a table, by column index.
/// Indices without an entry read as [`ColumnType::String`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTypes(Vec<ColumnType>);

impl ColumnTypes {
    /// Wraps explicit per-column types.
    pub fn new(types: Vec<ColumnType>) -> Self {
        Self(types)
    }

    /// Type of column `col`, `String` when unknown.
    #[inline]
    pub fn get(&self, col: usize) -> ColumnType {
        self.0.get(col).copied().unwrap_or_default()
    }

    /// Number of typed columns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no column is typed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the column types in column order.
    pub fn iter(&self) -> impl Iterator<Item = ColumnType> + '_ {
        self.0.iter().copied()
    }
}

/// Tally of sampled values for one column.
#[derive(Default)]
struct Tally {
    total: usize,
    number: usize,
    date: usize,
}

impl Tally {
    /// Counts one raw value. Numbers take precedence over dates.
    fn add(&mut self, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        self.total += 1;
        if parse_number(value).is_some() {
            self.number += 1;
        } else if parse_date(value).is_some() {
            self.date += 1;
        }
    }

    /// Returns true if `count` reaches the threshold share of non-empty values.
    fn passes(&self, count: usize) -> bool {
        let (numerator, denominator) = TYPE_THRESHOLD;
        count * denominator >= self.total * numerator
    }

    fn kind(&self) -> ColumnType {
        if self.total == 0 {
            ColumnType::String
        } else if self.passes(self.number) {
            ColumnType::Number
        } else if self.passes(self.date) {
            ColumnType::Date
        } else {
            ColumnType::String
        }
    }
}

/// Infers a type for every header position from the first [`SAMPLE_ROWS`] data rows.
///
/// A column is `Number` when at least 80 % of its non-empty sampled values parse as
/// numbers, otherwise `Date` when at least 80 % parse as dates, otherwise `String`.
/// A column without any non-empty value is `String`.
pub fn detect(headers: &[String], data: &[Row]) -> ColumnTypes {
    let sample = &data[..data.len().min(SAMPLE_ROWS)];
    let types: Vec<ColumnType> = (0..headers.len())
        .map(|col| {
            let mut tally = Tally::default();
            for row in sample {
                tally.add(field(row, col));
            }
            tally.kind()
        })
        .collect();
    debug!(columns = types.len(), sampled = sample.len(), ?types, "detected column types");
    ColumnTypes(types)
}
