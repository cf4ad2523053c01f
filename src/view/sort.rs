use crate::error::RustyCsvError;
use crate::helpers::string::natural_cmp;
use crate::table::value::{parse_number, parse_timestamp};
use crate::table::{field, ColumnType, ColumnTypes};
use crate::view::ViewError;
use icu_collator::{Collator, CollatorOptions, Numeric, Strength};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Display;
use tracing::{trace, warn};

/// Direction of a column sort.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
    #[default]
    None,
}

impl SortDirection {
    /// Returns the lowercase name of the direction.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
            SortDirection::None => "none",
        }
    }

    /// Parses a direction name (case-insensitive).
    pub fn parse(name: &str) -> Result<Self, RustyCsvError> {
        match name.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            "none" | "" => Ok(Self::None),
            _ => Err(ViewError::InvalidSortDirection(name.to_string()))?,
        }
    }

    /// Next direction in the header-click cycle asc → desc → none → asc.
    pub const fn next(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::None,
            SortDirection::None => SortDirection::Asc,
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort column and direction. `column == None` means unsorted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortOrder {
    pub column: Option<usize>,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn new(column: usize, direction: SortDirection) -> Self {
        Self {
            column: Some(column),
            direction,
        }
    }

    /// Returns the sorted column when sorting is in effect.
    pub fn active_column(&self) -> Option<usize> {
        self.column.filter(|_| self.direction != SortDirection::None)
    }
}

/// Comparable key extracted from one field.
enum SortKey {
    /// Numbers and timestamps; unparseable values are negative infinity
    Number(f64),
    /// Trimmed text
    Text(String),
}

impl SortKey {
    fn new(value: &str, kind: ColumnType) -> Self {
        let value = value.trim();
        match kind {
            ColumnType::Number => Self::Number(parse_number(value).unwrap_or(f64::NEG_INFINITY)),
            ColumnType::Date => Self::Number(parse_timestamp(value).unwrap_or(f64::NEG_INFINITY)),
            ColumnType::String => Self::Text(value.to_owned()),
        }
    }

    fn compare(&self, other: &Self, text_order: &TextOrder) -> Ordering {
        match (self, other) {
            // Keys are finite or -inf, never NaN.
            (Self::Number(left), Self::Number(right)) => {
                left.partial_cmp(right).unwrap_or(Ordering::Equal)
            }
            (Self::Text(left), Self::Text(right)) => text_order.compare(left, right),
            _ => Ordering::Equal,
        }
    }
}

/// Ordering of text keys.
enum TextOrder {
    /// Root-locale collation ignoring case and accents, digit runs by numeric value
    Collated(Collator),
    /// Lowercased code-point order with numeric digit runs
    Natural,
}

impl TextOrder {
    /// Builds the collator for string columns; other columns never compare text.
    fn for_column(kind: ColumnType) -> Self {
        if kind != ColumnType::String {
            return Self::Natural;
        }
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Primary);
        options.numeric = Some(Numeric::On);
        match Collator::try_new(&Default::default(), options) {
            Ok(collator) => Self::Collated(collator),
            Err(error) => {
                warn!(%error, "text collation unavailable, falling back to natural order");
                Self::Natural
            }
        }
    }

    fn compare(&self, left: &str, right: &str) -> Ordering {
        match self {
            Self::Collated(collator) => collator.compare(left, right),
            Self::Natural => natural_cmp(&left.to_lowercase(), &right.to_lowercase()),
        }
    }
}

/// Returns `rows` ordered by one column according to its detected type.
///
/// - `Number`: thousands separators removed, compared as floats
/// - `Date`: compared as timestamps
/// - `String`: locale-aware collation, ignoring case and accents, with digit runs
///   compared numerically
///
/// Values that fail to parse as the column's type sort as negative infinity,
/// i.e. first when ascending. Without an active sort column the rows come back
/// in input order. The sort is stable and never modifies its input.
pub fn sort<R>(rows: &[R], order: SortOrder, types: &ColumnTypes) -> Vec<R>
where
    R: AsRef<[String]> + Clone,
{
    let Some(column) = order.active_column() else {
        return rows.to_vec();
    };
    let kind = types.get(column);
    let text_order = TextOrder::for_column(kind);
    let mut keyed: Vec<(SortKey, &R)> = rows
        .iter()
        .map(|row| (SortKey::new(field(row.as_ref(), column), kind), row))
        .collect();
    keyed.sort_by(|(left, _), (right, _)| {
        let ordering = left.compare(right, &text_order);
        if order.direction == SortDirection::Desc {
            ordering.reverse()
        } else {
            ordering
        }
    });
    trace!(column, direction = %order.direction, %kind, rows = rows.len(), "sorted rows");
    keyed.into_iter().map(|(_, row)| row.clone()).collect()
}
