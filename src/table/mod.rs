//! # Table Module
//!
//! Splits parsed rows into a header row and a data body, and infers a coarse
//! type for every column from a bounded sample of the body.
use crate::delimited::Row;

pub mod column;
pub mod value;

pub use column::{detect, ColumnType, ColumnTypes};

/// Header plus data body of a delimited file.
///
/// Row lengths are independent of each other and of the header; readers go
/// through [`field`] so that missing cells read as empty strings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    /// Column names, by position; names may repeat
    pub headers: Vec<String>,
    /// Data rows, in file order
    pub data: Vec<Row>,
}

impl Table {
    /// Builds a table from parsed rows. See [`build`].
    pub fn build(rows: Vec<Row>) -> Self {
        build(rows)
    }

    /// Returns true if the table has no header row.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Number of columns, as given by the header row.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Returns the cell at `row`/`col`, or `""` when either is out of range.
    pub fn get(&self, row: usize, col: usize) -> &str {
        self.data.get(row).map_or("", |cells| field(cells, col))
    }
}

/// Builds a [`Table`] from parsed rows.
///
/// The first row becomes the header; empty header names are replaced by
/// `"Column N"` with `N` the 1-based position. All further rows are the data
/// body, untouched. Empty input gives an empty table.
pub fn build(rows: Vec<Row>) -> Table {
    let mut rows = rows.into_iter();
    let Some(header) = rows.next() else {
        return Table::default();
    };
    let headers = header
        .into_iter()
        .enumerate()
        .map(|(index, name)| {
            if name.is_empty() {
                format!("Column {}", index + 1)
            } else {
                name
            }
        })
        .collect();
    Table {
        headers,
        data: rows.collect(),
    }
}

/// Reads field `col` of a row, treating missing fields as empty.
#[inline]
pub fn field(row: &[String], col: usize) -> &str {
    row.get(col).map_or("", String::as_str)
}
