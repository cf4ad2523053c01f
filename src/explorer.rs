//! # Explorer
//!
//! Session-level glue around the pure pipeline: loads text once (parse, build,
//! detect) and derives views for any [`ViewState`]. This is where an empty
//! table becomes an error; the pipeline itself never fails.
use crate::delimited::{parse, Delimiter, Row};
use crate::error::{ResultMessage, RustyCsvError};
use crate::export::{export_to_path, serialize};
use crate::helpers::file_reader::read_text;
use crate::table::{build, detect, ColumnType, ColumnTypes, Table};
use crate::view::{filter, page_list, page_slice, sort, total_pages, PageItem, ViewError, ViewState};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised when loading a table for exploration.
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// Parsing produced no header row
    #[error("File is empty or unreadable")]
    EmptyTable,
}

/// A loaded table with its detected delimiter and column types.
///
/// Replaced wholesale on every load; never updated in place.
#[derive(Clone, Debug)]
pub struct Explorer {
    delimiter: Delimiter,
    table: Table,
    types: ColumnTypes,
}

impl Explorer {
    /// Loads delimited text.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::EmptyTable`] when the text has no header row.
    pub fn from_text(text: &str) -> Result<Self, RustyCsvError> {
        let parsed = parse(text);
        let table = build(parsed.rows);
        if table.is_empty() {
            return Err(ExplorerError::EmptyTable.into());
        }
        let types = detect(&table.headers, &table.data);
        info!(
            delimiter = %parsed.delimiter,
            columns = table.column_count(),
            rows = table.row_count(),
            "loaded table"
        );
        Ok(Self {
            delimiter: parsed.delimiter,
            table,
            types,
        })
    }

    /// Reads, decodes and loads a delimited text file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RustyCsvError> {
        let path = path.as_ref();
        let text = read_text(path)?;
        Self::from_text(&text).with_prefix(&format!("Load '{}' failed", path.display()))
    }

    /// Delimiter detected in the source text.
    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    /// The loaded table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Detected column types.
    pub fn types(&self) -> &ColumnTypes {
        &self.types
    }

    /// Resolves a user-supplied column reference to a column index.
    ///
    /// Accepts an exact header name, a case-insensitive header name, or a
    /// 1-based column number, tried in that order.
    pub fn column_index(&self, reference: &str) -> Result<usize, RustyCsvError> {
        let headers = &self.table.headers;
        if let Some(index) = headers.iter().position(|name| name == reference) {
            return Ok(index);
        }
        if let Some(index) = headers
            .iter()
            .position(|name| name.to_lowercase() == reference.to_lowercase())
        {
            return Ok(index);
        }
        let number = Some(reference)
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit()))
            .and_then(|digits| digits.parse::<usize>().ok());
        match number {
            Some(number) if (1..=headers.len()).contains(&number) => Ok(number - 1),
            _ => Err(ViewError::UnknownColumn(reference.to_string()))?,
        }
    }

    /// Derives the filtered, sorted and paginated view for `state`.
    ///
    /// The page is clamped to the available pages, so a state left on a page
    /// that no longer exists shows the last one.
    pub fn view(&self, state: &ViewState) -> View<'_> {
        let filtered = filter(&self.table.data, &state.criteria());
        let rows = sort(&filtered, state.sort, &self.types);
        let total_pages = total_pages(rows.len(), state.page_size);
        let page = state.page.clamp(1, total_pages);
        debug!(
            matched = rows.len(),
            page,
            total_pages,
            page_size = state.page_size,
            "derived view"
        );
        View {
            headers: &self.table.headers,
            rows,
            page,
            page_size: state.page_size,
            total_pages,
        }
    }

    /// Summary of the loaded table.
    pub fn summary(&self) -> Summary {
        Summary {
            delimiter: self.delimiter,
            rows: self.table.row_count(),
            columns: self
                .table
                .headers
                .iter()
                .enumerate()
                .map(|(index, name)| (name.clone(), self.types.get(index)))
                .collect(),
        }
    }
}

/// Overview of a loaded table.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    /// Detected delimiter
    pub delimiter: Delimiter,
    /// Number of data rows
    pub rows: usize,
    /// Header names with their detected types
    pub columns: Vec<(String, ColumnType)>,
}

/// Rows matching a view state, in display order.
#[derive(Clone, Debug)]
pub struct View<'a> {
    headers: &'a [String],
    rows: Vec<&'a Row>,
    page: usize,
    page_size: usize,
    total_pages: usize,
}

impl<'a> View<'a> {
    /// Column headers.
    pub fn headers(&self) -> &'a [String] {
        self.headers
    }

    /// All matching rows, filtered and sorted.
    pub fn rows(&self) -> &[&'a Row] {
        &self.rows
    }

    /// Number of matching rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no row matches.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Effective current page (1-based).
    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of pages.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Rows on the current page.
    pub fn page_rows(&self) -> &[&'a Row] {
        page_slice(&self.rows, self.page, self.page_size)
    }

    /// Page-button list around the current page.
    pub fn page_list(&self) -> Vec<PageItem> {
        page_list(self.page, self.total_pages)
    }

    /// 1-based positions of the first and last row on the current page,
    /// `None` when the page is empty.
    pub fn range(&self) -> Option<(usize, usize)> {
        let shown = self.page_rows().len();
        if shown == 0 {
            return None;
        }
        let first = if self.page_size == 0 {
            1
        } else {
            (self.page - 1) * self.page_size + 1
        };
        Some((first, first + shown - 1))
    }

    /// Serializes every matching row (not only the current page) as CSV.
    pub fn export(&self) -> String {
        serialize(self.headers, &self.rows)
    }

    /// Writes every matching row to a CSV file.
    pub fn export_to(&self, path: impl AsRef<Path>) -> Result<(), RustyCsvError> {
        export_to_path(path, self.headers, &self.rows)
    }
}
