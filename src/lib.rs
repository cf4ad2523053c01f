//! # Rusty CSV
//!
//! A pure data pipeline for exploring delimited text: parse CSV/TSV/PSV input,
//! infer column types, then filter, sort, paginate and re-export the result.
//!
//! ## Features
//!
//! - **Delimiter sniffing**: comma, semicolon, tab or pipe, chosen from the first line
//! - **RFC 4180 parsing**: quoted fields with embedded delimiters, quotes and line breaks
//! - **Type inference**: number, date or string per column, from a bounded sample
//! - **Filtering**: case-insensitive global search plus per-column substring filters
//! - **Sorting**: numeric, chronological or natural string order per detected type
//! - **Pagination**: page slices and compact page-button lists with ellipses
//! - **Export**: BOM-prefixed, CRLF-separated CSV that spreadsheet tools open as UTF-8
//!
//! ## Pipeline
//!
//! ```text
//! text ─ parse ─ build ─ detect (once per load)
//!                  │
//!                  └─ filter ─ sort ─┬─ page_slice / page_list
//!                                    └─ serialize
//! ```
//!
//! Every stage is a pure function over borrowed input. [`Explorer`] bundles them
//! for a loaded file, and [`ViewState`] is the caller-owned display state that
//! drives them.
//!
//! ```
//! use rusty_csv::{Explorer, ViewAction, ViewState};
//!
//! let explorer = Explorer::from_text("name,age\nAda,36\nLinus,9\n").unwrap();
//! let state = ViewState::default().apply(ViewAction::ToggleSort(1));
//! let view = explorer.view(&state);
//! assert_eq!(view.page_rows()[0][0], "Linus");
//! ```

pub mod delimited;
pub mod error;
pub mod explorer;
pub mod export;
pub mod helpers;
pub mod table;
pub mod view;

pub use delimited::{parse, Delimiter, ParsedText, Row};
pub use error::RustyCsvError;
pub use explorer::{Explorer, ExplorerError, Summary, View};
pub use export::{escape_field, serialize};
pub use table::{build, detect, ColumnType, ColumnTypes, Table};
pub use view::{
    filter, page_list, page_slice, sort, total_pages, Criteria, PageItem, SortDirection,
    SortOrder, ViewAction, ViewState,
};
