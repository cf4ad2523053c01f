//! # View Module
//!
//! Pure derivations over a loaded table: filtering, sorting and pagination, plus
//! the caller-owned [`ViewState`] and its reducer. None of these functions mutate
//! their inputs; every result is a fresh sequence of row references.
use thiserror::Error;

pub mod criteria;
pub mod filter;
pub mod paginate;
pub mod sort;
pub mod state;

pub use criteria::Criteria;
pub use filter::filter;
pub use paginate::{page_list, page_slice, total_pages, PageItem};
pub use sort::{sort, SortDirection, SortOrder};
pub use state::{ViewAction, ViewState};

/// Errors raised while resolving user-supplied view settings.
#[derive(Error, Debug)]
pub enum ViewError {
    /// Column reference matches neither a header name nor a column number
    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    /// Sort direction name is not one of asc, desc or none
    #[error("Invalid sort direction '{0}'")]
    InvalidSortDirection(String),

    /// Column filter is not written as `COLUMN=VALUE`
    #[error("Invalid column filter '{0}', expected COLUMN=VALUE")]
    InvalidFilter(String),
}
