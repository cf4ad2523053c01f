use crate::error::{ResultMessage, RustyCsvError};
use crate::view::criteria::Criteria;
use crate::view::paginate::DEFAULT_PAGE_SIZE;
use crate::view::sort::{SortDirection, SortOrder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Display state of an exploration session, owned by the caller.
///
/// The core only reads it. Transitions go through [`ViewState::apply`], which
/// returns a new state and resets the page whenever the row set or its order
/// changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    /// Global search string
    pub search: String,
    /// Per-column filter strings, by column index
    pub column_filters: Vec<String>,
    /// Sort column and direction
    pub sort: SortOrder,
    /// Current page (1-based)
    pub page: usize,
    /// Rows per page; 0 shows all rows
    pub page_size: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            column_filters: Vec::new(),
            sort: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// State transitions of a [`ViewState`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewAction {
    /// Replace the global search string
    Search(String),
    /// Replace the filter string of one column
    FilterColumn { column: usize, value: String },
    /// Clear the search string and every column filter
    ClearFilters,
    /// Header click: a new column sorts ascending, the same column cycles asc → desc → none
    ToggleSort(usize),
    /// Set the sort order explicitly
    SetSort(SortOrder),
    /// Jump to a page (at least 1)
    GoToPage(usize),
    /// Change the page size; 0 shows all rows
    SetPageSize(usize),
    /// Back to the initial state
    Reset,
}

impl ViewState {
    /// Applies an action and returns the resulting state.
    /// Every action except `GoToPage` moves back to page 1.
    pub fn apply(&self, action: ViewAction) -> ViewState {
        let mut next = self.clone();
        match action {
            ViewAction::Search(search) => next.search = search,
            ViewAction::FilterColumn { column, value } => {
                if next.column_filters.len() <= column {
                    next.column_filters.resize(column + 1, String::new());
                }
                next.column_filters[column] = value;
            }
            ViewAction::ClearFilters => {
                next.search.clear();
                next.column_filters.clear();
            }
            ViewAction::ToggleSort(column) => {
                let direction = if self.sort.column == Some(column) {
                    self.sort.direction.next()
                } else {
                    SortDirection::Asc
                };
                next.sort = match direction {
                    SortDirection::None => SortOrder::default(),
                    _ => SortOrder::new(column, direction),
                };
            }
            ViewAction::SetSort(order) => next.sort = order,
            ViewAction::GoToPage(page) => {
                next.page = page.max(1);
                return next;
            }
            ViewAction::SetPageSize(page_size) => next.page_size = page_size,
            ViewAction::Reset => return ViewState::default(),
        }
        next.page = 1;
        next
    }

    /// Filter criteria described by this state.
    pub fn criteria(&self) -> Criteria {
        Criteria::new(&self.search, &self.column_filters)
    }

    /// Parses a state from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, RustyCsvError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the state as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, RustyCsvError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads a saved state from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RustyCsvError> {
        let path = path.as_ref();
        let prefix = format!("Load view state '{}' failed", path.display());
        let json = fs::read_to_string(path).map_err(RustyCsvError::from).with_prefix(&prefix)?;
        let state = Self::from_json(&json).with_prefix(&prefix)?;
        debug!(path = %path.display(), ?state, "loaded view state");
        Ok(state)
    }

    /// Saves the state to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RustyCsvError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json)
            .map_err(RustyCsvError::from)
            .with_prefix(&format!("Save view state '{}' failed", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page(page: usize) -> ViewState {
        ViewState::default().apply(ViewAction::GoToPage(page))
    }

    #[test]
    fn default_state() {
        let state = ViewState::default();
        assert_eq!(state.page, 1);
        assert_eq!(state.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(state.sort.active_column(), None);
    }

    #[test]
    fn filters_reset_page() {
        let state = on_page(4).apply(ViewAction::Search("ada".into()));
        assert_eq!(state.search, "ada");
        assert_eq!(state.page, 1);

        let state = on_page(4).apply(ViewAction::FilterColumn { column: 2, value: "x".into() });
        assert_eq!(state.column_filters, vec!["", "", "x"]);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn clear_filters() {
        let state = ViewState::default()
            .apply(ViewAction::Search("a".into()))
            .apply(ViewAction::FilterColumn { column: 0, value: "b".into() })
            .apply(ViewAction::ClearFilters);
        assert!(state.search.is_empty());
        assert!(state.column_filters.is_empty());
    }

    #[test]
    fn toggle_sort_cycles() {
        let state = on_page(3).apply(ViewAction::ToggleSort(1));
        assert_eq!(state.sort, SortOrder::new(1, SortDirection::Asc));
        assert_eq!(state.page, 1);

        let state = state.apply(ViewAction::ToggleSort(1));
        assert_eq!(state.sort, SortOrder::new(1, SortDirection::Desc));

        let state = state.apply(ViewAction::ToggleSort(1));
        assert_eq!(state.sort.active_column(), None);

        let state = state.apply(ViewAction::ToggleSort(1));
        assert_eq!(state.sort, SortOrder::new(1, SortDirection::Asc));

        let state = state.apply(ViewAction::ToggleSort(0));
        assert_eq!(state.sort, SortOrder::new(0, SortDirection::Asc));
    }

    #[test]
    fn go_to_page_keeps_everything_else() {
        let state = ViewState::default()
            .apply(ViewAction::Search("x".into()))
            .apply(ViewAction::GoToPage(0));
        assert_eq!(state.page, 1);
        assert_eq!(state.search, "x");
        assert_eq!(state.apply(ViewAction::GoToPage(5)).page, 5);
    }

    #[test]
    fn page_size_resets_page() {
        let state = on_page(7).apply(ViewAction::SetPageSize(0));
        assert_eq!(state.page_size, 0);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn apply_does_not_mutate_previous_state() {
        let before = on_page(2);
        let _ = before.apply(ViewAction::Reset);
        assert_eq!(before.page, 2);
    }

    #[test]
    fn json_round_trip_with_defaults() {
        let state = ViewState::default()
            .apply(ViewAction::Search("ada".into()))
            .apply(ViewAction::ToggleSort(2));
        let json = state.to_json().unwrap();
        assert_eq!(ViewState::from_json(&json).unwrap(), state);

        let partial = ViewState::from_json(r#"{"page_size": 50, "sort": {"column": 0, "direction": "desc"}}"#).unwrap();
        assert_eq!(partial.page_size, 50);
        assert_eq!(partial.page, 1);
        assert_eq!(partial.sort, SortOrder::new(0, SortDirection::Desc));
    }

    #[test]
    fn load_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.json");
        let state = on_page(3);
        state.save(&path).unwrap();
        assert_eq!(ViewState::load(&path).unwrap(), state);
        assert!(ViewState::load(dir.path().join("missing.json")).is_err());
    }
}
