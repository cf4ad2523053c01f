//! Page slicing and compact page-button lists.
//!
//! Pages are 1-based. A page size of 0 means "show everything on one page".

use std::fmt::Display;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Page sizes offered to users; 0 shows all rows.
pub const PAGE_SIZES: [usize; 4] = [25, 50, 100, 0];

/// Up to this many pages the button list shows every page without ellipses.
pub const MAX_INLINE_PAGES: usize = 7;

/// Entry of a page-button list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PageItem {
    /// Button for a 1-based page number
    Page(usize),
    /// Placeholder for an elided run of pages
    Ellipsis,
}

impl Display for PageItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageItem::Page(page) => write!(f, "{}", page),
            PageItem::Ellipsis => write!(f, "…"),
        }
    }
}

/// Returns the rows of 1-based `page`.
///
/// `page_size == 0` returns all rows. Pages past the end, and page 0, are empty.
pub fn page_slice<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    if page_size == 0 {
        return rows;
    }
    if page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size).min(rows.len());
    let end = page.saturating_mul(page_size).min(rows.len());
    &rows[start..end]
}

/// Number of pages needed for `count` rows; always at least 1.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        1
    } else {
        count.div_ceil(page_size).max(1)
    }
}

/// Builds a compact page-button list around `current`.
///
/// With at most [`MAX_INLINE_PAGES`] pages every page is listed. Otherwise the
/// first and last pages are always present, the neighbours of `current` are
/// shown, and the gaps between them collapse into [`PageItem::Ellipsis`].
pub fn page_list(current: usize, total: usize) -> Vec<PageItem> {
    if total <= MAX_INLINE_PAGES {
        return (1..=total).map(PageItem::Page).collect();
    }
    let mut items = vec![PageItem::Page(1)];
    if current > 3 {
        push_ellipsis(&mut items);
    }
    let lower = current.saturating_sub(1).max(2);
    let upper = (current + 1).min(total - 1);
    items.extend((lower..=upper).map(PageItem::Page));
    if current + 2 < total {
        push_ellipsis(&mut items);
    }
    items.push(PageItem::Page(total));
    items
}

/// Appends an ellipsis unless the list already ends with one.
fn push_ellipsis(items: &mut Vec<PageItem>) {
    if items.last() != Some(&PageItem::Ellipsis) {
        items.push(PageItem::Ellipsis);
    }
}
