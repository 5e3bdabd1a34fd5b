//! Stateless rendering of the pagination strip.
//!
//! Given `(current_page, total_pages, visible_count, total_count)` this
//! produces the full control state: previous/next visibility, the ordered
//! page-number tokens with collapsed runs, and the "Showing X of Y" text.
//! Click handling is pure too; valid clicks become [`NavigationIntent`]s.

use itertools::Itertools;

/// One control in the page-number strip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageToken {
    Page { number: usize, current: bool },
    Ellipsis,
}

/// A navigation request raised by a click on the strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationIntent {
    Goto(usize),
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PaginationControls {
    /// The whole strip is hidden when there is at most one page.
    pub visible: bool,
    pub prev_visible: bool,
    pub next_visible: bool,
    pub tokens: Vec<PageToken>,
    pub showing: String,
}

impl PaginationControls {
    /// Page numbers in display order, ellipses omitted. Mostly for tests and
    /// text rendering.
    pub fn page_labels(&self) -> Vec<usize> {
        self.tokens
            .iter()
            .filter_map(|t| match t {
                PageToken::Page { number, .. } => Some(*number),
                PageToken::Ellipsis => None,
            })
            .collect()
    }
}

/// Render the strip state.
///
/// Collapsing rule: page 1 and `total_pages` always show; so do pages within
/// distance 1 of the current page; every other run of skipped pages becomes
/// one ellipsis. Two consecutive ellipses can never occur because an ellipsis
/// is only emitted between two shown pages.
pub fn render(
    current_page: usize,
    total_pages: usize,
    visible_count: usize,
    total_count: usize,
) -> PaginationControls {
    let shown = (1..=total_pages)
        .filter(|&page| page == 1 || page == total_pages || page.abs_diff(current_page) < 2);
    // Walk (previous shown, shown) pairs; 0 seeds the first pair.
    let mut tokens = Vec::new();
    for (prev, page) in std::iter::once(0).chain(shown).tuple_windows() {
        if prev != 0 && page - prev > 1 {
            tokens.push(PageToken::Ellipsis);
        }
        tokens.push(PageToken::Page {
            number: page,
            current: page == current_page,
        });
    }
    PaginationControls {
        visible: total_pages > 1,
        prev_visible: current_page > 1,
        next_visible: current_page < total_pages,
        tokens,
        showing: format!("Showing {visible_count} of {total_count}"),
    }
}

/// A click on a page number. Valid only for a distinct, in-range target.
pub fn click_page(target: usize, current_page: usize, total_pages: usize) -> Option<NavigationIntent> {
    if target == 0 || target > total_pages || target == current_page {
        return None;
    }
    Some(NavigationIntent::Goto(target))
}

/// A click on the previous link.
pub fn click_previous(current_page: usize) -> Option<NavigationIntent> {
    if current_page > 1 {
        Some(NavigationIntent::Goto(current_page - 1))
    } else {
        None
    }
}

/// A click on the next link.
pub fn click_next(current_page: usize, total_pages: usize) -> Option<NavigationIntent> {
    if current_page < total_pages {
        Some(NavigationIntent::Goto(current_page + 1))
    } else {
        None
    }
}
