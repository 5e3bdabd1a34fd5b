//! Page-window computation over an ordered item sequence.
//!
//! The engine is position-based: it knows how many items are in the current
//! sequence and which 1-indexed page is showing, and answers "is position N
//! inside the current window". Simple pages feed it their whole item slice
//! via [`Paginator::render`]; the explore controller feeds it only the
//! in-results subset and reconciles visibility itself (the documented
//! visibility-step override).

pub mod view;

use crate::error::ExploreError;
use crate::model::ItemRecord;
use std::ops::Range;

#[derive(Debug)]
pub struct Paginator {
    items_per_page: usize,
    current_page: usize,
    total_items: usize,
}

impl Paginator {
    pub fn new(items_per_page: usize) -> Result<Self, ExploreError> {
        if items_per_page == 0 {
            return Err(ExploreError::InvalidPageSize);
        }
        Ok(Self {
            items_per_page,
            current_page: 1,
            total_items: 0,
        })
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// `ceil(total_items / items_per_page)`; zero when the sequence is empty.
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.items_per_page)
    }

    /// The 0-based position range visible on the current page.
    pub fn window(&self) -> Range<usize> {
        if self.total_items == 0 {
            return 0..0;
        }
        let start = (self.current_page - 1) * self.items_per_page;
        start..(start + self.items_per_page).min(self.total_items)
    }

    pub fn in_window(&self, position: usize) -> bool {
        self.window().contains(&position)
    }

    /// Start a fresh render: reset to page 1 for a sequence of `total_items`.
    pub fn reset(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current_page = 1;
    }

    /// Render the whole slice as the page sequence, pushing window membership
    /// straight to each panel. This is the default visibility step; callers
    /// composing with other hidden flags reconcile themselves instead.
    pub fn render(&mut self, items: &mut [ItemRecord]) {
        self.reset(items.len());
        self.apply_window(items);
    }

    /// Move to an adjacent or explicit page. All three are no-ops outside
    /// `[1, total_pages]` or on the current page; they return whether the
    /// page changed. Callers re-apply the window after a change.
    pub fn goto(&mut self, page: usize) -> bool {
        if page == 0 || page > self.total_pages() || page == self.current_page {
            return false;
        }
        tracing::debug!(
            target: "explore::pagination",
            from = self.current_page,
            to = page,
            "page change"
        );
        self.current_page = page;
        true
    }

    pub fn next(&mut self) -> bool {
        self.goto(self.current_page + 1)
    }

    pub fn previous(&mut self) -> bool {
        // current_page is 1-indexed, so this guards the underflow too.
        self.goto(self.current_page.wrapping_sub(1))
    }

    /// Re-apply the current window to a whole-slice sequence.
    pub fn apply_window(&self, items: &mut [ItemRecord]) {
        for (position, item) in items.iter_mut().enumerate() {
            let in_window = self.in_window(position);
            item.hidden_by_pagination = !in_window;
            item.panel.set_visible(in_window);
        }
    }
}
