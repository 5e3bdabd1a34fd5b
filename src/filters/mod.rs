//! Facet filter builders.
//!
//! Each facet of the explore page owns its own control models and implements
//! the same five-operation contract:
//!
//! - **[`FacetFilter::initialise`]**: first sync against the rendered items,
//!   honoring any pre-checked state the page restored.
//! - **[`FacetFilter::sync_with_items`]**: hide controls for values no item
//!   uses. Controls are hidden, never removed, so listener bindings and
//!   restored checked state survive.
//! - **[`FacetFilter::on_change`]**: register a callback, invoked after the
//!   filter's own bookkeeping (selected counter, cascade toggles).
//! - **[`FacetFilter::clear`]**: uncheck everything, collapse expandable
//!   sections, reset the counter.
//! - **[`FacetFilter::build_predicate`]**: snapshot the current selection
//!   into a pure predicate. Not live-reactive; rebuild after every change.

pub mod domain;
pub mod hods;
pub mod name;
pub mod platform;
pub mod status;

pub use domain::DomainFilter;
pub use hods::HodsFilter;
pub use name::{MatchMode, NameFilter};
pub use platform::{PlatformFilter, PlatformOption};
pub use status::StatusFilter;

use crate::model::{FacetData, ItemRecord};

/// A pure predicate over an item's facet snapshot, capturing the selection
/// state at build time.
pub type FacetPredicate = Box<dyn Fn(&FacetData) -> bool + Send + Sync>;

/// The common contract every facet builder implements.
pub trait FacetFilter {
    fn initialise(&mut self, items: &[ItemRecord]);
    fn sync_with_items(&mut self, items: &[ItemRecord]);
    fn on_change(&mut self, handler: Box<dyn FnMut()>);
    fn clear(&mut self);
    /// Number of checked controls, as shown in the facet heading.
    fn selected_count(&self) -> usize;
    fn build_predicate(&self) -> FacetPredicate;
}

/// A predicate that matches everything, used whenever a facet has no
/// selection ("no selection means no narrowing").
pub(crate) fn match_all() -> FacetPredicate {
    Box::new(|_| true)
}
