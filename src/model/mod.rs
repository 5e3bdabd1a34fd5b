//! Item record model: the typed replacement for reading panel attributes
//! off the rendered page on every recompute.

pub mod types;

pub use types::{FacetData, ItemRecord, Panel, PanelAttributes, build_items};
