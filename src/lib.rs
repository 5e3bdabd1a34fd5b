//! Faceted filtering, deep-search ordering and pagination for a
//! server-rendered API catalogue page.
//!
//! The page hands this engine a list of panels (opaque renderable handles
//! plus their `data-*` attribute records) and the filter controls it owns;
//! the engine keeps a typed item model, composes the facet predicates, and
//! tells each panel whether it should be visible. Modules:
//!
//! - **[`model`]**: item records and the typed attribute-extraction step.
//! - **[`controls`]**: checkbox / text-input models and observer lists.
//! - **[`filters`]**: the five facet builders and the common facet contract.
//! - **[`pagination`]**: the page-window engine and the strip renderer.
//! - **[`results`]**: AND-composition of facets plus search-rank ordering.
//! - **[`explore`]**: the page controller wiring everything together.

pub mod controls;
pub mod error;
pub mod explore;
pub mod filters;
pub mod model;
pub mod pagination;
pub mod results;

pub use error::ExploreError;
pub use explore::{DeepSearchClient, ExploreFilters, ExplorerPage};
pub use model::{FacetData, ItemRecord, Panel, PanelAttributes};
pub use results::ResultsModel;
