//! Normalized item records.
//!
//! Every panel the server renders carries a set of `data-*` attributes that
//! describe the catalogue entry it displays. Those attributes are decoded
//! exactly once, at item-construction time, into a [`FacetData`] snapshot;
//! all downstream filtering reads the snapshot and never goes back to the
//! panel. The panel itself stays behind the [`Panel`] trait and is only ever
//! told whether it should be visible.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A renderable catalogue panel.
///
/// The engine never creates or destroys panels; it only reconciles their
/// visibility after a recompute.
pub trait Panel: Send + Sync {
    fn set_visible(&self, visible: bool);
}

/// Raw attribute set emitted by the server template for one panel.
///
/// Field names mirror the `data-*` contract bit-for-bit; the template and
/// this struct must change together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelAttributes {
    #[serde(rename = "data-id")]
    pub id: String,
    #[serde(rename = "data-apiname")]
    pub api_name: String,
    #[serde(rename = "data-apistatus")]
    pub api_status: String,
    #[serde(rename = "data-domain", default)]
    pub domain: String,
    #[serde(rename = "data-subdomain", default)]
    pub subdomain: String,
    /// Comma-separated list of HoD codes.
    #[serde(rename = "data-hods", default)]
    pub hods: String,
    #[serde(rename = "data-platform", default)]
    pub platform: String,
}

/// One panel's facet values after the typed extraction step.
///
/// Values are case-normalized here so that predicates can compare without
/// re-normalizing per item per recompute: statuses, platform codes and HoD
/// codes uppercase, domain and subdomain keys lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetData {
    pub id: String,
    pub name: String,
    pub status: String,
    pub domain: String,
    pub subdomain: String,
    pub hods: FxHashSet<String>,
    pub platform: String,
}

impl FacetData {
    pub fn from_attributes(attrs: &PanelAttributes) -> Self {
        if attrs.api_status.trim().is_empty() {
            tracing::warn!(
                target: "explore::model",
                id = %attrs.id,
                "panel has an empty data-apistatus attribute"
            );
        }
        let hods = attrs
            .hods
            .split(',')
            .map(|h| h.trim().to_uppercase())
            .filter(|h| !h.is_empty())
            .collect();
        Self {
            id: attrs.id.trim().to_string(),
            name: attrs.api_name.trim().to_string(),
            status: attrs.api_status.trim().to_uppercase(),
            domain: attrs.domain.trim().to_lowercase(),
            subdomain: attrs.subdomain.trim().to_lowercase(),
            hods,
            platform: attrs.platform.trim().to_uppercase(),
        }
    }
}

/// The in-memory model for one renderable panel.
///
/// Visibility is the AND of three independent "not hidden" reasons; the
/// filter model, the deep-search ordering and the paginator each own one
/// flag and never touch the others.
#[derive(Clone)]
pub struct ItemRecord {
    pub panel: Arc<dyn Panel>,
    pub data: FacetData,
    pub hidden_by_filters: bool,
    pub hidden_by_search: bool,
    pub hidden_by_pagination: bool,
    /// Externally provided ordering (deep-search rank). `None` sorts last.
    pub rank: Option<usize>,
    /// Position in the server-rendered order, used to restore it when a
    /// search ordering is cleared.
    pub dom_index: usize,
}

impl ItemRecord {
    pub fn new(panel: Arc<dyn Panel>, attrs: &PanelAttributes, dom_index: usize) -> Self {
        Self {
            panel,
            data: FacetData::from_attributes(attrs),
            hidden_by_filters: false,
            hidden_by_search: false,
            hidden_by_pagination: false,
            rank: None,
            dom_index,
        }
    }

    /// Should the panel be shown right now.
    pub fn visible(&self) -> bool {
        !self.hidden_by_filters && !self.hidden_by_search && !self.hidden_by_pagination
    }

    /// Is the item part of the current result set (pagination aside).
    pub fn include_in_results(&self) -> bool {
        !self.hidden_by_filters && !self.hidden_by_search
    }

    /// Push the combined visibility state to the panel.
    pub fn sync_panel(&self) {
        self.panel.set_visible(self.visible());
    }

    pub(crate) fn rank_key(&self) -> (usize, usize) {
        (self.rank.unwrap_or(usize::MAX), self.dom_index)
    }
}

impl fmt::Debug for ItemRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemRecord")
            .field("data", &self.data)
            .field("hidden_by_filters", &self.hidden_by_filters)
            .field("hidden_by_search", &self.hidden_by_search)
            .field("hidden_by_pagination", &self.hidden_by_pagination)
            .field("rank", &self.rank)
            .field("dom_index", &self.dom_index)
            .finish_non_exhaustive()
    }
}

/// Build the item list from the panels the page was handed, preserving the
/// server-rendered order.
pub fn build_items(panels: Vec<(Arc<dyn Panel>, PanelAttributes)>) -> Vec<ItemRecord> {
    panels
        .into_iter()
        .enumerate()
        .map(|(idx, (panel, attrs))| ItemRecord::new(panel, &attrs, idx))
        .collect()
}
