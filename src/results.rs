//! Filter / search composition model.
//!
//! Owns the item list built once from the page and the two non-pagination
//! hidden flags. Facet predicates AND together: an item stays in the result
//! set only if every facet predicate passes (facets with no selection are
//! vacuously true). A deep-search ranking overrides the presentation order
//! and hides items absent from the ranked id list.

use crate::filters::FacetPredicate;
use crate::model::{ItemRecord, Panel, PanelAttributes, build_items};
use rustc_hash::FxHashMap;
use std::sync::Arc;

pub struct ResultsModel {
    items: Vec<ItemRecord>,
}

impl ResultsModel {
    pub fn new(items: Vec<ItemRecord>) -> Self {
        Self { items }
    }

    /// Construct straight from the panels the server rendered, running the
    /// typed attribute-extraction step once per panel.
    pub fn from_panels(panels: Vec<(Arc<dyn Panel>, PanelAttributes)>) -> Self {
        Self::new(build_items(panels))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [ItemRecord] {
        &mut self.items
    }

    /// Recompute `hidden_by_filters` for every item as the AND of the given
    /// facet predicates. O(items × facets) per call.
    pub fn apply_predicates(&mut self, predicates: &[FacetPredicate]) {
        for item in &mut self.items {
            item.hidden_by_filters = !predicates.iter().all(|p| p(&item.data));
        }
        tracing::debug!(
            target: "explore::results",
            total = self.items.len(),
            in_results = self.result_count(),
            facets = predicates.len(),
            "filters recomputed"
        );
    }

    /// Apply a server-provided ranking: items present in `ranked_ids` take
    /// that order; absent items are hidden from results and pushed to the
    /// end, keeping their relative server order.
    pub fn apply_search_ranking(&mut self, ranked_ids: &[String]) {
        let rank_of: FxHashMap<&str, usize> = ranked_ids
            .iter()
            .enumerate()
            .map(|(rank, id)| (id.as_str(), rank))
            .collect();
        for item in &mut self.items {
            item.rank = rank_of.get(item.data.id.as_str()).copied();
            item.hidden_by_search = item.rank.is_none();
        }
        self.items.sort_by_key(ItemRecord::rank_key);
        tracing::debug!(
            target: "explore::results",
            ranked = ranked_ids.len(),
            matched = self.items.iter().filter(|it| it.rank.is_some()).count(),
            "search ranking applied"
        );
    }

    /// Drop any search ranking and restore the server-rendered order.
    pub fn clear_search_ranking(&mut self) {
        for item in &mut self.items {
            item.rank = None;
            item.hidden_by_search = false;
        }
        self.items.sort_by_key(|it| it.dom_index);
    }

    /// Items currently in the result set (pagination aside).
    pub fn result_count(&self) -> usize {
        self.items.iter().filter(|it| it.include_in_results()).count()
    }

    /// Items actually shown on the current page.
    pub fn visible_count(&self) -> usize {
        self.items.iter().filter(|it| it.visible()).count()
    }

    /// Push every item's combined visibility to its panel.
    pub fn sync_panels(&self) {
        for item in &self.items {
            item.sync_panel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FacetData, Panel};
    use std::sync::Arc;

    struct NullPanel;
    impl Panel for NullPanel {
        fn set_visible(&self, _visible: bool) {}
    }

    fn model(statuses: &[&str]) -> ResultsModel {
        let panels: Vec<(Arc<dyn Panel>, PanelAttributes)> = statuses
            .iter()
            .enumerate()
            .map(|(i, status)| {
                let panel: Arc<dyn Panel> = Arc::new(NullPanel);
                (
                    panel,
                    PanelAttributes {
                        id: format!("api-{i}"),
                        api_name: format!("API {i}"),
                        api_status: status.to_string(),
                        domain: if i % 2 == 0 { "customs" } else { "income" }.to_string(),
                        subdomain: String::new(),
                        hods: String::new(),
                        platform: String::new(),
                    },
                )
            })
            .collect();
        ResultsModel::from_panels(panels)
    }

    fn status_is(status: &'static str) -> FacetPredicate {
        Box::new(move |data: &FacetData| data.status == status)
    }

    fn domain_is(domain: &'static str) -> FacetPredicate {
        Box::new(move |data: &FacetData| data.domain == domain)
    }

    #[test]
    fn predicates_and_together() {
        let mut m = model(&["LIVE", "LIVE", "BETA", "LIVE"]);
        m.apply_predicates(&[status_is("LIVE"), domain_is("customs")]);
        // Items 0 and 2 are customs, but item 2 is BETA.
        let ids: Vec<&str> = m
            .items()
            .iter()
            .filter(|it| it.include_in_results())
            .map(|it| it.data.id.as_str())
            .collect();
        assert_eq!(ids, vec!["api-0"]);
    }

    #[test]
    fn composition_is_order_independent() {
        let mut forward = model(&["LIVE", "BETA", "LIVE", "ALPHA", "LIVE", "BETA"]);
        let mut reverse = model(&["LIVE", "BETA", "LIVE", "ALPHA", "LIVE", "BETA"]);
        forward.apply_predicates(&[status_is("LIVE"), domain_is("customs")]);
        reverse.apply_predicates(&[domain_is("customs"), status_is("LIVE")]);

        let in_results = |m: &ResultsModel| {
            m.items()
                .iter()
                .filter(|it| it.include_in_results())
                .map(|it| it.data.id.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(in_results(&forward), in_results(&reverse));
    }

    #[test]
    fn empty_predicate_list_hides_nothing() {
        let mut m = model(&["LIVE", "BETA"]);
        m.apply_predicates(&[]);
        assert_eq!(m.result_count(), 2);
    }

    #[test]
    fn search_ranking_reorders_and_hides_misses() {
        let mut m = model(&["LIVE", "LIVE", "LIVE", "LIVE"]);
        m.apply_search_ranking(&["api-2".to_string(), "api-0".to_string()]);

        let order: Vec<&str> = m.items().iter().map(|it| it.data.id.as_str()).collect();
        assert_eq!(order, vec!["api-2", "api-0", "api-1", "api-3"]);
        assert_eq!(m.result_count(), 2);
        assert!(m.items()[2].hidden_by_search);
        assert!(m.items()[3].hidden_by_search);
    }

    #[test]
    fn ranked_ids_for_unknown_items_are_ignored() {
        let mut m = model(&["LIVE"]);
        m.apply_search_ranking(&["ghost".to_string(), "api-0".to_string()]);
        assert_eq!(m.result_count(), 1);
        assert_eq!(m.items()[0].rank, Some(1));
    }

    #[test]
    fn clearing_the_ranking_restores_server_order() {
        let mut m = model(&["LIVE", "LIVE", "LIVE"]);
        m.apply_search_ranking(&["api-1".to_string()]);
        assert_eq!(m.result_count(), 1);

        m.clear_search_ranking();
        let order: Vec<&str> = m.items().iter().map(|it| it.data.id.as_str()).collect();
        assert_eq!(order, vec!["api-0", "api-1", "api-2"]);
        assert_eq!(m.result_count(), 3);
    }
}
