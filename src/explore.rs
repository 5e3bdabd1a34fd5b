//! The explore-the-catalogue page controller.
//!
//! Wires the five facet filters, the results model, the paginator and the
//! pagination view into one state machine. Every user gesture comes in
//! through a typed method; after any facet change the controller rebuilds
//! the predicates, recomputes the result set, resets to page 1 and
//! reconciles panel visibility. Pagination-only gestures re-window without
//! touching the filters.

use crate::error::ExploreError;
use crate::filters::{
    DomainFilter, FacetFilter, FacetPredicate, HodsFilter, NameFilter, PlatformFilter,
    StatusFilter,
};
use crate::pagination::view::{self, NavigationIntent, PaginationControls};
use crate::pagination::Paginator;
use crate::results::ResultsModel;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Collaborator answering deep-search requests with a ranked id list.
///
/// Transport and endpoint shape (`GET apis/deep-search/{term}`) belong to the
/// caller; the engine only consumes the decoded ranking.
pub trait DeepSearchClient {
    fn search(&self, term: &str) -> Result<Vec<String>, ExploreError>;
}

/// The facet filters the page owns, constructed by the caller with the
/// control sets the server rendered.
pub struct ExploreFilters {
    pub status: StatusFilter,
    pub domain: DomainFilter,
    pub hods: HodsFilter,
    pub platform: PlatformFilter,
    pub name: NameFilter,
}

pub struct ExplorerPage {
    filters: ExploreFilters,
    model: ResultsModel,
    paginator: Paginator,
    controls: PaginationControls,
    /// Set by the facets' change handlers; checked after each gesture.
    filters_changed: Arc<AtomicBool>,
    /// Sequence number of the most recent deep-search request. Responses for
    /// any earlier sequence are dropped instead of racing.
    search_seq: u64,
    search_active: bool,
    search_error: Option<String>,
}

impl ExplorerPage {
    /// Build the page and run the initial render: initialise every facet
    /// against the item list, compute the unfiltered result set and show
    /// page 1.
    pub fn new(
        mut filters: ExploreFilters,
        model: ResultsModel,
        items_per_page: usize,
    ) -> Result<Self, ExploreError> {
        let paginator = Paginator::new(items_per_page)?;
        let filters_changed = Arc::new(AtomicBool::new(false));

        for facet in [
            &mut filters.status as &mut dyn FacetFilter,
            &mut filters.domain,
            &mut filters.hods,
            &mut filters.platform,
            &mut filters.name,
        ] {
            facet.initialise(model.items());
            let flag = Arc::clone(&filters_changed);
            facet.on_change(Box::new(move || flag.store(true, Ordering::Relaxed)));
        }

        let mut page = Self {
            filters,
            model,
            paginator,
            controls: PaginationControls::default(),
            filters_changed,
            search_seq: 0,
            search_active: false,
            search_error: None,
        };
        page.recompute();
        Ok(page)
    }

    // ---------------------------------------------------------------------
    // Facet gestures
    // ---------------------------------------------------------------------

    pub fn set_status_checked(&mut self, value: &str, checked: bool) {
        self.filters.status.set_checked(value, checked);
        self.after_gesture();
    }

    pub fn set_domain_checked(&mut self, domain: &str, checked: bool) {
        self.filters.domain.set_domain_checked(domain, checked);
        self.after_gesture();
    }

    pub fn set_subdomain_checked(&mut self, domain: &str, subdomain: &str, checked: bool) {
        self.filters
            .domain
            .set_subdomain_checked(domain, subdomain, checked);
        self.after_gesture();
    }

    pub fn set_hod_checked(&mut self, code: &str, checked: bool) {
        self.filters.hods.set_checked(code, checked);
        self.after_gesture();
    }

    pub fn set_platform_checked(&mut self, code: &str, checked: bool) {
        self.filters.platform.set_platform_checked(code, checked);
        self.after_gesture();
    }

    pub fn set_self_serve_checked(&mut self, checked: bool) {
        self.filters.platform.set_self_serve_checked(checked);
        self.after_gesture();
    }

    pub fn set_non_self_serve_checked(&mut self, checked: bool) {
        self.filters.platform.set_non_self_serve_checked(checked);
        self.after_gesture();
    }

    pub fn set_name_query(&mut self, query: &str) {
        self.filters.name.set_query(query);
        self.after_gesture();
    }

    /// Clear every facet and the name filter, then recompute from scratch.
    /// An active search ordering is left in place.
    pub fn reset_filters(&mut self) {
        self.filters.status.clear();
        self.filters.domain.clear();
        self.filters.hods.clear();
        self.filters.platform.clear();
        self.filters.name.clear();
        self.recompute();
    }

    // ---------------------------------------------------------------------
    // Pagination gestures
    // ---------------------------------------------------------------------

    pub fn go_to_page(&mut self, page: usize) {
        if self.paginator.goto(page) {
            self.rewindow();
        }
    }

    pub fn next_page(&mut self) {
        if self.paginator.next() {
            self.rewindow();
        }
    }

    pub fn previous_page(&mut self) {
        if self.paginator.previous() {
            self.rewindow();
        }
    }

    /// Apply a navigation intent raised by the pagination strip.
    pub fn navigate(&mut self, intent: NavigationIntent) {
        match intent {
            NavigationIntent::Goto(page) => self.go_to_page(page),
        }
    }

    // ---------------------------------------------------------------------
    // Deep search
    // ---------------------------------------------------------------------

    /// Issue a deep-search request and apply its response. The two-step
    /// `begin_search` / `apply_search_response` pair is available for callers
    /// whose responses arrive asynchronously.
    pub fn run_search(&mut self, client: &dyn DeepSearchClient, term: &str) {
        let seq = self.begin_search();
        let response = client.search(term);
        self.apply_search_response(seq, response);
    }

    /// Register a new in-flight search and return its sequence number.
    pub fn begin_search(&mut self) -> u64 {
        self.search_seq += 1;
        self.search_seq
    }

    /// Apply a search response. Responses for any sequence other than the
    /// latest are stale and dropped; returns whether the response was used.
    pub fn apply_search_response(
        &mut self,
        seq: u64,
        response: Result<Vec<String>, ExploreError>,
    ) -> bool {
        if seq != self.search_seq {
            tracing::debug!(
                target: "explore::search",
                stale = seq,
                latest = self.search_seq,
                "dropping stale deep-search response"
            );
            return false;
        }
        match response {
            Ok(ranked_ids) => {
                self.search_error = None;
                self.search_active = true;
                self.model.apply_search_ranking(&ranked_ids);
                // Search is a coarser override of facet browsing: facets are
                // cleared and the result set recomputed over the new order.
                self.filters.status.clear();
                self.filters.domain.clear();
                self.filters.hods.clear();
                self.filters.platform.clear();
                self.filters.name.clear();
                self.recompute();
                true
            }
            Err(err) => {
                tracing::warn!(target: "explore::search", error = %err, "deep search failed");
                self.search_error = Some(err.to_string());
                true
            }
        }
    }

    /// Drop the search ordering and go back to browsing the full catalogue.
    pub fn clear_search(&mut self) {
        self.search_active = false;
        self.search_error = None;
        self.model.clear_search_ranking();
        self.recompute();
    }

    // ---------------------------------------------------------------------
    // Read side
    // ---------------------------------------------------------------------

    pub fn result_count(&self) -> usize {
        self.model.result_count()
    }

    pub fn visible_count(&self) -> usize {
        self.model.visible_count()
    }

    /// Drives the "no results" panel.
    pub fn no_results(&self) -> bool {
        self.model.result_count() == 0
    }

    pub fn pagination_controls(&self) -> &PaginationControls {
        &self.controls
    }

    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages()
    }

    pub fn search_active(&self) -> bool {
        self.search_active
    }

    pub fn search_error(&self) -> Option<&str> {
        self.search_error.as_deref()
    }

    pub fn filters(&self) -> &ExploreFilters {
        &self.filters
    }

    pub fn items(&self) -> &[crate::model::ItemRecord] {
        self.model.items()
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn after_gesture(&mut self) {
        if self.filters_changed.swap(false, Ordering::Relaxed) {
            self.recompute();
        }
    }

    fn build_predicates(&self) -> Vec<FacetPredicate> {
        vec![
            self.filters.status.build_predicate(),
            self.filters.domain.build_predicate(),
            self.filters.hods.build_predicate(),
            self.filters.platform.build_predicate(),
            self.filters.name.build_predicate(),
        ]
    }

    /// Full recompute: rebuild predicates, refilter, reset to page 1 and
    /// reconcile.
    fn recompute(&mut self) {
        let predicates = self.build_predicates();
        self.model.apply_predicates(&predicates);
        self.paginator.reset(self.model.result_count());
        self.reconcile();
    }

    /// Re-apply the page window without touching filter state.
    fn rewindow(&mut self) {
        self.reconcile();
    }

    /// Assign window membership across the in-results sequence, push combined
    /// visibility to every panel and refresh the strip state. This is the
    /// paginator's visibility-step override: excluded items keep
    /// `hidden_by_pagination = false` because they are not part of the page
    /// sequence at all.
    fn reconcile(&mut self) {
        let mut position = 0usize;
        for item in self.model.items_mut() {
            if item.include_in_results() {
                item.hidden_by_pagination = !self.paginator.in_window(position);
                position += 1;
            } else {
                item.hidden_by_pagination = false;
            }
        }
        self.model.sync_panels();
        self.controls = view::render(
            self.paginator.current_page(),
            self.paginator.total_pages(),
            self.model.visible_count(),
            self.model.result_count(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{MatchMode, PlatformOption};
    use crate::model::{Panel, PanelAttributes};
    use std::sync::Arc;

    struct NullPanel;
    impl Panel for NullPanel {
        fn set_visible(&self, _visible: bool) {}
    }

    fn fixture_page(statuses: &[&str]) -> ExplorerPage {
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
                        domain: "customs".into(),
                        subdomain: "declarations".into(),
                        hods: "ETMP".into(),
                        platform: "API_PLATFORM".into(),
                    },
                )
            })
            .collect();

        let filters = ExploreFilters {
            status: StatusFilter::new([("ALPHA", "Alpha"), ("BETA", "Beta"), ("LIVE", "Live")]),
            domain: DomainFilter::new([("customs", vec!["declarations"])]),
            hods: HodsFilter::new([("ETMP", "ETMP")]),
            platform: PlatformFilter::new([
                PlatformOption::new("HIP", "HIP", true),
                PlatformOption::new("API_PLATFORM", "API Platform", false),
            ]),
            name: NameFilter::new(MatchMode::Substring),
        };
        ExplorerPage::new(filters, ResultsModel::from_panels(panels), 2).unwrap()
    }

    #[test]
    fn facet_change_recomputes_and_resets_to_page_one() {
        let mut page = fixture_page(&["LIVE", "BETA", "LIVE", "LIVE", "LIVE"]);
        page.go_to_page(2);
        assert_eq!(page.current_page(), 2);

        page.set_status_checked("LIVE", true);
        assert_eq!(page.current_page(), 1, "filter changes reset pagination");
        assert_eq!(page.result_count(), 4);
        assert_eq!(page.visible_count(), 2, "page size is two");
    }

    #[test]
    fn pagination_gestures_do_not_touch_filters() {
        let mut page = fixture_page(&["LIVE", "BETA", "LIVE", "LIVE"]);
        page.set_status_checked("LIVE", true);
        assert_eq!(page.result_count(), 3);

        page.next_page();
        assert_eq!(page.current_page(), 2);
        assert_eq!(page.result_count(), 3, "result set unchanged");
        assert_eq!(page.visible_count(), 1, "final page remainder");
    }

    #[test]
    fn stale_search_responses_are_dropped() {
        let mut page = fixture_page(&["LIVE", "LIVE", "LIVE"]);
        let first = page.begin_search();
        let second = page.begin_search();

        assert!(!page.apply_search_response(first, Ok(vec!["api-0".to_string()])));
        assert_eq!(page.result_count(), 3, "stale response ignored");

        assert!(page.apply_search_response(second, Ok(vec!["api-2".to_string()])));
        assert_eq!(page.result_count(), 1);
        assert!(page.search_active());
    }

    #[test]
    fn search_failure_surfaces_as_state_not_panic() {
        let mut page = fixture_page(&["LIVE"]);
        let seq = page.begin_search();
        page.apply_search_response(seq, Err(ExploreError::DeepSearch("boom".into())));
        assert_eq!(page.search_error(), Some("deep search failed: boom"));
        assert!(!page.search_active());
        assert_eq!(page.result_count(), 1, "results untouched on failure");
    }

    #[test]
    fn applying_a_search_clears_facet_selections() {
        let mut page = fixture_page(&["LIVE", "BETA", "LIVE"]);
        page.set_status_checked("BETA", true);
        assert_eq!(page.result_count(), 1);

        let seq = page.begin_search();
        page.apply_search_response(seq, Ok(vec!["api-0".to_string(), "api-2".to_string()]));
        assert_eq!(page.filters().status.selected_count(), 0);
        assert_eq!(page.result_count(), 2);
    }

    #[test]
    fn clearing_the_search_restores_browsing() {
        let mut page = fixture_page(&["LIVE", "BETA"]);
        let seq = page.begin_search();
        page.apply_search_response(seq, Ok(vec!["api-1".to_string()]));
        assert_eq!(page.result_count(), 1);

        page.clear_search();
        assert!(!page.search_active());
        assert_eq!(page.result_count(), 2);
        let order: Vec<&str> = page.items().iter().map(|it| it.data.id.as_str()).collect();
        assert_eq!(order, vec!["api-0", "api-1"]);
    }

    #[test]
    fn reset_filters_restores_the_unfiltered_view() {
        let mut page = fixture_page(&["LIVE", "BETA", "ALPHA", "LIVE"]);
        page.set_status_checked("BETA", true);
        page.set_name_query("API 1");
        assert_eq!(page.result_count(), 1);

        page.reset_filters();
        assert_eq!(page.result_count(), 4);
        assert_eq!(page.filters().status.selected_count(), 0);
        assert_eq!(page.filters().name.selected_count(), 0);
    }

    #[test]
    fn no_results_flag_tracks_the_result_count() {
        let mut page = fixture_page(&["LIVE", "LIVE"]);
        assert!(!page.no_results());
        page.set_status_checked("ALPHA", true);
        assert!(page.no_results());
        assert!(!page.pagination_controls().visible);
    }
}
