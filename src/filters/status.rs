//! Status facet: a flat multi-select over the API lifecycle statuses.

use crate::controls::{Checkbox, Subscribers};
use crate::filters::{FacetFilter, FacetPredicate, match_all};
use crate::model::ItemRecord;
use rustc_hash::FxHashSet;

pub struct StatusFilter {
    boxes: Vec<Checkbox>,
    subscribers: Subscribers,
}

impl StatusFilter {
    /// Build from `(value, label)` pairs, e.g. `("LIVE", "Live")`.
    pub fn new<V, L>(options: impl IntoIterator<Item = (V, L)>) -> Self
    where
        V: Into<String>,
        L: Into<String>,
    {
        Self {
            boxes: options
                .into_iter()
                .map(|(value, label)| Checkbox::new(value.into().to_uppercase(), label))
                .collect(),
            subscribers: Subscribers::default(),
        }
    }

    /// Restore a checked box without firing change handlers, as the browser
    /// does for form state preserved across back-navigation.
    pub fn restore_checked(&mut self, value: &str) {
        let value = value.to_uppercase();
        if let Some(cb) = self.boxes.iter_mut().find(|cb| cb.value == value) {
            cb.checked = true;
        }
    }

    /// Toggle one status box. Returns false when the value is unknown or the
    /// state did not change; change handlers only fire on a real transition.
    pub fn set_checked(&mut self, value: &str, checked: bool) -> bool {
        let value = value.to_uppercase();
        let Some(cb) = self.boxes.iter_mut().find(|cb| cb.value == value) else {
            tracing::warn!(target: "explore::filters", status = %value, "unknown status box");
            return false;
        };
        if cb.checked == checked {
            return false;
        }
        cb.checked = checked;
        self.subscribers.notify();
        true
    }

    pub fn checked_values(&self) -> FxHashSet<String> {
        self.boxes
            .iter()
            .filter(|cb| cb.checked)
            .map(|cb| cb.value.clone())
            .collect()
    }

    pub fn boxes(&self) -> &[Checkbox] {
        &self.boxes
    }
}

impl FacetFilter for StatusFilter {
    fn initialise(&mut self, items: &[ItemRecord]) {
        self.sync_with_items(items);
    }

    fn sync_with_items(&mut self, items: &[ItemRecord]) {
        for cb in &mut self.boxes {
            cb.visible = items.iter().any(|it| it.data.status == cb.value);
        }
    }

    fn on_change(&mut self, handler: Box<dyn FnMut()>) {
        self.subscribers.subscribe(handler);
    }

    fn clear(&mut self) {
        for cb in &mut self.boxes {
            cb.checked = false;
        }
    }

    fn selected_count(&self) -> usize {
        self.boxes.iter().filter(|cb| cb.checked).count()
    }

    fn build_predicate(&self) -> FacetPredicate {
        let selected = self.checked_values();
        if selected.is_empty() {
            return match_all();
        }
        Box::new(move |data| selected.contains(&data.status))
    }
}
