//! HoDs facet: multi-select over head-of-duty system codes.
//!
//! Unlike status, an item carries a *set* of HoD codes (`data-hods` is
//! comma-separated), so the predicate is an any-intersection test.

use crate::controls::{Checkbox, Subscribers};
use crate::filters::{FacetFilter, FacetPredicate, match_all};
use crate::model::ItemRecord;
use rustc_hash::FxHashSet;

pub struct HodsFilter {
    boxes: Vec<Checkbox>,
    subscribers: Subscribers,
}

impl HodsFilter {
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

    pub fn restore_checked(&mut self, code: &str) {
        let code = code.to_uppercase();
        if let Some(cb) = self.boxes.iter_mut().find(|cb| cb.value == code) {
            cb.checked = true;
        }
    }

    pub fn set_checked(&mut self, code: &str, checked: bool) -> bool {
        let code = code.to_uppercase();
        let Some(cb) = self.boxes.iter_mut().find(|cb| cb.value == code) else {
            tracing::warn!(target: "explore::filters", hod = %code, "unknown hod box");
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

impl FacetFilter for HodsFilter {
    fn initialise(&mut self, items: &[ItemRecord]) {
        self.sync_with_items(items);
    }

    fn sync_with_items(&mut self, items: &[ItemRecord]) {
        for cb in &mut self.boxes {
            cb.visible = items.iter().any(|it| it.data.hods.contains(&cb.value));
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
        Box::new(move |data| data.hods.iter().any(|hod| selected.contains(hod)))
    }
}
