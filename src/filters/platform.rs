//! Platform facet: individual platform boxes plus two top-level toggles.
//!
//! The self-serve toggle matches any item whose platform is flagged
//! self-serve. The non-self-serve toggle with *zero* individual boxes checked
//! matches every non-self-serve platform; individual boxes narrow it. That
//! "default to all" policy is deliberate UX behavior and must not be
//! simplified to empty-selection-matches-nothing.

use crate::controls::{Checkbox, Subscribers};
use crate::filters::{FacetFilter, FacetPredicate, match_all};
use crate::model::ItemRecord;
use rustc_hash::FxHashSet;

/// One platform known to the page, as rendered into the filter section.
#[derive(Debug, Clone)]
pub struct PlatformOption {
    pub code: String,
    pub label: String,
    pub self_serve: bool,
}

impl PlatformOption {
    pub fn new(code: impl Into<String>, label: impl Into<String>, self_serve: bool) -> Self {
        Self {
            code: code.into().to_uppercase(),
            label: label.into(),
            self_serve,
        }
    }
}

pub struct PlatformFilter {
    self_serve_toggle: Checkbox,
    non_self_serve_toggle: Checkbox,
    /// Individual boxes exist only for non-self-serve platforms; the
    /// self-serve side is a single toggle.
    boxes: Vec<Checkbox>,
    self_serve_codes: FxHashSet<String>,
    expanded: bool,
    subscribers: Subscribers,
}

impl PlatformFilter {
    pub fn new(options: impl IntoIterator<Item = PlatformOption>) -> Self {
        let mut boxes = Vec::new();
        let mut self_serve_codes = FxHashSet::default();
        for option in options {
            if option.self_serve {
                self_serve_codes.insert(option.code);
            } else {
                boxes.push(Checkbox::new(option.code, option.label));
            }
        }
        Self {
            self_serve_toggle: Checkbox::new("SELF_SERVE", "Platforms you can self-serve from"),
            non_self_serve_toggle: Checkbox::new("NON_SELF_SERVE", "Other platforms"),
            boxes,
            self_serve_codes,
            expanded: false,
            subscribers: Subscribers::default(),
        }
    }

    pub fn set_self_serve_checked(&mut self, checked: bool) -> bool {
        if self.self_serve_toggle.checked == checked {
            return false;
        }
        self.self_serve_toggle.checked = checked;
        self.subscribers.notify();
        true
    }

    /// Toggling the non-self-serve section also expands or collapses it.
    pub fn set_non_self_serve_checked(&mut self, checked: bool) -> bool {
        if self.non_self_serve_toggle.checked == checked {
            return false;
        }
        self.non_self_serve_toggle.checked = checked;
        self.expanded = checked;
        self.subscribers.notify();
        true
    }

    pub fn set_platform_checked(&mut self, code: &str, checked: bool) -> bool {
        let code = code.to_uppercase();
        let Some(cb) = self.boxes.iter_mut().find(|cb| cb.value == code) else {
            tracing::warn!(target: "explore::filters", platform = %code, "unknown platform box");
            return false;
        };
        if cb.checked == checked {
            return false;
        }
        cb.checked = checked;
        self.subscribers.notify();
        true
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn boxes(&self) -> &[Checkbox] {
        &self.boxes
    }

    fn checked_codes(&self) -> FxHashSet<String> {
        self.boxes
            .iter()
            .filter(|cb| cb.checked)
            .map(|cb| cb.value.clone())
            .collect()
    }
}

impl FacetFilter for PlatformFilter {
    fn initialise(&mut self, items: &[ItemRecord]) {
        self.sync_with_items(items);
        if self.non_self_serve_toggle.checked {
            self.expanded = true;
        }
    }

    fn sync_with_items(&mut self, items: &[ItemRecord]) {
        for cb in &mut self.boxes {
            cb.visible = items.iter().any(|it| it.data.platform == cb.value);
        }
        self.self_serve_toggle.visible = items
            .iter()
            .any(|it| self.self_serve_codes.contains(&it.data.platform));
    }

    fn on_change(&mut self, handler: Box<dyn FnMut()>) {
        self.subscribers.subscribe(handler);
    }

    fn clear(&mut self) {
        self.self_serve_toggle.checked = false;
        self.non_self_serve_toggle.checked = false;
        self.expanded = false;
        for cb in &mut self.boxes {
            cb.checked = false;
        }
    }

    fn selected_count(&self) -> usize {
        let toggles = usize::from(self.self_serve_toggle.checked)
            + usize::from(self.non_self_serve_toggle.checked);
        toggles + self.boxes.iter().filter(|cb| cb.checked).count()
    }

    fn build_predicate(&self) -> FacetPredicate {
        if self.selected_count() == 0 {
            return match_all();
        }
        let self_serve_on = self.self_serve_toggle.checked;
        let non_self_serve_on = self.non_self_serve_toggle.checked;
        let checked = self.checked_codes();
        let self_serve_codes = self.self_serve_codes.clone();
        Box::new(move |data| {
            if self_serve_on && self_serve_codes.contains(&data.platform) {
                return true;
            }
            if non_self_serve_on
                && checked.is_empty()
                && !self_serve_codes.contains(&data.platform)
            {
                // Section opened but not narrowed: every non-self-serve
                // platform matches.
                return true;
            }
            checked.contains(&data.platform)
        })
    }
}
