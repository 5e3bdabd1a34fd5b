//! Domain/subdomain facet: a two-level hierarchy.
//!
//! Checking a domain checks and reveals all of its subdomain boxes;
//! unchecking does the inverse. A checked domain with no checked subdomains
//! matches every item of that domain; checked subdomains narrow it to exact
//! (domain, subdomain) pairs.

use crate::controls::{Checkbox, Subscribers};
use crate::filters::{FacetFilter, FacetPredicate, match_all};
use crate::model::ItemRecord;
use rustc_hash::FxHashSet;

#[derive(Debug)]
pub struct DomainSection {
    pub domain: Checkbox,
    pub subdomains: Vec<Checkbox>,
    pub expanded: bool,
}

pub struct DomainFilter {
    sections: Vec<DomainSection>,
    subscribers: Subscribers,
}

impl DomainFilter {
    /// Build from a `(domain, subdomains)` tree. Keys are compared
    /// case-insensitively by storing them lowercased, matching the
    /// normalization applied to item data.
    pub fn new<D, S>(tree: impl IntoIterator<Item = (D, Vec<S>)>) -> Self
    where
        D: Into<String>,
        S: Into<String>,
    {
        let sections = tree
            .into_iter()
            .map(|(domain, subdomains)| {
                let domain = domain.into().to_lowercase();
                DomainSection {
                    subdomains: subdomains
                        .into_iter()
                        .map(|s| {
                            let s = s.into().to_lowercase();
                            Checkbox::new(s.clone(), s)
                        })
                        .collect(),
                    domain: Checkbox::new(domain.clone(), domain),
                    expanded: false,
                }
            })
            .collect();
        Self {
            sections,
            subscribers: Subscribers::default(),
        }
    }

    fn section_mut(&mut self, domain: &str) -> Option<&mut DomainSection> {
        let domain = domain.to_lowercase();
        self.sections.iter_mut().find(|s| s.domain.value == domain)
    }

    /// Check or uncheck a domain. Cascades to every subdomain box and toggles
    /// the section's expansion, then notifies.
    pub fn set_domain_checked(&mut self, domain: &str, checked: bool) -> bool {
        let Some(section) = self.section_mut(domain) else {
            tracing::warn!(target: "explore::filters", %domain, "unknown domain box");
            return false;
        };
        if section.domain.checked == checked {
            return false;
        }
        section.domain.checked = checked;
        section.expanded = checked;
        for sub in &mut section.subdomains {
            sub.checked = checked;
        }
        self.subscribers.notify();
        true
    }

    /// Check or uncheck one subdomain box. Only meaningful while its parent
    /// domain is checked; the selection model ignores orphan subdomains.
    pub fn set_subdomain_checked(&mut self, domain: &str, subdomain: &str, checked: bool) -> bool {
        let subdomain = subdomain.to_lowercase();
        let Some(section) = self.section_mut(domain) else {
            tracing::warn!(target: "explore::filters", %domain, "unknown domain box");
            return false;
        };
        let Some(sub) = section
            .subdomains
            .iter_mut()
            .find(|cb| cb.value == subdomain)
        else {
            tracing::warn!(target: "explore::filters", %domain, %subdomain, "unknown subdomain box");
            return false;
        };
        if sub.checked == checked {
            return false;
        }
        sub.checked = checked;
        self.subscribers.notify();
        true
    }

    /// The selection model: checked domains mapped to their checked
    /// subdomains. An empty subdomain list means "all of this domain".
    pub fn selection(&self) -> Vec<(String, Vec<String>)> {
        self.sections
            .iter()
            .filter(|s| s.domain.checked)
            .map(|s| {
                (
                    s.domain.value.clone(),
                    s.subdomains
                        .iter()
                        .filter(|cb| cb.checked)
                        .map(|cb| cb.value.clone())
                        .collect(),
                )
            })
            .collect()
    }

    pub fn sections(&self) -> &[DomainSection] {
        &self.sections
    }
}

impl FacetFilter for DomainFilter {
    fn initialise(&mut self, items: &[ItemRecord]) {
        self.sync_with_items(items);
        // Sections restored with a checked domain reopen expanded.
        for section in &mut self.sections {
            if section.domain.checked {
                section.expanded = true;
            }
        }
    }

    fn sync_with_items(&mut self, items: &[ItemRecord]) {
        for section in &mut self.sections {
            section.domain.visible = items
                .iter()
                .any(|it| it.data.domain == section.domain.value);
            for sub in &mut section.subdomains {
                sub.visible = items.iter().any(|it| {
                    it.data.domain == section.domain.value && it.data.subdomain == sub.value
                });
            }
        }
    }

    fn on_change(&mut self, handler: Box<dyn FnMut()>) {
        self.subscribers.subscribe(handler);
    }

    fn clear(&mut self) {
        for section in &mut self.sections {
            section.domain.checked = false;
            section.expanded = false;
            for sub in &mut section.subdomains {
                sub.checked = false;
            }
        }
    }

    /// Checked domain boxes plus checked subdomain boxes.
    fn selected_count(&self) -> usize {
        self.sections
            .iter()
            .filter(|s| s.domain.checked)
            .map(|s| 1 + s.subdomains.iter().filter(|cb| cb.checked).count())
            .sum()
    }

    fn build_predicate(&self) -> FacetPredicate {
        let selection = self.selection();
        if selection.is_empty() {
            return match_all();
        }
        // Split into whole-domain matches and exact pair matches.
        let mut whole_domains: FxHashSet<String> = FxHashSet::default();
        let mut pairs: FxHashSet<(String, String)> = FxHashSet::default();
        for (domain, subdomains) in selection {
            if subdomains.is_empty() {
                whole_domains.insert(domain);
            } else {
                for sub in subdomains {
                    pairs.insert((domain.clone(), sub));
                }
            }
        }
        Box::new(move |data| {
            whole_domains.contains(&data.domain)
                || pairs.contains(&(data.domain.clone(), data.subdomain.clone()))
        })
    }
}
