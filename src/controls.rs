//! Control-surface models owned by the facet filters.
//!
//! These stand in for the server-rendered inputs. The page hands each filter
//! the controls it owns at construction time; the filter mutates them on user
//! gestures and reads them back when building a predicate. Controls whose
//! value no current item uses are hidden, never removed, so pre-existing
//! checked state survives a re-sync (back-navigation restore).

use std::fmt;

/// One checkbox control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox {
    pub value: String,
    pub label: String,
    pub checked: bool,
    pub visible: bool,
}

impl Checkbox {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            checked: false,
            visible: true,
        }
    }

    /// A checkbox restored as checked, e.g. from back-navigation.
    pub fn restored(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            checked: true,
            ..Self::new(value, label)
        }
    }
}

/// Per-instance observer list with run-to-completion delivery.
///
/// Handlers run after the owning filter has finished its own bookkeeping for
/// the change (counters, cascade toggles).
#[derive(Default)]
pub struct Subscribers {
    handlers: Vec<Box<dyn FnMut()>>,
}

impl Subscribers {
    pub fn subscribe(&mut self, handler: impl FnMut() + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub fn notify(&mut self) {
        for handler in &mut self.handlers {
            handler();
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
