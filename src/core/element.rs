//! Typed handles over captured DOM elements and deferred tasks.
//!
//! Managers never query the live document. Elements they observe are
//! captured once at start-up into [`Tracked`] values, each carrying an
//! [`ElementId`] that intersection callbacks are translated into.

use crate::core::error::DomError;

/// The DOM operations managers perform on a single element.
pub trait ElementHandle: Clone + 'static {
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError>;
    fn remove_attribute(&self, name: &str) -> Result<(), DomError>;

    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str) -> Result<(), DomError>;
    fn remove_class(&self, class: &str) -> Result<(), DomError>;

    /// Inline style property, if set.
    fn style(&self, property: &str) -> Option<String>;
    fn set_style(&self, property: &str, value: &str) -> Result<(), DomError>;

    /// Whether the element is still attached to the document.
    fn is_connected(&self) -> bool;

    fn inner_html(&self) -> String;
    fn set_inner_html(&self, html: &str);
    fn focus(&self) -> Result<(), DomError>;
}

/// Run a task after a delay.
///
/// No cancellation: a task, once deferred, always runs.
pub trait Timers: Clone + 'static {
    fn defer(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// Position of an element in the collection it was captured into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// A captured element plus its identity.
#[derive(Clone, Debug)]
pub struct Tracked<E> {
    pub id: ElementId,
    pub element: E,
}

/// Assign sequential ids to a captured collection, starting at `offset`.
pub fn track_all<E>(elements: impl IntoIterator<Item = E>, offset: usize) -> Vec<Tracked<E>> {
    elements
        .into_iter()
        .enumerate()
        .map(|(i, element)| Tracked {
            id: ElementId(offset + i),
            element,
        })
        .collect()
}

/// Intersection observer configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ObserverOptions {
    pub thresholds: Vec<f64>,
    /// CSS margin string, e.g. `"0px 0px -50px 0px"`.
    pub root_margin: String,
}

impl ObserverOptions {
    pub fn new(thresholds: &[f64], root_margin: impl Into<String>) -> Self {
        Self {
            thresholds: thresholds.to_vec(),
            root_margin: root_margin.into(),
        }
    }

    /// Shrink the observed area from the bottom by `px`.
    pub fn with_bottom_margin(thresholds: &[f64], px: f64) -> Self {
        Self::new(thresholds, format!("0px 0px -{}px 0px", px))
    }
}

/// One intersection observer entry, translated to a captured element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub id: ElementId,
    pub ratio: f64,
    pub is_intersecting: bool,
}

/// Look up a tracked element by id.
pub fn find<E>(items: &[Tracked<E>], id: ElementId) -> Option<&Tracked<E>> {
    items.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_all_assigns_offset_ids() {
        let tracked = track_all(["a", "b", "c"], 10);
        let ids: Vec<_> = tracked.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![ElementId(10), ElementId(11), ElementId(12)]);
        assert_eq!(find(&tracked, ElementId(11)).map(|t| t.element), Some("b"));
        assert!(find(&tracked, ElementId(0)).is_none());
    }

    #[test]
    fn test_bottom_margin_format() {
        let opts = ObserverOptions::with_bottom_margin(&[0.1], 80.0);
        assert_eq!(opts.root_margin, "0px 0px -80px 0px");
        assert_eq!(opts.thresholds, vec![0.1]);
    }
}
