//! IntersectionObserver wiring.
//!
//! Entries are translated into [`Intersection`] values keyed by the
//! [`ElementId`] each element was captured with, so managers never see
//! raw observer entries.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::dom::DomElement;
use crate::core::element::{ElementId, Intersection, ObserverOptions, Tracked};
use crate::core::error::DomError;

/// A live observer and the elements it currently watches.
pub struct Observer {
    inner: IntersectionObserver,
    known: Rc<RefCell<Vec<Tracked<DomElement>>>>,
}

impl Observer {
    /// Start watching `targets`.
    pub fn observe(&self, targets: &[Tracked<DomElement>]) {
        for target in targets {
            self.inner.observe(target.element.as_element());
        }
        self.known.borrow_mut().extend(targets.iter().cloned());
    }

    /// Stop watching `targets` and release them.
    pub fn unobserve(&self, targets: &[Tracked<DomElement>]) {
        if targets.is_empty() {
            return;
        }
        for target in targets {
            self.inner.unobserve(target.element.as_element());
        }
        self.known
            .borrow_mut()
            .retain(|known| !targets.iter().any(|t| t.id == known.id));
    }
}

/// Observe `targets`, delivering each batch of entries to `on_entries`.
///
/// The callback is leaked and lives for the rest of the page, so create one
/// observer per kind of element and add later targets with
/// [`Observer::observe`].
pub fn observe<F>(
    options: &ObserverOptions,
    targets: &[Tracked<DomElement>],
    mut on_entries: F,
) -> Result<Observer, DomError>
where
    F: FnMut(Vec<Intersection>) + 'static,
{
    let known: Rc<RefCell<Vec<Tracked<DomElement>>>> = Rc::default();

    let lookup = Rc::clone(&known);
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, _observer: IntersectionObserver| {
            let batch: Vec<Intersection> = {
                let known = lookup.borrow();
                entries
                    .iter()
                    .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                    .filter_map(|entry| translate(&known, &entry))
                    .collect()
            };
            if !batch.is_empty() {
                on_entries(batch);
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_root_margin(&options.root_margin);
    let thresholds: Array = options
        .thresholds
        .iter()
        .map(|t| wasm_bindgen::JsValue::from_f64(*t))
        .collect();
    init.set_threshold(&thresholds);

    let inner = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
        .map_err(|e| DomError::failed("IntersectionObserver", e))?;
    callback.forget();

    let observer = Observer { inner, known };
    observer.observe(targets);
    tracing::debug!(
        targets = targets.len(),
        margin = %options.root_margin,
        "observer attached"
    );
    Ok(observer)
}

fn translate(
    known: &[Tracked<DomElement>],
    entry: &IntersectionObserverEntry,
) -> Option<Intersection> {
    let target = entry.target();
    let id: ElementId = known.iter().find(|t| t.element.is(&target))?.id;
    Some(Intersection {
        id,
        ratio: entry.intersection_ratio(),
        is_intersecting: entry.is_intersecting(),
    })
}
