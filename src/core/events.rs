//! Theme change notifications.
//!
//! [`ThemeBus`] is the single cross-component coordination point: the theme
//! manager emits [`ThemeChanged`] and any number of listeners (icons, widgets,
//! reactive UI state) react. Dispatch is synchronous; every listener runs to
//! completion before [`ThemeBus::emit`] returns. A failing listener is logged
//! and does not prevent the remaining listeners from running.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::core::error::DomError;
use crate::models::{Theme, ThemeMode};

/// Payload delivered to theme listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeChanged {
    pub theme: Theme,
    pub is_dark: bool,
    pub mode: ThemeMode,
}

impl ThemeChanged {
    pub fn new(theme: Theme, mode: ThemeMode) -> Self {
        Self {
            theme,
            is_dark: theme.is_dark(),
            mode,
        }
    }
}

/// Handle returned by [`ThemeBus::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

type Listener = Rc<dyn Fn(&ThemeChanged) -> Result<(), DomError>>;

/// Typed listener registry for [`ThemeChanged`].
///
/// Cloning shares the registry.
#[derive(Clone, Default)]
pub struct ThemeBus {
    listeners: Rc<RefCell<Vec<(ListenerId, Listener)>>>,
    next_id: Rc<Cell<u32>>,
}

impl ThemeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays registered until [`ThemeBus::unsubscribe`].
    pub fn subscribe(
        &self,
        listener: impl Fn(&ThemeChanged) -> Result<(), DomError> + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0.wrapping_add(1));
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Deliver `event` to every listener in registration order.
    ///
    /// Returns the number of listeners that failed.
    pub fn emit(&self, event: &ThemeChanged) -> usize {
        // Snapshot so listeners may subscribe or unsubscribe while running.
        let snapshot: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();

        let mut failures = 0;
        for listener in snapshot {
            if let Err(err) = listener(event) {
                failures += 1;
                tracing::warn!(theme = %event.theme, error = %err, "theme listener failed");
            }
        }
        failures
    }
}
