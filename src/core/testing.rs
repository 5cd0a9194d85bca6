//! In-memory fakes for the DOM and storage ports.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::core::element::{ElementHandle, Timers};
use crate::core::error::{DomError, StorageError};
use crate::core::scroll::Viewport;
use crate::core::storage::KeyValueStore;
use crate::core::theme::ThemeSurface;
use crate::models::Theme;

// =============================================================================
// Storage
// =============================================================================

/// HashMap-backed store with failure injection.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    failing: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let store = Self::new();
        for (k, v) in entries {
            store
                .entries
                .borrow_mut()
                .insert(k.to_string(), v.to_string());
        }
        store
    }

    /// Make every operation fail, as when storage is disabled.
    pub fn fail_all(&self, failing: bool) {
        self.failing.set(failing);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.failing.get() {
            return Err(StorageError::ReadFailed(key.to_string()));
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing.get() {
            return Err(StorageError::WriteFailed(key.to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.failing.get() {
            return Err(StorageError::RemoveFailed(key.to_string()));
        }
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

// =============================================================================
// Theme surface
// =============================================================================

#[derive(Clone, Default)]
pub struct FakeThemeSurface {
    applied: Rc<RefCell<Vec<Theme>>>,
    toggle_visible: Rc<Cell<Option<bool>>>,
    failing: bool,
}

impl FakeThemeSurface {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn applied(&self) -> Vec<Theme> {
        self.applied.borrow().clone()
    }

    pub fn toggle_visible(&self) -> Option<bool> {
        self.toggle_visible.get()
    }
}

impl ThemeSurface for FakeThemeSurface {
    fn apply_theme(&self, theme: Theme) -> Result<(), DomError> {
        if self.failing {
            return Err(DomError::NoDocument);
        }
        self.applied.borrow_mut().push(theme);
        Ok(())
    }

    fn show_manual_toggle(&self, visible: bool) -> Result<(), DomError> {
        if self.failing {
            return Err(DomError::NoDocument);
        }
        self.toggle_visible.set(Some(visible));
        Ok(())
    }
}

// =============================================================================
// Elements
// =============================================================================

#[derive(Default)]
struct ElementState {
    attributes: HashMap<String, String>,
    classes: Vec<String>,
    styles: HashMap<String, String>,
    inner_html: String,
    focused: bool,
    writes: usize,
    style_log: Vec<(String, String)>,
    read_only: bool,
    detached: bool,
}

/// Shared-state element; clones refer to the same element.
#[derive(Clone, Default)]
pub struct FakeElement(Rc<RefCell<ElementState>>);

impl FakeElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Make every write fail.
    pub fn read_only(self) -> Self {
        self.0.borrow_mut().read_only = true;
        self
    }

    pub fn write_count(&self) -> usize {
        self.0.borrow().writes
    }

    pub fn is_focused(&self) -> bool {
        self.0.borrow().focused
    }

    /// Every `(property, value)` style write in order.
    pub fn style_log(&self) -> Vec<(String, String)> {
        self.0.borrow().style_log.clone()
    }

    /// Remove the element from the document.
    pub fn detach(&self) {
        self.0.borrow_mut().detached = true;
    }

    fn write(&self) -> Result<std::cell::RefMut<'_, ElementState>, DomError> {
        let mut state = self.0.borrow_mut();
        if state.read_only {
            return Err(DomError::Inaccessible("element".to_string()));
        }
        state.writes += 1;
        Ok(state)
    }
}

impl ElementHandle for FakeElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
        self.write()?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove_attribute(&self, name: &str) -> Result<(), DomError> {
        self.write()?.attributes.remove(name);
        Ok(())
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn add_class(&self, class: &str) -> Result<(), DomError> {
        let mut state = self.write()?;
        if !state.classes.iter().any(|c| c == class) {
            state.classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&self, class: &str) -> Result<(), DomError> {
        self.write()?.classes.retain(|c| c != class);
        Ok(())
    }

    fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }

    fn set_style(&self, property: &str, value: &str) -> Result<(), DomError> {
        let mut state = self.write()?;
        state
            .styles
            .insert(property.to_string(), value.to_string());
        state
            .style_log
            .push((property.to_string(), value.to_string()));
        Ok(())
    }

    fn is_connected(&self) -> bool {
        !self.0.borrow().detached
    }

    fn inner_html(&self) -> String {
        self.0.borrow().inner_html.clone()
    }

    fn set_inner_html(&self, html: &str) {
        if let Ok(mut state) = self.write() {
            state.inner_html = html.to_string();
        }
    }

    fn focus(&self) -> Result<(), DomError> {
        self.0.borrow_mut().focused = true;
        Ok(())
    }
}

// =============================================================================
// Timers
// =============================================================================

struct Pending {
    due: u64,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct TimerState {
    now: u64,
    seq: u64,
    pending: Vec<Pending>,
    fired: Vec<u64>,
}

/// Deterministic timer queue; tasks run only when the test advances time.
#[derive(Clone, Default)]
pub struct ManualTimers(Rc<RefCell<TimerState>>);

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.0.borrow().pending.len()
    }

    /// Due times (ms since start) of every task that has run, in order.
    pub fn fired(&self) -> Vec<u64> {
        self.0.borrow().fired.clone()
    }

    /// Run tasks due within the next `ms`, in due order.
    pub fn advance(&self, ms: u64) {
        let until = self.0.borrow().now + ms;
        while let Some(task) = self.pop_due(until) {
            task();
        }
        self.0.borrow_mut().now = until;
    }

    /// Run every pending task, including ones scheduled while running.
    pub fn run_all(&self) {
        while let Some(task) = self.pop_due(u64::MAX) {
            task();
        }
    }

    fn pop_due(&self, until: u64) -> Option<Box<dyn FnOnce()>> {
        let mut state = self.0.borrow_mut();
        let idx = state
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(i, _)| i)?;
        let next = state.pending.remove(idx);
        state.now = state.now.max(next.due);
        state.fired.push(next.due);
        Some(next.task)
    }
}

impl Timers for ManualTimers {
    fn defer(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let mut state = self.0.borrow_mut();
        let due = state.now + u64::from(delay_ms);
        let seq = state.seq;
        state.seq += 1;
        state.pending.push(Pending { due, seq, task });
    }
}

// =============================================================================
// Viewport
// =============================================================================

#[derive(Default)]
struct ViewportState {
    offset: f64,
    elements: HashMap<String, f64>,
    scrolls: Vec<f64>,
    into_view: Vec<String>,
    history: Vec<String>,
    fail_measure: bool,
    fail_history: bool,
}

#[derive(Clone, Default)]
pub struct FakeViewport(Rc<RefCell<ViewportState>>);

impl FakeViewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offset(&self, offset: f64) {
        self.0.borrow_mut().offset = offset;
    }

    pub fn add_element(&self, id: &str, top: f64) {
        self.0.borrow_mut().elements.insert(id.to_string(), top);
    }

    pub fn fail_measure(&self, fail: bool) {
        self.0.borrow_mut().fail_measure = fail;
    }

    pub fn fail_history(&self, fail: bool) {
        self.0.borrow_mut().fail_history = fail;
    }

    pub fn scrolls(&self) -> Vec<f64> {
        self.0.borrow().scrolls.clone()
    }

    pub fn scrolled_into_view(&self) -> Vec<String> {
        self.0.borrow().into_view.clone()
    }

    pub fn history(&self) -> Vec<String> {
        self.0.borrow().history.clone()
    }
}

impl Viewport for FakeViewport {
    fn scroll_offset(&self) -> f64 {
        self.0.borrow().offset
    }

    fn element_top(&self, id: &str) -> Result<Option<f64>, DomError> {
        let state = self.0.borrow();
        let Some(top) = state.elements.get(id) else {
            return Ok(None);
        };
        if state.fail_measure {
            return Err(DomError::failed("getBoundingClientRect", "unsupported"));
        }
        Ok(Some(*top))
    }

    fn smooth_scroll_to(&self, top: f64) {
        self.0.borrow_mut().scrolls.push(top);
    }

    fn scroll_into_view(&self, id: &str) -> Result<(), DomError> {
        self.0.borrow_mut().into_view.push(id.to_string());
        Ok(())
    }

    fn push_hash(&self, hash: &str) -> Result<(), DomError> {
        let mut state = self.0.borrow_mut();
        if state.fail_history {
            return Err(DomError::failed("pushState", "SecurityError"));
        }
        state.history.push(hash.to_string());
        Ok(())
    }
}
