//! Light/dark theme and system/manual mode.
//!
//! [`ThemeManager`] owns the two persisted strings (`theme`, `theme-mode`),
//! writes the document theme attribute through a [`ThemeSurface`], and
//! notifies the rest of the page over a [`ThemeBus`].
//!
//! Storage failures never escape: a failed read falls back to defaults and a
//! failed write is logged while the in-memory state still advances.

use crate::config::storage::{MODE_KEY, THEME_KEY};
use crate::core::error::DomError;
use crate::core::events::{ThemeBus, ThemeChanged};
use crate::core::storage::KeyValueStore;
use crate::models::{Theme, ThemeMode};

/// Document-level side effects of the theme state.
pub trait ThemeSurface {
    /// Write the `data-theme` attribute on the document element.
    fn apply_theme(&self, theme: Theme) -> Result<(), DomError>;
    /// Show or hide the manual light/dark toggle control.
    fn show_manual_toggle(&self, visible: bool) -> Result<(), DomError>;
}

pub struct ThemeManager<S, D> {
    store: S,
    surface: D,
    bus: ThemeBus,
    current_theme: Theme,
    current_mode: ThemeMode,
    system_theme: Option<Theme>,
}

impl<S: KeyValueStore, D: ThemeSurface> ThemeManager<S, D> {
    /// Resolve the initial state and apply it to the document.
    ///
    /// Mode is the stored `theme-mode`, defaulting to system. Theme is the
    /// stored `theme`; failing that, the OS preference when in system mode;
    /// failing that, light. Nothing is persisted here.
    pub fn new(store: S, surface: D, bus: ThemeBus, system_theme: Option<Theme>) -> Self {
        let current_mode = read_parsed::<ThemeMode>(&store, MODE_KEY).unwrap_or_default();
        let current_theme = read_parsed::<Theme>(&store, THEME_KEY)
            .or(match current_mode {
                ThemeMode::System => system_theme,
                ThemeMode::Manual => None,
            })
            .unwrap_or_default();

        let manager = Self {
            store,
            surface,
            bus,
            current_theme,
            current_mode,
            system_theme,
        };

        if let Err(err) = manager.surface.apply_theme(current_theme) {
            tracing::warn!(error = %err, "failed to apply initial theme");
        }
        if let Err(err) = manager
            .surface
            .show_manual_toggle(current_mode == ThemeMode::Manual)
        {
            tracing::warn!(error = %err, "failed to update theme toggle visibility");
        }

        tracing::debug!(theme = %current_theme, mode = %current_mode, "theme initialized");
        manager
    }

    pub fn current_theme(&self) -> Theme {
        self.current_theme
    }

    pub fn current_mode(&self) -> ThemeMode {
        self.current_mode
    }

    pub fn bus(&self) -> &ThemeBus {
        &self.bus
    }

    /// Apply, persist and broadcast `theme`.
    pub fn set_theme(&mut self, theme: Theme) {
        if let Err(err) = self.surface.apply_theme(theme) {
            tracing::warn!(error = %err, "failed to apply theme attribute");
        }
        if let Err(err) = self.store.set(THEME_KEY, theme.as_str()) {
            tracing::debug!(error = %err, "theme not persisted");
        }
        self.current_theme = theme;
        self.announce();
    }

    /// Persist `mode`, update the toggle visibility and broadcast.
    ///
    /// Switching modes does not change the theme; the two flags are
    /// independent exactly as stored.
    pub fn set_mode(&mut self, mode: ThemeMode) {
        if let Err(err) = self.store.set(MODE_KEY, mode.as_str()) {
            tracing::debug!(error = %err, "theme mode not persisted");
        }
        self.current_mode = mode;
        if let Err(err) = self.surface.show_manual_toggle(mode == ThemeMode::Manual) {
            tracing::warn!(error = %err, "failed to update theme toggle visibility");
        }
        self.announce();
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let next = self.current_theme.toggled();
        self.set_theme(next);
        next
    }

    pub fn toggle_mode(&mut self) -> ThemeMode {
        let next = self.current_mode.toggled();
        self.set_mode(next);
        next
    }

    /// OS `prefers-color-scheme` changed.
    ///
    /// Only takes effect while following the system preference.
    pub fn on_system_change(&mut self, prefers_dark: bool) {
        let theme = Theme::from_dark(prefers_dark);
        self.system_theme = Some(theme);
        if self.current_mode == ThemeMode::System {
            self.set_theme(theme);
        }
    }

    /// Last known OS preference.
    pub fn system_theme(&self) -> Option<Theme> {
        self.system_theme
    }

    /// Broadcast the current state without persisting anything.
    pub fn announce(&self) {
        self.bus
            .emit(&ThemeChanged::new(self.current_theme, self.current_mode));
    }
}

fn read_parsed<T: std::str::FromStr>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    match store.get(key) {
        Ok(value) => value?.parse().ok(),
        Err(err) => {
            tracing::debug!(key, error = %err, "storage read failed, using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::core::testing::{FakeThemeSurface, MemoryStore};

    fn manager(
        store: &Rc<MemoryStore>,
        system: Option<Theme>,
    ) -> ThemeManager<Rc<MemoryStore>, FakeThemeSurface> {
        ThemeManager::new(
            Rc::clone(store),
            FakeThemeSurface::default(),
            ThemeBus::new(),
            system,
        )
    }

    #[test]
    fn test_defaults_without_storage() {
        let store = Rc::new(MemoryStore::new());
        let m = manager(&store, None);
        assert_eq!(m.current_mode(), ThemeMode::System);
        assert_eq!(m.current_theme(), Theme::Light);
    }

    #[test]
    fn test_system_mode_uses_os_preference() {
        let store = Rc::new(MemoryStore::new());
        let m = manager(&store, Some(Theme::Dark));
        assert_eq!(m.current_theme(), Theme::Dark);
        assert_eq!(m.surface.applied(), vec![Theme::Dark]);
    }

    #[test]
    fn test_manual_mode_ignores_os_preference() {
        let store = Rc::new(MemoryStore::with_entries(&[(MODE_KEY, "manual")]));
        let m = manager(&store, Some(Theme::Dark));
        assert_eq!(m.current_mode(), ThemeMode::Manual);
        assert_eq!(m.current_theme(), Theme::Light);
        assert_eq!(m.surface.toggle_visible(), Some(true));
    }

    #[test]
    fn test_stored_theme_wins_over_os() {
        let store = Rc::new(MemoryStore::with_entries(&[(THEME_KEY, "light")]));
        let m = manager(&store, Some(Theme::Dark));
        assert_eq!(m.current_theme(), Theme::Light);
    }

    #[test]
    fn test_garbage_in_storage_falls_back() {
        let store = Rc::new(MemoryStore::with_entries(&[
            (THEME_KEY, "purple"),
            (MODE_KEY, "sometimes"),
        ]));
        let m = manager(&store, None);
        assert_eq!(m.current_theme(), Theme::Light);
        assert_eq!(m.current_mode(), ThemeMode::System);
    }

    #[test]
    fn test_set_theme_persists_across_construction() {
        for theme in [Theme::Light, Theme::Dark] {
            let store = Rc::new(MemoryStore::new());
            let mut m = manager(&store, Some(theme.toggled()));
            m.set_theme(theme);
            drop(m);

            let fresh = manager(&store, Some(theme.toggled()));
            assert_eq!(fresh.current_theme(), theme);
        }
    }

    #[test]
    fn test_set_theme_emits_payload() {
        let store = Rc::new(MemoryStore::new());
        let mut m = manager(&store, None);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        m.bus().subscribe(move |ev| {
            sink.borrow_mut().push(*ev);
            Ok(())
        });

        m.set_theme(Theme::Dark);
        assert_eq!(
            *events.borrow(),
            vec![ThemeChanged {
                theme: Theme::Dark,
                is_dark: true,
                mode: ThemeMode::System
            }]
        );
        assert_eq!(store.get(THEME_KEY), Ok(Some("dark".to_string())));
    }

    #[test]
    fn test_toggle_mode_is_involution() {
        for start in [ThemeMode::System, ThemeMode::Manual] {
            let store = Rc::new(MemoryStore::with_entries(&[(MODE_KEY, start.as_str())]));
            let mut m = manager(&store, None);
            let first = m.toggle_mode();
            assert_eq!(first, start.toggled());
            let second = m.toggle_mode();
            assert_eq!(second, start);
            assert_eq!(m.current_mode(), start);
        }
    }

    #[test]
    fn test_toggle_theme_returns_new_value() {
        let store = Rc::new(MemoryStore::new());
        let mut m = manager(&store, None);
        assert_eq!(m.toggle_theme(), Theme::Dark);
        assert_eq!(m.toggle_theme(), Theme::Light);
    }

    #[test]
    fn test_write_failure_still_advances_state() {
        let store = Rc::new(MemoryStore::new());
        store.fail_all(true);
        let mut m = manager(&store, Some(Theme::Dark));
        assert_eq!(m.current_theme(), Theme::Dark);

        m.set_theme(Theme::Light);
        m.set_mode(ThemeMode::Manual);
        assert_eq!(m.current_theme(), Theme::Light);
        assert_eq!(m.current_mode(), ThemeMode::Manual);

        store.fail_all(false);
        assert_eq!(store.get(THEME_KEY), Ok(None));
    }

    #[test]
    fn test_os_change_followed_only_in_system_mode() {
        let store = Rc::new(MemoryStore::new());
        let mut m = manager(&store, Some(Theme::Light));
        m.on_system_change(true);
        assert_eq!(m.current_theme(), Theme::Dark);

        m.set_mode(ThemeMode::Manual);
        m.on_system_change(false);
        assert_eq!(m.current_theme(), Theme::Dark);
        assert_eq!(m.system_theme(), Some(Theme::Light));
    }

    #[test]
    fn test_set_mode_toggles_control_visibility() {
        let store = Rc::new(MemoryStore::new());
        let mut m = manager(&store, None);
        assert_eq!(m.surface.toggle_visible(), Some(false));
        m.set_mode(ThemeMode::Manual);
        assert_eq!(m.surface.toggle_visible(), Some(true));
        assert_eq!(store.get(MODE_KEY), Ok(Some("manual".to_string())));
    }

    #[test]
    fn test_surface_failure_does_not_block_state() {
        let store = Rc::new(MemoryStore::new());
        let surface = FakeThemeSurface::failing();
        let mut m = ThemeManager::new(Rc::clone(&store), surface, ThemeBus::new(), None);
        m.set_theme(Theme::Dark);
        assert_eq!(m.current_theme(), Theme::Dark);
        assert_eq!(store.get(THEME_KEY), Ok(Some("dark".to_string())));
    }
}
