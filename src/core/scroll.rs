//! Scroll-driven navigation behavior.
//!
//! - Back-to-top control shown past a scroll threshold, written only on change
//! - Smooth scrolling to the top and to sections, offset by the fixed nav
//! - Active navigation link tracking from section intersections

use crate::config::{classes, scroll as cfg};
use crate::core::element::{ElementHandle, ElementId, Intersection, ObserverOptions, Timers, Tracked};
use crate::core::error::DomError;

/// Window-level scrolling and history.
pub trait Viewport: Clone + 'static {
    /// Current vertical scroll offset in pixels.
    fn scroll_offset(&self) -> f64;
    /// Top of element `id` relative to the viewport; `Ok(None)` when absent.
    fn element_top(&self, id: &str) -> Result<Option<f64>, DomError>;
    fn smooth_scroll_to(&self, top: f64);
    /// Native `scrollIntoView` on element `id`.
    fn scroll_into_view(&self, id: &str) -> Result<(), DomError>;
    /// Push a same-page history entry with `hash` (including `#`).
    fn push_hash(&self, hash: &str) -> Result<(), DomError>;
}

/// A navigation link and the section it points at (`data-scroll`).
#[derive(Clone, Debug)]
pub struct NavLink<E> {
    pub section: String,
    pub element: E,
}

/// Elements the scroll manager works on, captured once.
pub struct ScrollTargets<E> {
    pub back_to_top: Option<E>,
    /// First heading or explicitly focusable element.
    pub focus_target: Option<E>,
    /// Section ids in document order.
    pub sections: Vec<String>,
    pub nav_links: Vec<NavLink<E>>,
}

impl<E> Default for ScrollTargets<E> {
    fn default() -> Self {
        Self {
            back_to_top: None,
            focus_target: None,
            sections: Vec::new(),
            nav_links: Vec::new(),
        }
    }
}

pub struct ScrollManager<E, V, T> {
    viewport: V,
    timers: T,
    back_to_top: Option<E>,
    focus_target: Option<E>,
    sections: Vec<Tracked<String>>,
    nav_links: Vec<NavLink<E>>,
    is_visible: bool,
    frame_pending: bool,
    active_section: Option<String>,
    threshold: f64,
    nav_height: f64,
}

impl<E: ElementHandle, V: Viewport, T: Timers> ScrollManager<E, V, T> {
    pub fn new(targets: ScrollTargets<E>, viewport: V, timers: T) -> Self {
        let sections = targets
            .sections
            .into_iter()
            .enumerate()
            .map(|(i, id)| Tracked {
                id: ElementId(i),
                element: id,
            })
            .collect();

        let manager = Self {
            viewport,
            timers,
            back_to_top: targets.back_to_top,
            focus_target: targets.focus_target,
            sections,
            nav_links: targets.nav_links,
            is_visible: false,
            frame_pending: false,
            active_section: None,
            threshold: cfg::BACK_TO_TOP_THRESHOLD,
            nav_height: cfg::NAV_HEIGHT,
        };

        if manager.back_to_top.is_none() {
            tracing::debug!("no back-to-top control on page");
        }
        manager
    }

    /// Observer settings for section tracking.
    pub fn nav_observer_options() -> ObserverOptions {
        ObserverOptions::with_bottom_margin(cfg::NAV_THRESHOLDS, cfg::NAV_HEIGHT)
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub fn active_section(&self) -> Option<&str> {
        self.active_section.as_deref()
    }

    /// Scroll event arrived. Returns `true` when the caller should request an
    /// animation frame; scroll events between frames are coalesced.
    pub fn on_scroll(&mut self) -> bool {
        if self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    /// Animation frame requested by [`ScrollManager::on_scroll`] fired.
    pub fn on_frame(&mut self) {
        self.frame_pending = false;
        self.toggle_visibility();
    }

    /// Show the back-to-top control past the threshold, hide it otherwise.
    ///
    /// Touches the DOM only when visibility actually changes. Returns whether
    /// it did.
    pub fn toggle_visibility(&mut self) -> bool {
        let should_show = self.viewport.scroll_offset() > self.threshold;
        if should_show == self.is_visible {
            return false;
        }
        self.is_visible = should_show;

        if let Some(button) = &self.back_to_top {
            let result = if should_show {
                button
                    .add_class(classes::VISIBLE)
                    .and_then(|_| button.set_attribute("aria-hidden", "false"))
            } else {
                button
                    .remove_class(classes::VISIBLE)
                    .and_then(|_| button.set_attribute("aria-hidden", "true"))
            };
            if let Err(err) = result {
                tracing::warn!(error = %err, "failed to update back-to-top control");
            }
        }
        true
    }

    /// Smooth-scroll to the top, then move focus to the first heading.
    pub fn scroll_to_top(&self) {
        self.viewport.smooth_scroll_to(0.0);

        let Some(target) = self.focus_target.clone() else {
            return;
        };
        self.timers.defer(
            cfg::FOCUS_DELAY_MS,
            Box::new(move || {
                if let Err(err) = target.focus() {
                    tracing::debug!(error = %err, "focus after scroll failed");
                }
            }),
        );
    }

    /// Smooth-scroll to section `id`, leaving room for the fixed nav, and
    /// record the hash in history.
    ///
    /// Returns `false` (and does nothing) if no such element exists.
    pub fn scroll_to_section(&self, id: &str) -> bool {
        match self.viewport.element_top(id) {
            Ok(None) => return false,
            Ok(Some(top)) => {
                let target = top + self.viewport.scroll_offset() - self.nav_height;
                self.viewport.smooth_scroll_to(target);
            }
            Err(err) => {
                tracing::warn!(section = id, error = %err, "measuring section failed, using scrollIntoView");
                if let Err(err) = self.viewport.scroll_into_view(id) {
                    tracing::warn!(section = id, error = %err, "scrollIntoView failed");
                }
            }
        }

        if let Err(err) = self.viewport.push_hash(&format!("#{}", id)) {
            tracing::debug!(section = id, error = %err, "history push failed");
        }
        true
    }

    /// Section observer callback.
    ///
    /// Of the intersecting sections the one with the highest ratio wins; its
    /// nav link becomes active and every other link is cleared.
    pub fn on_sections_intersect(&mut self, entries: &[Intersection]) -> Option<&str> {
        let best = entries
            .iter()
            .filter(|e| e.is_intersecting)
            .max_by(|a, b| a.ratio.total_cmp(&b.ratio))?;

        let section = crate::core::element::find(&self.sections, best.id)?
            .element
            .clone();
        self.set_active(&section);
        self.active_section.as_deref()
    }

    /// Mark the nav link for `section` active and clear all others.
    ///
    /// No-op when no link points at `section`.
    pub fn set_active(&mut self, section: &str) {
        if !self.nav_links.iter().any(|l| l.section == section) {
            return;
        }

        for link in &self.nav_links {
            let result = if link.section == section {
                link.element
                    .add_class(classes::ACTIVE)
                    .and_then(|_| link.element.set_attribute("aria-current", "page"))
            } else {
                link.element
                    .remove_class(classes::ACTIVE)
                    .and_then(|_| link.element.remove_attribute("aria-current"))
            };
            if let Err(err) = result {
                tracing::warn!(link = %link.section, error = %err, "failed to update nav link");
            }
        }
        self.active_section = Some(section.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{FakeElement, FakeViewport, ManualTimers};

    type Manager = ScrollManager<FakeElement, FakeViewport, ManualTimers>;

    fn link(section: &str) -> NavLink<FakeElement> {
        NavLink {
            section: section.to_string(),
            element: FakeElement::new(),
        }
    }

    fn manager_with(viewport: &FakeViewport, timers: &ManualTimers) -> (Manager, FakeElement) {
        let button = FakeElement::new();
        let targets = ScrollTargets {
            back_to_top: Some(button.clone()),
            focus_target: None,
            sections: vec!["about".into(), "skills".into(), "projects".into()],
            nav_links: vec![link("about"), link("skills"), link("projects")],
        };
        (
            ScrollManager::new(targets, viewport.clone(), timers.clone()),
            button,
        )
    }

    #[test]
    fn test_visibility_threshold() {
        let viewport = FakeViewport::new();
        let (mut m, button) = manager_with(&viewport, &ManualTimers::new());

        viewport.set_offset(300.0);
        assert!(!m.toggle_visibility());
        assert!(!button.has_class(classes::VISIBLE));

        viewport.set_offset(301.0);
        assert!(m.toggle_visibility());
        assert!(m.is_visible());
        assert!(button.has_class(classes::VISIBLE));
        assert_eq!(button.attribute("aria-hidden").as_deref(), Some("false"));

        viewport.set_offset(10.0);
        assert!(m.toggle_visibility());
        assert!(!button.has_class(classes::VISIBLE));
    }

    #[test]
    fn test_toggle_visibility_writes_only_on_change() {
        let viewport = FakeViewport::new();
        let (mut m, button) = manager_with(&viewport, &ManualTimers::new());

        viewport.set_offset(900.0);
        m.toggle_visibility();
        let writes = button.write_count();
        assert!(writes > 0);

        for _ in 0..5 {
            assert!(!m.toggle_visibility());
        }
        assert_eq!(button.write_count(), writes);
    }

    #[test]
    fn test_scroll_events_coalesce_until_frame() {
        let viewport = FakeViewport::new();
        let (mut m, _) = manager_with(&viewport, &ManualTimers::new());

        assert!(m.on_scroll());
        assert!(!m.on_scroll());
        assert!(!m.on_scroll());

        viewport.set_offset(500.0);
        m.on_frame();
        assert!(m.is_visible());
        assert!(m.on_scroll());
    }

    #[test]
    fn test_scroll_to_missing_section_is_noop() {
        let viewport = FakeViewport::new();
        let (m, _) = manager_with(&viewport, &ManualTimers::new());

        assert!(!m.scroll_to_section("nonexistent-id"));
        assert!(viewport.scrolls().is_empty());
        assert!(viewport.history().is_empty());
    }

    #[test]
    fn test_scroll_to_section_offsets_nav_height() {
        let viewport = FakeViewport::new();
        viewport.set_offset(200.0);
        viewport.add_element("projects", 500.0);
        let (m, _) = manager_with(&viewport, &ManualTimers::new());

        assert!(m.scroll_to_section("projects"));
        assert_eq!(viewport.scrolls(), vec![500.0 + 200.0 - 80.0]);
        assert_eq!(viewport.history(), vec!["#projects".to_string()]);
    }

    #[test]
    fn test_scroll_to_section_falls_back_when_measuring_fails() {
        let viewport = FakeViewport::new();
        viewport.add_element("about", 10.0);
        viewport.fail_measure(true);
        viewport.fail_history(true);
        let (m, _) = manager_with(&viewport, &ManualTimers::new());

        assert!(m.scroll_to_section("about"));
        assert!(viewport.scrolls().is_empty());
        assert_eq!(viewport.scrolled_into_view(), vec!["about".to_string()]);
        assert!(viewport.history().is_empty());
    }

    #[test]
    fn test_scroll_to_top_focuses_heading_after_delay() {
        let viewport = FakeViewport::new();
        let timers = ManualTimers::new();
        let heading = FakeElement::new();
        let targets = ScrollTargets {
            focus_target: Some(heading.clone()),
            ..ScrollTargets::default()
        };
        let m: Manager = ScrollManager::new(targets, viewport.clone(), timers.clone());

        m.scroll_to_top();
        assert_eq!(viewport.scrolls(), vec![0.0]);
        assert!(!heading.is_focused());

        timers.run_all();
        assert!(heading.is_focused());
    }

    #[test]
    fn test_scroll_to_top_without_focus_target() {
        let viewport = FakeViewport::new();
        let timers = ManualTimers::new();
        let m: Manager = ScrollManager::new(ScrollTargets::default(), viewport.clone(), timers.clone());

        m.scroll_to_top();
        assert_eq!(timers.pending(), 0);
        assert_eq!(viewport.scrolls(), vec![0.0]);
    }

    #[test]
    fn test_highest_ratio_section_wins() {
        let viewport = FakeViewport::new();
        let (mut m, _) = manager_with(&viewport, &ManualTimers::new());

        let active = m.on_sections_intersect(&[
            Intersection { id: ElementId(0), ratio: 0.3, is_intersecting: true },
            Intersection { id: ElementId(1), ratio: 0.8, is_intersecting: true },
            Intersection { id: ElementId(2), ratio: 0.9, is_intersecting: false },
        ]);
        assert_eq!(active, Some("skills"));

        let links = &m.nav_links;
        assert!(links[1].element.has_class(classes::ACTIVE));
        assert_eq!(links[1].element.attribute("aria-current").as_deref(), Some("page"));
        assert!(!links[0].element.has_class(classes::ACTIVE));
        assert!(links[0].element.attribute("aria-current").is_none());
    }

    #[test]
    fn test_active_link_moves_and_clears_previous() {
        let viewport = FakeViewport::new();
        let (mut m, _) = manager_with(&viewport, &ManualTimers::new());

        m.set_active("about");
        m.set_active("projects");
        assert!(!m.nav_links[0].element.has_class(classes::ACTIVE));
        assert!(m.nav_links[2].element.has_class(classes::ACTIVE));
        assert_eq!(m.active_section(), Some("projects"));
    }

    #[test]
    fn test_unmatched_section_leaves_links_alone() {
        let viewport = FakeViewport::new();
        let (mut m, _) = manager_with(&viewport, &ManualTimers::new());

        m.set_active("about");
        m.set_active("footer");
        assert!(m.nav_links[0].element.has_class(classes::ACTIVE));
        assert_eq!(m.active_section(), Some("about"));
    }

    #[test]
    fn test_no_intersecting_entries() {
        let viewport = FakeViewport::new();
        let (mut m, _) = manager_with(&viewport, &ManualTimers::new());
        assert_eq!(
            m.on_sections_intersect(&[Intersection {
                id: ElementId(0),
                ratio: 0.0,
                is_intersecting: false
            }]),
            None
        );
    }

    #[test]
    fn test_nav_observer_margin_matches_nav_height() {
        let opts = Manager::nav_observer_options();
        assert_eq!(opts.root_margin, "0px 0px -80px 0px");
        assert!(opts.thresholds.len() > 1);
    }
}
