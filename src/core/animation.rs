//! Viewport-entry reveal animations.
//!
//! Sections, progress bars and cards are captured once and identified by
//! [`ElementId`]. A single "already animated" set spans all three kinds, so
//! each element animates at most once per page load no matter how many
//! intersection events it receives.

use std::collections::HashSet;

use crate::config::{animation as cfg, classes};
use crate::core::element::{
    ElementHandle, ElementId, ObserverOptions, Timers, Tracked, find, track_all,
};

/// Elements to animate, captured from the document.
pub struct AnimationTargets<E> {
    pub sections: Vec<E>,
    /// Index into `sections` of the skills section.
    pub skills_section: Option<usize>,
    /// Progress bars and whether each sits inside the skills section.
    pub progress_bars: Vec<(E, bool)>,
    pub cards: Vec<E>,
}

impl<E> Default for AnimationTargets<E> {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
            skills_section: None,
            progress_bars: Vec::new(),
            cards: Vec::new(),
        }
    }
}

/// A progress bar and the width it fills to.
#[derive(Clone, Debug)]
pub struct ProgressBar<E> {
    pub tracked: Tracked<E>,
    /// CSS width, e.g. `"85%"`. `None` when the bar carries no usable value.
    pub target_width: Option<String>,
    pub in_skills: bool,
}

pub struct AnimationManager<E, T> {
    timers: T,
    sections: Vec<Tracked<E>>,
    skills_section: Option<ElementId>,
    bars: Vec<ProgressBar<E>>,
    cards: Vec<Tracked<E>>,
    animated: HashSet<ElementId>,
    next_id: usize,
}

impl<E: ElementHandle, T: Timers> AnimationManager<E, T> {
    pub fn new(targets: AnimationTargets<E>, timers: T) -> Self {
        let sections = track_all(targets.sections, 0);
        let skills_section = targets
            .skills_section
            .and_then(|i| sections.get(i))
            .map(|t| t.id);

        let bar_offset = sections.len();
        let bars: Vec<ProgressBar<E>> = targets
            .progress_bars
            .into_iter()
            .enumerate()
            .map(|(i, (element, in_skills))| {
                let target_width = target_width(&element);
                ProgressBar {
                    tracked: Tracked {
                        id: ElementId(bar_offset + i),
                        element,
                    },
                    target_width,
                    in_skills,
                }
            })
            .collect();

        let cards = track_all(targets.cards, bar_offset + bars.len());
        let next_id = bar_offset + bars.len() + cards.len();

        tracing::debug!(
            sections = sections.len(),
            bars = bars.len(),
            cards = cards.len(),
            "animation targets captured"
        );

        Self {
            timers,
            sections,
            skills_section,
            bars,
            cards,
            animated: HashSet::new(),
            next_id,
        }
    }

    /// Track cards rendered after start-up (e.g. fetched projects).
    ///
    /// Returns the newly tracked cards so the caller can observe them.
    pub fn add_cards(&mut self, cards: Vec<E>) -> Vec<Tracked<E>> {
        let added = track_all(cards, self.next_id);
        self.next_id += added.len();
        self.cards.extend(added.iter().cloned());
        added
    }

    /// Stop tracking cards that left the document, e.g. after a re-filter.
    ///
    /// Returns them so the caller can stop observing.
    pub fn prune_cards(&mut self) -> Vec<Tracked<E>> {
        let (kept, detached): (Vec<_>, Vec<_>) = std::mem::take(&mut self.cards)
            .into_iter()
            .partition(|card| card.element.is_connected());
        self.cards = kept;
        for card in &detached {
            self.animated.remove(&card.id);
        }
        if !detached.is_empty() {
            tracing::debug!(pruned = detached.len(), "dropped detached cards");
        }
        detached
    }

    pub fn section_observer_options() -> ObserverOptions {
        ObserverOptions::with_bottom_margin(&[cfg::SECTION_THRESHOLD], cfg::SECTION_BOTTOM_MARGIN)
    }

    pub fn progress_observer_options() -> ObserverOptions {
        ObserverOptions::new(&[cfg::PROGRESS_THRESHOLD], "0px")
    }

    pub fn card_observer_options() -> ObserverOptions {
        ObserverOptions::new(&[cfg::CARD_THRESHOLD], "0px")
    }

    pub fn sections(&self) -> &[Tracked<E>] {
        &self.sections
    }

    pub fn progress_bars(&self) -> impl Iterator<Item = &Tracked<E>> {
        self.bars.iter().map(|b| &b.tracked)
    }

    pub fn cards(&self) -> &[Tracked<E>] {
        &self.cards
    }

    pub fn is_animated(&self, id: ElementId) -> bool {
        self.animated.contains(&id)
    }

    /// Section entered the viewport. Returns `true` on its first reveal.
    pub fn on_section_intersect(&mut self, id: ElementId) -> bool {
        let Some(section) = find(&self.sections, id) else {
            return false;
        };
        if !self.animated.insert(id) {
            return false;
        }

        if let Err(err) = section.element.add_class(classes::VISIBLE) {
            tracing::warn!(error = %err, "failed to reveal section");
        }
        if self.skills_section == Some(id) {
            self.animate_skills_bars();
        }
        true
    }

    /// Progress bar entered the viewport.
    ///
    /// First time only: reset to 0%, then fill to the target width after a
    /// short delay. Returns `true` when an animation was scheduled.
    pub fn on_progress_bar_intersect(&mut self, id: ElementId) -> bool {
        let Some(bar) = self.bars.iter().find(|b| b.tracked.id == id) else {
            return false;
        };
        if !self.animated.insert(id) {
            return false;
        }

        fill_after(&self.timers, bar, cfg::PROGRESS_FILL_DELAY_MS);
        true
    }

    /// Card entered the viewport. Returns `true` on its first reveal.
    pub fn on_card_intersect(&mut self, id: ElementId) -> bool {
        let Some(card) = find(&self.cards, id) else {
            return false;
        };
        if !self.animated.insert(id) {
            return false;
        }

        if let Err(err) = card.element.add_class(classes::FADE_IN) {
            tracing::warn!(error = %err, "failed to fade card in");
        }
        true
    }

    /// Reset every skills progress bar and refill them one after another
    /// (0ms, 100ms, 200ms, ...).
    ///
    /// Bars filled here count as animated, so their own observer leaves them
    /// alone. Bars that already animated are skipped.
    pub fn animate_skills_bars(&mut self) {
        let mut step = 0u32;
        for bar in self.bars.iter().filter(|b| b.in_skills) {
            if !self.animated.insert(bar.tracked.id) {
                continue;
            }
            fill_after(&self.timers, bar, cfg::STAGGER_STEP_MS.saturating_mul(step));
            step += 1;
        }
    }

    /// Replace the contents of `target` with a loading spinner.
    pub fn show_loading(&self, target: Option<&E>) {
        let Some(el) = target else { return };
        el.set_inner_html(cfg::LOADING_MARKUP);
        if let Err(err) = el.set_attribute("aria-busy", "true") {
            tracing::debug!(error = %err, "failed to mark element busy");
        }
    }

    /// Remove a spinner inserted by [`AnimationManager::show_loading`].
    pub fn hide_loading(&self, target: Option<&E>) {
        let Some(el) = target else { return };
        if el.inner_html() == cfg::LOADING_MARKUP {
            el.set_inner_html("");
        }
        if let Err(err) = el.remove_attribute("aria-busy") {
            tracing::debug!(error = %err, "failed to clear busy state");
        }
    }

    /// Swap in `html` and fade it in.
    pub fn reveal_content(&self, target: Option<&E>, html: &str) {
        let Some(el) = target else { return };
        if let Err(err) = el.set_style("opacity", "0") {
            tracing::debug!(error = %err, "failed to hide content before reveal");
        }
        el.set_inner_html(html);

        let el = el.clone();
        self.timers.defer(
            cfg::REVEAL_DELAY_MS,
            Box::new(move || {
                let result = el
                    .set_style("transition", "opacity 0.3s ease")
                    .and_then(|_| el.set_style("opacity", "1"));
                if let Err(err) = result {
                    tracing::debug!(error = %err, "failed to fade content in");
                }
            }),
        );
    }
}

/// Target width from the bar's numeric value attribute, clamped to 0..=100.
fn target_width<E: ElementHandle>(element: &E) -> Option<String> {
    let raw = element.attribute(cfg::VALUE_ATTRIBUTE)?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(format!("{}%", value.clamp(0.0, 100.0))),
        _ => {
            tracing::warn!(value = %raw, "progress bar value is not a number");
            None
        }
    }
}

fn fill_after<E: ElementHandle, T: Timers>(timers: &T, bar: &ProgressBar<E>, delay_ms: u32) {
    let Some(width) = bar.target_width.clone() else {
        return;
    };
    let element = bar.tracked.element.clone();
    if let Err(err) = element.set_style("width", "0%") {
        tracing::debug!(error = %err, "failed to reset progress bar");
        return;
    }
    timers.defer(
        delay_ms,
        Box::new(move || {
            if let Err(err) = element.set_style("width", &width) {
                tracing::debug!(error = %err, "failed to fill progress bar");
            }
        }),
    );
}
