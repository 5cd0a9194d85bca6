//! Progressive enhancements attached once the page has rendered.
//!
//! Captures the managed elements, builds the scroll, animation, icon and
//! widget managers over them, wires window listeners and intersection
//! observers, and subscribes the theme-dependent parts to the [`ThemeBus`].

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event};

use crate::config::{selectors, tradingview};
use crate::core::element::{ElementHandle, Intersection, Timers, Tracked, track_all};
use crate::core::widgets::{GithubStats, TradingViewConfig, TradingViewState};
use crate::core::{
    AnimationManager, AnimationTargets, IconManager, NavLink, ScrollManager, ScrollTargets,
    ThemeBus,
};
use crate::models::Theme;
use crate::utils::dom::{self, BrowserViewport, DomElement, WebTimers};
use crate::utils::markdown_to_html;
use crate::utils::observer::{self, Observer};

type Scroll = ScrollManager<DomElement, BrowserViewport, WebTimers>;
type Animation = AnimationManager<DomElement, WebTimers>;

/// Marks a card that already has an observer.
const OBSERVED_ATTRIBUTE: &str = "data-observed";

/// Live managers behind the enhanced page.
pub struct Enhancements {
    scroll: Rc<RefCell<Scroll>>,
    animation: Rc<RefCell<Animation>>,
    /// Shared by start-up and late cards.
    cards: Option<Observer>,
}

impl Enhancements {
    /// Capture the rendered page and attach every enhancement.
    ///
    /// Missing elements disable only the feature that needs them.
    pub fn attach(bus: &ThemeBus, theme: Theme, bio_markdown: &str) -> Self {
        let _span = tracing::info_span!("attach").entered();

        let stripped = dom::strip_icon_filters();
        if stripped > 0 {
            tracing::debug!(rules = stripped, "removed icon filter rules");
        }

        let icons = Rc::new(IconManager::new(
            dom::query_all(selectors::THEME_ICON),
            dom::query_one(selectors::FAVICON),
        ));
        dom::preload_images(&icons.preload_urls());
        icons.subscribe(bus);

        let stats = Rc::new(GithubStats::new(dom::query_all(selectors::GITHUB_STATS)));
        stats.subscribe(bus);

        let tradingview = TradingViewState::new(theme, mount_tradingview(theme));
        bus.subscribe(move |event| {
            if tradingview.needs_reload(event.theme) {
                tracing::info!(theme = %event.theme, "reloading for TradingView theme");
                dom::reload_page();
            }
            Ok(())
        });

        let (animation, cards) = attach_animation();
        let enhancements = Self {
            scroll: attach_scroll(),
            animation,
            cards,
        };
        enhancements.reveal_bio(bio_markdown);

        let hash = dom::current_hash();
        if !hash.is_empty() && !enhancements.scroll_to_section(&hash) {
            tracing::debug!(hash = %hash, "initial hash names no section");
        }
        enhancements
    }

    /// Observe cards rendered since the last call, e.g. fetched projects,
    /// and release cards a re-render removed.
    pub fn observe_new_cards(&self) {
        let Some(observer) = &self.cards else { return };
        let detached = self.animation.borrow_mut().prune_cards();
        observer.unobserve(&detached);

        let selector = format!("{}:not([{}])", selectors::CARDS, OBSERVED_ATTRIBUTE);
        let fresh = mark_observed(dom::query_all(&selector));
        if fresh.is_empty() {
            return;
        }
        let added = self.animation.borrow_mut().add_cards(fresh);
        observer.observe(&added);
    }

    /// Smooth-scroll to `section`.
    pub fn scroll_to_section(&self, section: &str) -> bool {
        self.scroll.borrow().scroll_to_section(section)
    }

    /// Show the spinner, then render the bio in a later task so the
    /// spinner gets a chance to paint.
    fn reveal_bio(&self, markdown: &str) {
        let Some(target) = dom::query_one("[data-bio]") else {
            return;
        };
        self.animation.borrow().show_loading(Some(&target));

        let animation = Rc::clone(&self.animation);
        let markdown = markdown.to_string();
        WebTimers.defer(
            0,
            Box::new(move || {
                let html = markdown_to_html(&markdown);
                let animation = animation.borrow();
                animation.hide_loading(Some(&target));
                animation.reveal_content(Some(&target), &html);
            }),
        );
    }
}

fn mark_observed(elements: Vec<DomElement>) -> Vec<DomElement> {
    for el in &elements {
        let _ = el.set_attribute(OBSERVED_ATTRIBUTE, "");
    }
    elements
}

// =============================================================================
// Scroll
// =============================================================================

fn attach_scroll() -> Rc<RefCell<Scroll>> {
    let section_elements = dom::query_all(selectors::SECTIONS);
    let nav_links: Vec<NavLink<DomElement>> = dom::query_all(selectors::NAV_LINKS)
        .into_iter()
        .filter_map(|element| {
            let section = element.attribute("data-scroll")?;
            Some(NavLink { section, element })
        })
        .collect();

    let targets = ScrollTargets {
        back_to_top: dom::query_one(selectors::BACK_TO_TOP),
        focus_target: dom::query_one(selectors::FOCUS_TARGET),
        sections: section_elements.iter().map(DomElement::id).collect(),
        nav_links: nav_links.clone(),
    };
    let back_to_top = targets.back_to_top.clone();
    let manager = Rc::new(RefCell::new(ScrollManager::new(
        targets,
        BrowserViewport,
        WebTimers,
    )));

    listen_scroll(&manager);

    for link in nav_links {
        let manager = Rc::clone(&manager);
        let section = link.section.clone();
        on_click(link.element.as_element(), move |event| {
            event.prevent_default();
            manager.borrow().scroll_to_section(&section);
        });
    }

    if let Some(button) = back_to_top {
        let manager = Rc::clone(&manager);
        on_click(button.as_element(), move |event| {
            event.prevent_default();
            manager.borrow().scroll_to_top();
        });
    }

    // Section ids line up with the manager's: both are document order from 0.
    let sections = track_all(section_elements, 0);
    let observed = Rc::clone(&manager);
    if let Err(err) = observer::observe(&Scroll::nav_observer_options(), &sections, move |batch| {
        observed.borrow_mut().on_sections_intersect(&batch);
    }) {
        tracing::warn!(error = %err, "section tracking unavailable");
    }
    manager
}

fn listen_scroll(manager: &Rc<RefCell<Scroll>>) {
    let Some(window) = dom::window() else { return };

    let manager = Rc::clone(manager);
    let callback = Closure::<dyn FnMut()>::new(move || {
        if !manager.borrow_mut().on_scroll() {
            return;
        }
        let frame = Rc::clone(&manager);
        if let Err(err) = dom::request_animation_frame(move || frame.borrow_mut().on_frame()) {
            tracing::debug!(error = %err, "animation frame unavailable, updating now");
            manager.borrow_mut().on_frame();
        }
    });

    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    if let Err(err) = window.add_event_listener_with_callback_and_add_event_listener_options(
        "scroll",
        callback.as_ref().unchecked_ref(),
        &options,
    ) {
        tracing::warn!(error = ?err, "scroll listener not attached");
    }
    callback.forget();
}

fn on_click(target: &web_sys::HtmlElement, handler: impl FnMut(Event) + 'static) {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(err) =
        target.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
    {
        tracing::warn!(error = ?err, "click listener not attached");
    }
    callback.forget();
}

// =============================================================================
// Animation
// =============================================================================

fn attach_animation() -> (Rc<RefCell<Animation>>, Option<Observer>) {
    let sections = dom::query_all(selectors::ANIMATED_SECTIONS);
    let skills_section = sections
        .iter()
        .position(|s| s.id() == selectors::SKILLS_SECTION_ID);
    let skills_selector = format!("#{}", selectors::SKILLS_SECTION_ID);
    let progress_bars = dom::query_all(selectors::PROGRESS_BARS)
        .into_iter()
        .map(|bar| {
            let in_skills = bar
                .as_element()
                .closest(&skills_selector)
                .ok()
                .flatten()
                .is_some();
            (bar, in_skills)
        })
        .collect();
    let cards = mark_observed(dom::query_all(selectors::CARDS));

    let manager = Rc::new(RefCell::new(AnimationManager::new(
        AnimationTargets {
            sections,
            skills_section,
            progress_bars,
            cards,
        },
        WebTimers,
    )));

    let (sections, bars, cards) = {
        let m = manager.borrow();
        (
            m.sections().to_vec(),
            m.progress_bars().cloned().collect::<Vec<Tracked<DomElement>>>(),
            m.cards().to_vec(),
        )
    };

    let observed = Rc::clone(&manager);
    if let Err(err) =
        observer::observe(&Animation::section_observer_options(), &sections, move |batch| {
            for entry in entering(&batch) {
                observed.borrow_mut().on_section_intersect(entry.id);
            }
        })
    {
        tracing::warn!(error = %err, "section reveal unavailable");
    }

    let observed = Rc::clone(&manager);
    if let Err(err) =
        observer::observe(&Animation::progress_observer_options(), &bars, move |batch| {
            for entry in entering(&batch) {
                observed.borrow_mut().on_progress_bar_intersect(entry.id);
            }
        })
    {
        tracing::warn!(error = %err, "progress bar animation unavailable");
    }

    let cards = observe_cards(&manager, &cards);
    (manager, cards)
}

fn observe_cards(
    manager: &Rc<RefCell<Animation>>,
    cards: &[Tracked<DomElement>],
) -> Option<Observer> {
    let observed = Rc::clone(manager);
    observer::observe(&Animation::card_observer_options(), cards, move |batch| {
        for entry in entering(&batch) {
            observed.borrow_mut().on_card_intersect(entry.id);
        }
    })
    .inspect_err(|err| tracing::warn!(error = %err, "card reveal unavailable"))
    .ok()
}

fn entering(batch: &[Intersection]) -> impl Iterator<Item = &Intersection> {
    batch.iter().filter(|e| e.is_intersecting)
}

// =============================================================================
// Widgets
// =============================================================================

/// Inject the TradingView embed into its container. Returns whether the
/// container exists.
fn mount_tradingview(theme: Theme) -> bool {
    let Some(container) = dom::query_one(selectors::TRADINGVIEW) else {
        return false;
    };
    let Some(symbol) = container.attribute("data-symbol") else {
        tracing::warn!("TradingView container has no symbol");
        return false;
    };
    let Some(document) = dom::document() else {
        return false;
    };

    let config = TradingViewConfig::new(&symbol, theme);
    let script = match document.create_element("script") {
        Ok(script) => script,
        Err(err) => {
            tracing::warn!(error = ?err, "cannot create TradingView script");
            return false;
        }
    };
    let _ = script.set_attribute("src", tradingview::SCRIPT_SRC);
    let _ = script.set_attribute("async", "");
    script.set_text_content(Some(&config.to_json()));

    match container.as_element().append_child(&script) {
        Ok(_) => true,
        Err(err) => {
            tracing::warn!(error = ?err, "cannot mount TradingView widget");
            false
        }
    }
}
