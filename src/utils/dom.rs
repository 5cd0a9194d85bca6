//! DOM and Web API utility functions.
//!
//! Browser-backed implementations of the element, timer, viewport and theme
//! ports the managers in [`crate::core`] are written against.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CssRuleList, CssStyleRule, CssStyleSheet, Document, HtmlElement, HtmlImageElement,
    ScrollBehavior, ScrollIntoViewOptions, ScrollToOptions, Storage, Window,
};

use crate::config::selectors;
use crate::core::element::{ElementHandle, Timers};
use crate::core::error::DomError;
use crate::core::scroll::Viewport;

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get the document.
#[inline]
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Get localStorage.
#[inline]
pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Get sessionStorage.
#[inline]
pub fn session_storage() -> Option<Storage> {
    window()?.session_storage().ok()?
}

// =============================================================================
// Element Capture
// =============================================================================

/// All HTML elements matching `selector`, in document order.
///
/// An invalid selector or a missing document yields an empty list.
pub fn query_all(selector: &str) -> Vec<DomElement> {
    let Some(list) = document().and_then(|d| d.query_selector_all(selector).ok()) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .map(DomElement)
        .collect()
}

/// First HTML element matching `selector`.
pub fn query_one(selector: &str) -> Option<DomElement> {
    document()?
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<HtmlElement>()
        .ok()
        .map(DomElement)
}

/// Current URL hash without the `#` prefix.
pub fn current_hash() -> String {
    window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
        .trim_start_matches('#')
        .to_string()
}

/// Reload the current page.
pub fn reload_page() {
    if let Some(window) = window()
        && let Err(err) = window.location().reload()
    {
        tracing::warn!(error = ?err, "page reload failed");
    }
}

/// Schedule `f` for the next animation frame.
pub fn request_animation_frame(f: impl FnOnce() + 'static) -> Result<(), DomError> {
    let window = window().ok_or(DomError::NoWindow)?;
    let callback = wasm_bindgen::closure::Closure::once_into_js(f);
    window
        .request_animation_frame(callback.unchecked_ref())
        .map(|_| ())
        .map_err(|e| DomError::failed("requestAnimationFrame", e))
}

// =============================================================================
// Element Handle
// =============================================================================

/// A live HTML element.
#[derive(Clone, Debug, PartialEq)]
pub struct DomElement(pub HtmlElement);

impl DomElement {
    pub fn as_element(&self) -> &HtmlElement {
        &self.0
    }

    /// Whether `node` is this very element.
    pub fn is(&self, node: &web_sys::Node) -> bool {
        self.0.is_same_node(Some(node))
    }

    pub fn id(&self) -> String {
        self.0.id()
    }
}

impl ElementHandle for DomElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
        self.0
            .set_attribute(name, value)
            .map_err(|e| DomError::failed("setAttribute", e))
    }

    fn remove_attribute(&self, name: &str) -> Result<(), DomError> {
        self.0
            .remove_attribute(name)
            .map_err(|e| DomError::failed("removeAttribute", e))
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) -> Result<(), DomError> {
        self.0
            .class_list()
            .add_1(class)
            .map_err(|e| DomError::failed("classList.add", e))
    }

    fn remove_class(&self, class: &str) -> Result<(), DomError> {
        self.0
            .class_list()
            .remove_1(class)
            .map_err(|e| DomError::failed("classList.remove", e))
    }

    fn style(&self, property: &str) -> Option<String> {
        self.0
            .style()
            .get_property_value(property)
            .ok()
            .filter(|v| !v.is_empty())
    }

    fn set_style(&self, property: &str, value: &str) -> Result<(), DomError> {
        self.0
            .style()
            .set_property(property, value)
            .map_err(|e| DomError::failed("style.setProperty", e))
    }

    fn is_connected(&self) -> bool {
        self.0.is_connected()
    }

    fn inner_html(&self) -> String {
        self.0.inner_html()
    }

    fn set_inner_html(&self, html: &str) {
        self.0.set_inner_html(html);
    }

    fn focus(&self) -> Result<(), DomError> {
        self.0.focus().map_err(|e| DomError::failed("focus", e))
    }
}

// =============================================================================
// Timers
// =============================================================================

/// `setTimeout`-backed [`Timers`].
#[derive(Clone, Copy, Debug, Default)]
pub struct WebTimers;

impl Timers for WebTimers {
    fn defer(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        gloo_timers::callback::Timeout::new(delay_ms, task).forget();
    }
}

// =============================================================================
// Viewport
// =============================================================================

/// The window's scroll position, layout and history.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserViewport;

impl Viewport for BrowserViewport {
    fn scroll_offset(&self) -> f64 {
        window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
    }

    fn element_top(&self, id: &str) -> Result<Option<f64>, DomError> {
        let document = document().ok_or(DomError::NoDocument)?;
        Ok(document
            .get_element_by_id(id)
            .map(|el| el.get_bounding_client_rect().top()))
    }

    fn smooth_scroll_to(&self, top: f64) {
        let Some(window) = window() else { return };
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }

    fn scroll_into_view(&self, id: &str) -> Result<(), DomError> {
        let document = document().ok_or(DomError::NoDocument)?;
        let element = document
            .get_element_by_id(id)
            .ok_or_else(|| DomError::Inaccessible(format!("#{}", id)))?;
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        element.scroll_into_view_with_scroll_into_view_options(&options);
        Ok(())
    }

    fn push_hash(&self, hash: &str) -> Result<(), DomError> {
        let window = window().ok_or(DomError::NoWindow)?;
        let history = window
            .history()
            .map_err(|e| DomError::failed("history", e))?;
        history
            .push_state_with_url(&JsValue::NULL, "", Some(hash))
            .map_err(|e| DomError::failed("history.pushState", e))
    }
}

// =============================================================================
// Theme Side Effects
// =============================================================================

/// Set `data-theme` on the root element.
pub fn set_document_theme(theme: &str) -> Result<(), DomError> {
    let root = document()
        .ok_or(DomError::NoDocument)?
        .document_element()
        .ok_or_else(|| DomError::Inaccessible("documentElement".into()))?;
    root.set_attribute("data-theme", theme)
        .map_err(|e| DomError::failed("setAttribute", e))
}

/// Remove `filter` declarations from stylesheet rules that used to invert
/// theme icons. Icons now swap to a white variant instead.
///
/// Cross-origin sheets refuse rule access; those are skipped with a warning.
/// Returns the number of rules changed.
pub fn strip_icon_filters() -> usize {
    let Some(sheets) = document().map(|d| d.style_sheets()) else {
        return 0;
    };

    let mut stripped = 0;
    for i in 0..sheets.length() {
        let Some(sheet) = sheets
            .item(i)
            .and_then(|s| s.dyn_into::<CssStyleSheet>().ok())
        else {
            continue;
        };
        match sheet.css_rules() {
            Ok(rules) => stripped += strip_rules(&rules),
            Err(err) => {
                tracing::warn!(
                    href = sheet.href().ok().flatten().unwrap_or_default(),
                    error = ?err,
                    "cannot read stylesheet rules"
                );
            }
        }
    }
    stripped
}

fn strip_rules(rules: &CssRuleList) -> usize {
    let mut stripped = 0;
    for i in 0..rules.length() {
        let Some(rule) = rules
            .item(i)
            .and_then(|r| r.dyn_into::<CssStyleRule>().ok())
        else {
            continue;
        };
        if !rule.selector_text().contains(selectors::ICON_FILTER_RULE) {
            continue;
        }
        let style = rule.style();
        let had_filter = style
            .get_property_value("filter")
            .is_ok_and(|v| !v.is_empty());
        if had_filter && style.remove_property("filter").is_ok() {
            stripped += 1;
        }
    }
    stripped
}

/// Warm the image cache so icon swaps do not flash.
pub fn preload_images(urls: &[String]) {
    for url in urls {
        match HtmlImageElement::new() {
            Ok(img) => img.set_src(url),
            Err(err) => {
                tracing::debug!(error = ?err, "image preload unavailable");
                return;
            }
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(html: &str) -> HtmlElement {
        let document = document().unwrap();
        let host: HtmlElement = document.create_element("div").unwrap().unchecked_into();
        host.set_inner_html(html);
        document.body().unwrap().append_child(&host).unwrap();
        host
    }

    #[wasm_bindgen_test]
    fn test_query_all_in_document_order() {
        let host = mount(r#"<a data-scroll="one"></a><a data-scroll="two"></a>"#);
        let links = query_all("a[data-scroll]");
        let sections: Vec<_> = links.iter().filter_map(|l| l.attribute("data-scroll")).collect();
        assert_eq!(sections, vec!["one", "two"]);
        host.remove();
    }

    #[wasm_bindgen_test]
    fn test_element_handle_round_trip() {
        let host = mount(r#"<div id="handle-target"></div>"#);
        let el = query_one("#handle-target").unwrap();

        el.add_class("visible").unwrap();
        assert!(el.has_class("visible"));
        el.set_style("width", "85%").unwrap();
        assert_eq!(el.style("width").as_deref(), Some("85%"));
        el.set_attribute("aria-hidden", "true").unwrap();
        assert_eq!(el.attribute("aria-hidden").as_deref(), Some("true"));
        assert!(el.is(&host.first_child().unwrap()));
        host.remove();
    }

    #[wasm_bindgen_test]
    fn test_missing_section_has_no_top() {
        assert_eq!(BrowserViewport.element_top("no-such-section"), Ok(None));
    }

    #[wasm_bindgen_test]
    fn test_document_theme_attribute() {
        set_document_theme("dark").unwrap();
        let root = document().unwrap().document_element().unwrap();
        assert_eq!(root.get_attribute("data-theme").as_deref(), Some("dark"));
    }
}
