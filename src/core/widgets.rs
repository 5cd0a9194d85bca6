//! Third-party widget embeds that depend on the theme.
//!
//! - GitHub stats images carry a `theme=<default|dark>` query segment that is
//!   rewritten in place on every theme change.
//! - The TradingView widget reads its color theme once from an inline JSON
//!   config, so a theme change while it is on the page reloads the page.

use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::config::tradingview;
use crate::core::element::ElementHandle;
use crate::core::events::{ListenerId, ThemeBus};
use crate::models::Theme;

static THEME_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([?&])theme=[^&#]*").expect("theme parameter pattern is valid")
});

/// Value of the stats API `theme` parameter for `theme`.
pub fn stats_theme_param(theme: Theme) -> &'static str {
    if theme.is_dark() { "dark" } else { "default" }
}

/// `url` with its `theme=` segment set for `theme`, appended if missing.
pub fn github_stats_url(url: &str, theme: Theme) -> String {
    let value = stats_theme_param(theme);
    if THEME_PARAM.is_match(url) {
        return THEME_PARAM
            .replace(url, format!("${{1}}theme={}", value))
            .into_owned();
    }

    let (base, fragment) = match url.find('#') {
        Some(i) => url.split_at(i),
        None => (url, ""),
    };
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{}{}theme={}{}", base, sep, value, fragment)
}

/// Stats images captured from the page.
pub struct GithubStats<E> {
    images: Vec<E>,
}

impl<E: ElementHandle> GithubStats<E> {
    pub fn new(images: Vec<E>) -> Self {
        Self { images }
    }

    /// Rewrite every image's `src`. Returns how many changed.
    pub fn apply(&self, theme: Theme) -> usize {
        let mut changed = 0;
        for image in &self.images {
            let Some(src) = image.attribute("src") else {
                continue;
            };
            let next = github_stats_url(&src, theme);
            if next == src {
                continue;
            }
            match image.set_attribute("src", &next) {
                Ok(()) => changed += 1,
                Err(err) => tracing::warn!(error = %err, "failed to update stats image"),
            }
        }
        changed
    }

    pub fn subscribe(self: &Rc<Self>, bus: &ThemeBus) -> ListenerId {
        let stats = Rc::clone(self);
        bus.subscribe(move |event| {
            stats.apply(event.theme);
            Ok(())
        })
    }
}

/// Inline configuration of the TradingView mini symbol overview.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingViewConfig {
    pub symbol: String,
    pub width: String,
    pub height: u32,
    pub locale: String,
    pub date_range: String,
    pub color_theme: Theme,
    pub is_transparent: bool,
    pub autosize: bool,
}

impl TradingViewConfig {
    pub fn new(symbol: &str, theme: Theme) -> Self {
        Self {
            symbol: symbol.to_string(),
            width: "100%".to_string(),
            height: 220,
            locale: tradingview::LOCALE.to_string(),
            date_range: tradingview::DATE_RANGE.to_string(),
            color_theme: theme,
            is_transparent: true,
            autosize: true,
        }
    }

    /// JSON body of the embed script.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to serialize TradingView config");
            String::from("{}")
        })
    }
}

/// Tracks which theme the TradingView widget was rendered with.
#[derive(Clone, Copy, Debug)]
pub struct TradingViewState {
    rendered: Theme,
    present: bool,
}

impl TradingViewState {
    pub fn new(rendered: Theme, present: bool) -> Self {
        Self { rendered, present }
    }

    /// Whether a change to `theme` requires re-initializing the widget.
    pub fn needs_reload(&self, theme: Theme) -> bool {
        self.present && theme != self.rendered
    }
}
