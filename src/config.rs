//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.
//! Site content is loaded at compile time using `include_str!`.

use crate::models::ProjectCategory;

// =============================================================================
// Text Assets (loaded at compile time)
// =============================================================================

/// Profile, bio, skills, experience and widget settings.
pub const SITE_CONTENT: &str = include_str!("../assets/site.toml");

// =============================================================================
// Application Metadata
// =============================================================================

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum log level forwarded to the browser console.
pub const LOG_LEVEL: tracing::Level = if cfg!(debug_assertions) {
    tracing::Level::DEBUG
} else {
    tracing::Level::INFO
};

// =============================================================================
// Storage
// =============================================================================

/// localStorage keys.
pub mod storage {
    /// Active color theme: `"light"` or `"dark"`.
    pub const THEME_KEY: &str = "theme";
    /// Theme mode: `"system"` or `"manual"`.
    pub const MODE_KEY: &str = "theme-mode";
}

/// Session cache configuration.
pub mod cache {
    /// sessionStorage key for the GitHub repository list.
    pub const PROJECTS_KEY: &str = "projects_cache";
}

// =============================================================================
// Network Configuration
// =============================================================================

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 10000;

/// GitHub REST API.
pub mod github {
    pub const API_BASE: &str = "https://api.github.com";
    /// Repositories requested per page (API maximum).
    pub const PER_PAGE: u32 = 100;
    pub const STATS_BASE: &str = "https://github-readme-stats.vercel.app/api";

    /// Repository listing URL for `user`.
    pub fn repos_url(user: &str) -> String {
        format!(
            "{}/users/{}/repos?per_page={}&sort=updated",
            API_BASE, user, PER_PAGE
        )
    }

    /// Profile stats card for `user`, without a theme segment.
    pub fn stats_card_url(user: &str) -> String {
        format!("{}?username={}&show_icons=true&hide_border=true", STATS_BASE, user)
    }

    /// Top languages card for `user`, without a theme segment.
    pub fn top_languages_url(user: &str) -> String {
        format!(
            "{}/top-langs/?username={}&layout=compact&hide_border=true",
            STATS_BASE, user
        )
    }
}

/// TradingView embed.
pub mod tradingview {
    pub const SCRIPT_SRC: &str =
        "https://s3.tradingview.com/external-embedding/embed-widget-mini-symbol-overview.js";
    pub const LOCALE: &str = "en";
    pub const DATE_RANGE: &str = "12M";
}

// =============================================================================
// DOM Hooks
// =============================================================================

/// Selectors used to capture managed elements.
pub mod selectors {
    pub const THEME_ICON: &str = "img[data-theme-icon]";
    pub const FAVICON: &str = "link[rel~='icon']";
    pub const BACK_TO_TOP: &str = "#back-to-top";
    pub const FOCUS_TARGET: &str = "h1, [data-focus-target]";
    pub const SECTIONS: &str = "section[id]";
    pub const NAV_LINKS: &str = "a[data-scroll]";
    pub const ANIMATED_SECTIONS: &str = "section.animate-on-scroll";
    pub const SKILLS_SECTION_ID: &str = "skills";
    pub const PROGRESS_BARS: &str = ".progress-bar";
    pub const CARDS: &str = ".card";
    pub const THEME_TOGGLE: &str = "[data-theme-toggle]";
    pub const GITHUB_STATS: &str = "img[data-github-stats]";
    pub const TRADINGVIEW: &str = "[data-tradingview]";
    /// Class fragment of stylesheet rules that invert icons with `filter`.
    pub const ICON_FILTER_RULE: &str = "theme-icon";
}

/// Global state classes (see `assets/main.css`).
pub mod classes {
    pub const VISIBLE: &str = "visible";
    pub const FADE_IN: &str = "fade-in";
    pub const ACTIVE: &str = "active";
}

// =============================================================================
// Icons
// =============================================================================

/// Icon set used for UI glyphs (theme toggle, badges, back-to-top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Change this value to switch glyph styles globally.
pub const ICON_THEME: IconTheme = IconTheme::Lucide;

/// Image icons with light and white variants.
pub mod icons {
    /// Filename suffix of the dark-mode (white) icon variant.
    pub const WHITE_SUFFIX: &str = "-white";
    /// Appended to `alt` while the dark variant is shown.
    pub const DARK_ALT_SUFFIX: &str = " (dark mode variant)";
}

// =============================================================================
// Scroll Configuration
// =============================================================================

pub mod scroll {
    /// Scroll offset (px) past which the back-to-top control shows.
    pub const BACK_TO_TOP_THRESHOLD: f64 = 300.0;
    /// Height (px) of the fixed navigation bar.
    pub const NAV_HEIGHT: f64 = 80.0;
    /// Delay before focusing the first heading after scrolling to top.
    pub const FOCUS_DELAY_MS: u32 = 300;
    /// Section observer thresholds.
    pub const NAV_THRESHOLDS: &[f64] = &[0.0, 0.25, 0.5, 0.75, 1.0];
}

// =============================================================================
// Animation Configuration
// =============================================================================

pub mod animation {
    pub const SECTION_THRESHOLD: f64 = 0.1;
    /// Sections reveal this many px before fully entering the viewport.
    pub const SECTION_BOTTOM_MARGIN: f64 = 50.0;
    pub const PROGRESS_THRESHOLD: f64 = 0.5;
    pub const CARD_THRESHOLD: f64 = 0.1;

    /// Delay between resetting a progress bar and filling it.
    pub const PROGRESS_FILL_DELAY_MS: u32 = 200;
    /// Per-index delay step of the staggered skills animation.
    pub const STAGGER_STEP_MS: u32 = 100;
    /// Delay before fading revealed content in.
    pub const REVEAL_DELAY_MS: u32 = 50;

    /// Attribute carrying a progress bar's target percentage.
    pub const VALUE_ATTRIBUTE: &str = "aria-valuenow";

    pub const LOADING_MARKUP: &str = r#"<div class="loading-spinner" role="status"><span class="sr-only">Loading...</span></div>"#;
}

// =============================================================================
// Projects
// =============================================================================

/// Ordered category keyword table. The first category with a keyword
/// contained in the lower-cased name + description wins.
pub const CATEGORY_KEYWORDS: &[(ProjectCategory, &[&str])] = &[
    (
        ProjectCategory::Cybersecurity,
        &[
            "security", "vulnerability", "pentest", "exploit", "malware", "forensic",
            "firewall", "phishing", "intrusion", "ctf", "nmap",
        ],
    ),
    (
        ProjectCategory::Healthcare,
        &[
            "health", "medical", "hospital", "patient", "clinic", "fhir", "hl7", "ehr",
            "diagnos",
        ],
    ),
    (
        ProjectCategory::Automation,
        &[
            "automation", "automate", "bot", "workflow", "scheduler", "pipeline", "cron",
            "scraper",
        ],
    ),
    (
        ProjectCategory::Tools,
        &["tool", "cli", "utility", "util", "helper", "extension", "plugin", "dashboard"],
    ),
];

/// Fallbacks used when rendering incomplete project records.
pub mod project_fallbacks {
    pub const NAME: &str = "Untitled";
    pub const DESCRIPTION: &str = "No description available";
}
