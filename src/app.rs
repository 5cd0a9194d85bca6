//! Root application module.
//!
//! Contains the main App component, the [`AppContext`] shared with every
//! section, and the start-up sequence: theme first, page render, then the
//! progressive enhancements over the rendered DOM.

use leptos::prelude::*;
use leptos_use::use_media_query;

use crate::components::{
    BackToTop, Experience, Footer, Header, Hero, Projects, Skills, Widgets,
};
use crate::core::error::DomError;
use crate::core::{LocalStore, ProjectManager, ThemeBus, ThemeManager, ThemeSurface};
use crate::enhance::Enhancements;
use crate::models::{SiteContent, Theme, ThemeMode};
use crate::utils::dom;

type SiteThemeManager = ThemeManager<LocalStore, PageTheme>;

// ============================================================================
// Theme Surface
// ============================================================================

/// Applies the theme to `<html data-theme>` and drives the manual toggle's
/// visibility through a signal the header reads.
#[derive(Clone, Copy)]
pub struct PageTheme {
    toggle_visible: RwSignal<bool>,
}

impl ThemeSurface for PageTheme {
    fn apply_theme(&self, theme: Theme) -> Result<(), DomError> {
        dom::set_document_theme(theme.as_str())
    }

    fn show_manual_toggle(&self, visible: bool) -> Result<(), DomError> {
        self.toggle_visible.set(visible);
        Ok(())
    }
}

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide context.
///
/// This context is provided at the root of the component tree and can be
/// accessed from any child component using `use_context::<AppContext>()`.
///
/// Managers that hold browser handles are not `Send`, so they live in local
/// stored values; components see plain signals mirrored from the theme bus.
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Active color theme.
    pub theme: RwSignal<Theme>,
    /// System or manual theme mode.
    pub mode: RwSignal<ThemeMode>,
    /// Whether the manual light/dark toggle is shown.
    pub toggle_visible: RwSignal<bool>,
    /// Repository list with its filter and sort state.
    pub projects: RwSignal<ProjectManager>,
    /// Static site content.
    pub content: StoredValue<SiteContent>,
    theme_manager: StoredValue<SiteThemeManager, LocalStorage>,
    enhancements: StoredValue<Option<Enhancements>, LocalStorage>,
}

impl AppContext {
    /// Resolve the theme, apply it, and mirror theme events into signals.
    fn new(content: SiteContent, system_theme: Theme) -> Self {
        let toggle_visible = RwSignal::new(false);
        let bus = ThemeBus::new();
        let manager = ThemeManager::new(
            LocalStore::new(),
            PageTheme { toggle_visible },
            bus.clone(),
            Some(system_theme),
        );

        let theme = RwSignal::new(manager.current_theme());
        let mode = RwSignal::new(manager.current_mode());
        bus.subscribe(move |event| {
            theme.set(event.theme);
            mode.set(event.mode);
            Ok(())
        });

        tracing::info!(theme = %manager.current_theme(), mode = %manager.current_mode(), "theme resolved");

        Self {
            theme,
            mode,
            toggle_visible,
            projects: RwSignal::new(ProjectManager::new()),
            content: StoredValue::new(content),
            theme_manager: StoredValue::new_local(manager),
            enhancements: StoredValue::new_local(None),
        }
    }

    pub fn toggle_theme(&self) {
        self.theme_manager.update_value(|m| {
            m.toggle_theme();
        });
    }

    pub fn toggle_mode(&self) {
        self.theme_manager.update_value(|m| {
            m.toggle_mode();
        });
    }

    fn on_system_change(&self, prefers_dark: bool) {
        self.theme_manager
            .update_value(|m| m.on_system_change(prefers_dark));
    }

    /// Attach DOM enhancements and bring them in line with the theme.
    fn enhance(&self) {
        let bio = self.content.with_value(|c| c.bio.clone());
        let page = self
            .theme_manager
            .with_value(|m| Enhancements::attach(m.bus(), m.current_theme(), &bio));
        self.enhancements.set_value(Some(page));
        self.theme_manager.with_value(|m| m.announce());
    }

    /// Start observing cards rendered after start-up.
    pub fn observe_new_cards(&self) {
        self.enhancements.with_value(|page| {
            if let Some(page) = page {
                page.observe_new_cards();
            }
        });
    }
}

// ============================================================================
// App
// ============================================================================

/// Root application component with error boundary.
///
/// Content that fails to load surfaces through the boundary's fallback.
#[component]
pub fn App() -> impl IntoView {
    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <main class="fatal">
                    <h1>"Something went wrong"</h1>
                    <p>"The page could not be loaded. Please try reloading."</p>
                    <ul>
                        {move || errors.get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect::<Vec<_>>()
                        }
                    </ul>
                    <button on:click=move |_| dom::reload_page()>"Reload Page"</button>
                </main>
            }
        >
            {SiteContent::load().map(|content| view! { <Site content /> })}
        </ErrorBoundary>
    }
}

/// The single-page site.
#[component]
fn Site(content: SiteContent) -> impl IntoView {
    let prefers_dark = use_media_query("(prefers-color-scheme: dark)");
    let ctx = AppContext::new(content, Theme::from_dark(prefers_dark.get_untracked()));
    provide_context(ctx);

    // Follow the OS preference after start-up; the initial value is already
    // reflected in the resolved theme.
    Effect::new(move |previous: Option<bool>| {
        let dark = prefers_dark.get();
        if previous.is_some_and(|p| p != dark) {
            ctx.on_system_change(dark);
        }
        dark
    });

    // Effects run after the first render, so every section is in the DOM.
    Effect::new(move |_| ctx.enhance());

    view! {
        <Header />
        <main id="main">
            <Hero />
            <Skills />
            <Projects />
            <Experience />
            <Widgets />
        </main>
        <Footer />
        <BackToTop />
    }
}
