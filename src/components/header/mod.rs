//! Site header.
//!
//! Fixed navigation bar with in-page links and the theme controls. Links
//! carry `data-scroll` so the scroll manager can smooth-scroll to their
//! section and mark the one in view as active.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::models::ThemeMode;

stylance::import_crate_style!(css, "src/components/header/header.module.css");

/// Section id and link label, in page order.
const NAV_ITEMS: &[(&str, &str)] = &[
    ("about", "About"),
    ("skills", "Skills"),
    ("projects", "Projects"),
    ("experience", "Experience"),
    ("widgets", "Activity"),
];

#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let name = ctx.content.with_value(|c| c.profile.name.clone());

    view! {
        <header class=css::header>
            <nav class=css::nav aria-label="Primary">
                <a class=css::brand href="#about">{name}</a>
                <ul class=css::links>
                    {NAV_ITEMS
                        .iter()
                        .map(|(id, label)| {
                            view! {
                                <li>
                                    <a class="nav-link" href=format!("#{}", id) data-scroll=*id>
                                        {*label}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
                <ThemeControls />
            </nav>
        </header>
    }
}

/// Mode toggle (system/manual) and, in manual mode, the light/dark toggle.
#[component]
fn ThemeControls() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let mode_title = Signal::derive(move || match ctx.mode.get() {
        ThemeMode::System => "Following system theme (click to choose manually)",
        ThemeMode::Manual => "Using manual theme (click to follow system)",
    });
    let theme_title = Signal::derive(move || {
        if ctx.theme.get().is_dark() {
            "Switch to light theme"
        } else {
            "Switch to dark theme"
        }
    });

    view! {
        <div class=css::controls>
            <button
                class=css::control
                type="button"
                on:click=move |_| ctx.toggle_mode()
                title=mode_title
                aria-label=mode_title
                aria-pressed=move || (ctx.mode.get() == ThemeMode::Manual).to_string()
            >
                {move || {
                    let icon = match ctx.mode.get() {
                        ThemeMode::System => ic::SYSTEM,
                        ThemeMode::Manual => ic::SUN,
                    };
                    view! { <Icon icon=icon /> }
                }}
            </button>
            <button
                class=css::control
                type="button"
                data-theme-toggle=""
                hidden=move || !ctx.toggle_visible.get()
                on:click=move |_| ctx.toggle_theme()
                title=theme_title
                aria-label=theme_title
            >
                {move || {
                    let icon = if ctx.theme.get().is_dark() { ic::SUN } else { ic::MOON };
                    view! { <Icon icon=icon /> }
                }}
            </button>
        </div>
    }
}
