//! Introduction section: name, title, profile links and bio.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::models::Link;

stylance::import_crate_style!(css, "src/components/hero/hero.module.css");

#[component]
pub fn Hero() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let (profile, links) = ctx
        .content
        .with_value(|c| (c.profile.clone(), c.links.clone()));

    view! {
        <section id="about" class=format!("{} animate-on-scroll", css::hero)>
            // tabindex lets back-to-top move focus here
            <h1 class=css::name tabindex="-1">{profile.name}</h1>
            <p class=css::title>{profile.title}</p>
            <p class=css::tagline>{profile.tagline}</p>
            <div class=css::facts>
                {profile.location.map(|location| view! {
                    <span class=css::fact><Icon icon=ic::LOCATION />{location}</span>
                })}
                {profile.email.map(|email| view! {
                    <a class=css::fact href=format!("mailto:{}", email)>
                        <Icon icon=ic::MAIL />{email.clone()}
                    </a>
                })}
            </div>
            <ul class=css::links>
                {links.into_iter().map(|link| view! { <ProfileLink link /> }).collect_view()}
            </ul>
            // Filled with the rendered bio once the page is enhanced
            <div class=css::bio data-bio="" aria-live="polite"></div>
        </section>
    }
}

/// External profile link with a theme-aware icon.
#[component]
pub fn ProfileLink(link: Link) -> impl IntoView {
    view! {
        <li>
            <a
                class=css::link
                href=link.url
                target="_blank"
                rel="noopener noreferrer"
            >
                <img
                    class="theme-icon"
                    src=link.icon
                    alt=link.label.clone()
                    width="20"
                    height="20"
                    data-theme-icon=""
                />
                <span>{link.label}</span>
            </a>
        </li>
    }
}
