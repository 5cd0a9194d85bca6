//! Work history and education.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::models::{self, Education};

stylance::import_crate_style!(css, "src/components/experience/experience.module.css");

#[component]
pub fn Experience() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let (roles, education) = ctx
        .content
        .with_value(|c| (c.experience.clone(), c.education.clone()));

    view! {
        <section id="experience" class=format!("{} animate-on-scroll", css::section)>
            <h2>"Experience"</h2>
            <ol class=css::timeline>
                {roles.into_iter().map(|role| view! { <Role role /> }).collect_view()}
            </ol>
            {(!education.is_empty()).then(|| view! {
                <h3 class=css::subheading><Icon icon=ic::EDUCATION />"Education"</h3>
                <ul class=css::education>
                    {education.into_iter().map(|entry| view! { <Degree entry /> }).collect_view()}
                </ul>
            })}
        </section>
    }
}

#[component]
fn Role(role: models::Experience) -> impl IntoView {
    view! {
        <li class="card">
            <header class=css::roleHeader>
                <h3 class=css::role><Icon icon=ic::WORK />{role.role}</h3>
                <span class=css::period>{role.period}</span>
            </header>
            <p class=css::company>{role.company}</p>
            <p>{role.summary}</p>
            <ul class=css::highlights>
                {role.highlights.into_iter().map(|h| view! { <li>{h}</li> }).collect_view()}
            </ul>
        </li>
    }
}

#[component]
fn Degree(entry: Education) -> impl IntoView {
    view! {
        <li class=css::degree>
            <strong>{entry.degree}</strong>
            <span>{entry.school}</span>
            <span class=css::period>{entry.period}</span>
        </li>
    }
}
