//! Projects section.
//!
//! Loads the owner's public repositories once, then filters and sorts them
//! locally through the [`ProjectManager`](crate::core::ProjectManager).

use leptos::prelude::*;
use leptos_icons::Icon;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::animation::LOADING_MARKUP;
use crate::models::{FilterButton, ProjectCard, RenderedProjects, SortKey};
use crate::utils::dom;
use crate::utils::{fetch_projects, format_count};

stylance::import_crate_style!(css, "src/components/projects/projects.module.css");

#[derive(Clone, Debug, PartialEq)]
enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

#[component]
pub fn Projects() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let projects = ctx.projects;
    let status = RwSignal::new(LoadState::Loading);

    match ctx.content.with_value(|c| c.widgets.github_user.clone()) {
        Some(user) => spawn_local(async move {
            match fetch_projects(&user).await {
                Ok(list) => {
                    projects.update(|m| m.set_projects(list));
                    status.set(LoadState::Ready);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "repository list unavailable");
                    status.set(LoadState::Failed(err.to_string()));
                }
            }
        }),
        None => status.set(LoadState::Ready),
    }

    // Cards re-render on every filter or sort change; observe the new ones
    // once the DOM has caught up.
    Effect::new(move |_| {
        projects.track();
        status.track();
        if let Err(err) = dom::request_animation_frame(move || ctx.observe_new_cards()) {
            tracing::debug!(error = %err, "card observation deferred failed");
        }
    });

    view! {
        <section id="projects" class=format!("{} animate-on-scroll", css::section)>
            <h2>"Projects"</h2>
            <div class=css::toolbar>
                <div class=css::filters role="group" aria-label="Filter projects by category">
                    {move || {
                        projects
                            .with(|m| {
                                m.filter_buttons()
                                    .into_iter()
                                    .map(|button| {
                                        let count = m.count(button.filter);
                                        (button, count)
                                    })
                                    .collect::<Vec<_>>()
                            })
                            .into_iter()
                            .map(|(button, count)| view! { <FilterToggle button count /> })
                            .collect_view()
                    }}
                </div>
                <SortSelect />
            </div>
            {move || match status.get() {
                LoadState::Loading => {
                    view! { <div class=css::status inner_html=LOADING_MARKUP></div> }.into_any()
                }
                LoadState::Failed(reason) => {
                    view! {
                        <p class=css::status role="alert">
                            "Projects could not be loaded. "
                            <span class=css::reason>{reason}</span>
                        </p>
                    }
                        .into_any()
                }
                LoadState::Ready => view! { <ProjectGrid /> }.into_any(),
            }}
        </section>
    }
}

#[component]
fn FilterToggle(button: FilterButton, count: usize) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let filter = button.filter;

    view! {
        <button
            class=css::filter
            class:active=button.active
            type="button"
            data-filter=filter.as_str()
            aria-pressed=button.active.to_string()
            on:click=move |_| {
                ctx.projects.update(|m| {
                    m.set_filter(filter);
                });
            }
        >
            {filter.label()}
            <span class=css::count>{count}</span>
        </button>
    }
}

#[component]
fn SortSelect() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let projects = ctx.projects;

    let on_change = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        match value.parse::<SortKey>() {
            Ok(key) => projects.update(|m| {
                m.set_sort(key);
            }),
            Err(err) => tracing::warn!(error = %err, "ignoring sort selection"),
        }
    };

    view! {
        <label class=css::sort>
            "Sort by"
            <select on:change=on_change>
                {SortKey::ALL
                    .into_iter()
                    .map(|key| {
                        view! {
                            <option
                                value=key.as_str()
                                selected=move || projects.with(|m| m.current_sort() == key)
                            >
                                {key.label()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </label>
    }
}

#[component]
fn ProjectGrid() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let projects = ctx.projects;

    let rendered = Memo::new(move |_| projects.with(|m| m.render()));
    let is_empty = move || rendered.with(|r| matches!(r, RenderedProjects::NoResults));
    let cards = move || match rendered.get() {
        RenderedProjects::Cards(cards) => cards,
        RenderedProjects::NoResults => Vec::new(),
    };

    view! {
        <p class=css::empty hidden=move || !is_empty()>"No projects in this category yet."</p>
        <div class=css::grid>
            <For
                each=cards
                key=|card| card.url.clone().unwrap_or_else(|| card.name.clone())
                children=move |card| view! { <ProjectTile card /> }
            />
        </div>
    }
}

#[component]
fn ProjectTile(card: ProjectCard) -> impl IntoView {
    let title = match card.url {
        Some(url) => view! {
            <a href=url target="_blank" rel="noopener noreferrer">
                {card.name}
                <Icon icon=ic::EXTERNAL_LINK />
            </a>
        }
            .into_any(),
        None => view! { <span>{card.name}</span> }.into_any(),
    };

    view! {
        <article class="card">
            <header class=css::cardHeader>
                <h3 class=css::cardTitle>{title}</h3>
                <span class=css::badge data-category=card.category.as_str()>
                    {card.category.label()}
                </span>
            </header>
            <p class=css::description>{card.description}</p>
            <footer class=css::meta>
                {card.language.map(|language| view! {
                    <span class=css::metaItem><Icon icon=ic::LANGUAGE />{language}</span>
                })}
                <span class=css::metaItem title="Stars">
                    <Icon icon=ic::STAR />{format_count(card.stars)}
                </span>
                {card.updated.map(|updated| view! {
                    <span class=css::metaItem title="Last updated">
                        <Icon icon=ic::CALENDAR />{updated}
                    </span>
                })}
            </footer>
        </article>
    }
}
