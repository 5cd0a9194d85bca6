//! Skills section.
//!
//! Bars render empty and carry their level in `aria-valuenow`; the
//! animation manager fills them when the section scrolls into view.

use leptos::prelude::*;

use crate::app::AppContext;
use crate::models::{Skill, SkillGroup};

stylance::import_crate_style!(css, "src/components/skills/skills.module.css");

#[component]
pub fn Skills() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let groups = ctx.content.with_value(|c| c.skills.clone());

    view! {
        <section id="skills" class=format!("{} animate-on-scroll", css::section)>
            <h2>"Skills"</h2>
            <div class=css::groups>
                {groups.into_iter().map(|group| view! { <Group group /> }).collect_view()}
            </div>
        </section>
    }
}

#[component]
fn Group(group: SkillGroup) -> impl IntoView {
    view! {
        <article class="card">
            <h3 class=css::groupName>{group.name}</h3>
            {group.skills.into_iter().map(|skill| view! { <SkillBar skill /> }).collect_view()}
        </article>
    }
}

#[component]
fn SkillBar(skill: Skill) -> impl IntoView {
    let level = skill.level.to_string();
    view! {
        <div class=css::skill>
            <div class=css::label>
                <span>{skill.name.clone()}</span>
                <span class=css::level>{format!("{}%", skill.level)}</span>
            </div>
            <div class="progress">
                <div
                    class="progress-bar"
                    role="progressbar"
                    aria-label=skill.name
                    aria-valuenow=level
                    aria-valuemin="0"
                    aria-valuemax="100"
                    style="width: 0%"
                ></div>
            </div>
        </div>
    }
}
