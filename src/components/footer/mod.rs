use leptos::prelude::*;

use crate::app::AppContext;
use crate::components::hero::ProfileLink;
use crate::config::APP_VERSION;

stylance::import_crate_style!(css, "src/components/footer/footer.module.css");

#[component]
pub fn Footer() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let (name, links) = ctx
        .content
        .with_value(|c| (c.profile.name.clone(), c.links.clone()));

    view! {
        <footer class=css::footer>
            <ul class=css::links>
                {links.into_iter().map(|link| view! { <ProfileLink link /> }).collect_view()}
            </ul>
            <p class=css::note>
                {name} " · Built with Rust and Leptos · v" {APP_VERSION}
            </p>
        </footer>
    }
}
