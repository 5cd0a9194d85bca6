use leptos::prelude::*;
use leptos_icons::Icon;

use crate::components::icons as ic;

/// Floating control that returns to the top of the page.
///
/// Hidden until the scroll manager marks it `visible`.
#[component]
pub fn BackToTop() -> impl IntoView {
    view! {
        <button
            id="back-to-top"
            class="back-to-top"
            type="button"
            title="Back to top"
            aria-label="Back to top"
            aria-hidden="true"
        >
            <Icon icon=ic::ARROW_UP />
        </button>
    }
}
