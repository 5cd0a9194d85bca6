//! Activity section: GitHub stats cards and a TradingView symbol overview.
//!
//! Stats images carry `data-github-stats` so their theme segment follows
//! theme changes. The TradingView container is filled by the enhancement
//! layer, which reads `data-symbol`.

use leptos::prelude::*;

use crate::app::AppContext;
use crate::config::github;
use crate::core::widgets::github_stats_url;

stylance::import_crate_style!(css, "src/components/widgets/widgets.module.css");

#[component]
pub fn Widgets() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let widgets = ctx.content.with_value(|c| c.widgets.clone());
    let theme = ctx.theme.get_untracked();

    let stats = widgets.github_user.map(|user| {
        let cards = [
            (github::stats_card_url(&user), format!("GitHub statistics for {}", user)),
            (github::top_languages_url(&user), format!("Most used languages of {}", user)),
        ];
        cards
            .into_iter()
            .map(|(url, alt)| {
                view! {
                    <figure class=format!("{} card", css::stats)>
                        <img
                            src=github_stats_url(&url, theme)
                            alt=alt
                            loading="lazy"
                            data-github-stats=""
                        />
                    </figure>
                }
            })
            .collect_view()
    });

    let market = widgets.tradingview_symbol.map(|symbol| {
        view! {
            <figure class=format!("{} card", css::market)>
                <div class="tradingview-widget-container" data-tradingview="" data-symbol=symbol>
                    <div class="tradingview-widget-container__widget"></div>
                </div>
            </figure>
        }
    });

    view! {
        <section id="widgets" class=format!("{} animate-on-scroll", css::section)>
            <h2>"Activity"</h2>
            <div class=css::grid>{stats} {market}</div>
        </section>
    }
}
