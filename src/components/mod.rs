//! UI components built with Leptos.
//!
//! - [`Header`] - Fixed navigation with the theme and mode toggles
//! - [`Hero`] - Name, links and bio
//! - [`Skills`] - Skill groups with animated progress bars
//! - [`Projects`] - GitHub repositories with category filter and sort
//! - [`Experience`] - Work history and education
//! - [`Widgets`] - GitHub stats cards and the TradingView embed
//! - [`Footer`], [`BackToTop`] - Page chrome
//! - [`icons`] - Centralized glyph definitions (change the icon set here)
//!
//! Elements the enhancement layer captures keep static `class` attributes:
//! the managers add and remove state classes on them directly.

mod back_to_top;
mod experience;
mod footer;
mod header;
mod hero;
pub mod icons;
mod projects;
mod skills;
mod widgets;

pub use back_to_top::BackToTop;
pub use experience::Experience;
pub use footer::Footer;
pub use header::Header;
pub use hero::Hero;
pub use projects::Projects;
pub use skills::Skills;
pub use widgets::Widgets;
