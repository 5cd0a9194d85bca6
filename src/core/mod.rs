//! Client-side behavior of the site, independent of the browser.
//!
//! Each manager owns one concern and talks to the page through small traits
//! (see [`element`], [`storage`], [`scroll::Viewport`], [`theme::ThemeSurface`]):
//! - [`ThemeManager`] - light/dark theme and system/manual mode
//! - [`IconManager`] - icon variant swapping on theme change
//! - [`ScrollManager`] - back-to-top, section navigation, active nav link
//! - [`AnimationManager`] - reveal-on-scroll effects
//! - [`ProjectManager`] - project categorization, filtering and sorting

pub mod animation;
pub mod element;
pub mod error;
pub mod events;
pub mod icons;
pub mod projects;
pub mod scroll;
pub mod storage;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod testing;

pub use animation::{AnimationManager, AnimationTargets};
pub use events::{ThemeBus, ThemeChanged};
pub use icons::IconManager;
pub use projects::ProjectManager;
pub use scroll::{NavLink, ScrollManager, ScrollTargets};
pub use storage::{KeyValueStore, LocalStore};
pub use theme::{ThemeManager, ThemeSurface};
