//! Browser adapters and helpers.
//!
//! Provides:
//! - [`dom`] - Element capture and the browser-backed manager ports
//! - [`observer`] - IntersectionObserver wiring keyed by element id
//! - [`fetch_projects`] - Cached GitHub repository fetch with timeout
//! - [`format_count`] - Compact numbers for badges
//! - [`markdown_to_html`] - Markdown rendering with XSS sanitization

pub mod cache;
pub mod dom;
mod fetch;
mod format;
mod markdown;
pub mod observer;

pub use fetch::fetch_projects;
pub use format::format_count;
pub use markdown::markdown_to_html;
