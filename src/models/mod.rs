//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`Theme`], [`ThemeMode`] - The two persisted theme flags
//! - [`ProjectRecord`], [`ProjectCategory`], [`ProjectFilter`], [`SortKey`] - GitHub project list
//! - [`ProjectCard`], [`RenderedProjects`], [`FilterButton`] - Project list view models
//! - [`SiteContent`] - Static profile, skills and experience content

mod content;
mod project;
mod theme;

pub use content::{Education, Experience, Link, SiteContent, Skill, SkillGroup};
pub use project::{
    FilterButton, ProjectCard, ProjectCategory, ProjectFilter, ProjectRecord, RenderedProjects,
    SortKey,
};
pub use theme::{Theme, ThemeMode};
