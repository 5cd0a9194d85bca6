//! Project list categorization, filtering and sorting.
//!
//! Records come from the GitHub API (see `utils::fetch`). Categories are a
//! pure function of name + description text and the ordered keyword table in
//! [`crate::config::CATEGORY_KEYWORDS`]: the first category with a matching
//! keyword wins.

use std::cmp::Ordering;

use crate::config::{CATEGORY_KEYWORDS, project_fallbacks};
use crate::models::{
    FilterButton, ProjectCard, ProjectCategory, ProjectFilter, ProjectRecord, RenderedProjects,
    SortKey,
};

/// Classify a project by keyword substring match.
pub fn categorize_project(project: &ProjectRecord) -> ProjectCategory {
    let text = format!(
        "{} {}",
        project.name.as_deref().unwrap_or(""),
        project.description.as_deref().unwrap_or("")
    )
    .to_lowercase();

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(ProjectCategory::Other)
}

/// Projects matching `filter`, in their original order.
pub fn filter_projects(projects: &[ProjectRecord], filter: ProjectFilter) -> Vec<ProjectRecord> {
    match filter {
        ProjectFilter::All => projects.to_vec(),
        ProjectFilter::Category(category) => projects
            .iter()
            .filter(|p| categorize_project(p) == category)
            .cloned()
            .collect(),
    }
}

/// A newly ordered copy of `projects`. The sort is stable.
pub fn sort_projects(projects: &[ProjectRecord], key: SortKey) -> Vec<ProjectRecord> {
    let mut sorted = projects.to_vec();
    sorted.sort_by(|a, b| compare(a, b, key));
    sorted
}

fn compare(a: &ProjectRecord, b: &ProjectRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a
            .name
            .as_deref()
            .unwrap_or("")
            .cmp(b.name.as_deref().unwrap_or("")),
        SortKey::Stars => b.stars.unwrap_or(0).cmp(&a.stars.unwrap_or(0)),
        // ISO-8601 UTC timestamps order lexicographically; missing sorts last.
        SortKey::Created => b.created.as_deref().cmp(&a.created.as_deref()),
        SortKey::Updated => b.updated.as_deref().cmp(&a.updated.as_deref()),
    }
}

/// Build display cards, or the "no results" placeholder for an empty list.
pub fn render_projects(projects: &[ProjectRecord]) -> RenderedProjects {
    if projects.is_empty() {
        return RenderedProjects::NoResults;
    }
    RenderedProjects::Cards(projects.iter().map(project_card).collect())
}

fn project_card(project: &ProjectRecord) -> ProjectCard {
    ProjectCard {
        name: project
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| project_fallbacks::NAME.to_string()),
        description: project
            .description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| project_fallbacks::DESCRIPTION.to_string()),
        url: project.url.clone(),
        language: project.language.clone(),
        stars: project.stars.unwrap_or(0),
        category: categorize_project(project),
        updated: project
            .updated
            .as_deref()
            .and_then(|ts| ts.get(..10))
            .map(str::to_string),
    }
}

/// Project list with its current filter and sort.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectManager {
    projects: Vec<ProjectRecord>,
    current_filter: ProjectFilter,
    current_sort: SortKey,
}

impl ProjectManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the project list. Forks are dropped.
    pub fn set_projects(&mut self, projects: Vec<ProjectRecord>) {
        self.projects = projects.into_iter().filter(|p| !p.fork).collect();
        tracing::debug!(count = self.projects.len(), "projects loaded");
    }

    pub fn projects(&self) -> &[ProjectRecord] {
        &self.projects
    }

    pub fn current_filter(&self) -> ProjectFilter {
        self.current_filter
    }

    pub fn current_sort(&self) -> SortKey {
        self.current_sort
    }

    pub fn filter_projects(&self) -> Vec<ProjectRecord> {
        filter_projects(&self.projects, self.current_filter)
    }

    /// Filter, then sort.
    pub fn visible_projects(&self) -> Vec<ProjectRecord> {
        sort_projects(&self.filter_projects(), self.current_sort)
    }

    pub fn render(&self) -> RenderedProjects {
        render_projects(&self.visible_projects())
    }

    /// Change the filter and re-render.
    pub fn set_filter(&mut self, filter: ProjectFilter) -> RenderedProjects {
        self.current_filter = filter;
        self.render()
    }

    /// Change the sort and re-render.
    pub fn set_sort(&mut self, key: SortKey) -> RenderedProjects {
        self.current_sort = key;
        self.render()
    }

    /// Filter buttons; exactly one is active.
    pub fn filter_buttons(&self) -> Vec<FilterButton> {
        ProjectFilter::options()
            .map(|filter| FilterButton {
                filter,
                active: filter == self.current_filter,
            })
            .collect()
    }

    /// Number of projects per category, for button badges.
    pub fn count(&self, filter: ProjectFilter) -> usize {
        match filter {
            ProjectFilter::All => self.projects.len(),
            ProjectFilter::Category(c) => self
                .projects
                .iter()
                .filter(|p| categorize_project(p) == c)
                .count(),
        }
    }
}
