//! GitHub repository records and the project list's view state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::UnknownValue;

/// One repository as returned by the GitHub API.
///
/// Every field is optional; records from caches or partial responses must
/// still render.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "html_url")]
    pub url: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, alias = "stargazers_count")]
    pub stars: Option<u64>,
    /// ISO-8601 creation time.
    #[serde(default, alias = "created_at")]
    pub created: Option<String>,
    /// ISO-8601 last update time.
    #[serde(default, alias = "updated_at")]
    pub updated: Option<String>,
    #[serde(default)]
    pub fork: bool,
}

/// Category assigned by keyword matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectCategory {
    Cybersecurity,
    Healthcare,
    Automation,
    Tools,
    Other,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 5] = [
        ProjectCategory::Cybersecurity,
        ProjectCategory::Healthcare,
        ProjectCategory::Automation,
        ProjectCategory::Tools,
        ProjectCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectCategory::Cybersecurity => "cybersecurity",
            ProjectCategory::Healthcare => "healthcare",
            ProjectCategory::Automation => "automation",
            ProjectCategory::Tools => "tools",
            ProjectCategory::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectCategory::Cybersecurity => "Cybersecurity",
            ProjectCategory::Healthcare => "Healthcare",
            ProjectCategory::Automation => "Automation",
            ProjectCategory::Tools => "Tools",
            ProjectCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectCategory {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownValue::new("category", s))
    }
}

/// Which categories the project list shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ProjectFilter {
    #[default]
    All,
    Category(ProjectCategory),
}

impl ProjectFilter {
    /// Filter buttons in display order.
    pub fn options() -> impl Iterator<Item = ProjectFilter> {
        std::iter::once(ProjectFilter::All)
            .chain(ProjectCategory::ALL.into_iter().map(ProjectFilter::Category))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectFilter::All => "all",
            ProjectFilter::Category(c) => c.as_str(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectFilter::All => "All",
            ProjectFilter::Category(c) => c.label(),
        }
    }
}

impl FromStr for ProjectFilter {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(ProjectFilter::All);
        }
        s.parse::<ProjectCategory>()
            .map(ProjectFilter::Category)
            .map_err(|_| UnknownValue::new("filter", s))
    }
}

/// Ordering of the project list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Name, ascending.
    Name,
    /// Star count, descending.
    Stars,
    /// Creation time, newest first.
    Created,
    /// Last update, newest first.
    #[default]
    Updated,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Updated, SortKey::Created, SortKey::Stars, SortKey::Name];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Stars => "stars",
            SortKey::Created => "created",
            SortKey::Updated => "updated",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Stars => "Stars",
            SortKey::Created => "Newest",
            SortKey::Updated => "Recently updated",
        }
    }
}

impl FromStr for SortKey {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownValue::new("sort key", s))
    }
}

/// Display-ready project, with fallbacks applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectCard {
    pub name: String,
    pub description: String,
    pub url: Option<String>,
    pub language: Option<String>,
    pub stars: u64,
    pub category: ProjectCategory,
    /// `YYYY-MM-DD` of the last update.
    pub updated: Option<String>,
}

/// Result of rendering a project list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderedProjects {
    NoResults,
    Cards(Vec<ProjectCard>),
}

/// State of one filter button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterButton {
    pub filter: ProjectFilter,
    pub active: bool,
}
