//! Static site content, parsed from `assets/site.toml`.

use serde::Deserialize;

use crate::config::SITE_CONTENT;
use crate::core::error::ContentError;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SiteContent {
    pub profile: Profile,
    /// Markdown.
    pub bio: String,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub widgets: Widgets,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SkillGroup {
    pub name: String,
    pub skills: Vec<Skill>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Proficiency, 0-100.
    pub level: u8,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub period: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Education {
    pub degree: String,
    pub school: String,
    pub period: String,
}

/// External profile link with a theme-aware icon.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
    /// Light-variant icon path; the dark variant follows the `-white` suffix.
    pub icon: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Widgets {
    /// GitHub account for the project list and stats cards.
    #[serde(default)]
    pub github_user: Option<String>,
    /// TradingView symbol, e.g. `"NASDAQ:AAPL"`.
    #[serde(default)]
    pub tradingview_symbol: Option<String>,
}

impl SiteContent {
    /// Parse and validate content.
    pub fn parse(source: &str) -> Result<Self, ContentError> {
        let content: SiteContent =
            toml::from_str(source).map_err(|e| ContentError::Parse(e.to_string()))?;

        if let Some(skill) = content
            .skills
            .iter()
            .flat_map(|g| &g.skills)
            .find(|s| s.level > 100)
        {
            return Err(ContentError::Parse(format!(
                "skill `{}` has level {} (max 100)",
                skill.name, skill.level
            )));
        }
        Ok(content)
    }

    /// The content embedded at build time.
    pub fn load() -> Result<Self, ContentError> {
        Self::parse(SITE_CONTENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_content_parses() {
        let content = SiteContent::load().unwrap();
        assert!(!content.profile.name.is_empty());
        assert!(!content.skills.is_empty());
        assert!(content.widgets.github_user.is_some());
    }

    #[test]
    fn test_minimal_content() {
        let content = SiteContent::parse(
            r#"
            bio = "Hello"
            [profile]
            name = "A"
            title = "B"
            "#,
        )
        .unwrap();
        assert!(content.skills.is_empty());
        assert_eq!(content.widgets, Widgets::default());
    }

    #[test]
    fn test_rejects_out_of_range_level() {
        let err = SiteContent::parse(
            r#"
            bio = ""
            [profile]
            name = "A"
            title = "B"
            [[skills]]
            name = "Lang"
            skills = [{ name = "Rust", level = 140 }]
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Rust"));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(matches!(
            SiteContent::parse("profile = ["),
            Err(ContentError::Parse(_))
        ));
    }
}
