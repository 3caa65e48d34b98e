//! Record types for the two JSON documents.
//!
//! Shapes mirror the documents the site ships:
//! - `publications.json`: `{ publications: [...], last_updated, total_publications }`
//! - `research-projects.json`: `{ projects: [...] }`
//!
//! Records are immutable after decode and render in document order. A
//! document missing its array field decodes as an empty sequence.

use serde::{Deserialize, Serialize};

/// Publication year as stored upstream: sometimes a string, sometimes a
/// bare number. Not rendered; carried for the refresher round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Year::Number(n) => write!(f, "{n}"),
            Year::Text(s) => f.write_str(s),
        }
    }
}

/// One publication record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    pub venue: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Year>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scholar_link: Option<String>,
}

impl Publication {
    /// Best available target: direct paper link, then the Scholar citation
    /// page, then the placeholder anchor.
    pub fn best_link(&self) -> &str {
        self.link
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.scholar_link.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("#")
    }
}

/// One research project record. Institution and period are carried in the
/// document but not rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub institution: String,
    pub period: String,
    pub description: String,
    pub technologies: String,
    /// Glyph class on the surrounding page's icon font.
    pub icon: String,
}

/// The publications document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicationsDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_publications: Option<usize>,
    #[serde(default)]
    pub publications: Vec<Publication>,
}

/// The research projects document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectsDocument {
    #[serde(default)]
    pub projects: Vec<Project>,
}
