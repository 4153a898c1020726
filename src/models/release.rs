use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A release as seen by the pipeline. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Opaque stable identifier (the numeric GitHub release id).
    pub id: String,
    pub title: String,
    pub body: String,
    pub url: String,
}

/// Raw release payload from the GitHub REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRelease {
    pub id: u64,
    pub tag_name: String,
    pub name: Option<String>,
    pub body: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub prerelease: bool,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<GitHubRelease> for Release {
    fn from(raw: GitHubRelease) -> Self {
        let title = raw
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or(raw.tag_name);
        let body = raw
            .body
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| "No release notes provided".to_string());

        Self {
            id: raw.id.to_string(),
            title,
            body,
            url: raw.html_url,
        }
    }
}
