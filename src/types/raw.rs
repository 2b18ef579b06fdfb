use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Issue record as returned by the GitHub REST issues endpoint.
///
/// The endpoint also returns pull requests; those carry a `pull_request`
/// key and are dropped before processing.
#[derive(Deserialize, Debug, Clone)]
pub struct RawIssue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub labels: Vec<RawLabel>,
    pub comments: u32,
    pub user: RawUser,
    #[serde(default)]
    pub assignees: Vec<RawUser>,
    pub milestone: Option<RawMilestone>,
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl RawIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawLabel {
    pub name: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawUser {
    pub login: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawMilestone {
    pub title: String,
}
