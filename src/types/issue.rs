use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, TechTag};

/// Processed issue with derived attributes. Immutable once built; the
/// derived fields are pure functions of the raw record and the
/// processing-time `now`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Issue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub body: String,
    pub state: IssueState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub labels: Vec<String>,
    pub comments_count: u32,
    pub author: String,
    pub assignees: Vec<String>,
    pub milestone: Option<String>,

    // Derived at processing time.
    pub category: Category,
    pub tech_context: Vec<TechTag>,
    pub error_patterns: Vec<String>,
    pub has_solution: bool,
    pub is_recent: bool,
    pub engagement_score: u32,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

impl Issue {
    pub fn is_open(&self) -> bool {
        self.state == IssueState::Open
    }

    pub fn is_closed(&self) -> bool {
        self.state == IssueState::Closed
    }
}
