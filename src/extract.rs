//! Feature extraction: turns raw GitHub records into processed issues
//! with category, tech context, error patterns, and heuristic scores.

use chrono::{DateTime, Duration, Utc};

use crate::types::{Category, Issue, IssueState, RawIssue, TechTag};

/// Issues created within this window count as recent.
const RECENT_WINDOW_DAYS: i64 = 90;

/// Engagement scores are clamped to this ceiling.
pub const MAX_ENGAGEMENT: u32 = 50;

/// Labels that map straight to the enhancement category (exact match).
const ENHANCEMENT_LABELS: [&str; 3] = ["enhancement", "feature", "type/enhancement"];

/// Literal error indicators scanned for in title + body, in this order.
const ERROR_KEYWORDS: [&str; 11] = [
    "error:",
    "failed:",
    "panic:",
    "exception:",
    "timeout:",
    "connection refused",
    "out of memory",
    "deadlock",
    "cannot connect",
    "permission denied",
    "not found",
];

/// Process one raw issue. Pure given a fixed `now`; callers must capture
/// `now` once per run so the recency cutoff is consistent across issues.
pub fn process_issue(raw: &RawIssue, now: DateTime<Utc>) -> Issue {
    let body = raw.body.clone().unwrap_or_default();
    let labels: Vec<String> = raw.labels.iter().map(|l| l.name.clone()).collect();
    let state = if raw.state == "closed" {
        IssueState::Closed
    } else {
        IssueState::Open
    };
    let text = format!("{} {}", raw.title, body).to_lowercase();

    Issue {
        id: raw.id,
        number: raw.number,
        title: raw.title.clone(),
        state,
        created_at: raw.created_at,
        updated_at: raw.updated_at,
        closed_at: raw.closed_at,
        comments_count: raw.comments,
        author: raw.user.login.clone(),
        assignees: raw.assignees.iter().map(|u| u.login.clone()).collect(),
        milestone: raw.milestone.as_ref().map(|m| m.title.clone()),
        category: categorize(&labels, &raw.title),
        tech_context: extract_tech_context(&text),
        error_patterns: extract_error_patterns(&text),
        has_solution: state == IssueState::Closed && raw.comments > 0,
        is_recent: is_recent(raw.created_at, now),
        engagement_score: engagement_score(raw),
        body,
        labels,
    }
}

/// Assign a category from labels and title keywords.
///
/// Rules are evaluated in strict priority order and the first match wins:
/// label rules before title rules, so an issue labeled `bug` with a
/// performance title is still a bug.
pub fn categorize(labels: &[String], title: &str) -> Category {
    let labels: Vec<String> = labels.iter().map(|l| l.to_lowercase()).collect();
    let title = title.to_lowercase();

    if labels.iter().any(|l| l.contains("bug")) {
        Category::Bug
    } else if labels
        .iter()
        .any(|l| ENHANCEMENT_LABELS.contains(&l.as_str()))
    {
        Category::Enhancement
    } else if labels.iter().any(|l| l.contains("question")) {
        Category::Question
    } else if labels.iter().any(|l| l.contains("help")) {
        Category::Help
    } else if contains_any(&title, &["performance", "slow", "optimization", "latency"]) {
        Category::Performance
    } else if contains_any(&title, &["configuration", "config", "setup", "install"]) {
        Category::Configuration
    } else if contains_any(&title, &["migration", "migrate", "import"]) {
        Category::Migration
    } else if contains_any(&title, &["error", "fail", "panic", "crash"]) {
        Category::Error
    } else if contains_any(&title, &["documentation", "doc", "readme"]) {
        Category::Documentation
    } else {
        Category::Other
    }
}

/// Collect every tech tag whose trigger substrings appear in the
/// lower-cased issue text. Result is in tag enumeration order.
pub fn extract_tech_context(text: &str) -> Vec<TechTag> {
    TechTag::ALL
        .into_iter()
        .filter(|tag| contains_any(text, tag.triggers()))
        .collect()
}

/// Collect error indicator keywords found in the issue text, in fixed
/// scan order. Each keyword is checked once, so no duplicates.
pub fn extract_error_patterns(text: &str) -> Vec<String> {
    ERROR_KEYWORDS
        .into_iter()
        .filter(|keyword| text.contains(keyword))
        .map(String::from)
        .collect()
}

/// True when the issue was created within the recency window before `now`.
pub fn is_recent(created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(created_at) < Duration::days(RECENT_WINDOW_DAYS)
}

/// Heuristic activity score in [0, 50]:
/// comments (2 each, capped at 20) + labels + assignees (3 each)
/// + 5 for a milestone, clamped.
pub fn engagement_score(raw: &RawIssue) -> u32 {
    let mut score = raw.comments.saturating_mul(2).min(20);
    score += raw.labels.len() as u32;
    score += (raw.assignees.len() as u32).saturating_mul(3);
    if raw.milestone.is_some() {
        score += 5;
    }
    score.min(MAX_ENGAGEMENT)
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RawLabel, RawMilestone, RawUser};

    fn raw_issue(title: &str, body: &str, state: &str, labels: &[&str], comments: u32) -> RawIssue {
        RawIssue {
            id: 1,
            number: 1,
            title: title.to_string(),
            body: Some(body.to_string()),
            state: state.to_string(),
            created_at: "2024-01-15T10:00:00Z".parse().unwrap(),
            updated_at: "2024-01-16T10:00:00Z".parse().unwrap(),
            closed_at: None,
            labels: labels
                .iter()
                .map(|name| RawLabel {
                    name: name.to_string(),
                })
                .collect(),
            comments,
            user: RawUser {
                login: "alice".to_string(),
            },
            assignees: Vec::new(),
            milestone: None,
            pull_request: None,
        }
    }

    fn as_strings(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_categorize_label_priority() {
        // Label rules beat title rules, and bug beats everything.
        let labels = as_strings(&["bug", "question"]);
        assert_eq!(categorize(&labels, "anything"), Category::Bug);

        let labels = as_strings(&["type/bug"]);
        assert_eq!(categorize(&labels, "slow performance"), Category::Bug);
    }

    #[test]
    fn test_categorize_enhancement_exact_label() {
        let labels = as_strings(&["type/enhancement"]);
        assert_eq!(categorize(&labels, "whatever"), Category::Enhancement);

        // Substring is not enough for enhancement labels.
        let labels = as_strings(&["my-enhancement-ideas"]);
        assert_eq!(categorize(&labels, "whatever"), Category::Other);
    }

    #[test]
    fn test_categorize_title_keywords() {
        let none: Vec<String> = Vec::new();
        assert_eq!(categorize(&none, "Slow query latency"), Category::Performance);
        assert_eq!(categorize(&none, "Install fails on arm"), Category::Configuration);
        assert_eq!(categorize(&none, "Data import stuck"), Category::Migration);
        assert_eq!(categorize(&none, "Panic on startup"), Category::Error);
        assert_eq!(categorize(&none, "Update the readme"), Category::Documentation);
        assert_eq!(categorize(&none, "Hello world"), Category::Other);
    }

    #[test]
    fn test_tech_context_triggers() {
        let tech = extract_tech_context("running k8s with a helm chart");
        assert_eq!(tech, vec![TechTag::Kubernetes]);

        // Multiple tags, returned in enumeration order.
        let tech = extract_tech_context("docker container is slow on aws");
        assert_eq!(tech, vec![TechTag::Docker, TechTag::Cloud, TechTag::Performance]);

        assert!(extract_tech_context("nothing relevant here").is_empty());
    }

    #[test]
    fn test_error_patterns_scan_order() {
        let patterns =
            extract_error_patterns("got out of memory then error: connection refused");
        assert_eq!(patterns, vec!["error:", "connection refused", "out of memory"]);
    }

    #[test]
    fn test_is_recent_window() {
        let now: DateTime<Utc> = "2024-06-01T00:00:00Z".parse().unwrap();
        let inside: DateTime<Utc> = "2024-04-01T00:00:00Z".parse().unwrap();
        let outside: DateTime<Utc> = "2024-01-01T00:00:00Z".parse().unwrap();
        assert!(is_recent(inside, now));
        assert!(!is_recent(outside, now));
        // Exactly on the boundary is not recent.
        let boundary = now - Duration::days(90);
        assert!(!is_recent(boundary, now));
    }

    #[test]
    fn test_engagement_score_bounds_and_monotonicity() {
        let base = raw_issue("t", "", "open", &[], 0);
        assert_eq!(engagement_score(&base), 0);

        let mut loaded = raw_issue("t", "", "open", &["a", "b", "c"], 100);
        loaded.assignees = vec![
            RawUser {
                login: "a".to_string(),
            };
            20
        ];
        loaded.milestone = Some(RawMilestone {
            title: "v1".to_string(),
        });
        assert_eq!(engagement_score(&loaded), MAX_ENGAGEMENT);

        // More comments never lowers the score.
        let few = raw_issue("t", "", "open", &[], 2);
        let more = raw_issue("t", "", "open", &[], 5);
        assert!(engagement_score(&more) >= engagement_score(&few));
    }

    #[test]
    fn test_process_issue_worked_example() {
        // Closed k8s bug with 12 comments and one label scores 20 + 1.
        let raw = raw_issue(
            "TiDB connection timeout in Kubernetes cluster",
            "Getting connection timeouts when running in a k8s environment",
            "closed",
            &["type/bug"],
            12,
        );
        let now: DateTime<Utc> = "2024-02-01T00:00:00Z".parse().unwrap();
        let issue = process_issue(&raw, now);

        assert_eq!(issue.category, Category::Bug);
        assert!(issue.tech_context.contains(&TechTag::Kubernetes));
        assert!(issue.has_solution);
        assert!(issue.is_recent);
        assert_eq!(issue.engagement_score, 21);
    }

    #[test]
    fn test_process_issue_open_never_has_solution() {
        let raw = raw_issue("t", "", "open", &[], 10);
        let now: DateTime<Utc> = "2024-02-01T00:00:00Z".parse().unwrap();
        assert!(!process_issue(&raw, now).has_solution);

        // Closed without comments is not a solution either.
        let raw = raw_issue("t", "", "closed", &[], 0);
        assert!(!process_issue(&raw, now).has_solution);
    }
}
