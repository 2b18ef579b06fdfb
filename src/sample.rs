//! Built-in fallback dataset used when nothing can be fetched, so the
//! processing, analytics, and search stages stay exercisable offline.

use chrono::{DateTime, Duration, Utc};

use crate::types::{RawIssue, RawLabel, RawMilestone, RawUser};

pub fn sample_issues(now: DateTime<Utc>) -> Vec<RawIssue> {
    vec![
        sample(
            1,
            "TiDB connection timeout in Kubernetes cluster",
            "Getting connection timeouts when running TiDB in k8s environment with high load",
            "closed",
            &["type/bug", "area/tikv", "severity/major"],
            12,
            "dbops-sam",
            now - Duration::days(20),
            Some(now - Duration::days(12)),
        ),
        sample(
            2,
            "Slow query performance with large dataset",
            "Queries taking too long on tables with millions of rows, need optimization tips",
            "open",
            &["type/question", "area/sql", "area/planner"],
            8,
            "query-qi",
            now - Duration::days(21),
            None,
        ),
        sample(
            3,
            "Docker deployment configuration help",
            "Need help configuring TiDB cluster in Docker environment for production",
            "closed",
            &["type/question"],
            8,
            "newbie-nat",
            now - Duration::days(22),
            Some(now - Duration::days(18)),
        ),
        sample(
            4,
            "Backup restore fails with out of memory",
            "br restore job crashes with out of memory on large snapshots",
            "open",
            &["type/bug", "area/br"],
            3,
            "dbops-sam",
            now - Duration::days(140),
            None,
        ),
        sample(
            5,
            "Grafana metrics missing after upgrade",
            "Prometheus scrapes fine but several grafana panels are empty",
            "closed",
            &["area/monitoring"],
            5,
            "sre-maria",
            now - Duration::days(60),
            Some(now - Duration::days(55)),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn sample(
    number: u64,
    title: &str,
    body: &str,
    state: &str,
    labels: &[&str],
    comments: u32,
    author: &str,
    created_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
) -> RawIssue {
    RawIssue {
        id: number,
        number,
        title: title.to_string(),
        body: Some(body.to_string()),
        state: state.to_string(),
        created_at,
        updated_at: closed_at.unwrap_or(created_at),
        closed_at,
        labels: labels
            .iter()
            .map(|name| RawLabel {
                name: name.to_string(),
            })
            .collect(),
        comments,
        user: RawUser {
            login: author.to_string(),
        },
        assignees: Vec::new(),
        milestone: match number {
            1 => Some(RawMilestone {
                title: "v8.1".to_string(),
            }),
            _ => None,
        },
        pull_request: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{analytics, extract};

    #[test]
    fn test_sample_pipeline_end_to_end() {
        let now = Utc::now();
        let raw = sample_issues(now);
        assert!(!raw.is_empty());
        assert!(raw.iter().all(|i| !i.is_pull_request()));

        let issues: Vec<_> = raw.iter().map(|r| extract::process_issue(r, now)).collect();
        let snapshot = analytics::aggregate(&issues);
        assert_eq!(snapshot.summary.total_issues, raw.len());
        assert!(snapshot.summary.solution_rate > 0.0);
        assert!(!snapshot.technology.usage.is_empty());
    }
}
