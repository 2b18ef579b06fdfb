//! Snapshot persistence. Files are written wholesale into a single
//! configured directory; readers get a cascading fallback instead of a
//! hard failure when the analytics file is missing or malformed.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{IntelError, Result};
use crate::types::{AnalyticsSnapshot, Issue, Summary, TechTag, TechUsage};

pub const ISSUES_FILE: &str = "issues.json";
pub const ANALYTICS_FILE: &str = "analytics.json";
pub const SUMMARY_FILE: &str = "summary.json";
pub const CSV_FILE: &str = "issues.csv";

pub struct Store {
    dir: PathBuf,
}

/// Summary-only snapshot written by older collectors; used to synthesize
/// analytics when analytics.json is absent.
#[derive(Deserialize, Default)]
#[serde(default)]
struct SummaryFile {
    #[serde(flatten)]
    summary: Summary,
    categories: BTreeMap<String, usize>,
    tech_usage: BTreeMap<String, usize>,
}

impl Store {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the full snapshot: issue records, analytics, and the
    /// flattened CSV export. Overwrites, never appends.
    pub fn save(&self, issues: &[Issue], analytics: &AnalyticsSnapshot) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        self.write_json(ISSUES_FILE, issues)?;
        self.write_json(ANALYTICS_FILE, analytics)?;
        self.write_csv(issues)?;
        Ok(())
    }

    pub fn load_issues(&self) -> Result<Vec<Issue>> {
        let path = self.dir.join(ISSUES_FILE);
        if !path.exists() {
            return Err(IntelError::MissingSnapshot {
                dir: self.dir.clone(),
            });
        }

        let contents = fs::read_to_string(&path)?;
        serde_json::from_str(&contents).map_err(|e| IntelError::SnapshotParse { path, source: e })
    }

    /// Load analytics with cascading fallback: analytics.json, then a
    /// summary.json synthesis, then a minimal snapshot computed from the
    /// issues themselves. Fallbacks are reported on stderr.
    pub fn load_analytics(&self, issues: &[Issue]) -> AnalyticsSnapshot {
        match self.read_json::<AnalyticsSnapshot>(ANALYTICS_FILE) {
            Ok(Some(snapshot)) => return snapshot,
            Ok(None) => {}
            Err(e) => eprintln!("Ignoring unreadable {ANALYTICS_FILE}: {e}"),
        }

        match self.read_json::<SummaryFile>(SUMMARY_FILE) {
            Ok(Some(summary)) => {
                eprintln!("{ANALYTICS_FILE} not found, using {SUMMARY_FILE}");
                return synthesize_from_summary(summary);
            }
            Ok(None) => {}
            Err(e) => eprintln!("Ignoring unreadable {SUMMARY_FILE}: {e}"),
        }

        eprintln!("No analytics snapshot found, computing a minimal one from issues");
        minimal_analytics(issues)
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| IntelError::SnapshotParse { path, source: e })
    }

    fn write_json<T: serde::Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.dir.join(name);
        let contents = serde_json::to_string_pretty(value)?;
        fs::write(&path, contents).map_err(|e| IntelError::SnapshotWrite { path, source: e })
    }

    fn write_csv(&self, issues: &[Issue]) -> Result<()> {
        let mut writer = csv::Writer::from_path(self.dir.join(CSV_FILE))?;
        writer.write_record([
            "id",
            "number",
            "title",
            "body",
            "state",
            "created_at",
            "updated_at",
            "closed_at",
            "labels",
            "comments_count",
            "author",
            "assignees",
            "milestone",
            "category",
            "tech_context",
            "error_patterns",
            "has_solution",
            "is_recent",
            "engagement_score",
        ])?;

        for issue in issues {
            writer.write_record([
                issue.id.to_string(),
                issue.number.to_string(),
                issue.title.clone(),
                issue.body.clone(),
                issue.state.as_str().to_string(),
                issue.created_at.to_rfc3339(),
                issue.updated_at.to_rfc3339(),
                issue
                    .closed_at
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_default(),
                issue.labels.join(";"),
                issue.comments_count.to_string(),
                issue.author.clone(),
                issue.assignees.join(";"),
                issue.milestone.clone().unwrap_or_default(),
                issue.category.to_string(),
                issue
                    .tech_context
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(";"),
                issue.error_patterns.join(";"),
                issue.has_solution.to_string(),
                issue.is_recent.to_string(),
                issue.engagement_score.to_string(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}

fn synthesize_from_summary(file: SummaryFile) -> AnalyticsSnapshot {
    let mut usage: Vec<TechUsage> = file
        .tech_usage
        .iter()
        .filter_map(|(name, &count)| {
            TechTag::parse(name).map(|tech| TechUsage { tech, count })
        })
        .collect();
    usage.sort_by(|a, b| b.count.cmp(&a.count).then(a.tech.cmp(&b.tech)));

    let mut snapshot = AnalyticsSnapshot {
        summary: file.summary,
        ..AnalyticsSnapshot::default()
    };
    snapshot.categories.distribution = file.categories;
    snapshot.technology.usage = usage;
    snapshot
}

/// Degraded snapshot when no analytics file survives: summary-level
/// counts only, everything else empty.
fn minimal_analytics(issues: &[Issue]) -> AnalyticsSnapshot {
    let mut snapshot = AnalyticsSnapshot::default();
    if issues.is_empty() {
        return snapshot;
    }

    let total = issues.len();
    snapshot.summary.total_issues = total;
    snapshot.summary.solution_rate =
        issues.iter().filter(|i| i.has_solution).count() as f64 / total as f64;
    snapshot.summary.avg_engagement =
        issues.iter().map(|i| i.engagement_score as f64).sum::<f64>() / total as f64;
    snapshot
}
