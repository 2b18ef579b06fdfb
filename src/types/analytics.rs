use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::TechTag;

/// Read-only aggregate over one collected issue set. Built once per
/// collection run, never updated incrementally.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AnalyticsSnapshot {
    pub summary: Summary,
    pub categories: CategoryBreakdown,
    pub technology: TechnologyBreakdown,
    pub temporal: TemporalBreakdown,
    pub community: CommunityBreakdown,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Summary {
    pub total_issues: usize,
    pub open_issues: usize,
    pub closed_issues: usize,
    pub solution_rate: f64,
    pub recent_issues: usize,
    pub avg_comments: f64,
    pub avg_engagement: f64,
}

/// Per-category counts and rates, keyed by category name.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CategoryBreakdown {
    pub distribution: BTreeMap<String, usize>,
    pub solution_rates: BTreeMap<String, f64>,
    pub avg_engagement: BTreeMap<String, f64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TechnologyBreakdown {
    /// Tag frequencies, count descending, ties in enumeration order.
    pub usage: Vec<TechUsage>,
    /// Most frequent unordered tag pairs, count descending.
    pub combinations: Vec<TechCombination>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TechUsage {
    pub tech: TechTag,
    pub count: usize,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TechCombination {
    pub technologies: [TechTag; 2],
    pub count: usize,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TemporalBreakdown {
    /// Issue counts per creation month ("YYYY-MM"), ascending.
    pub monthly_trends: BTreeMap<String, usize>,
    pub resolution_times: ResolutionTimes,
}

/// Hours from creation to close, over closed issues with a close time.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ResolutionTimes {
    pub avg_hours: f64,
    pub median_hours: f64,
    pub by_category: BTreeMap<String, f64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CommunityBreakdown {
    /// Authors by issue count descending, then name ascending.
    pub top_contributors: Vec<ContributorCount>,
    pub engagement_distribution: EngagementDistribution,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ContributorCount {
    pub author: String,
    pub count: usize,
}

/// Descriptive statistics over engagement scores.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EngagementDistribution {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}
