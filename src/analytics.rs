//! Aggregation of processed issues into an [`AnalyticsSnapshot`].
//!
//! Every statistic guards its denominator; aggregating an empty
//! collection yields a zeroed snapshot rather than an error.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{
    AnalyticsSnapshot, Category, CategoryBreakdown, CommunityBreakdown, ContributorCount,
    EngagementDistribution, Issue, ResolutionTimes, Summary, TechCombination, TechTag, TechUsage,
    TechnologyBreakdown, TemporalBreakdown,
};

const TOP_TECH: usize = 15;
const TOP_COMBINATIONS: usize = 10;
const TOP_CONTRIBUTORS: usize = 10;
const TOP_INSIGHT_CATEGORIES: usize = 3;

/// Share of recent issues above which a technology trend reads as increasing.
const INCREASING_TREND_RATIO: f64 = 0.3;

pub fn aggregate(issues: &[Issue]) -> AnalyticsSnapshot {
    if issues.is_empty() {
        return AnalyticsSnapshot::default();
    }

    AnalyticsSnapshot {
        summary: summarize(issues),
        categories: category_breakdown(issues),
        technology: TechnologyBreakdown {
            usage: tech_usage(issues),
            combinations: tech_combinations(issues),
        },
        temporal: TemporalBreakdown {
            monthly_trends: monthly_trends(issues),
            resolution_times: resolution_times(issues),
        },
        community: CommunityBreakdown {
            top_contributors: top_contributors(issues),
            engagement_distribution: engagement_distribution(issues),
        },
    }
}

fn summarize(issues: &[Issue]) -> Summary {
    let total = issues.len();
    let solved = issues.iter().filter(|i| i.has_solution).count();

    Summary {
        total_issues: total,
        open_issues: issues.iter().filter(|i| i.is_open()).count(),
        closed_issues: issues.iter().filter(|i| i.is_closed()).count(),
        solution_rate: solved as f64 / total as f64,
        recent_issues: issues.iter().filter(|i| i.is_recent).count(),
        avg_comments: mean(&issues.iter().map(|i| i.comments_count as f64).collect::<Vec<_>>()),
        avg_engagement: mean(
            &issues.iter().map(|i| i.engagement_score as f64).collect::<Vec<_>>(),
        ),
    }
}

fn category_breakdown(issues: &[Issue]) -> CategoryBreakdown {
    let mut distribution = BTreeMap::new();
    let mut solution_rates = BTreeMap::new();
    let mut avg_engagement = BTreeMap::new();

    for category in Category::ALL {
        let members: Vec<&Issue> = issues.iter().filter(|i| i.category == category).collect();
        if members.is_empty() {
            continue;
        }

        let name = category.as_str().to_string();
        let solved = members.iter().filter(|i| i.has_solution).count();
        distribution.insert(name.clone(), members.len());
        solution_rates.insert(name.clone(), solved as f64 / members.len() as f64);
        avg_engagement.insert(
            name,
            mean(&members.iter().map(|i| i.engagement_score as f64).collect::<Vec<_>>()),
        );
    }

    CategoryBreakdown {
        distribution,
        solution_rates,
        avg_engagement,
    }
}

fn tech_usage(issues: &[Issue]) -> Vec<TechUsage> {
    let mut usage: Vec<TechUsage> = TechTag::ALL
        .into_iter()
        .map(|tech| TechUsage {
            tech,
            count: issues.iter().filter(|i| i.tech_context.contains(&tech)).count(),
        })
        .filter(|u| u.count > 0)
        .collect();

    // Stable sort keeps enumeration order on count ties.
    usage.sort_by(|a, b| b.count.cmp(&a.count));
    usage.truncate(TOP_TECH);
    usage
}

fn tech_combinations(issues: &[Issue]) -> Vec<TechCombination> {
    let mut counts: BTreeMap<(TechTag, TechTag), usize> = BTreeMap::new();

    for issue in issues {
        if issue.tech_context.len() < 2 {
            continue;
        }
        let mut tags = issue.tech_context.clone();
        tags.sort_by_key(|t| t.as_str());
        for i in 0..tags.len() {
            for j in i + 1..tags.len() {
                *counts.entry((tags[i], tags[j])).or_insert(0) += 1;
            }
        }
    }

    let mut combinations: Vec<TechCombination> = counts
        .into_iter()
        .map(|((a, b), count)| TechCombination {
            technologies: [a, b],
            count,
        })
        .collect();

    combinations.sort_by(|a, b| b.count.cmp(&a.count));
    combinations.truncate(TOP_COMBINATIONS);
    combinations
}

fn monthly_trends(issues: &[Issue]) -> BTreeMap<String, usize> {
    let mut months = BTreeMap::new();
    for issue in issues {
        *months
            .entry(issue.created_at.format("%Y-%m").to_string())
            .or_insert(0) += 1;
    }
    months
}

fn resolution_times(issues: &[Issue]) -> ResolutionTimes {
    let mut hours = Vec::new();
    let mut by_category: BTreeMap<String, Vec<f64>> = BTreeMap::new();

    for issue in issues {
        if !issue.is_closed() {
            continue;
        }
        // Closed issues occasionally miss a close time; skip them.
        let Some(closed_at) = issue.closed_at else {
            continue;
        };
        let elapsed = closed_at.signed_duration_since(issue.created_at);
        let resolution_hours = elapsed.num_seconds() as f64 / 3600.0;
        hours.push(resolution_hours);
        by_category
            .entry(issue.category.as_str().to_string())
            .or_default()
            .push(resolution_hours);
    }

    if hours.is_empty() {
        return ResolutionTimes::default();
    }

    ResolutionTimes {
        avg_hours: mean(&hours),
        median_hours: median(&hours),
        by_category: by_category
            .into_iter()
            .map(|(category, samples)| (category, mean(&samples)))
            .collect(),
    }
}

fn top_contributors(issues: &[Issue]) -> Vec<ContributorCount> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for issue in issues {
        *counts.entry(issue.author.clone()).or_insert(0) += 1;
    }

    let mut contributors: Vec<ContributorCount> = counts
        .into_iter()
        .map(|(author, count)| ContributorCount { author, count })
        .collect();

    // Stable sort keeps the author-ascending order from the map on ties.
    contributors.sort_by(|a, b| b.count.cmp(&a.count));
    contributors.truncate(TOP_CONTRIBUTORS);
    contributors
}

fn engagement_distribution(issues: &[Issue]) -> EngagementDistribution {
    let scores: Vec<f64> = issues.iter().map(|i| i.engagement_score as f64).collect();
    if scores.is_empty() {
        return EngagementDistribution::default();
    }

    let mut sorted = scores.clone();
    sorted.sort_by(f64::total_cmp);

    EngagementDistribution {
        count: scores.len(),
        mean: mean(&scores),
        std: sample_std(&scores),
        min: sorted[0],
        p25: percentile(&sorted, 0.25),
        p50: percentile(&sorted, 0.50),
        p75: percentile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    }
}

/// Per-technology report for a selected set of tags.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TechInsight {
    pub technology: TechTag,
    pub total_issues: usize,
    pub solution_rate: f64,
    pub avg_engagement: f64,
    pub recent_count: usize,
    pub trend: &'static str,
    pub top_categories: Vec<(String, usize)>,
    pub sample_issues: Vec<u64>,
}

/// Build insights for each requested tag. Tags with no matching issues
/// are omitted.
pub fn tech_insights(tags: &[TechTag], issues: &[Issue]) -> Vec<TechInsight> {
    let mut insights = Vec::new();

    for &tag in tags {
        let relevant: Vec<&Issue> = issues
            .iter()
            .filter(|i| i.tech_context.contains(&tag))
            .collect();
        if relevant.is_empty() {
            continue;
        }

        let total = relevant.len();
        let solved = relevant.iter().filter(|i| i.has_solution).count();
        let recent = relevant.iter().filter(|i| i.is_recent).count();

        let mut categories: BTreeMap<String, usize> = BTreeMap::new();
        for issue in &relevant {
            *categories
                .entry(issue.category.as_str().to_string())
                .or_insert(0) += 1;
        }
        let mut top_categories: Vec<(String, usize)> = categories.into_iter().collect();
        top_categories.sort_by(|a, b| b.1.cmp(&a.1));
        top_categories.truncate(TOP_INSIGHT_CATEGORIES);

        let trend = if recent as f64 / total as f64 > INCREASING_TREND_RATIO {
            "increasing"
        } else {
            "stable"
        };

        insights.push(TechInsight {
            technology: tag,
            total_issues: total,
            solution_rate: solved as f64 / total as f64,
            avg_engagement: mean(
                &relevant.iter().map(|i| i.engagement_score as f64).collect::<Vec<_>>(),
            ),
            recent_count: recent,
            trend,
            top_categories,
            sample_issues: relevant.iter().take(3).map(|i| i.number).collect(),
        });
    }

    insights
}

fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

fn median(samples: &[f64]) -> f64 {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile(&sorted, 0.5)
}

/// Sample standard deviation; 0 for fewer than two samples.
fn sample_std(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let avg = mean(samples);
    let variance = samples.iter().map(|s| (s - avg).powi(2)).sum::<f64>()
        / (samples.len() - 1) as f64;
    variance.sqrt()
}

/// Linearly interpolated percentile over a sorted, non-empty slice.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = q * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IssueState;
    use chrono::{DateTime, Utc};

    fn issue(number: u64, author: &str, category: Category, tech: &[TechTag]) -> Issue {
        Issue {
            id: number,
            number,
            title: format!("issue {number}"),
            body: String::new(),
            state: IssueState::Open,
            created_at: "2024-01-15T10:00:00Z".parse().unwrap(),
            updated_at: "2024-01-16T10:00:00Z".parse().unwrap(),
            closed_at: None,
            labels: Vec::new(),
            comments_count: 0,
            author: author.to_string(),
            assignees: Vec::new(),
            milestone: None,
            category,
            tech_context: tech.to_vec(),
            error_patterns: Vec::new(),
            has_solution: false,
            is_recent: false,
            engagement_score: 0,
        }
    }

    fn closed(mut i: Issue, closed_at: &str, comments: u32) -> Issue {
        i.state = IssueState::Closed;
        i.closed_at = Some(closed_at.parse::<DateTime<Utc>>().unwrap());
        i.comments_count = comments;
        i.has_solution = comments > 0;
        i
    }

    #[test]
    fn test_aggregate_empty_is_zeroed() {
        let snapshot = aggregate(&[]);
        assert_eq!(snapshot.summary.total_issues, 0);
        assert_eq!(snapshot.summary.solution_rate, 0.0);
        assert!(snapshot.categories.distribution.is_empty());
        assert!(snapshot.technology.usage.is_empty());
        assert!(snapshot.community.top_contributors.is_empty());
    }

    #[test]
    fn test_summary_counts_and_rates() {
        let issues = vec![
            closed(issue(1, "alice", Category::Bug, &[]), "2024-01-17T10:00:00Z", 4),
            issue(2, "bob", Category::Bug, &[]),
            closed(issue(3, "alice", Category::Other, &[]), "2024-01-20T10:00:00Z", 0),
        ];
        let summary = summarize(&issues);
        assert_eq!(summary.total_issues, 3);
        assert_eq!(summary.open_issues, 1);
        assert_eq!(summary.closed_issues, 2);
        // Only the closed-with-comments issue counts as solved.
        assert!((summary.solution_rate - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_breakdown_groups() {
        let issues = vec![
            closed(issue(1, "alice", Category::Bug, &[]), "2024-01-17T10:00:00Z", 4),
            issue(2, "bob", Category::Bug, &[]),
            issue(3, "carol", Category::Question, &[]),
        ];
        let breakdown = category_breakdown(&issues);
        assert_eq!(breakdown.distribution["bug"], 2);
        assert_eq!(breakdown.distribution["question"], 1);
        assert!((breakdown.solution_rates["bug"] - 0.5).abs() < 1e-9);
        assert!(!breakdown.distribution.contains_key("other"));
    }

    #[test]
    fn test_tech_usage_order_and_ties() {
        let issues = vec![
            issue(1, "a", Category::Other, &[TechTag::Docker, TechTag::Kubernetes]),
            issue(2, "b", Category::Other, &[TechTag::Docker]),
            issue(3, "c", Category::Other, &[TechTag::Tikv]),
        ];
        let usage = tech_usage(&issues);
        assert_eq!(usage[0].tech, TechTag::Docker);
        assert_eq!(usage[0].count, 2);
        // Kubernetes and tikv tie at 1; enumeration order breaks the tie.
        assert_eq!(usage[1].tech, TechTag::Kubernetes);
        assert_eq!(usage[2].tech, TechTag::Tikv);
    }

    #[test]
    fn test_tech_combinations_sorted_pairs() {
        let issues = vec![
            issue(1, "a", Category::Other, &[TechTag::Kubernetes, TechTag::Docker]),
            issue(2, "b", Category::Other, &[TechTag::Kubernetes, TechTag::Docker, TechTag::Cloud]),
            issue(3, "c", Category::Other, &[TechTag::Tikv]),
        ];
        let combos = tech_combinations(&issues);
        assert_eq!(combos[0].count, 2);
        // Pair members are in lexicographic order regardless of extraction order.
        assert_eq!(combos[0].technologies, [TechTag::Docker, TechTag::Kubernetes]);
        assert_eq!(combos.len(), 3);
    }

    #[test]
    fn test_monthly_trends_ascending() {
        let mut a = issue(1, "a", Category::Other, &[]);
        a.created_at = "2024-03-10T00:00:00Z".parse().unwrap();
        let mut b = issue(2, "b", Category::Other, &[]);
        b.created_at = "2024-01-05T00:00:00Z".parse().unwrap();
        let mut c = issue(3, "c", Category::Other, &[]);
        c.created_at = "2024-01-20T00:00:00Z".parse().unwrap();

        let months = monthly_trends(&[a, b, c]);
        let keys: Vec<&String> = months.keys().collect();
        assert_eq!(keys, ["2024-01", "2024-03"]);
        assert_eq!(months["2024-01"], 2);
    }

    #[test]
    fn test_resolution_times() {
        let issues = vec![
            // 48 hours to close.
            closed(issue(1, "a", Category::Bug, &[]), "2024-01-17T10:00:00Z", 1),
            // Closed but missing closed_at: excluded.
            {
                let mut i = issue(2, "b", Category::Bug, &[]);
                i.state = IssueState::Closed;
                i
            },
            issue(3, "c", Category::Other, &[]),
        ];
        let times = resolution_times(&issues);
        assert!((times.avg_hours - 48.0).abs() < 1e-9);
        assert!((times.median_hours - 48.0).abs() < 1e-9);
        assert!((times.by_category["bug"] - 48.0).abs() < 1e-9);
        assert!(!times.by_category.contains_key("other"));
    }

    #[test]
    fn test_top_contributors_deterministic_ties() {
        let issues = vec![
            issue(1, "zoe", Category::Other, &[]),
            issue(2, "amy", Category::Other, &[]),
            issue(3, "amy", Category::Other, &[]),
            issue(4, "bob", Category::Other, &[]),
        ];
        let top = top_contributors(&issues);
        assert_eq!(top[0].author, "amy");
        assert_eq!(top[0].count, 2);
        // bob and zoe tie at 1; name ascending breaks the tie.
        assert_eq!(top[1].author, "bob");
        assert_eq!(top[2].author, "zoe");
    }

    #[test]
    fn test_engagement_distribution_quartiles() {
        let mut issues: Vec<Issue> = (0..5)
            .map(|n| issue(n, "a", Category::Other, &[]))
            .collect();
        for (i, score) in [0u32, 10, 20, 30, 40].iter().enumerate() {
            issues[i].engagement_score = *score;
        }
        let dist = engagement_distribution(&issues);
        assert_eq!(dist.count, 5);
        assert!((dist.mean - 20.0).abs() < 1e-9);
        assert!((dist.min - 0.0).abs() < 1e-9);
        assert!((dist.p50 - 20.0).abs() < 1e-9);
        assert!((dist.p25 - 10.0).abs() < 1e-9);
        assert!((dist.max - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_tech_insights() {
        let issues = vec![
            closed(
                issue(1, "a", Category::Bug, &[TechTag::Kubernetes]),
                "2024-01-17T10:00:00Z",
                3,
            ),
            issue(2, "b", Category::Question, &[TechTag::Kubernetes]),
            issue(3, "c", Category::Other, &[]),
        ];
        let insights = tech_insights(&[TechTag::Kubernetes, TechTag::Cdc], &issues);
        assert_eq!(insights.len(), 1);
        let k8s = &insights[0];
        assert_eq!(k8s.technology, TechTag::Kubernetes);
        assert_eq!(k8s.total_issues, 2);
        assert!((k8s.solution_rate - 0.5).abs() < 1e-9);
        assert_eq!(k8s.trend, "stable");
        assert_eq!(k8s.sample_issues, vec![1, 2]);
    }
}
