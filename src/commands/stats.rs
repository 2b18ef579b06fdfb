use tabled::{settings::Style, Table, Tabled};

use crate::config::Config;
use crate::error::Result;
use crate::output::{self, percent};
use crate::store::Store;
use crate::types::AnalyticsSnapshot;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Issues")]
    count: usize,
    #[tabled(rename = "Solution rate")]
    solution_rate: String,
    #[tabled(rename = "Avg engagement")]
    avg_engagement: String,
}

#[derive(Tabled)]
struct TechRow {
    #[tabled(rename = "Technology")]
    tech: String,
    #[tabled(rename = "Issues")]
    count: usize,
}

#[derive(Tabled)]
struct ContributorRow {
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Issues")]
    count: usize,
}

pub fn run(config: &Config) -> Result<()> {
    let store = Store::new(config.data_dir()?);
    let issues = store.load_issues()?;
    let snapshot = store.load_analytics(&issues);

    output::print_item(&snapshot, render);

    Ok(())
}

fn render(snapshot: &AnalyticsSnapshot) {
    let summary = &snapshot.summary;
    println!(
        "Issues:     {} total ({} open, {} closed)",
        summary.total_issues, summary.open_issues, summary.closed_issues
    );
    println!(
        "Solved:     {} of issues have a closed discussion",
        percent(summary.solution_rate)
    );
    println!("Recent:     {} created in the last 90 days", summary.recent_issues);
    println!(
        "Activity:   {:.1} comments and {:.1} engagement per issue",
        summary.avg_comments, summary.avg_engagement
    );

    let mut rows: Vec<CategoryRow> = snapshot
        .categories
        .distribution
        .iter()
        .map(|(name, &count)| CategoryRow {
            category: name.clone(),
            count,
            solution_rate: snapshot
                .categories
                .solution_rates
                .get(name)
                .map(|&r| percent(r))
                .unwrap_or_default(),
            avg_engagement: snapshot
                .categories
                .avg_engagement
                .get(name)
                .map(|e| format!("{e:.1}"))
                .unwrap_or_default(),
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    if !rows.is_empty() {
        println!("\nCategories:");
        println!("{}", Table::new(rows).with(Style::rounded()).to_string());
    }

    if !snapshot.technology.usage.is_empty() {
        let rows: Vec<TechRow> = snapshot
            .technology
            .usage
            .iter()
            .map(|u| TechRow {
                tech: u.tech.to_string(),
                count: u.count,
            })
            .collect();
        println!("\nTechnology usage:");
        println!("{}", Table::new(rows).with(Style::rounded()).to_string());
    }

    if !snapshot.technology.combinations.is_empty() {
        println!("\nCommon technology combinations:");
        for combo in &snapshot.technology.combinations {
            println!(
                "  {} + {}: {}",
                combo.technologies[0], combo.technologies[1], combo.count
            );
        }
    }

    if !snapshot.temporal.monthly_trends.is_empty() {
        println!("\nIssues per month:");
        // Last 12 months is enough for a terminal view.
        let months: Vec<_> = snapshot.temporal.monthly_trends.iter().collect();
        let start = months.len().saturating_sub(12);
        for (month, count) in &months[start..] {
            println!("  {month}: {count}");
        }
    }

    let resolution = &snapshot.temporal.resolution_times;
    if resolution.avg_hours > 0.0 {
        println!(
            "\nResolution time: {:.1}h mean, {:.1}h median",
            resolution.avg_hours, resolution.median_hours
        );
        for (category, hours) in &resolution.by_category {
            println!("  {category}: {hours:.1}h");
        }
    }

    if !snapshot.community.top_contributors.is_empty() {
        let rows: Vec<ContributorRow> = snapshot
            .community
            .top_contributors
            .iter()
            .map(|c| ContributorRow {
                author: c.author.clone(),
                count: c.count,
            })
            .collect();
        println!("\nTop contributors:");
        println!("{}", Table::new(rows).with(Style::rounded()).to_string());
    }

    let dist = &snapshot.community.engagement_distribution;
    if dist.count > 0 {
        println!(
            "\nEngagement: mean {:.1} (min {:.0}, p25 {:.0}, median {:.0}, p75 {:.0}, max {:.0})",
            dist.mean, dist.min, dist.p25, dist.p50, dist.p75, dist.max
        );
    }
}
