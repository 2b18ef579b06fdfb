use crate::analytics;
use crate::cli::TechArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{self, percent};
use crate::store::Store;

pub fn run(config: &Config, args: TechArgs) -> Result<()> {
    let store = Store::new(config.data_dir()?);
    let issues = store.load_issues()?;

    let insights = analytics::tech_insights(&args.tags, &issues);

    if insights.is_empty() && !output::is_json_output() {
        println!("No issues found for the requested technologies");
        return Ok(());
    }

    output::print_item(&insights, |insights| {
        for insight in insights {
            println!("{}", insight.technology);
            println!("  Issues:        {} ({} recent)", insight.total_issues, insight.recent_count);
            println!("  Solution rate: {}", percent(insight.solution_rate));
            println!("  Engagement:    {:.1} average", insight.avg_engagement);
            println!("  Trend:         {}", insight.trend);

            if !insight.top_categories.is_empty() {
                let categories: Vec<String> = insight
                    .top_categories
                    .iter()
                    .map(|(name, count)| format!("{name} ({count})"))
                    .collect();
                println!("  Categories:    {}", categories.join(", "));
            }

            if !insight.sample_issues.is_empty() {
                let numbers: Vec<String> = insight
                    .sample_issues
                    .iter()
                    .map(|n| format!("#{n}"))
                    .collect();
                println!("  Examples:      {}", numbers.join(", "));
            }
            println!();
        }
    });

    Ok(())
}
