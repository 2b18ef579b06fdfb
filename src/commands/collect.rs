use chrono::Utc;

use crate::analytics;
use crate::cli::CollectArgs;
use crate::client::GithubClient;
use crate::config::Config;
use crate::error::Result;
use crate::extract;
use crate::output;
use crate::sample;
use crate::store::Store;
use crate::types::Issue;

pub async fn run(client: &GithubClient, config: &Config, args: CollectArgs) -> Result<()> {
    let repo = config.resolve_repo(args.repo.as_deref());

    // Captured once so every issue sees the same recency cutoff.
    let now = Utc::now();

    eprintln!("Collecting issues from {repo}...");
    let mut raw = client.collect_issues(&repo, args.max_issues).await?;

    if raw.is_empty() {
        eprintln!("No issues fetched from {repo}; using the built-in sample dataset");
        raw = sample::sample_issues(now);
    }

    let issues: Vec<Issue> = raw.iter().map(|r| extract::process_issue(r, now)).collect();
    let snapshot = analytics::aggregate(&issues);

    let store = Store::new(config.data_dir()?);
    store.save(&issues, &snapshot)?;

    output::print_item(&snapshot, |s| {
        println!("Collected {} issues from {repo}", s.summary.total_issues);
        println!(
            "Solution rate: {}",
            output::percent(s.summary.solution_rate)
        );

        let mut categories: Vec<(&String, &usize)> =
            s.categories.distribution.iter().collect();
        categories.sort_by(|a, b| b.1.cmp(a.1));
        if !categories.is_empty() {
            println!("\nTop categories:");
            for (name, count) in categories.iter().take(5) {
                println!("  {name}: {count}");
            }
        }

        if !s.technology.usage.is_empty() {
            println!("\nTop technologies:");
            for usage in s.technology.usage.iter().take(5) {
                println!("  {}: {}", usage.tech, usage.count);
            }
        }

        println!("\nSnapshot saved to {}", store.dir().display());
    });

    Ok(())
}
