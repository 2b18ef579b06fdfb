use tabled::Tabled;

use crate::cli::IssueListArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{self, format_date, state_colored, truncate};
use crate::store::Store;
use crate::types::Issue;

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "#")]
    number: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Comments")]
    comments: u32,
    #[tabled(rename = "Engagement")]
    engagement: u32,
}

impl From<&Issue> for IssueRow {
    fn from(issue: &Issue) -> Self {
        Self {
            number: issue.number,
            title: truncate(&issue.title, 50),
            state: state_colored(issue.state.as_str()),
            category: issue.category.colored(),
            created: format_date(&issue.created_at),
            comments: issue.comments_count,
            engagement: issue.engagement_score,
        }
    }
}

pub fn run(config: &Config, args: IssueListArgs) -> Result<()> {
    let store = Store::new(config.data_dir()?);
    let issues = store.load_issues()?;

    let filtered: Vec<&Issue> = issues
        .iter()
        .filter(|i| args.category.map_or(true, |c| i.category == c))
        .filter(|i| !args.recent || i.is_recent)
        .take(args.limit)
        .collect();

    if filtered.is_empty() && !output::is_json_output() {
        println!("No issues match the given filters");
        return Ok(());
    }

    output::print_table(&filtered, |issue| IssueRow::from(*issue));

    Ok(())
}
