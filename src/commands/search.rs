use tabled::Tabled;

use crate::cli::SearchArgs;
use crate::config::Config;
use crate::error::Result;
use crate::matcher::{self, Match};
use crate::output::{self, score_colored, state_colored, truncate};
use crate::store::Store;

#[derive(Tabled)]
struct SearchRow {
    #[tabled(rename = "#")]
    number: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Similarity")]
    similarity: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Comments")]
    comments: u32,
}

impl From<&Match<'_>> for SearchRow {
    fn from(m: &Match<'_>) -> Self {
        Self {
            number: m.issue.number,
            title: truncate(&m.issue.title, 50),
            similarity: score_colored(m.similarity),
            confidence: score_colored(m.confidence),
            state: state_colored(m.issue.state.as_str()),
            comments: m.issue.comments_count,
        }
    }
}

pub fn run(config: &Config, args: SearchArgs) -> Result<()> {
    let store = Store::new(config.data_dir()?);
    let issues = store.load_issues()?;

    let matches = matcher::find_similar(&args.query, &issues, args.limit);

    if matches.is_empty() && !output::is_json_output() {
        println!("No issues similar to \"{}\" found", args.query);
        return Ok(());
    }

    output::print_table(&matches, |m| SearchRow::from(m));

    Ok(())
}
