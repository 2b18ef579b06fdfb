use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::types::{Category, TechTag};

#[derive(Parser)]
#[command(name = "issuelens")]
#[command(about = "GitHub issue analytics and similarity search", version)]
#[command(after_help = "EXAMPLES:
    issuelens collect --repo pingcap/tidb    Collect and analyze issues
    issuelens stats                          Show the analytics snapshot
    issuelens search \"kubernetes timeout\"    Find similar past issues
    issuelens tech kubernetes docker         Per-technology insights")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect issues from GitHub and rebuild the snapshot
    #[command(after_help = "EXAMPLES:
    issuelens collect
    issuelens collect --repo pingcap/tidb --max-issues 200")]
    Collect(CollectArgs),
    /// List issues from the current snapshot
    #[command(after_help = "EXAMPLES:
    issuelens issues
    issuelens issues --category bug --limit 50")]
    Issues(IssueListArgs),
    /// Show analytics for the current snapshot
    #[command(after_help = "EXAMPLES:
    issuelens stats
    issuelens stats --json")]
    Stats,
    /// Search the snapshot for issues similar to a query
    #[command(after_help = "EXAMPLES:
    issuelens search \"kubernetes timeout\"
    issuelens search \"slow query\" --limit 10")]
    Search(SearchArgs),
    /// Report per-technology insights
    #[command(after_help = "EXAMPLES:
    issuelens tech kubernetes
    issuelens tech docker cloud monitoring")]
    Tech(TechArgs),
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    issuelens completions bash > ~/.bash_completion.d/issuelens
    issuelens completions zsh > ~/.zfunc/_issuelens")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    issuelens init")]
    Init,
}

#[derive(Args)]
pub struct CollectArgs {
    /// Repository to collect from (owner/name)
    #[arg(long)]
    pub repo: Option<String>,

    /// Maximum number of issues to collect
    #[arg(long, default_value = "150")]
    pub max_issues: usize,
}

#[derive(Args)]
pub struct IssueListArgs {
    /// Filter by category
    #[arg(long)]
    pub category: Option<Category>,

    /// Show only recent issues
    #[arg(long)]
    pub recent: bool,

    /// Maximum number of issues to show
    #[arg(long, short, default_value = "25")]
    pub limit: usize,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Free-text query
    pub query: String,

    /// Maximum number of results
    #[arg(long, short, default_value = "5")]
    pub limit: usize,
}

#[derive(Args)]
pub struct TechArgs {
    /// Technology tags to report on
    #[arg(required = true)]
    pub tags: Vec<TechTag>,
}
