use std::fmt;

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Coarse issue classification assigned by priority-ordered keyword rules.
///
/// Exactly one category per issue; the rule order in
/// [`crate::extract::categorize`] decides ties.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Bug,
    Enhancement,
    Question,
    Help,
    Performance,
    Configuration,
    Migration,
    Error,
    Documentation,
    Other,
}

impl Category {
    /// All categories in rule priority order.
    pub const ALL: [Category; 10] = [
        Category::Bug,
        Category::Enhancement,
        Category::Question,
        Category::Help,
        Category::Performance,
        Category::Configuration,
        Category::Migration,
        Category::Error,
        Category::Documentation,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Bug => "bug",
            Category::Enhancement => "enhancement",
            Category::Question => "question",
            Category::Help => "help",
            Category::Performance => "performance",
            Category::Configuration => "configuration",
            Category::Migration => "migration",
            Category::Error => "error",
            Category::Documentation => "documentation",
            Category::Other => "other",
        }
    }

    /// Colored label for terminal tables.
    pub fn colored(self) -> String {
        match self {
            Category::Bug | Category::Error => self.as_str().red().to_string(),
            Category::Enhancement => self.as_str().green().to_string(),
            Category::Question | Category::Help => self.as_str().yellow().to_string(),
            Category::Performance => self.as_str().magenta().to_string(),
            Category::Configuration | Category::Migration => self.as_str().blue().to_string(),
            Category::Documentation => self.as_str().cyan().to_string(),
            Category::Other => self.as_str().bright_black().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
