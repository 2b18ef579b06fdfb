mod analytics;
mod category;
mod issue;
mod raw;
mod tech;

pub use analytics::{
    AnalyticsSnapshot, CategoryBreakdown, CommunityBreakdown, ContributorCount,
    EngagementDistribution, ResolutionTimes, Summary, TechCombination, TechUsage,
    TechnologyBreakdown, TemporalBreakdown,
};
pub use category::Category;
pub use issue::{Issue, IssueState};
pub use raw::{RawIssue, RawLabel, RawMilestone, RawUser};
pub use tech::TechTag;
