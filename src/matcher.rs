//! Similarity search over processed issues.
//!
//! Relevance is weighted lexical overlap between the query tokens and an
//! issue's title, body, labels, and tech tags. Confidence is a separate,
//! query-independent estimate of how trustworthy the issue's apparent
//! resolution is, so a relevant but thinly-discussed issue still
//! surfaces with a visible caveat.

use std::collections::HashSet;

use serde::Serialize;

use crate::types::Issue;

const TITLE_WEIGHT: usize = 3;
const BODY_WEIGHT: usize = 1;
const LABEL_WEIGHT: usize = 2;
const TECH_WEIGHT: usize = 4;

#[derive(Serialize, Debug)]
pub struct Match<'a> {
    pub issue: &'a Issue,
    pub similarity: f64,
    pub confidence: f64,
}

/// Rank issues by similarity to a free-text query.
///
/// Returns at most `top_k` matches sorted by (similarity, confidence)
/// descending. Issues with zero overlap are excluded, so a reported
/// similarity is always positive. An empty query matches nothing.
pub fn find_similar<'a>(query: &str, issues: &'a [Issue], top_k: usize) -> Vec<Match<'a>> {
    let query_words: HashSet<String> = query
        .split_whitespace()
        .map(|word| word.to_lowercase())
        .collect();
    if query_words.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<Match<'a>> = issues
        .iter()
        .filter_map(|issue| {
            let similarity = similarity(&query_words, issue);
            if similarity > 0.0 {
                Some(Match {
                    issue,
                    similarity,
                    confidence: solution_confidence(issue),
                })
            } else {
                None
            }
        })
        .collect();

    matches.sort_by(|a, b| {
        b.similarity
            .total_cmp(&a.similarity)
            .then(b.confidence.total_cmp(&a.confidence))
    });
    matches.truncate(top_k);
    matches
}

/// Weighted overlap between the query set and the issue's word sets,
/// normalized by the maximum per-word weight, clamped to [0, 1].
fn similarity(query_words: &HashSet<String>, issue: &Issue) -> f64 {
    let title = issue.title.to_lowercase();
    let body = issue.body.to_lowercase();
    let labels = issue.labels.join(" ").to_lowercase();

    let title_words: HashSet<&str> = title.split_whitespace().collect();
    let body_words: HashSet<&str> = body.split_whitespace().collect();
    let label_words: HashSet<&str> = labels.split_whitespace().collect();
    let tech_words: HashSet<&str> = issue.tech_context.iter().map(|t| t.as_str()).collect();

    let overlap = TITLE_WEIGHT * common_words(query_words, &title_words)
        + BODY_WEIGHT * common_words(query_words, &body_words)
        + LABEL_WEIGHT * common_words(query_words, &label_words)
        + TECH_WEIGHT * common_words(query_words, &tech_words);

    // Callers guarantee a non-empty query.
    let max_possible = TECH_WEIGHT * query_words.len();
    (overlap as f64 / max_possible as f64).min(1.0)
}

/// Query-independent confidence in the issue's resolution, in [0, 1]:
/// a solved issue starts at 0.5, plus bonuses for discussion volume,
/// recency, and engagement.
pub fn solution_confidence(issue: &Issue) -> f64 {
    let mut confidence = 0.0;
    if issue.has_solution {
        confidence += 0.5;
    }
    confidence += (issue.comments_count as f64 * 0.02).min(0.3);
    if issue.is_recent {
        confidence += 0.1;
    }
    confidence += (issue.engagement_score as f64 * 0.01).min(0.1);
    confidence.min(1.0)
}

fn common_words(query_words: &HashSet<String>, words: &HashSet<&str>) -> usize {
    words.iter().filter(|word| query_words.contains(**word)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, IssueState, TechTag};

    fn issue(number: u64, title: &str, body: &str, tech: &[TechTag]) -> Issue {
        Issue {
            id: number,
            number,
            title: title.to_string(),
            body: body.to_string(),
            state: IssueState::Open,
            created_at: "2024-01-15T10:00:00Z".parse().unwrap(),
            updated_at: "2024-01-16T10:00:00Z".parse().unwrap(),
            closed_at: None,
            labels: Vec::new(),
            comments_count: 0,
            author: "alice".to_string(),
            assignees: Vec::new(),
            milestone: None,
            category: Category::Other,
            tech_context: tech.to_vec(),
            error_patterns: Vec::new(),
            has_solution: false,
            is_recent: false,
            engagement_score: 0,
        }
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let issues = vec![issue(1, "Slow query", "", &[])];
        assert!(find_similar("", &issues, 5).is_empty());
        assert!(find_similar("   ", &issues, 5).is_empty());
    }

    #[test]
    fn test_zero_overlap_excluded() {
        let issues = vec![
            issue(1, "Slow query performance with large dataset", "", &[]),
            issue(2, "Unrelated widget painting", "", &[]),
        ];
        let matches = find_similar("performance slow", &issues, 5);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].issue.number, 1);
        assert!(matches[0].similarity > 0.0);
    }

    #[test]
    fn test_tech_match_outweighs_body_match() {
        let tech_hit = issue(1, "cluster trouble", "", &[TechTag::Kubernetes]);
        let body_hit = issue(2, "cluster trouble", "kubernetes mentioned in passing", &[]);
        let issues = vec![body_hit, tech_hit];

        let matches = find_similar("kubernetes", &issues, 5);
        assert_eq!(matches.len(), 2);
        // Tech tag weight 4 vs body weight 1.
        assert_eq!(matches[0].issue.number, 1);
        assert!((matches[0].similarity - 1.0).abs() < 1e-9);
        assert!((matches[1].similarity - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_title_overlap_scoring() {
        // Two of two query words hit the title: 2 * 3 / (2 * 4).
        let issues = vec![issue(1, "Slow query performance with large dataset", "", &[])];
        let matches = find_similar("performance slow", &issues, 5);
        assert!((matches[0].similarity - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_top_k_and_ordering() {
        let mut issues = Vec::new();
        for n in 1..=8 {
            let mut i = issue(n, "kubernetes timeout", "", &[TechTag::Kubernetes]);
            // Same similarity across the board; confidence must break ties.
            i.comments_count = n as u32;
            issues.push(i);
        }
        let matches = find_similar("kubernetes timeout", &issues, 5);
        assert_eq!(matches.len(), 5);
        for pair in matches.windows(2) {
            let ordered = pair[0].similarity > pair[1].similarity
                || (pair[0].similarity == pair[1].similarity
                    && pair[0].confidence >= pair[1].confidence);
            assert!(ordered);
        }
        // Most-commented issue has the highest confidence.
        assert_eq!(matches[0].issue.number, 8);
    }

    #[test]
    fn test_confidence_components_and_clamp() {
        let mut i = issue(1, "t", "", &[]);
        assert!((solution_confidence(&i) - 0.0).abs() < 1e-9);

        i.has_solution = true;
        i.comments_count = 100; // bonus capped at 0.3
        i.is_recent = true;
        i.engagement_score = 50; // bonus capped at 0.1
        assert!((solution_confidence(&i) - 1.0).abs() < 1e-9);

        i.comments_count = 5;
        assert!((solution_confidence(&i) - 0.8).abs() < 1e-9);
    }
}
