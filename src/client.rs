use std::time::Duration;

use reqwest::Client;

use crate::error::{IntelError, Result};
use crate::types::RawIssue;

const API_ENDPOINT: &str = "https://api.github.com";
const USER_AGENT: &str = "issuelens";
const PAGE_SIZE: usize = 100;

/// Fixed inter-page delay to respect GitHub rate limits.
const PAGE_DELAY_MS: u64 = 500;

pub struct GithubClient {
    http: Client,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            token,
        }
    }

    /// Fetch up to `max_issues` issues for `repo`, newest-updated first.
    /// Pull requests are dropped. A failed page ends collection early
    /// and returns whatever was gathered so far.
    pub async fn collect_issues(&self, repo: &str, max_issues: usize) -> Result<Vec<RawIssue>> {
        let mut issues: Vec<RawIssue> = Vec::new();
        let mut page = 1u32;

        while issues.len() < max_issues {
            let per_page = PAGE_SIZE.min(max_issues - issues.len());
            let batch = match self.fetch_page(repo, page, per_page).await {
                Ok(batch) => batch,
                Err(e) => {
                    eprintln!("Failed to fetch page {page}: {e}");
                    break;
                }
            };

            if batch.is_empty() {
                break;
            }

            let batch_len = batch.len();
            issues.extend(batch.into_iter().filter(|issue| !issue.is_pull_request()));
            eprintln!("  collected {} issues...", issues.len());

            if batch_len < per_page {
                // Last page.
                break;
            }

            page += 1;
            tokio::time::sleep(Duration::from_millis(PAGE_DELAY_MS)).await;
        }

        issues.truncate(max_issues);
        Ok(issues)
    }

    async fn fetch_page(&self, repo: &str, page: u32, per_page: usize) -> Result<Vec<RawIssue>> {
        let url = format!("{API_ENDPOINT}/repos/{repo}/issues");

        let mut request = self
            .http
            .get(&url)
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", USER_AGENT)
            .query(&[
                ("state", "all"),
                ("sort", "updated"),
                ("direction", "desc"),
            ])
            .query(&[("per_page", per_page.to_string()), ("page", page.to_string())]);

        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {token}"));
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(IntelError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }

        Ok(response.json().await?)
    }
}
