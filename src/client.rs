use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::instrument;

use crate::aggregate;
use crate::browser::{BrowserLauncher, BrowserPool, ChromiumLauncher};
use crate::config::StatsConfig;
use crate::error::Result;
use crate::model::*;
use crate::scraper::{self, leetcode};
use crate::summary::{self, TrendPoint};

/// The main entry point for acquiring a user's statistics.
///
/// `StatsClient` wraps a [`reqwest::Client`] for the HTTP sources and a
/// [`BrowserPool`] for the rendered one, and exposes one method per source
/// plus the combined lookup.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> cp_stats::Result<()> {
/// use cp_stats::StatsClient;
///
/// let client = StatsClient::new();
/// let stats = client.get_user_stats("alice").await?;
/// println!("{} problems solved", stats.leetcode.total_solved);
/// # Ok(())
/// # }
/// ```
pub struct StatsClient {
    http: reqwest::Client,
    browsers: BrowserPool,
    config: StatsConfig,
}

impl StatsClient {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::with_config(StatsConfig::default())
    }

    /// Create a client for `config`, rendering pages with headless Chromium.
    pub fn with_config(config: StatsConfig) -> Self {
        let launcher = match &config.chrome_executable {
            Some(path) => ChromiumLauncher::with_executable(path.clone()),
            None => ChromiumLauncher::new(),
        };
        Self::with_parts(reqwest::Client::new(), Arc::new(launcher), config)
    }

    /// Create a client from an existing [`reqwest::Client`] and browser launcher.
    ///
    /// Use this when you need to configure timeouts, proxies, headers, or a
    /// different browser backend.
    pub fn with_parts(
        http: reqwest::Client,
        launcher: Arc<dyn BrowserLauncher>,
        config: StatsConfig,
    ) -> Self {
        let browsers = BrowserPool::new(launcher, config.browser_pool_size);
        Self {
            http,
            browsers,
            config,
        }
    }

    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    /// Forward a GraphQL request to LeetCode and return the raw response.
    #[instrument(skip(self, request))]
    pub async fn graphql(&self, request: &GraphQlRequest) -> Result<Value> {
        leetcode::forward(&self.http, &self.config.leetcode_graphql_url, request).await
    }

    /// Fetch normalized LeetCode statistics.
    #[instrument(skip(self))]
    pub async fn get_leetcode(&self, username: &str) -> Result<LeetCodeStats> {
        let request = GraphQlRequest::for_user(leetcode::PROFILE_QUERY, username);
        let payload = self.graphql(&request).await?;
        leetcode::parse_profile(username, payload)
    }

    /// Scrape the CodeChef profile page.
    #[instrument(skip(self))]
    pub async fn get_codechef(&self, username: &str) -> Result<CodeChefStats> {
        scraper::codechef::get_profile(&self.http, &self.config.codechef_base_url, username).await
    }

    /// Render and read the Codeforces profile page.
    #[instrument(skip(self))]
    pub async fn get_codeforces(&self, username: &str) -> Result<CodeforcesStats> {
        scraper::codeforces::get_profile(&self.browsers, &self.config.codeforces_base_url, username)
            .await
    }

    /// Fetch all three sources concurrently and combine them.
    #[instrument(skip(self))]
    pub async fn get_user_stats(&self, username: &str) -> Result<UserStats> {
        aggregate::aggregate(self, username, self.config.failure_policy).await
    }

    /// Monthly LeetCode submissions for the six months ending at `today`.
    #[instrument(skip(self))]
    pub async fn get_submission_trend(
        &self,
        username: &str,
        today: NaiveDate,
    ) -> Result<Vec<TrendPoint>> {
        let request = GraphQlRequest::for_user(leetcode::CALENDAR_QUERY, username);
        let payload = self.graphql(&request).await?;
        let calendar = leetcode::parse_calendar(username, payload)?;
        summary::monthly_trend(calendar.as_deref(), today)
    }

    /// Close any pooled browser sessions.
    pub async fn shutdown(&self) {
        self.browsers.shutdown().await;
    }
}

impl Default for StatsClient {
    fn default() -> Self {
        Self::new()
    }
}
