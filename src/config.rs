use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How the aggregator treats a failing CodeChef or Codeforces leg.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FailurePolicy {
    /// Keep whatever succeeded and record the failed sources.
    #[default]
    Isolated,
    /// Any failing source fails the whole lookup.
    AllOrNothing,
}

/// Upstream endpoints and acquisition settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsConfig {
    pub leetcode_graphql_url: String,
    pub codechef_base_url: String,
    pub codeforces_base_url: String,
    /// Long-lived browser sessions to keep. `0` launches one per lookup.
    pub browser_pool_size: usize,
    pub chrome_executable: Option<PathBuf>,
    pub failure_policy: FailurePolicy,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            leetcode_graphql_url: "https://leetcode.com/graphql".to_string(),
            codechef_base_url: "https://www.codechef.com".to_string(),
            codeforces_base_url: "https://codeforces.com".to_string(),
            browser_pool_size: 2,
            chrome_executable: None,
            failure_policy: FailurePolicy::default(),
        }
    }
}
