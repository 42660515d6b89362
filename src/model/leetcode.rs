use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A GraphQL request as accepted by the proxy and forwarded upstream verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlRequest {
    pub query: String,
    #[serde(default)]
    pub variables: Value,
}

impl GraphQlRequest {
    /// Build a request whose only variable is `username`.
    pub fn for_user(query: &str, username: &str) -> Self {
        Self {
            query: query.to_string(),
            variables: serde_json::json!({ "username": username }),
        }
    }
}

/// Normalized LeetCode statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetCodeStats {
    pub total_solved: u64,
    pub weekly_progress: u64,
    pub contest_badge: String,
}

/// Fallback used when the user holds no contest badge.
pub const NO_BADGE: &str = "No Badge";

// Upstream payload shapes. Every field the aggregator does not strictly need
// is optional so unrelated schema drift does not fail the lookup.

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse {
    pub data: Option<ProfileData>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProfileData {
    pub matched_user: Option<MatchedUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MatchedUser {
    pub submit_stats_global: Option<SubmitStats>,
    pub contest_badge: Option<ContestBadge>,
    pub user_calendar: Option<UserCalendar>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitStats {
    #[serde(default)]
    pub ac_submission_num: Vec<SubmissionBucket>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmissionBucket {
    pub count: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContestBadge {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserCalendar {
    pub submission_calendar: Option<String>,
}
