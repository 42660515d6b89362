use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{Result, StatsError};
use crate::model::{GraphQlRequest, GraphQlResponse, LeetCodeStats, MatchedUser, NO_BADGE};
use crate::scraper;

/// Profile query used by the aggregator.
pub const PROFILE_QUERY: &str = r#"
query getUserProfile($username: String!) {
  matchedUser(username: $username) {
    submitStatsGlobal {
      acSubmissionNum {
        count
      }
    }
    contestBadge {
      name
    }
  }
}
"#;

/// Query for the per-day submission calendar.
pub const CALENDAR_QUERY: &str = r#"
query getUserProfile($username: String!) {
  matchedUser(username: $username) {
    userCalendar {
      submissionCalendar
    }
  }
}
"#;

const USER_NOT_FOUND: &str = "User not found on LeetCode!";

/// Forward a GraphQL request upstream and return the response unmodified.
///
/// GraphQL-level errors are not inspected here; they come back in the
/// `errors` field of the returned value.
#[instrument(skip(client, request))]
pub(crate) async fn forward(
    client: &reqwest::Client,
    endpoint: &str,
    request: &GraphQlRequest,
) -> Result<Value> {
    let response = scraper::post_json(client, endpoint, request).await?;
    debug!(
        has_errors = response.get("errors").is_some(),
        "forwarded graphql request"
    );
    Ok(response)
}

/// Build [`LeetCodeStats`] from a profile query response.
pub(crate) fn parse_profile(username: &str, payload: Value) -> Result<LeetCodeStats> {
    let user = matched_user(username, payload)?;

    let buckets = user
        .submit_stats_global
        .map(|stats| stats.ac_submission_num)
        .unwrap_or_default();
    let total_solved = buckets
        .first()
        .map(|bucket| bucket.count)
        .ok_or_else(|| StatsError::payload("leetcode profile", "no accepted submission counts"))?;
    let weekly_progress = buckets.get(1).map(|bucket| bucket.count).unwrap_or(0);

    let contest_badge = user
        .contest_badge
        .and_then(|badge| badge.name)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| NO_BADGE.to_string());

    debug!(username, total_solved, weekly_progress, "parsed leetcode profile");

    Ok(LeetCodeStats {
        total_solved,
        weekly_progress,
        contest_badge,
    })
}

/// Extract the raw `submissionCalendar` string from a calendar query response.
pub(crate) fn parse_calendar(username: &str, payload: Value) -> Result<Option<String>> {
    let user = matched_user(username, payload)?;
    Ok(user
        .user_calendar
        .and_then(|calendar| calendar.submission_calendar))
}

/// Resolve the `matchedUser` node, treating GraphQL errors and a missing node
/// alike as an unknown user.
fn matched_user(username: &str, payload: Value) -> Result<MatchedUser> {
    let response: GraphQlResponse = serde_json::from_value(payload)
        .map_err(|e| StatsError::payload("leetcode response", e))?;

    if let Some(errors) = response.errors {
        let message = errors
            .into_iter()
            .map(|e| e.message)
            .find(|m| !m.is_empty())
            .unwrap_or_else(|| USER_NOT_FOUND.to_string());
        return Err(StatsError::UserNotFound {
            username: username.to_string(),
            message,
        });
    }

    response
        .data
        .and_then(|data| data.matched_user)
        .ok_or_else(|| StatsError::UserNotFound {
            username: username.to_string(),
            message: USER_NOT_FOUND.to_string(),
        })
}
