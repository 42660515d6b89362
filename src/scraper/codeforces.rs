use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::browser::BrowserPool;
use crate::error::{Result, StatsError};
use crate::model::CodeforcesStats;
use crate::scraper;

/// Runs inside the rendered profile page. Every accessor is null-safe so a
/// missing node becomes `null` instead of throwing in the page.
pub(crate) const EXTRACT_SCRIPT: &str = r#"(() => {
  const text = (selector) => {
    const node = document.querySelector(selector);
    return node ? node.textContent.trim() : null;
  };
  return {
    rating: text('.info li:nth-child(1) span'),
    maxRating: text('.info li:nth-child(2) span'),
    problemsSolved: text('._UserActivityFrame_counterValue'),
  };
})()"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderedFields {
    rating: Option<String>,
    max_rating: Option<String>,
    problems_solved: Option<String>,
}

/// Render the profile page in a pooled browser session and read its fields.
///
/// The session goes back to the pool only when evaluation succeeded; after a
/// failure it is closed, since the browser may be in an unknown state.
#[instrument(skip(browsers))]
pub(crate) async fn get_profile(
    browsers: &BrowserPool,
    base_url: &str,
    username: &str,
) -> Result<CodeforcesStats> {
    let url = scraper::profile_url(base_url, &["profile", username])?;

    let mut session = browsers.checkout().await?;
    let rendered = match session.evaluate(&url, EXTRACT_SCRIPT).await {
        Ok(value) => {
            session.release().await;
            value
        }
        Err(err) => {
            warn!(url, error = %err, "discarding browser session after failed render");
            session.discard().await;
            return Err(err);
        }
    };

    let stats = parse_fields(rendered, username)?;
    debug!(
        rating = ?stats.rating,
        problems_solved = ?stats.problems_solved,
        "parsed codeforces profile"
    );
    Ok(stats)
}

fn parse_fields(rendered: Value, username: &str) -> Result<CodeforcesStats> {
    let fields: RenderedFields = serde_json::from_value(rendered)
        .map_err(|e| StatsError::payload("codeforces page", e))?;

    Ok(CodeforcesStats {
        rating: fields.rating,
        max_rating: fields.max_rating,
        problems_solved: fields.problems_solved,
        username: username.to_string(),
    })
}
