pub(crate) mod codechef;
pub(crate) mod codeforces;
pub(crate) mod leetcode;

pub(crate) use ::scraper::Html;
use ::scraper::{ElementRef, Selector};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, StatsError};
use crate::model::Source;

/// Fetch one of `platform`'s pages and parse it as an HTML document.
pub(crate) async fn get_document(
    client: &reqwest::Client,
    platform: Source,
    url: &str,
) -> Result<Html> {
    debug!(%platform, url, "fetching page");

    let response = client.get(url).send().await.map_err(|e| StatsError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(StatsError::UnexpectedStatus {
            platform,
            url: url.to_owned(),
            status,
        });
    }

    let body = response.text().await.map_err(|e| StatsError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;

    Ok(Html::parse_document(&body))
}

/// POST `body` as JSON and decode whatever JSON comes back, regardless of
/// the status code.
pub(crate) async fn post_json(
    client: &reqwest::Client,
    url: &str,
    body: &impl Serialize,
) -> Result<Value> {
    debug!(url, "posting json");

    let response = client
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|e| StatsError::Http {
            url: url.to_owned(),
            source: e,
        })?;

    response
        .json::<Value>()
        .await
        .map_err(|e| StatsError::ResponseBody {
            url: url.to_owned(),
            source: e,
        })
}

/// Text of every element matching `selector` inside `element`, concatenated
/// and trimmed. Returns an empty string if nothing matches.
pub(crate) fn select_all_text(element: &ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .flat_map(|e| e.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Append path segments to `base_url`, percent-encoding each one.
pub(crate) fn profile_url(base_url: &str, segments: &[&str]) -> Result<String> {
    let invalid = |message: String| StatsError::InvalidUrl {
        url: base_url.to_owned(),
        message,
    };

    let mut url = reqwest::Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("url cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(segments);

    Ok(url.to_string())
}
