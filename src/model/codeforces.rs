use serde::{Deserialize, Serialize};

/// Codeforces statistics as read from the rendered profile page.
///
/// Fields hold the raw, trimmed element text. A field whose element is
/// missing from the page is `None` (serialized as `null`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeforcesStats {
    pub rating: Option<String>,
    pub max_rating: Option<String>,
    pub problems_solved: Option<String>,
    pub username: String,
}
