use serde::{Deserialize, Serialize};

/// CodeChef statistics as scraped from the public profile page.
///
/// Fields hold the raw, trimmed element text. A field whose element is
/// missing from the page is the empty string, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeChefStats {
    pub rating: String,
    pub problems_solved: String,
    pub stars: String,
    pub username: String,
}
