use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;
use crate::model::{CodeChefStats, CodeforcesStats, LeetCodeStats};

/// One of the external platforms statistics are acquired from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Source {
    LeetCode,
    CodeChef,
    Codeforces,
}

impl Source {
    /// Fixed message reported to callers when this source cannot be fetched.
    pub fn failure_message(self) -> &'static str {
        match self {
            Source::LeetCode => "Failed to fetch data",
            Source::CodeChef => "Failed to fetch CodeChef data",
            Source::Codeforces => "Failed to fetch Codeforces data",
        }
    }
}

/// A source that failed during an aggregation whose failures are isolated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFailure {
    pub source: Source,
    pub kind: ErrorKind,
    pub message: String,
}

/// Combined statistics for one username, built fresh per lookup.
///
/// LeetCode is the canonical profile, so a `UserStats` only exists when the
/// LeetCode leg succeeded. The other platforms are independently optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub username: String,
    pub leetcode: LeetCodeStats,
    pub codechef: Option<CodeChefStats>,
    pub codeforces: Option<CodeforcesStats>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<SourceFailure>,
}
