use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::client::StatsClient;
use crate::error::Result;
use crate::model::UserStats;

/// Result of a search run through a [`SearchSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// This was the latest search; here is its result.
    Current(UserStats),
    /// A newer search started while this one was in flight.
    Superseded,
}

/// Serializes what a view gets to see out of overlapping searches.
///
/// Each search is tagged with a monotonically increasing id. When a search
/// completes after a newer one has started, its result (success or error)
/// is dropped and [`SearchOutcome::Superseded`] is returned instead.
pub struct SearchSession {
    client: Arc<StatsClient>,
    latest: AtomicU64,
}

impl SearchSession {
    pub fn new(client: Arc<StatsClient>) -> Self {
        Self {
            client,
            latest: AtomicU64::new(0),
        }
    }

    pub async fn search(&self, username: &str) -> Result<SearchOutcome> {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.client.get_user_stats(username).await;

        let latest = self.latest.load(Ordering::SeqCst);
        if latest != id {
            debug!(username, id, latest, "discarding stale search result");
            return Ok(SearchOutcome::Superseded);
        }

        result.map(SearchOutcome::Current)
    }
}
