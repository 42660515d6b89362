use tracing::{debug, warn};

use crate::client::StatsClient;
use crate::config::FailurePolicy;
use crate::error::Result;
use crate::model::{Source, SourceFailure, UserStats};

/// Query all three sources concurrently and merge them into a [`UserStats`].
///
/// All legs are awaited before anything is decided. The LeetCode leg is
/// canonical: if it fails (including an unknown user) the lookup fails no
/// matter what the other sources returned. The other legs are handled
/// according to `policy`.
pub(crate) async fn aggregate(
    client: &StatsClient,
    username: &str,
    policy: FailurePolicy,
) -> Result<UserStats> {
    let (leetcode, codechef, codeforces) = futures::join!(
        client.get_leetcode(username),
        client.get_codechef(username),
        client.get_codeforces(username),
    );

    let leetcode = leetcode?;

    let mut failures = Vec::new();
    let codechef = settle(Source::CodeChef, codechef, policy, &mut failures)?;
    let codeforces = settle(Source::Codeforces, codeforces, policy, &mut failures)?;

    debug!(
        username,
        codechef = codechef.is_some(),
        codeforces = codeforces.is_some(),
        "aggregated user stats"
    );

    Ok(UserStats {
        username: username.to_string(),
        leetcode,
        codechef,
        codeforces,
        failures,
    })
}

fn settle<T>(
    source: Source,
    outcome: Result<T>,
    policy: FailurePolicy,
    failures: &mut Vec<SourceFailure>,
) -> Result<Option<T>> {
    match (outcome, policy) {
        (Ok(value), _) => Ok(Some(value)),
        (Err(err), FailurePolicy::AllOrNothing) => Err(err),
        (Err(err), FailurePolicy::Isolated) => {
            warn!(%source, error = %err, "source failed, continuing without it");
            failures.push(SourceFailure {
                source,
                kind: err.kind(),
                message: source.failure_message().to_string(),
            });
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::ErrorKind;
    use crate::model::{CodeChefStats, CodeforcesStats, LeetCodeStats};
    use crate::testing::{serve, test_client, upstream_router, FakeLauncher};

    async fn client_with(launcher: Arc<FakeLauncher>, policy: FailurePolicy) -> StatsClient {
        let base_url = serve(upstream_router()).await;
        test_client(&base_url, launcher, policy)
    }

    #[tokio::test]
    async fn test_alice_has_all_sources() {
        let launcher = Arc::new(FakeLauncher::default());
        let client = client_with(launcher.clone(), FailurePolicy::Isolated).await;

        let stats = aggregate(&client, "alice", FailurePolicy::Isolated)
            .await
            .unwrap();

        assert_eq!(stats.username, "alice");
        assert_eq!(
            stats.leetcode,
            LeetCodeStats {
                total_solved: 120,
                weekly_progress: 5,
                contest_badge: "Guardian".to_string(),
            }
        );
        assert_eq!(
            stats.codechef,
            Some(CodeChefStats {
                rating: "1876".to_string(),
                problems_solved: "Total Problems Solved: 311".to_string(),
                stars: "4★".to_string(),
                username: "alice".to_string(),
            })
        );
        assert_eq!(
            stats.codeforces,
            Some(CodeforcesStats {
                rating: Some("1500".to_string()),
                max_rating: Some("1620".to_string()),
                problems_solved: Some("230".to_string()),
                username: "alice".to_string(),
            })
        );
        assert!(stats.failures.is_empty());
        assert_eq!(launcher.launched(), 1);
        assert_eq!(launcher.closed(), 1);
    }

    #[tokio::test]
    async fn test_missing_badge_defaults() {
        let client = client_with(Arc::new(FakeLauncher::default()), FailurePolicy::Isolated).await;

        let stats = aggregate(&client, "bob", FailurePolicy::Isolated)
            .await
            .unwrap();

        assert_eq!(stats.leetcode.contest_badge, "No Badge");
    }

    #[tokio::test]
    async fn test_missing_codechef_rating_is_empty() {
        let client = client_with(Arc::new(FakeLauncher::default()), FailurePolicy::Isolated).await;

        let stats = aggregate(&client, "carol", FailurePolicy::Isolated)
            .await
            .unwrap();

        let codechef = stats.codechef.unwrap();
        assert_eq!(codechef.rating, "");
        assert_eq!(codechef.stars, "1★");
    }

    #[tokio::test]
    async fn test_unknown_leetcode_user_is_fatal() {
        for policy in [FailurePolicy::Isolated, FailurePolicy::AllOrNothing] {
            let launcher = Arc::new(FakeLauncher::failing_evaluate());
            let client = client_with(launcher.clone(), policy).await;

            let err = aggregate(&client, "ghost", policy).await.unwrap_err();

            assert_eq!(err.kind(), ErrorKind::UserNotFound);
            assert_eq!(err.to_string(), "User not found on LeetCode!");
            assert_eq!(launcher.launched(), launcher.closed());
        }
    }

    #[tokio::test]
    async fn test_isolated_failures_keep_other_sources() {
        let client =
            client_with(Arc::new(FakeLauncher::failing_evaluate()), FailurePolicy::Isolated).await;

        let stats = aggregate(&client, "frank", FailurePolicy::Isolated)
            .await
            .unwrap();

        assert_eq!(stats.leetcode.total_solved, 120);
        assert_eq!(stats.codechef, None);
        assert_eq!(stats.codeforces, None);
        assert_eq!(
            stats.failures,
            vec![
                SourceFailure {
                    source: Source::CodeChef,
                    kind: ErrorKind::Fetch,
                    message: "Failed to fetch CodeChef data".to_string(),
                },
                SourceFailure {
                    source: Source::Codeforces,
                    kind: ErrorKind::Fetch,
                    message: "Failed to fetch Codeforces data".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_all_or_nothing_propagates_source_failure() {
        let client =
            client_with(Arc::new(FakeLauncher::default()), FailurePolicy::AllOrNothing).await;

        let err = aggregate(&client, "frank", FailurePolicy::AllOrNothing)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fetch);

        let stats = aggregate(&client, "alice", FailurePolicy::AllOrNothing)
            .await
            .unwrap();
        assert!(stats.codechef.is_some());
        assert!(stats.codeforces.is_some());
    }

    #[tokio::test]
    async fn test_repeated_lookup_is_identical() {
        let client = client_with(Arc::new(FakeLauncher::default()), FailurePolicy::Isolated).await;

        let first = aggregate(&client, "alice", FailurePolicy::Isolated)
            .await
            .unwrap();
        let second = aggregate(&client, "alice", FailurePolicy::Isolated)
            .await
            .unwrap();

        assert_eq!(first, second);
    }
}
