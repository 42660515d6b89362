//! Shared fixtures for unit tests: an in-process upstream server and a fake
//! browser that counts launches and closes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::browser::{BrowserLauncher, BrowserSession};
use crate::error::{Result, StatsError};

/// Serve `router` on an ephemeral local port and return its base URL.
pub(crate) async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Wait until `done` holds, failing the test after about a second.
pub(crate) async fn settle(done: impl Fn() -> bool) {
    for _ in 0..200 {
        if done() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached in time");
}

#[derive(Default)]
struct Counters {
    launched: AtomicUsize,
    closed: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

#[derive(Clone)]
struct Behavior {
    result: std::result::Result<Value, String>,
    slow: Option<(String, Duration)>,
}

pub(crate) struct FakeLauncher {
    counters: Arc<Counters>,
    fail_launch: bool,
    behavior: Behavior,
}

impl Default for FakeLauncher {
    fn default() -> Self {
        Self::returning(json!({
            "rating": "1500",
            "maxRating": "1620",
            "problemsSolved": "230"
        }))
    }
}

impl FakeLauncher {
    pub(crate) fn returning(value: Value) -> Self {
        Self {
            counters: Arc::default(),
            fail_launch: false,
            behavior: Behavior {
                result: Ok(value),
                slow: None,
            },
        }
    }

    pub(crate) fn failing_evaluate() -> Self {
        Self {
            behavior: Behavior {
                result: Err("navigation failed".to_string()),
                slow: None,
            },
            ..Self::default()
        }
    }

    pub(crate) fn failing_launch() -> Self {
        Self {
            fail_launch: true,
            ..Self::default()
        }
    }

    /// Delay evaluation of any URL containing `needle`.
    pub(crate) fn slow_for(mut self, needle: &str, delay: Duration) -> Self {
        self.behavior.slow = Some((needle.to_string(), delay));
        self
    }

    pub(crate) fn launched(&self) -> usize {
        self.counters.launched.load(Ordering::SeqCst)
    }

    pub(crate) fn closed(&self) -> usize {
        self.counters.closed.load(Ordering::SeqCst)
    }

    pub(crate) fn urls(&self) -> Vec<String> {
        self.counters.urls.lock().clone()
    }
}

#[async_trait]
impl BrowserLauncher for FakeLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
        if self.fail_launch {
            return Err(StatsError::Browser("no chrome binary".to_string()));
        }
        self.counters.launched.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            counters: self.counters.clone(),
            behavior: self.behavior.clone(),
        }))
    }
}

struct FakeSession {
    counters: Arc<Counters>,
    behavior: Behavior,
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn evaluate(&mut self, url: &str, _script: &str) -> Result<Value> {
        self.counters.urls.lock().push(url.to_string());
        if let Some((needle, delay)) = &self.behavior.slow {
            if url.contains(needle.as_str()) {
                tokio::time::sleep(*delay).await;
            }
        }
        self.behavior.result.clone().map_err(StatsError::Browser)
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub(crate) const CODECHEF_PAGE: &str = r#"
    <html><body>
      <div class="rating-number">1876</div>
      <span class="rating">4&#9733;</span>
      <section class="problems-solved"><h5>Total Problems Solved: 311</h5></section>
    </body></html>
"#;

const CODECHEF_PAGE_WITHOUT_RATING: &str = r#"
    <html><body>
      <span class="rating">1&#9733;</span>
      <section class="problems-solved"><h5>Total Problems Solved: 4</h5></section>
    </body></html>
"#;

/// Fake LeetCode GraphQL endpoint (`/graphql`) and CodeChef profile pages
/// (`/users/{username}`).
///
/// Known users: `alice` (badge "Guardian"), `bob` (no badge), `carol`
/// (CodeChef page lacks a rating), `frank` (CodeChef answers 500). Anyone
/// else is unknown to LeetCode.
pub(crate) fn upstream_router() -> Router {
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use axum::Json;

    Router::new()
        .route(
            "/graphql",
            post(|Json(body): Json<Value>| async move {
                let query = body["query"].as_str().unwrap_or_default();
                let username = body["variables"]["username"].as_str().unwrap_or_default();
                Json(leetcode_payload(query, username))
            }),
        )
        .route(
            "/users/{username}",
            get(|Path(username): Path<String>| async move {
                match username.as_str() {
                    "carol" => CODECHEF_PAGE_WITHOUT_RATING.into_response(),
                    "frank" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
                    _ => CODECHEF_PAGE.into_response(),
                }
            }),
        )
}

fn leetcode_payload(query: &str, username: &str) -> Value {
    let badge = match username {
        "alice" => json!({ "name": "Guardian" }),
        "bob" | "carol" | "frank" => Value::Null,
        _ => return json!({ "data": { "matchedUser": null } }),
    };

    if query.contains("userCalendar") {
        return json!({
            "data": {
                "matchedUser": {
                    "userCalendar": {
                        // 2026-09-15 and 2026-10-01, 2026-10-02
                        "submissionCalendar":
                            "{\"1789430400\": 4, \"1790812800\": 2, \"1790899200\": 3}"
                    }
                }
            }
        });
    }

    json!({
        "data": {
            "matchedUser": {
                "submitStatsGlobal": {
                    "acSubmissionNum": [{ "count": 120 }, { "count": 5 }]
                },
                "contestBadge": badge
            }
        }
    })
}

/// A client wired to [`upstream_router`] at `base_url` and to `launcher`.
pub(crate) fn test_client(
    base_url: &str,
    launcher: Arc<FakeLauncher>,
    failure_policy: crate::config::FailurePolicy,
) -> crate::StatsClient {
    let config = crate::config::StatsConfig {
        leetcode_graphql_url: format!("{base_url}/graphql"),
        codechef_base_url: base_url.to_string(),
        codeforces_base_url: "https://codeforces.test".to_string(),
        browser_pool_size: 0,
        chrome_executable: None,
        failure_policy,
    };
    crate::StatsClient::with_parts(reqwest::Client::new(), launcher, config)
}
