use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;

use crate::client::StatsClient;
use crate::model::{CodeChefStats, CodeforcesStats, GraphQlRequest, Source, UserStats};
use crate::server::error::ApiError;
use crate::summary::{self, PlatformSummary, StatCard, TrendPoint};

type AppState = State<Arc<StatsClient>>;
type ApiResult<T> = Result<Json<T>, ApiError>;

pub(crate) fn router() -> Router<Arc<StatsClient>> {
    Router::new()
        .route("/health", get(health))
        .route("/leetcode", post(leetcode))
        .route("/codechef/{username}", get(codechef))
        .route("/codeforces/{username}", get(codeforces))
        .route("/stats/{username}", get(stats))
        .route("/stats/{username}/summary", get(stats_summary))
        .route("/stats/{username}/trend", get(trend))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn leetcode(
    State(client): AppState,
    Json(request): Json<GraphQlRequest>,
) -> ApiResult<Value> {
    client
        .graphql(&request)
        .await
        .map(Json)
        .map_err(ApiError::source(Source::LeetCode))
}

async fn codechef(State(client): AppState, Path(username): Path<String>) -> ApiResult<CodeChefStats> {
    client
        .get_codechef(&username)
        .await
        .map(Json)
        .map_err(ApiError::source(Source::CodeChef))
}

async fn codeforces(
    State(client): AppState,
    Path(username): Path<String>,
) -> ApiResult<CodeforcesStats> {
    client
        .get_codeforces(&username)
        .await
        .map(Json)
        .map_err(ApiError::source(Source::Codeforces))
}

async fn stats(State(client): AppState, Path(username): Path<String>) -> ApiResult<UserStats> {
    client
        .get_user_stats(&username)
        .await
        .map(Json)
        .map_err(ApiError::Lookup)
}

#[derive(Debug, Serialize)]
struct StatsSummary {
    platforms: Vec<PlatformSummary>,
    cards: Vec<StatCard>,
}

async fn stats_summary(
    State(client): AppState,
    Path(username): Path<String>,
) -> ApiResult<StatsSummary> {
    let stats = client
        .get_user_stats(&username)
        .await
        .map_err(ApiError::Lookup)?;

    Ok(Json(StatsSummary {
        platforms: summary::platform_summaries(&stats),
        cards: summary::stat_cards(&stats),
    }))
}

async fn trend(State(client): AppState, Path(username): Path<String>) -> ApiResult<Vec<TrendPoint>> {
    let today = chrono::Utc::now().date_naive();
    client
        .get_submission_trend(&username, today)
        .await
        .map(Json)
        .map_err(ApiError::Lookup)
}
