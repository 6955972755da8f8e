use axum::extract::{Form, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use crate::core::config::{self, Args};

/// Stand-in for the token, player-info and like services.
#[derive(Default)]
pub(crate) struct Upstream {
    pub(crate) token_calls: AtomicUsize,
    pub(crate) flaky_failures: AtomicUsize,
    pub(crate) like_hits: AtomicUsize,
    pub(crate) liked: AtomicI64,
    pub(crate) likes_per_hit: AtomicI64,
    pub(crate) rejected_hits: AtomicUsize,
}

async fn token(
    State(upstream): State<Arc<Upstream>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    upstream.token_calls.fetch_add(1, Ordering::SeqCst);

    let uid = params.get("uid").cloned().unwrap_or_default();
    match params.get("password").map(String::as_str) {
        Some("good") => (StatusCode::OK, Json(json!({ "token": format!("tok-{uid}") }))),
        Some("flaky") => {
            let left = upstream.flaky_failures.load(Ordering::SeqCst);
            if left > 0 {
                upstream.flaky_failures.fetch_sub(1, Ordering::SeqCst);
                (StatusCode::SERVICE_UNAVAILABLE, Json(json!({})))
            } else {
                (StatusCode::OK, Json(json!({ "token": format!("tok-{uid}") })))
            }
        }
        Some("empty") => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad credentials" }))),
    }
}

async fn player_info(
    State(upstream): State<Arc<Upstream>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    if params.get("uid").map(String::as_str) == Some("missing") {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "no such player" })));
    }

    let region = params.get("region").cloned().unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!({
            "basicInfo": {
                "liked": upstream.liked.load(Ordering::SeqCst),
                "nickname": "ace",
                "region": region,
            }
        })),
    )
}

async fn like(
    State(upstream): State<Arc<Upstream>>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> StatusCode {
    upstream.like_hits.fetch_add(1, Ordering::SeqCst);

    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer tok-"));
    let mobile = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Dalvik/"));

    if !authorized || !mobile || !form.contains_key("uid") {
        upstream.rejected_hits.fetch_add(1, Ordering::SeqCst);
        return StatusCode::UNAUTHORIZED;
    }

    let step = upstream.likes_per_hit.load(Ordering::SeqCst);
    upstream.liked.fetch_add(step, Ordering::SeqCst);
    StatusCode::OK
}

/// Serves the fake upstream on an ephemeral port and returns its base URL.
pub(crate) async fn spawn_upstream(upstream: Arc<Upstream>) -> String {
    let app = Router::new()
        .route("/token", get(token))
        .route("/player-info", get(player_info))
        .route("/LikeProfile", post(like))
        .with_state(upstream);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

pub(crate) fn test_args(base: &str, accounts_file: &str) -> Args {
    config::defaults()
        .unwrap()
        .set_override("auth_url", format!("{base}/token"))
        .unwrap()
        .set_override("info_url", format!("{base}/player-info"))
        .unwrap()
        .set_override("like_url", format!("{base}/LikeProfile"))
        .unwrap()
        .set_override("accounts_file", accounts_file)
        .unwrap()
        .set_override("retry_backoff_ms", 1)
        .unwrap()
        .set_override("access_key", "secret")
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap()
}

/// Writes `contents` to a fresh file under the system temp dir.
pub(crate) fn accounts_file(name: &str, contents: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    let path = std::env::temp_dir().join(format!(
        "likerelay-{}-{}-{}.json",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::SeqCst),
        name
    ));
    std::fs::write(&path, contents).unwrap();
    path
}
