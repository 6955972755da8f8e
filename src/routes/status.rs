use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::request::KeyParams;
use crate::types::response::{Refreshed, Status};
use crate::utils::auth::authorize;

#[instrument(skip_all)]
pub(crate) async fn home(State(state): State<AppState>) -> Json<Status> {
    Json(Status {
        status: "live",
        tokens_loaded: state.tokens.len().await,
    })
}

#[instrument(skip_all)]
pub(crate) async fn tokens(State(state): State<AppState>) -> Response {
    let tokens = state.tokens.snapshot().await;

    if tokens.is_empty() {
        Json(json!({ "error": "No tokens" })).into_response()
    } else {
        Json(tokens.as_ref().clone()).into_response()
    }
}

#[instrument(skip_all)]
pub(crate) async fn refresh(
    State(state): State<AppState>,
    Query(params): Query<KeyParams>,
) -> Result<Json<Refreshed>, Error> {
    authorize(params.key.as_deref(), &state.access_key)?;

    Ok(Json(Refreshed {
        tokens_loaded: state.refresh_tokens().await,
    }))
}
