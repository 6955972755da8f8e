use axum::Json;
use axum::extract::{Query, State};
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::request::LikeParams;
use crate::types::response::LikeSummary;
use crate::utils::auth::authorize;

#[instrument(skip_all, fields(uid = ?params.uid, server_name = ?params.server_name))]
pub(crate) async fn like(
    State(state): State<AppState>,
    Query(params): Query<LikeParams>,
) -> Result<Json<LikeSummary>, Error> {
    authorize(params.key.as_deref(), &state.access_key)?;

    let uid = params.uid.as_deref().map(str::trim).unwrap_or_default();
    let region = params
        .server_name
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();

    if uid.is_empty() || region.is_empty() {
        return Err(Error::MissingParams);
    }

    if state.tokens.len().await == 0 {
        return Err(Error::NoTokens);
    }

    if !state.usage.try_acquire().await {
        return Err(Error::DailyLimit);
    }

    let summary = state
        .send_likes(uid, &region.to_uppercase(), params.account.as_deref())
        .await?;

    Ok(Json(summary))
}
