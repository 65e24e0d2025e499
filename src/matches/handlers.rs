use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::error::AppResult;
use crate::matches::dto::{CreateMatchRequest, MatchListResponse, MatchResponse};
use crate::matches::repo::Match;
use crate::state::AppState;

pub fn match_routes() -> Router<AppState> {
    Router::new().route("/matches", get(list_matches).post(create_match))
}

#[instrument(skip(state))]
pub async fn list_matches(State(state): State<AppState>) -> AppResult<Json<MatchListResponse>> {
    let matches = Match::list(&state.db).await?;
    Ok(Json(MatchListResponse { matches }))
}

/// New matches always start out pending, whatever the caller intends.
#[instrument(skip(state, payload))]
pub async fn create_match(
    State(state): State<AppState>,
    Json(payload): Json<CreateMatchRequest>,
) -> AppResult<(StatusCode, Json<MatchResponse>)> {
    let matched = Match::create(&state.db, &payload).await?;
    info!(match_id = %matched.id, project_id = %matched.project_id, "match created");
    Ok((StatusCode::CREATED, Json(MatchResponse { matched })))
}
