use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::listing::{ListQuery, Pagination};
use crate::maintainers::dto::{
    CreateMaintainerRequest, MaintainerListQuery, MaintainerListResponse, MaintainerResponse,
};
use crate::maintainers::repo;
use crate::state::AppState;

pub fn maintainer_routes() -> Router<AppState> {
    Router::new()
        .route("/maintainers", get(list_maintainers).post(create_maintainer))
        .route("/maintainers/:id", get(get_maintainer))
}

#[instrument(skip(state))]
pub async fn list_maintainers(
    State(state): State<AppState>,
    Query(params): Query<MaintainerListQuery>,
) -> AppResult<Json<MaintainerListResponse>> {
    let query = ListQuery::new("maintainers")
        .list_contains("skills", params.skill)
        .list_contains("languages", params.language)
        .equals("availability", params.availability)
        .flag("interested_in_paid", params.interested_in_paid.as_deref())
        .sort(params.sort_by.as_deref(), params.order.as_deref())
        .paginate(params.page, params.limit);

    let (maintainers, total) = repo::list(&state.db, &query).await?;
    Ok(Json(MaintainerListResponse {
        maintainers,
        pagination: Pagination::new(params.page, params.limit, total),
    }))
}

#[instrument(skip(state, payload))]
pub async fn create_maintainer(
    State(state): State<AppState>,
    Json(payload): Json<CreateMaintainerRequest>,
) -> AppResult<(StatusCode, Json<MaintainerResponse>)> {
    let maintainer = repo::create(&state.db, &payload).await?;
    info!(maintainer_id = %maintainer.id, github_username = %maintainer.github_username, "maintainer profile created");
    Ok((StatusCode::CREATED, Json(MaintainerResponse { maintainer })))
}

#[instrument(skip(state))]
pub async fn get_maintainer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MaintainerResponse>> {
    let maintainer = repo::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("Maintainer not found"))?;
    Ok(Json(MaintainerResponse { maintainer }))
}
