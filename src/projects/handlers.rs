use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::AuthUser;
use crate::error::{AppError, AppResult};
use crate::listing::{ListQuery, Pagination};
use crate::projects::dto::{
    CreateProjectRequest, ProjectListQuery, ProjectListResponse, ProjectResponse,
};
use crate::projects::repo;
use crate::state::AppState;

pub fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/:id", get(get_project))
}

#[instrument(skip(state))]
pub async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectListQuery>,
) -> AppResult<Json<ProjectListResponse>> {
    let query = ListQuery::new("projects")
        .list_contains("languages", params.language)
        .equals("status", params.status)
        .flag("is_paid", params.is_paid.as_deref())
        .sort(params.sort_by.as_deref(), params.order.as_deref())
        .paginate(params.page, params.limit);

    let (projects, total) = repo::list(&state.db, &query).await?;
    Ok(Json(ProjectListResponse {
        projects,
        pagination: Pagination::new(params.page, params.limit, total),
    }))
}

/// Owner is always the session user; the request body cannot name one.
#[instrument(skip(state, payload))]
pub async fn create_project(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<ProjectResponse>)> {
    let project = repo::create(&state.db, user.id, &payload).await?;
    info!(project_id = %project.id, owner_id = %user.id, "project created");
    Ok((StatusCode::CREATED, Json(ProjectResponse { project })))
}

#[instrument(skip(state))]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProjectResponse>> {
    let project = repo::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("Project not found"))?;
    Ok(Json(ProjectResponse { project }))
}
