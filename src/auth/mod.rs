use crate::state::AppState;
use axum::Router;

pub(crate) mod extractors;
pub mod github;
pub mod handlers;
pub mod session;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
