use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Application-wide error type, converted to `{"error": "..."}` JSON
/// responses via `IntoResponse`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing resource; the message names it ("User not found", ...).
    #[error("{0}")]
    NotFound(&'static str),

    /// No session cookie on a protected route.
    #[error("Authentication required")]
    Unauthenticated,

    /// Session token unknown or past its expiry. The two cases are not
    /// distinguished: expiry is applied during the lookup, so both read
    /// as a missing session.
    #[error("Session expired")]
    SessionExpired,

    #[error("{0}")]
    BadRequest(String),

    /// OAuth code exchange or GitHub API call failed.
    #[error("Authentication failed")]
    UpstreamAuth(#[source] anyhow::Error),

    /// Anything else, store errors included. Surfaces as a generic 500.
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthenticated | AppError::SessionExpired => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamAuth(e) => {
                tracing::error!(error = %e, "upstream auth failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn unauthenticated_is_401_with_expected_body() {
        let resp = AppError::Unauthenticated.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(resp).await["error"], "Authentication required");
    }

    #[tokio::test]
    async fn session_expired_is_401_with_expected_body() {
        let resp = AppError::SessionExpired.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(resp).await["error"], "Session expired");
    }

    #[tokio::test]
    async fn not_found_carries_resource_message() {
        let resp = AppError::NotFound("Project not found").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["error"], "Project not found");
    }

    #[tokio::test]
    async fn upstream_auth_is_500_authentication_failed() {
        let resp = AppError::UpstreamAuth(anyhow::anyhow!("token endpoint 502")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await["error"], "Authentication failed");
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let resp = AppError::Internal(anyhow::anyhow!("connection refused")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await["error"], "Internal server error");
    }
}
