use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::matches::dto::CreateMatchRequest;

/// Recorded matching intent between a project and a maintainer. Created
/// in `pending` state; no transition endpoints exist.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Match {
    pub id: Uuid,
    pub project_id: Uuid,
    pub maintainer_id: Uuid,
    pub status: String,
    pub message: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Match {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Match>> {
        let matches = sqlx::query_as::<_, Match>(
            r#"
            SELECT id, project_id, maintainer_id, status, message, created_at, updated_at
            FROM matches
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(matches)
    }

    pub async fn create(db: &PgPool, req: &CreateMatchRequest) -> anyhow::Result<Match> {
        let row = sqlx::query_as::<_, Match>(
            r#"
            INSERT INTO matches (id, project_id, maintainer_id, status, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, project_id, maintainer_id, status, message, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(req.project_id)
        .bind(req.maintainer_id)
        .bind("pending")
        .bind(req.message.as_deref())
        .fetch_one(db)
        .await?;
        Ok(row)
    }
}
