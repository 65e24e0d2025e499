use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::listing::{decode_list, encode_list, ListQuery};
use crate::projects::dto::CreateProjectRequest;

/// Raw projects row; list-valued columns are JSON-serialized text.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub repository_url: String,
    pub languages: String,
    pub maintainer_requirements: Option<String>,
    pub is_paid: bool,
    pub compensation_amount: Option<f64>,
    pub compensation_currency: Option<String>,
    pub compensation_description: Option<String>,
    pub owner_id: Uuid,
    pub status: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Project as exposed by the API: same shape as the row with the
/// languages list decoded.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub repository_url: String,
    pub languages: Vec<String>,
    pub maintainer_requirements: Option<String>,
    pub is_paid: bool,
    pub compensation_amount: Option<f64>,
    pub compensation_currency: Option<String>,
    pub compensation_description: Option<String>,
    pub owner_id: Uuid,
    pub status: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            name: row.name,
            description: row.description,
            repository_url: row.repository_url,
            languages: decode_list(&row.languages),
            maintainer_requirements: row.maintainer_requirements,
            is_paid: row.is_paid,
            compensation_amount: row.compensation_amount,
            compensation_currency: row.compensation_currency,
            compensation_description: row.compensation_description,
            owner_id: row.owner_id,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub async fn create(
    db: &PgPool,
    owner_id: Uuid,
    req: &CreateProjectRequest,
) -> anyhow::Result<Project> {
    let compensation = req.compensation.as_ref();
    let row = sqlx::query_as::<_, ProjectRow>(
        r#"
        INSERT INTO projects (
            id, name, description, repository_url, languages,
            maintainer_requirements, is_paid, compensation_amount,
            compensation_currency, compensation_description, owner_id, status
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&req.name)
    .bind(&req.description)
    .bind(&req.repository_url)
    .bind(encode_list(&req.languages))
    .bind(req.maintainer_requirements.as_deref())
    .bind(req.is_paid)
    .bind(compensation.and_then(|c| c.amount))
    .bind(compensation.and_then(|c| c.currency.as_deref()))
    .bind(compensation.and_then(|c| c.description.as_deref()))
    .bind(owner_id)
    .bind("open")
    .fetch_one(db)
    .await?;
    Ok(row.into())
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Project>> {
    let row = sqlx::query_as::<_, ProjectRow>(r#"SELECT * FROM projects WHERE id = $1"#)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row.map(Project::from))
}

/// Page fetch plus count with identical predicates. Two independent round
/// trips; the count can drift from the page under concurrent writes.
pub async fn list(db: &PgPool, query: &ListQuery) -> anyhow::Result<(Vec<Project>, i64)> {
    let mut select = query.select();
    let rows = select
        .build_query_as::<ProjectRow>()
        .fetch_all(db)
        .await?;
    let mut count = query.count();
    let total = count.build_query_scalar::<i64>().fetch_one(db).await?;
    Ok((rows.into_iter().map(Project::from).collect(), total))
}
