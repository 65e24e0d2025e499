use serde::{Deserialize, Serialize};

use crate::listing::{Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::projects::repo::Project;

#[derive(Debug, Deserialize)]
pub struct CompensationInput {
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: String,
    pub repository_url: String,
    pub languages: Vec<String>,
    pub maintainer_requirements: Option<String>,
    pub is_paid: bool,
    pub compensation: Option<CompensationInput>,
}

/// Query parameters recognized by the project listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListQuery {
    pub language: Option<String>,
    pub status: Option<String>,
    pub is_paid: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<Project>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub project: Project,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_deserializes_camel_case_with_nested_compensation() {
        let req: CreateProjectRequest = serde_json::from_str(
            r#"{
                "name": "Python Tool",
                "description": "A Python tool",
                "repositoryUrl": "https://github.com/test/py-tool",
                "languages": ["Python", "JavaScript"],
                "isPaid": true,
                "compensation": { "amount": 1000, "currency": "USD" }
            }"#,
        )
        .expect("deserialize");

        assert_eq!(req.repository_url, "https://github.com/test/py-tool");
        assert_eq!(req.languages, vec!["Python", "JavaScript"]);
        assert!(req.is_paid);
        assert!(req.maintainer_requirements.is_none());
        let compensation = req.compensation.expect("compensation");
        assert_eq!(compensation.amount, Some(1000.0));
        assert_eq!(compensation.currency.as_deref(), Some("USD"));
        assert!(compensation.description.is_none());
    }

    #[test]
    fn list_query_defaults_page_and_limit() {
        let q: ProjectListQuery = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 10);
        assert!(q.language.is_none());
        assert!(q.sort_by.is_none());
    }
}
