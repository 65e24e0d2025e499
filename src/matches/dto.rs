use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::matches::repo::Match;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchRequest {
    pub project_id: Uuid,
    pub maintainer_id: Uuid,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchListResponse {
    pub matches: Vec<Match>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    #[serde(rename = "match")]
    pub matched: Match,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn create_request_deserializes_camel_case() {
        let req: CreateMatchRequest = serde_json::from_str(
            r#"{
                "projectId": "6ecd8c99-4036-403d-bf84-cf8400f67836",
                "maintainerId": "3f333df6-90a4-4fda-8dd3-9485d27cee36",
                "message": "I would like to help!"
            }"#,
        )
        .expect("deserialize");
        assert_eq!(req.message.as_deref(), Some("I would like to help!"));
    }

    #[test]
    fn response_envelope_uses_match_key() {
        let response = MatchResponse {
            matched: Match {
                id: Uuid::new_v4(),
                project_id: Uuid::new_v4(),
                maintainer_id: Uuid::new_v4(),
                status: "pending".into(),
                message: Some("I would like to help!".into()),
                created_at: OffsetDateTime::UNIX_EPOCH,
                updated_at: OffsetDateTime::UNIX_EPOCH,
            },
        };
        let v = serde_json::to_value(&response).expect("serialize");
        assert_eq!(v["match"]["status"], "pending");
        assert_eq!(v["match"]["message"], "I would like to help!");
    }
}
