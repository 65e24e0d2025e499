use anyhow::Context;
use serde::Deserialize;
use url::Url;

use crate::config::GithubConfig;

const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const USER_API_URL: &str = "https://api.github.com/user";

/// GitHub rejects API requests without a User-Agent.
const USER_AGENT: &str = "ossmatch";

/// Profile fields we consume from `GET /user`.
#[derive(Debug, Deserialize)]
pub struct GithubUser {
    pub id: i64,
    pub login: String,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

pub fn redirect_uri(app_url: &str) -> String {
    format!("{}/auth/callback", app_url)
}

pub fn authorize_url(config: &GithubConfig, app_url: &str, state: &str) -> anyhow::Result<String> {
    let mut url = Url::parse(AUTHORIZE_URL)?;
    url.query_pairs_mut()
        .append_pair("client_id", &config.client_id)
        .append_pair("redirect_uri", &redirect_uri(app_url))
        .append_pair("scope", "user:email")
        .append_pair("state", state);
    Ok(url.into())
}

/// Exchange the authorization code for an access token.
pub async fn exchange_code(
    http: &reqwest::Client,
    config: &GithubConfig,
    app_url: &str,
    code: &str,
) -> anyhow::Result<String> {
    let response = http
        .post(TOKEN_URL)
        .header(reqwest::header::ACCEPT, "application/json")
        .form(&[
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", &redirect_uri(app_url)),
        ])
        .send()
        .await?
        .error_for_status()?
        .json::<TokenResponse>()
        .await?;

    response
        .access_token
        .context("token response missing access_token")
}

pub async fn fetch_user(http: &reqwest::Client, access_token: &str) -> anyhow::Result<GithubUser> {
    let user = http
        .get(USER_API_URL)
        .header(
            reqwest::header::AUTHORIZATION,
            format!("Bearer {}", access_token),
        )
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await?
        .error_for_status()?
        .json::<GithubUser>()
        .await?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> GithubConfig {
        GithubConfig {
            client_id: "iv1.test".into(),
            client_secret: "secret".into(),
        }
    }

    #[test]
    fn authorize_url_carries_all_oauth_params() {
        let url = authorize_url(&test_config(), "https://match.example.com", "csrf-state")
            .expect("build url");
        let parsed = Url::parse(&url).expect("valid url");
        let pairs: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert!(url.starts_with("https://github.com/login/oauth/authorize?"));
        assert!(pairs.contains(&("client_id".into(), "iv1.test".into())));
        assert!(pairs.contains(&(
            "redirect_uri".into(),
            "https://match.example.com/auth/callback".into()
        )));
        assert!(pairs.contains(&("scope".into(), "user:email".into())));
        assert!(pairs.contains(&("state".into(), "csrf-state".into())));
    }

    #[test]
    fn redirect_uri_is_percent_encoded_in_query() {
        let url = authorize_url(&test_config(), "https://match.example.com", "s").expect("url");
        assert!(url.contains("redirect_uri=https%3A%2F%2Fmatch.example.com%2Fauth%2Fcallback"));
    }

    #[test]
    fn github_user_deserializes_with_null_email() {
        let user: GithubUser =
            serde_json::from_str(r#"{"id": 583231, "login": "octocat", "email": null}"#)
                .expect("deserialize");
        assert_eq!(user.id, 583231);
        assert_eq!(user.login, "octocat");
        assert!(user.email.is_none());
    }
}
