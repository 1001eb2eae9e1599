//! LanguageTool grammar checker.
//!
//! Talks to a LanguageTool server (self-hosted or the public API) through
//! its `/v2/check` endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use essayscore_core::error::ServiceError;
use essayscore_core::model::GrammarMatch;
use essayscore_core::traits::{GrammarChecker, DEFAULT_LANGUAGE};

use crate::http::{build_client, check_status, send_error, trim_base_url, DEFAULT_TIMEOUT_SECS};

const SERVICE: &str = "languagetool";
const DEFAULT_BASE_URL: &str = "http://localhost:8081";

/// LanguageTool HTTP client.
pub struct LanguageToolChecker {
    base_url: String,
    language: String,
    credentials: Option<(String, String)>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl LanguageToolChecker {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: trim_base_url(base_url, DEFAULT_BASE_URL),
            language: DEFAULT_LANGUAGE.to_string(),
            credentials: None,
            timeout_secs,
            client: build_client(timeout_secs)?,
        })
    }

    /// Check against a different locale than `en-US`.
    pub fn language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    /// Premium API credentials.
    pub fn credentials(mut self, username: &str, api_key: &str) -> Self {
        self.credentials = Some((username.to_string(), api_key.to_string()));
        self
    }
}

#[derive(Deserialize)]
struct CheckResponse {
    matches: Vec<LtMatch>,
}

#[derive(Deserialize)]
struct LtMatch {
    message: String,
    offset: usize,
    length: usize,
    #[serde(default)]
    replacements: Vec<LtReplacement>,
    #[serde(default)]
    rule: Option<LtRule>,
}

#[derive(Deserialize)]
struct LtReplacement {
    value: String,
}

#[derive(Deserialize)]
struct LtRule {
    id: String,
}

impl From<LtMatch> for GrammarMatch {
    fn from(m: LtMatch) -> Self {
        GrammarMatch {
            message: m.message,
            offset: m.offset,
            length: m.length,
            rule_id: m.rule.map(|r| r.id).unwrap_or_default(),
            replacements: m.replacements.into_iter().map(|r| r.value).collect(),
        }
    }
}

#[async_trait]
impl GrammarChecker for LanguageToolChecker {
    fn name(&self) -> &str {
        SERVICE
    }

    #[instrument(skip(self, text), fields(language = %self.language, chars = text.len()))]
    async fn check(&self, text: &str) -> anyhow::Result<Vec<GrammarMatch>> {
        let mut form = vec![("text", text), ("language", self.language.as_str())];
        if let Some((username, api_key)) = &self.credentials {
            form.push(("username", username.as_str()));
            form.push(("apiKey", api_key.as_str()));
        }

        let response = self
            .client
            .post(format!("{}/v2/check", self.base_url))
            .form(&form)
            .send()
            .await
            .map_err(|e| send_error(e, SERVICE, &self.base_url, self.timeout_secs))?;

        let response = check_status(response, SERVICE).await?;

        let body: CheckResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::InvalidResponse {
                service: SERVICE,
                message: e.to_string(),
            })?;

        Ok(body.matches.into_iter().map(GrammarMatch::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn parses_matches() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "software": {"name": "LanguageTool"},
            "matches": [
                {
                    "message": "Possible spelling mistake found.",
                    "shortMessage": "Spelling mistake",
                    "offset": 4,
                    "length": 3,
                    "replacements": [{"value": "cat"}, {"value": "cap"}],
                    "rule": {"id": "MORFOLOGIK_RULE_EN_US", "description": "Possible spelling mistake"}
                },
                {
                    "message": "Use \"an\" instead of \"a\".",
                    "offset": 10,
                    "length": 1,
                    "replacements": [{"value": "an"}],
                    "rule": {"id": "EN_A_VS_AN"}
                }
            ]
        });

        Mock::given(method("POST"))
            .and(path("/v2/check"))
            .and(body_string_contains("language=en-US"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let checker = LanguageToolChecker::new(&server.uri()).unwrap();
        let matches = checker.check("the cta sat a apple").await.unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].rule_id, "MORFOLOGIK_RULE_EN_US");
        assert_eq!(matches[0].replacements, vec!["cat", "cap"]);
        assert_eq!(matches[1].offset, 10);
    }

    #[tokio::test]
    async fn sends_credentials_when_configured() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/check"))
            .and(body_string_contains("apiKey=secret"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"matches": []})),
            )
            .mount(&server)
            .await;

        let checker = LanguageToolChecker::new(&server.uri())
            .unwrap()
            .credentials("me@example.com", "secret");
        let matches = checker.check("fine text").await.unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn rate_limited() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/check"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let checker = LanguageToolChecker::new(&server.uri()).unwrap();
        let err = checker.check("text").await.unwrap_err();
        let service = err.downcast_ref::<ServiceError>().unwrap();
        assert!(matches!(service, ServiceError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn server_error_carries_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/check"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal failure"))
            .mount(&server)
            .await;

        let checker = LanguageToolChecker::new(&server.uri()).unwrap();
        let err = checker.check("text").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "languagetool error (HTTP 500): internal failure"
        );
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/check"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let checker = LanguageToolChecker::new(&server.uri()).unwrap();
        let err = checker.check("text").await.unwrap_err();
        assert!(err.to_string().contains("invalid response from languagetool"));
    }

    #[tokio::test]
    async fn unreachable_service() {
        // Nothing listens on port 9 (discard) in the test environment.
        let checker = LanguageToolChecker::new("http://127.0.0.1:9").unwrap();
        let err = checker.check("text").await.unwrap_err();
        assert!(err.to_string().contains("network error"));
    }
}
