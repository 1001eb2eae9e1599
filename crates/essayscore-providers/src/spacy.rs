//! spaCy document-analysis client.
//!
//! Expects a small HTTP wrapper around a spaCy pipeline exposing
//! `POST /analyze`, which takes `{"text", "model"}` and returns the parsed
//! document's entities and sentence spans.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use essayscore_core::error::ServiceError;
use essayscore_core::model::{Document, Entity, EntityLabel, SentenceSpan};
use essayscore_core::traits::DocumentAnalyzer;

use crate::http::{build_client, check_status, send_error, trim_base_url, DEFAULT_TIMEOUT_SECS};

const SERVICE: &str = "spacy";
const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_MODEL: &str = "en_core_web_sm";

/// spaCy analysis service client.
pub struct SpacyAnalyzer {
    base_url: String,
    model: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl SpacyAnalyzer {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: trim_base_url(base_url, DEFAULT_BASE_URL),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs,
            client: build_client(timeout_secs)?,
        })
    }

    /// Use a different spaCy pipeline than `en_core_web_sm`.
    pub fn model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
    model: &'a str,
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    ents: Vec<SpacyEntity>,
    #[serde(default)]
    sents: Vec<SpacySpan>,
}

#[derive(Deserialize)]
struct SpacyEntity {
    text: String,
    label: String,
}

#[derive(Deserialize)]
struct SpacySpan {
    start: usize,
    end: usize,
}

#[async_trait]
impl DocumentAnalyzer for SpacyAnalyzer {
    fn name(&self) -> &str {
        SERVICE
    }

    #[instrument(skip(self, text), fields(model = %self.model, chars = text.len()))]
    async fn analyze(&self, text: &str) -> anyhow::Result<Document> {
        let body = AnalyzeRequest {
            text,
            model: &self.model,
        };

        let response = self
            .client
            .post(format!("{}/analyze", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| send_error(e, SERVICE, &self.base_url, self.timeout_secs))?;

        let response = check_status(response, SERVICE).await?;

        let parsed: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::InvalidResponse {
                service: SERVICE,
                message: e.to_string(),
            })?;

        Ok(Document {
            text: parsed.text.unwrap_or_else(|| text.to_string()),
            entities: parsed
                .ents
                .into_iter()
                .map(|e| Entity {
                    text: e.text,
                    label: EntityLabel::from(e.label),
                })
                .collect(),
            sentences: parsed
                .sents
                .into_iter()
                .map(|s| SentenceSpan {
                    start: s.start,
                    end: s.end,
                })
                .collect(),
        })
    }
}
