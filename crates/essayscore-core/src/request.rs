//! The request boundary.
//!
//! Validates the submitted essay field, runs the scoring policy, and maps
//! failures onto the two outcomes a caller can report: a client error for a
//! missing essay, or a processing error carrying the failure's message.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::error::ServiceError;
use crate::normalize::normalize_value;
use crate::policy::ScoringPolicy;

/// A score submission. `essay` is untyped; non-string values are scored as
/// an empty essay.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub essay: Option<Value>,
}

impl ScoreRequest {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            essay: Some(Value::String(text.into())),
        }
    }
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub score: i64,
    pub explanation: Vec<String>,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Why a submission failed.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The essay field was absent, null, or empty. The policy never ran.
    #[error("No essay provided")]
    MissingEssay,

    /// Scoring failed; carries the underlying error's message.
    #[error("{0}")]
    Processing(String),
}

impl SubmitError {
    /// Whether the caller, rather than the scorer, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SubmitError::MissingEssay)
    }

    /// HTTP-style status for hosts that speak HTTP.
    pub fn status_code(&self) -> u16 {
        match self {
            SubmitError::MissingEssay => 400,
            SubmitError::Processing(_) => 500,
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }
}

fn is_missing(essay: Option<&Value>) -> bool {
    match essay {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.is_empty(),
        Some(_) => false,
    }
}

/// Score a submission.
pub async fn submit(
    policy: &ScoringPolicy,
    request: &ScoreRequest,
) -> Result<ScoreResponse, SubmitError> {
    let essay = request.essay.as_ref();
    if is_missing(essay) {
        return Err(SubmitError::MissingEssay);
    }

    let normalized = essay.map(normalize_value).unwrap_or_default();
    match policy.score_normalized(&normalized).await {
        Ok(result) => Ok(ScoreResponse {
            score: result.score,
            explanation: result.explanation,
        }),
        Err(e) => {
            match e.downcast_ref::<ServiceError>() {
                Some(service) if service.is_rejection() => {
                    tracing::warn!("service rejected scoring request: {service}")
                }
                _ => tracing::error!("scoring failed: {e:#}"),
            }
            Err(SubmitError::Processing(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DatasetIndex, DatasetLookup};
    use crate::model::{Document, GrammarMatch, LabeledEssayRecord};
    use crate::traits::{DocumentAnalyzer, GrammarChecker};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct Counting {
        calls: AtomicU32,
        fail_with: Option<fn() -> anyhow::Error>,
    }

    #[async_trait]
    impl GrammarChecker for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        async fn check(&self, _text: &str) -> anyhow::Result<Vec<GrammarMatch>> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            match self.fail_with {
                Some(make) => Err(make()),
                None => Ok(vec![]),
            }
        }
    }

    #[async_trait]
    impl DocumentAnalyzer for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        async fn analyze(&self, text: &str) -> anyhow::Result<Document> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(Document {
                text: text.to_string(),
                ..Default::default()
            })
        }
    }

    fn refused() -> anyhow::Error {
        ServiceError::NetworkError("connection refused".into()).into()
    }

    fn policy_with(grammar: Arc<Counting>) -> ScoringPolicy {
        let train = DatasetIndex::from_records([LabeledEssayRecord {
            essay: "the cat sat".into(),
            score: 4,
        }]);
        ScoringPolicy::new(
            Arc::new(DatasetLookup::from_tables(Some(train), None)),
            grammar,
            Arc::new(Counting::default()),
        )
    }

    #[tokio::test]
    async fn missing_essay_is_a_client_error() {
        let grammar = Arc::new(Counting::default());
        let policy = policy_with(grammar.clone());

        for request in [
            ScoreRequest::default(),
            ScoreRequest { essay: Some(json!(null)) },
            ScoreRequest::from_text(""),
        ] {
            let err = submit(&policy, &request).await.unwrap_err();
            assert!(err.is_client_error());
            assert_eq!(err.status_code(), 400);
            assert_eq!(err.to_body().error, "No essay provided");
        }
        assert_eq!(grammar.calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn dataset_essay_is_scored() {
        let policy = policy_with(Arc::new(Counting::default()));
        let response = submit(&policy, &ScoreRequest::from_text("The cat sat"))
            .await
            .unwrap();
        assert_eq!(response.score, 4);
        assert_eq!(
            response.explanation,
            vec!["Matched essay in the dataset with a score of 4."]
        );
    }

    #[tokio::test]
    async fn non_string_essay_scores_as_empty() {
        let grammar = Arc::new(Counting::default());
        let policy = policy_with(grammar.clone());

        let response = submit(&policy, &ScoreRequest { essay: Some(json!(42)) })
            .await
            .unwrap();
        assert_eq!(response.explanation[0], "The essay has 0 lines.");
        assert_eq!(grammar.calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn service_failure_is_a_processing_error() {
        let grammar = Arc::new(Counting {
            calls: AtomicU32::new(0),
            fail_with: Some(refused as fn() -> anyhow::Error),
        });
        let policy = policy_with(grammar);

        let err = submit(&policy, &ScoreRequest::from_text("an essay"))
            .await
            .unwrap_err();
        assert!(!err.is_client_error());
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_string(), "network error: connection refused");
    }

    #[test]
    fn request_deserializes_without_essay() {
        let request: ScoreRequest = serde_json::from_str("{}").unwrap();
        assert!(request.essay.is_none());

        let request: ScoreRequest = serde_json::from_str(r#"{"essay": "text"}"#).unwrap();
        assert_eq!(request.essay, Some(json!("text")));
    }
}
