//! Core trait definitions for the external analysis services.
//!
//! These async traits are implemented by the `essayscore-providers` crate.
//! The scoring pipeline only ever sees them as trait objects.

use async_trait::async_trait;

use crate::model::{Document, GrammarMatch};

/// Default locale for grammar checking.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Trait for grammar-checking backends.
#[async_trait]
pub trait GrammarChecker: Send + Sync {
    /// Human-readable service name (e.g. "languagetool").
    fn name(&self) -> &str;

    /// Check `text` and return every issue found. The number of matches is
    /// the essay's grammar error count.
    async fn check(&self, text: &str) -> anyhow::Result<Vec<GrammarMatch>>;
}

/// Trait for NLP document-analysis backends (named entities and sentences).
#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    /// Human-readable service name (e.g. "spacy").
    fn name(&self) -> &str;

    /// Analyze `text`, returning its entities and sentence segmentation.
    async fn analyze(&self, text: &str) -> anyhow::Result<Document>;
}
