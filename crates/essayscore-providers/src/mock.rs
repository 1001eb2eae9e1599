//! Mock services for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use essayscore_core::model::{Document, Entity, EntityLabel, GrammarMatch, SentenceSpan};
use essayscore_core::traits::{DocumentAnalyzer, GrammarChecker};

/// A mock grammar checker that reports a fixed number of issues.
pub struct MockGrammarChecker {
    error_count: usize,
    failure: Option<String>,
    call_count: AtomicU32,
    last_text: Mutex<Option<String>>,
}

impl MockGrammarChecker {
    /// Report `error_count` issues for every text.
    pub fn with_errors(error_count: usize) -> Self {
        Self {
            error_count,
            failure: None,
            call_count: AtomicU32::new(0),
            last_text: Mutex::new(None),
        }
    }

    /// Fail every check with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::with_errors(0)
        }
    }

    /// Get the number of calls made to this checker.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The text passed to the most recent call.
    pub fn last_text(&self) -> Option<String> {
        self.last_text.lock().unwrap().clone()
    }
}

#[async_trait]
impl GrammarChecker for MockGrammarChecker {
    fn name(&self) -> &str {
        "mock"
    }

    async fn check(&self, text: &str) -> anyhow::Result<Vec<GrammarMatch>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_text.lock().unwrap() = Some(text.to_string());

        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }

        Ok((0..self.error_count)
            .map(|i| GrammarMatch {
                message: format!("mock issue {}", i + 1),
                offset: 0,
                length: 0,
                rule_id: "MOCK_RULE".into(),
                replacements: vec![],
            })
            .collect())
    }
}

/// A mock analyzer returning fixed entities.
///
/// Sentences are split on `.`, `!` and `?` unless a fixed count is set.
pub struct MockAnalyzer {
    entities: Vec<Entity>,
    sentence_count: Option<usize>,
    failure: Option<String>,
    call_count: AtomicU32,
}

impl MockAnalyzer {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self {
            entities,
            sentence_count: None,
            failure: None,
            call_count: AtomicU32::new(0),
        }
    }

    /// An analyzer that finds no entities.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Convenience constructor from `(text, label)` pairs.
    pub fn with_entities(entities: &[(&str, &str)]) -> Self {
        Self::new(
            entities
                .iter()
                .map(|(text, label)| Entity {
                    text: text.to_string(),
                    label: EntityLabel::from(label.to_string()),
                })
                .collect(),
        )
    }

    /// Report exactly `count` sentences regardless of the text.
    pub fn sentences(mut self, count: usize) -> Self {
        self.sentence_count = Some(count);
        self
    }

    /// Fail every analysis with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::empty()
        }
    }

    /// Get the number of calls made to this analyzer.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

fn split_sentences(text: &str) -> Vec<SentenceSpan> {
    let mut spans = Vec::new();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if matches!(c, '.' | '!' | '?') {
            let end = i + c.len_utf8();
            let sentence =
                text[start..end].trim_matches(|ch: char| ch.is_whitespace() || ".!?".contains(ch));
            if !sentence.is_empty() {
                spans.push(SentenceSpan { start, end });
            }
            start = end;
        }
    }
    if !text[start..].trim().is_empty() {
        spans.push(SentenceSpan {
            start,
            end: text.len(),
        });
    }
    spans
}

#[async_trait]
impl DocumentAnalyzer for MockAnalyzer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn analyze(&self, text: &str) -> anyhow::Result<Document> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }

        let sentences = match self.sentence_count {
            Some(count) => vec![SentenceSpan { start: 0, end: 0 }; count],
            None => split_sentences(text),
        };

        Ok(Document {
            text: text.to_string(),
            entities: self.entities.clone(),
            sentences,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn grammar_error_count() {
        let checker = MockGrammarChecker::with_errors(3);
        let matches = checker.check("anything").await.unwrap();
        assert_eq!(matches.len(), 3);
        assert_eq!(checker.call_count(), 1);
        assert_eq!(checker.last_text().as_deref(), Some("anything"));
    }

    #[tokio::test]
    async fn failing_grammar_checker() {
        let checker = MockGrammarChecker::failing("boom");
        let err = checker.check("text").await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(checker.call_count(), 1);
    }

    #[tokio::test]
    async fn analyzer_splits_sentences() {
        let analyzer = MockAnalyzer::with_entities(&[("nasa", "ORG"), ("monday", "DATE")]);
        let doc = analyzer
            .analyze("nasa launched. it worked! did it?  trailing words")
            .await
            .unwrap();

        assert_eq!(doc.entities.len(), 2);
        assert_eq!(doc.entities[0].label, EntityLabel::Org);
        assert_eq!(doc.sentences.len(), 4);
        let first = doc.sentences[0];
        assert_eq!(&doc.text[first.start..first.end], "nasa launched.");
    }

    #[tokio::test]
    async fn analyzer_fixed_sentences_and_ellipsis() {
        let doc = MockAnalyzer::empty().analyze("wait... what").await.unwrap();
        assert_eq!(doc.sentences.len(), 2);

        let doc = MockAnalyzer::empty().sentences(7).analyze("").await.unwrap();
        assert_eq!(doc.sentences.len(), 7);

        let doc = MockAnalyzer::empty().analyze("").await.unwrap();
        assert!(doc.sentences.is_empty());
    }
}
