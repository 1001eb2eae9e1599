//! The scoring policy.
//!
//! Runs the dataset shortcut and then each signal in a fixed order, applying
//! an additive rule to a base score of 3 and clamping the result to 1..=6.
//! Every applied rule appends one line to the explanation.

use std::sync::Arc;

use anyhow::Result;

use crate::concepts::extract_concepts;
use crate::dataset::DatasetLookup;
use crate::grammar::check_grammar;
use crate::model::ScoreResult;
use crate::normalize::normalize;
use crate::relevance::is_relevant;
use crate::structure::count_lines;
use crate::traits::{DocumentAnalyzer, GrammarChecker};

/// Score every pipeline essay starts from.
pub const BASE_SCORE: i64 = 3;
/// Lowest score the pipeline can assign.
pub const MIN_SCORE: i64 = 1;
/// Highest score the pipeline can assign.
pub const MAX_SCORE: i64 = 6;
/// Points removed from an off-topic essay.
pub const OFF_TOPIC_PENALTY: i64 = 3;

/// Score change and rationale for the essay's line count.
pub fn line_adjustment(lines: usize) -> (i64, &'static str) {
    if lines >= 10 {
        (2, "The essay has 10 or more lines, so 2 points were added.")
    } else if lines >= 5 {
        (1, "The essay has 5 to 9 lines, so 1 point was added.")
    } else {
        (-1, "The essay has fewer than 5 lines, so 1 point was subtracted.")
    }
}

/// Score change and rationale for the essay's grammar error count.
pub fn grammar_adjustment(errors: usize) -> (i64, &'static str) {
    if errors > 10 {
        (
            -2,
            "The essay has more than 10 grammatical errors, so 2 points were subtracted.",
        )
    } else if errors > 5 {
        (
            -1,
            "The essay has 6 to 10 grammatical errors, so 1 point was subtracted.",
        )
    } else {
        (
            1,
            "The essay has 5 or fewer grammatical errors, so 1 point was added.",
        )
    }
}

/// Clamp a raw pipeline score into `MIN_SCORE..=MAX_SCORE`.
pub fn clamp_score(score: i64) -> i64 {
    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// The scoring pipeline, holding the long-lived dataset and service handles.
pub struct ScoringPolicy {
    dataset: Arc<DatasetLookup>,
    grammar: Arc<dyn GrammarChecker>,
    analyzer: Arc<dyn DocumentAnalyzer>,
}

impl ScoringPolicy {
    pub fn new(
        dataset: Arc<DatasetLookup>,
        grammar: Arc<dyn GrammarChecker>,
        analyzer: Arc<dyn DocumentAnalyzer>,
    ) -> Self {
        Self {
            dataset,
            grammar,
            analyzer,
        }
    }

    /// Score an essay.
    ///
    /// Errors from the grammar checker or the analyzer are returned as-is;
    /// no partial result is produced.
    pub async fn score(&self, essay: &str) -> Result<ScoreResult> {
        let essay = normalize(essay);
        self.score_normalized(&essay).await
    }

    /// Score an essay that has already been normalized.
    pub async fn score_normalized(&self, essay: &str) -> Result<ScoreResult> {
        let mut explanation = Vec::new();

        if let Some(score) = self.dataset.lookup(essay) {
            tracing::info!(score, "essay matched the dataset");
            explanation.push(format!(
                "Matched essay in the dataset with a score of {score}."
            ));
            return Ok(ScoreResult { score, explanation });
        }

        let lines = count_lines(essay);
        explanation.push(format!("The essay has {lines} lines."));

        let grammar = check_grammar(self.grammar.as_ref(), essay).await?;
        explanation.push(format!(
            "The essay contains {} grammatical errors.",
            grammar.error_count
        ));

        let mut score = BASE_SCORE;

        let (delta, reason) = line_adjustment(lines);
        score += delta;
        explanation.push(reason.to_string());

        let (delta, reason) = grammar_adjustment(grammar.error_count);
        score += delta;
        explanation.push(reason.to_string());

        let concepts = extract_concepts(self.analyzer.as_ref(), essay).await?;
        if !is_relevant(self.analyzer.as_ref(), essay, &concepts).await? {
            score -= OFF_TOPIC_PENALTY;
            explanation.push("The essay is off-topic, so 3 points were subtracted.".to_string());
        }

        let raw = score;
        let score = clamp_score(raw);
        explanation.push(format!("The final score is {score}."));

        tracing::info!(
            lines,
            errors = grammar.error_count,
            raw,
            score,
            "scored essay"
        );

        Ok(ScoreResult { score, explanation })
    }
}
