//! Topical relevance of an essay to its extracted concepts.
//!
//! The rule compares a count of concept hits against half the sentence
//! count. Hits are substring checks against the whole essay, one per concept
//! entry, so the two sides are in different units. That comparison is kept
//! as-is; the tests below pin its boundaries.

use anyhow::Result;

use crate::model::Concepts;
use crate::traits::DocumentAnalyzer;

/// Number of concept entries (repeats included) found anywhere in `essay`,
/// compared case-insensitively.
pub fn concept_hits(essay: &str, concepts: &[String]) -> usize {
    let essay = essay.to_lowercase();
    concepts
        .iter()
        .filter(|c| essay.contains(&c.to_lowercase()))
        .count()
}

/// The relevance decision given the hit count and sentence count.
pub fn judge(hits: usize, total_sentences: usize) -> bool {
    hits >= total_sentences / 2
}

/// Whether the essay references its concepts often enough.
///
/// Undetermined concepts are always relevant and the analyzer is not called.
/// Otherwise the essay is re-analyzed for sentence segmentation.
pub async fn is_relevant(
    analyzer: &dyn DocumentAnalyzer,
    essay: &str,
    concepts: &Concepts,
) -> Result<bool> {
    let Some(concepts) = concepts.as_slice() else {
        return Ok(true);
    };

    let document = analyzer.analyze(essay).await?;
    let hits = concept_hits(essay, concepts);
    let total_sentences = document.sentences.len();
    let relevant = judge(hits, total_sentences);

    tracing::debug!(hits, total_sentences, relevant, "relevance check");
    Ok(relevant)
}
