//! Grammar signal extraction.

use anyhow::Result;

use crate::model::GrammarMatch;
use crate::traits::GrammarChecker;

/// Grammar issues found in an essay.
#[derive(Debug, Clone)]
pub struct GrammarReport {
    /// Number of issues; always `matches.len()`.
    pub error_count: usize,
    pub matches: Vec<GrammarMatch>,
}

/// Run the grammar checker over a normalized essay.
///
/// Checker errors are returned unchanged.
pub async fn check_grammar(checker: &dyn GrammarChecker, essay: &str) -> Result<GrammarReport> {
    let matches = checker.check(essay).await?;
    tracing::debug!(checker = checker.name(), ?matches, "grammar matches");

    Ok(GrammarReport {
        error_count: matches.len(),
        matches,
    })
}
