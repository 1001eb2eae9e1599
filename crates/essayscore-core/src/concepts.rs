//! Concept extraction via named-entity recognition.

use anyhow::Result;

use crate::model::{Concepts, Document};
use crate::traits::DocumentAnalyzer;

/// Texts of the concept entities in `document`, in service order.
pub fn concepts_in(document: &Document) -> Concepts {
    Concepts::from_list(
        document
            .entities
            .iter()
            .filter(|e| e.label.is_concept())
            .map(|e| e.text.clone())
            .collect(),
    )
}

/// Analyze a normalized essay and keep the entities that count as concepts
/// (organizations, people, geopolitical entities, nationality/religious/
/// political groups, products, events).
pub async fn extract_concepts(analyzer: &dyn DocumentAnalyzer, essay: &str) -> Result<Concepts> {
    let document = analyzer.analyze(essay).await?;
    let concepts = concepts_in(&document);
    tracing::debug!(
        analyzer = analyzer.name(),
        entities = document.entities.len(),
        ?concepts,
        "extracted concepts"
    );
    Ok(concepts)
}
