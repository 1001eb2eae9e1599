//! Core data model types for essayscore.
//!
//! These are the value types passed between the pipeline stages: grammar
//! matches, analyzed documents, extracted concepts, and the final score.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One grammatical issue reported by the grammar checker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarMatch {
    /// Human-readable description of the issue.
    pub message: String,
    /// Character offset of the issue in the checked text.
    pub offset: usize,
    /// Length of the flagged span.
    pub length: usize,
    /// Identifier of the rule that fired.
    #[serde(default)]
    pub rule_id: String,
    /// Suggested replacements, best first.
    #[serde(default)]
    pub replacements: Vec<String>,
}

/// Named-entity category as reported by the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityLabel {
    /// Companies, agencies, institutions.
    Org,
    /// People, including fictional.
    Person,
    /// Countries, cities, states.
    Gpe,
    /// Nationalities or religious or political groups.
    Norp,
    /// Objects, vehicles, foods, etc.
    Product,
    /// Named hurricanes, battles, wars, sports events.
    Event,
    /// Any other label (DATE, CARDINAL, LOC, ...).
    Other(String),
}

impl EntityLabel {
    /// Whether entities with this label count as essay concepts.
    pub fn is_concept(&self) -> bool {
        !matches!(self, EntityLabel::Other(_))
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityLabel::Org => write!(f, "ORG"),
            EntityLabel::Person => write!(f, "PERSON"),
            EntityLabel::Gpe => write!(f, "GPE"),
            EntityLabel::Norp => write!(f, "NORP"),
            EntityLabel::Product => write!(f, "PRODUCT"),
            EntityLabel::Event => write!(f, "EVENT"),
            EntityLabel::Other(label) => write!(f, "{label}"),
        }
    }
}

impl FromStr for EntityLabel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ORG" => EntityLabel::Org,
            "PERSON" => EntityLabel::Person,
            "GPE" => EntityLabel::Gpe,
            "NORP" => EntityLabel::Norp,
            "PRODUCT" => EntityLabel::Product,
            "EVENT" => EntityLabel::Event,
            other => EntityLabel::Other(other.to_string()),
        })
    }
}

impl From<String> for EntityLabel {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(label) => label,
            Err(never) => match never {},
        }
    }
}

impl From<EntityLabel> for String {
    fn from(label: EntityLabel) -> Self {
        label.to_string()
    }
}

/// A named entity found in an essay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// The entity's surface text.
    pub text: String,
    /// The entity's category.
    pub label: EntityLabel,
}

/// A sentence span, as byte offsets into the analyzed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceSpan {
    pub start: usize,
    pub end: usize,
}

/// Result of running document analysis over a piece of text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// The analyzed text.
    pub text: String,
    /// Named entities in service order.
    #[serde(default)]
    pub entities: Vec<Entity>,
    /// Sentence segmentation.
    #[serde(default)]
    pub sentences: Vec<SentenceSpan>,
}

/// Concepts extracted from an essay.
///
/// `Undetermined` means no concept could be identified, which is not the same
/// as an empty list: relevance is never penalized when concepts are
/// undetermined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Concepts {
    Undetermined,
    /// Non-empty, in extraction order, duplicates kept.
    Found(Vec<String>),
}

impl Concepts {
    /// Build from an extraction result, mapping an empty list to `Undetermined`.
    pub fn from_list(concepts: Vec<String>) -> Self {
        if concepts.is_empty() {
            Concepts::Undetermined
        } else {
            Concepts::Found(concepts)
        }
    }

    /// The concepts, if any were identified.
    pub fn as_slice(&self) -> Option<&[String]> {
        match self {
            Concepts::Undetermined => None,
            Concepts::Found(list) => Some(list),
        }
    }
}

/// A score together with the rules that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Holistic score. Pipeline scores are clamped to 1..=6; dataset scores
    /// are returned as stored.
    pub score: i64,
    /// One entry per applied rule, in evaluation order. The last entry
    /// states the final score.
    pub explanation: Vec<String>,
}

/// One row of a reference label table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledEssayRecord {
    /// Preprocessed essay text.
    pub essay: String,
    pub score: i64,
}
