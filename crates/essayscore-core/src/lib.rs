//! essayscore-core: rule-based essay scoring pipeline.
//!
//! This crate defines the data model, the service traits for grammar checking
//! and document analysis, every signal extractor, and the scoring policy that
//! combines them into a bounded 1 to 6 score with an explanation trail.

pub mod concepts;
pub mod dataset;
pub mod error;
pub mod grammar;
pub mod model;
pub mod normalize;
pub mod policy;
pub mod relevance;
pub mod request;
pub mod structure;
pub mod traits;
