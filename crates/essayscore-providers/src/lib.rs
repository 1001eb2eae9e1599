//! essayscore-providers: external service integrations.
//!
//! Implements the `GrammarChecker` trait for LanguageTool and the
//! `DocumentAnalyzer` trait for a spaCy analysis service, plus in-memory
//! mocks and the TOML configuration that wires them together.

pub mod config;
mod http;
pub mod languagetool;
pub mod mock;
pub mod spacy;

pub use config::{
    create_analyzer, create_grammar_checker, AnalyzerConfig, EssayscoreConfig, GrammarConfig,
};
pub use essayscore_core::error::ServiceError;
