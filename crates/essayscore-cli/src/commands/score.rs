//! The `essayscore score` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use essayscore_core::policy::ScoringPolicy;
use essayscore_core::request::{submit, ScoreRequest, ScoreResponse};
use essayscore_providers::config::{load_config_from, EssayscoreConfig};
use essayscore_providers::{create_analyzer, create_grammar_checker};

use crate::{EssayInput, OutputFormat};

pub async fn execute(
    input: EssayInput,
    request_path: Option<PathBuf>,
    format: OutputFormat,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let request = match request_path {
        Some(path) => {
            let body = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read request: {}", path.display()))?;
            serde_json::from_str::<ScoreRequest>(&body)
                .with_context(|| format!("failed to parse request: {}", path.display()))?
        }
        None => ScoreRequest::from_text(super::read_essay(input)?),
    };

    let policy = build_policy(&config)?;

    match submit(&policy, &request).await {
        Ok(response) => {
            match format {
                OutputFormat::Text => print_response(&response),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
            }
            Ok(())
        }
        Err(e) => {
            if let OutputFormat::Json = format {
                println!("{}", serde_json::to_string_pretty(&e.to_body())?);
            }
            Err(e.into())
        }
    }
}

/// Wire the configured services and reference tables into a policy.
fn build_policy(config: &EssayscoreConfig) -> Result<ScoringPolicy> {
    let grammar = create_grammar_checker(&config.grammar, config.timeout_secs)?;
    let analyzer = create_analyzer(&config.analyzer, config.timeout_secs)?;
    let dataset = Arc::new(config.load_dataset());
    Ok(ScoringPolicy::new(dataset, grammar, analyzer))
}

fn print_response(response: &ScoreResponse) {
    let mut table = Table::new();
    table.set_header(vec!["#", "Explanation"]);
    for (i, line) in response.explanation.iter().enumerate() {
        table.add_row(vec![Cell::new(i + 1), Cell::new(line)]);
    }
    println!("{table}");
    println!("Score: {}", response.score);
}
