//! The `essayscore lookup` command.

use std::path::PathBuf;

use anyhow::Result;

use essayscore_core::normalize::normalize;
use essayscore_providers::config::load_config_from;

use crate::EssayInput;

pub fn execute(input: EssayInput, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let dataset = config.load_dataset();

    let essay = normalize(&super::read_essay(input)?);
    match dataset.lookup(&essay) {
        Some(score) => println!("Dataset match: score {score}"),
        None => println!("No dataset match."),
    }
    Ok(())
}
