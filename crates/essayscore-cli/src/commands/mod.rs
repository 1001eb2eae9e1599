pub mod dataset;
pub mod init;
pub mod lookup;
pub mod score;

use std::io::Read;

use anyhow::{Context, Result};

use crate::EssayInput;

/// Read the essay from `--text`, `--file`, or stdin.
fn read_essay(input: EssayInput) -> Result<String> {
    if let Some(text) = input.text {
        return Ok(text);
    }
    if let Some(path) = input.file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read essay: {}", path.display()));
    }
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read essay from stdin")?;
    Ok(text)
}
