//! The `essayscore init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("essayscore.toml").exists() {
        println!("essayscore.toml already exists, skipping.");
        return Ok(());
    }

    std::fs::write("essayscore.toml", SAMPLE_CONFIG)?;
    println!("Created essayscore.toml");

    println!("\nNext steps:");
    println!("  1. Start LanguageTool and the spaCy analysis service, or edit their URLs");
    println!("  2. Point [dataset] at your labeled essay tables");
    println!("  3. Run: essayscore dataset");
    println!("  4. Run: essayscore score --file essay.txt");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# essayscore configuration

timeout_secs = 60

[grammar]
type = "languagetool"
base_url = "http://localhost:8081"
language = "en-US"
# Premium API:
# username = "you@example.com"
# api_key = "${LANGUAGETOOL_API_KEY}"

[analyzer]
type = "spacy"
base_url = "http://localhost:8000"
model = "en_core_web_sm"

[dataset]
train = "Task7/preprocessed_train_set.csv"
validation = "Task7/preprocessed_valid_set.csv"
"#;
