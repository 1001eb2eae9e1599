//! Service configuration and factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use essayscore_core::dataset::DatasetLookup;
use essayscore_core::traits::{DocumentAnalyzer, GrammarChecker, DEFAULT_LANGUAGE};

use crate::languagetool::LanguageToolChecker;
use crate::spacy::{SpacyAnalyzer, DEFAULT_MODEL};

/// File names of the reference tables inside a data directory.
pub const TRAIN_FILE: &str = "preprocessed_train_set.csv";
pub const VALIDATION_FILE: &str = "preprocessed_valid_set.csv";

/// Configuration for the grammar checker.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GrammarConfig {
    LanguageTool {
        #[serde(default = "default_languagetool_url")]
        base_url: String,
        #[serde(default = "default_language")]
        language: String,
        #[serde(default)]
        username: Option<String>,
        #[serde(default)]
        api_key: Option<String>,
    },
}

impl std::fmt::Debug for GrammarConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarConfig::LanguageTool {
                base_url,
                language,
                username,
                api_key,
            } => f
                .debug_struct("LanguageTool")
                .field("base_url", base_url)
                .field("language", language)
                .field("username", username)
                .field("api_key", &api_key.as_ref().map(|_| "***"))
                .finish(),
        }
    }
}

impl Default for GrammarConfig {
    fn default() -> Self {
        GrammarConfig::LanguageTool {
            base_url: default_languagetool_url(),
            language: default_language(),
            username: None,
            api_key: None,
        }
    }
}

/// Configuration for the document analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnalyzerConfig {
    Spacy {
        #[serde(default = "default_spacy_url")]
        base_url: String,
        #[serde(default = "default_model")]
        model: String,
    },
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig::Spacy {
            base_url: default_spacy_url(),
            model: default_model(),
        }
    }
}

/// Locations of the reference label tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default)]
    pub train: Option<PathBuf>,
    #[serde(default)]
    pub validation: Option<PathBuf>,
}

impl DatasetConfig {
    /// Both tables under their usual names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            train: Some(dir.join(TRAIN_FILE)),
            validation: Some(dir.join(VALIDATION_FILE)),
        }
    }
}

fn default_languagetool_url() -> String {
    "http://localhost:8081".to_string()
}
fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}
fn default_spacy_url() -> String {
    "http://localhost:8000".to_string()
}
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_timeout() -> u64 {
    60
}

/// Top-level essayscore configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EssayscoreConfig {
    #[serde(default)]
    pub grammar: GrammarConfig,
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
    /// Request timeout for service calls, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for EssayscoreConfig {
    fn default() -> Self {
        Self {
            grammar: GrammarConfig::default(),
            analyzer: AnalyzerConfig::default(),
            dataset: DatasetConfig::default(),
            timeout_secs: default_timeout(),
        }
    }
}

impl EssayscoreConfig {
    /// Load the configured reference tables. Tables that fail to load are
    /// left out.
    pub fn load_dataset(&self) -> DatasetLookup {
        DatasetLookup::load(
            self.dataset.train.as_deref(),
            self.dataset.validation.as_deref(),
        )
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_opt(s: &Option<String>) -> Option<String> {
    s.as_ref().map(|v| resolve_env_vars(v))
}

fn resolve_path(p: &Option<PathBuf>) -> Option<PathBuf> {
    p.as_ref()
        .map(|p| PathBuf::from(resolve_env_vars(&p.to_string_lossy())))
}

/// Resolve env vars in every string-valued setting.
fn resolve_config(config: &EssayscoreConfig) -> EssayscoreConfig {
    let grammar = match &config.grammar {
        GrammarConfig::LanguageTool {
            base_url,
            language,
            username,
            api_key,
        } => GrammarConfig::LanguageTool {
            base_url: resolve_env_vars(base_url),
            language: resolve_env_vars(language),
            username: resolve_opt(username),
            api_key: resolve_opt(api_key),
        },
    };
    let analyzer = match &config.analyzer {
        AnalyzerConfig::Spacy { base_url, model } => AnalyzerConfig::Spacy {
            base_url: resolve_env_vars(base_url),
            model: resolve_env_vars(model),
        },
    };
    EssayscoreConfig {
        grammar,
        analyzer,
        dataset: DatasetConfig {
            train: resolve_path(&config.dataset.train),
            validation: resolve_path(&config.dataset.validation),
        },
        timeout_secs: config.timeout_secs,
    }
}

/// Load config from an explicit path, or search the well-known paths.
///
/// Search order when no path is given:
/// 1. `essayscore.toml` in the current directory
/// 2. `~/.config/essayscore/config.toml`
///
/// Environment variable overrides: `ESSAYSCORE_GRAMMAR_URL`,
/// `ESSAYSCORE_ANALYZER_URL`, `ESSAYSCORE_DATA_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<EssayscoreConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("essayscore.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => parse_config_file(&path)?,
        None => EssayscoreConfig::default(),
    };

    // Apply env var overrides
    if let Ok(url) = std::env::var("ESSAYSCORE_GRAMMAR_URL") {
        let GrammarConfig::LanguageTool { base_url, .. } = &mut config.grammar;
        *base_url = url;
    }
    if let Ok(url) = std::env::var("ESSAYSCORE_ANALYZER_URL") {
        let AnalyzerConfig::Spacy { base_url, .. } = &mut config.analyzer;
        *base_url = url;
    }
    if let Ok(dir) = std::env::var("ESSAYSCORE_DATA_DIR") {
        config.dataset = DatasetConfig::in_dir(Path::new(&dir));
    }

    Ok(resolve_config(&config))
}

fn parse_config_file(path: &Path) -> Result<EssayscoreConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<EssayscoreConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("essayscore"))
}

/// Create a grammar checker from its configuration.
pub fn create_grammar_checker(
    config: &GrammarConfig,
    timeout_secs: u64,
) -> Result<Arc<dyn GrammarChecker>> {
    match config {
        GrammarConfig::LanguageTool {
            base_url,
            language,
            username,
            api_key,
        } => {
            let mut checker =
                LanguageToolChecker::with_timeout(base_url, timeout_secs)?.language(language);
            if let (Some(username), Some(api_key)) = (username, api_key) {
                checker = checker.credentials(username, api_key);
            }
            Ok(Arc::new(checker))
        }
    }
}

/// Create a document analyzer from its configuration.
pub fn create_analyzer(
    config: &AnalyzerConfig,
    timeout_secs: u64,
) -> Result<Arc<dyn DocumentAnalyzer>> {
    match config {
        AnalyzerConfig::Spacy { base_url, model } => Ok(Arc::new(
            SpacyAnalyzer::with_timeout(base_url, timeout_secs)?.model(model),
        )),
    }
}
