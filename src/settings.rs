use std::path::PathBuf;

use config::Config;
use serde;

use crate::constants::DEFAULT_CONFIG_CONTENT;

#[derive(Debug, serde::Deserialize)]
pub struct Settings {
    pub verbosity: Option<String>,
    /// Gemini API key. Falls back to the GEMINI_API_KEY environment variable.
    pub api_key: Option<String>,
    pub model_config: ModelConfig,
    pub files: FileSettings,
}

#[derive(Debug, serde::Deserialize)]
pub struct ModelConfig {
    pub model_name: String,
    pub temperature: f64,
    /// Delay between remote calls, throttling an external rate limit.
    pub request_delay_ms: u64,
}

#[derive(Debug, serde::Deserialize)]
pub struct FileSettings {
    pub corpus_file: PathBuf,
    pub terms_file: PathBuf,
    pub definitions_file: PathBuf,
    pub review_file: PathBuf,
    pub categorized_file: PathBuf,
    pub categorization_review_file: PathBuf,
}

impl Settings {
    pub fn new() -> Result<Self, config::ConfigError> {
        let config_path = dirs::config_dir() // Gets the config directory cross-platform
            .map(|mut path| {
                path.push("nld-pipeline");
                path.push("config");
                path
            })
            .unwrap_or_else(|| PathBuf::from("config")); // Fallback to local config

        // Create the directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).ok(); // Ignore error if dir already exists
        }
        // Check if config file exists, if not create it with defaults
        if !config_path.with_extension("toml").exists() {
            std::fs::write(config_path.with_extension("toml"), DEFAULT_CONFIG_CONTENT).ok();
        }

        let settings = Config::builder()
            .add_source(config::File::with_name(config_path.to_str().unwrap()).required(false))
            .add_source(
                config::Environment::with_prefix("NLD_PIPELINE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_default("model_config.model_name", "gemini-2.0-flash")?
            .set_default("model_config.temperature", 0.0_f64)?
            .set_default("model_config.request_delay_ms", 1000)?
            .set_default("files.corpus_file", "input/corpus.txt")?
            .set_default("files.terms_file", "output/candidate_terms.csv")?
            .set_default("files.definitions_file", "output/definitions.csv")?
            .set_default("files.review_file", "output/definitions_review.csv")?
            .set_default("files.categorized_file", "output/categorized_terms.csv")?
            .set_default(
                "files.categorization_review_file",
                "output/categorization_review.csv",
            )?
            .build()?;

        let mut settings: Settings = settings.try_deserialize()?;
        if settings.api_key.is_none() {
            settings.api_key = std::env::var("GEMINI_API_KEY").ok();
        }
        Ok(settings)
    }
}
