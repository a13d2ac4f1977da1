use std::time::Instant;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::LogLevel;
use tracing::info;

use crate::ai_backend::GeminiBackend;
use crate::settings::Settings;
use crate::{categorization, nld_generation, term_generation};

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
enum WhichStage {
    #[value(name = "terms")]
    TermGeneration,
    #[value(name = "nld")]
    NldGeneration,
    #[value(name = "categorize")]
    Categorization,
}

#[derive(Debug)]
pub struct ConfigLogLevel {}

impl LogLevel for ConfigLogLevel {
    fn default() -> Option<clap_verbosity_flag::Level> {
        // read from settings options
        let log_level = Settings::new()
            .ok()
            .and_then(|settings| settings.verbosity)
            .unwrap_or_else(|| "info".to_string());
        match log_level.as_str() {
            "error" => Some(clap_verbosity_flag::Level::Error),
            "warn" => Some(clap_verbosity_flag::Level::Warn),
            "info" => Some(clap_verbosity_flag::Level::Info),
            "debug" => Some(clap_verbosity_flag::Level::Debug),
            "trace" => Some(clap_verbosity_flag::Level::Trace),
            _ => Some(clap_verbosity_flag::Level::Info),
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct PipelineArgs {
    /// Enable tracing (generates a trace-timestamp.json file).
    #[arg(long)]
    pub tracing: bool,

    /// Run a single stage instead of the full pipeline.
    #[arg(long)]
    stage: Option<WhichStage>,

    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity<ConfigLogLevel>,
}

pub struct Pipeline {
    settings: Settings,
    args: PipelineArgs,
    start: Instant,
}

impl Pipeline {
    pub fn new(settings: Settings, args: PipelineArgs, start: Option<Instant>) -> Self {
        Self {
            settings,
            args,
            start: start.unwrap_or(Instant::now()),
        }
    }

    pub fn exec(self) -> Result<()> {
        let api_key = match &self.settings.api_key {
            Some(api_key) => api_key.clone(),
            None => anyhow::bail!(
                "The GEMINI_API_KEY environment variable was not found. Please set it."
            ),
        };
        info!(
            "model: {} temp: {:.2} delay: {}ms",
            self.settings.model_config.model_name,
            self.settings.model_config.temperature,
            self.settings.model_config.request_delay_ms
        );

        let backend = GeminiBackend::new(api_key, &self.settings.model_config)?;

        // Stages run in fixed order and exchange data only through files on
        // disk; the first stage error ends the run.
        match self.args.stage {
            Some(WhichStage::TermGeneration) => term_generation::run(&self.settings, &backend)?,
            Some(WhichStage::NldGeneration) => nld_generation::run(&self.settings, &backend)?,
            Some(WhichStage::Categorization) => categorization::run(&self.settings, &backend)?,
            None => {
                term_generation::run(&self.settings, &backend)?;
                nld_generation::run(&self.settings, &backend)?;
                categorization::run(&self.settings, &backend)?;
            }
        }

        info!("Pipeline finished in {:?}", self.start.elapsed());
        Ok(())
    }
}
