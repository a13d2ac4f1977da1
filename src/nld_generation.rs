use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, warn};

use crate::ai_backend::AiBackend;
use crate::constants::{DEFINITION_PROMPT_TEMPLATE, DEFINITION_SYSTEM_PROMPT};
use crate::output::{self, DefinitionRecord, FailureRecord};
use crate::settings::Settings;
use crate::terms;

/// NLD generation stage: reads the candidate-term CSV, requests one
/// definition per term and writes the success and review CSVs.
pub fn run(settings: &Settings, backend: &dyn AiBackend) -> Result<()> {
    info!("Starting NLD generation stage");
    let terms = match terms::load_terms(&settings.files.terms_file) {
        Ok(terms) => terms,
        Err(e) => {
            // Nothing to process; the rest of the stage is skipped.
            error!("{e}");
            return Ok(());
        }
    };

    let delay = Duration::from_millis(settings.model_config.request_delay_ms);
    let (definitions, failures) = generate_definitions(&terms, backend, delay);

    info!("Processing complete. Saving results...");
    output::write_results(
        &settings.files.definitions_file,
        &settings.files.review_file,
        &definitions,
        &failures,
    )
}

/// Requests a definition for each term in order. Every term yields exactly
/// one outcome: a definition on success, a failure record on any error.
/// A fixed delay separates consecutive remote calls.
pub fn generate_definitions(
    terms: &[String],
    backend: &dyn AiBackend,
    delay: Duration,
) -> (Vec<DefinitionRecord>, Vec<FailureRecord>) {
    let mut definitions = Vec::new();
    let mut failures = Vec::new();

    let progress = ProgressBar::new(terms.len() as u64).with_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for (index, term) in terms.iter().enumerate() {
        info!("Processing term {}/{}: '{}'...", index + 1, terms.len(), term);
        progress.set_message(term.clone());

        let prompt = DEFINITION_PROMPT_TEMPLATE.replace("{term}", term);
        match backend.invoke(DEFINITION_SYSTEM_PROMPT, &prompt) {
            Ok(text) => {
                info!("  -> Definition generated successfully.");
                definitions.push(DefinitionRecord {
                    term: term.clone(),
                    nld: text.trim().to_string(),
                });
            }
            Err(e) => {
                warn!("  -> ERROR processing term '{term}': {e:#}");
                failures.push(FailureRecord {
                    term: term.clone(),
                    error: e.to_string(),
                });
            }
        }

        progress.inc(1);
        if index + 1 < terms.len() {
            std::thread::sleep(delay);
        }
    }

    progress.finish_and_clear();
    (definitions, failures)
}
