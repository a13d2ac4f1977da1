use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::ai_backend::AiBackend;
use crate::constants::{CATEGORIZATION_PROMPT_TEMPLATE, CATEGORIZATION_SYSTEM_PROMPT};
use crate::output::{self, CategoryRecord, DefinitionRecord, FailureRecord};
use crate::settings::Settings;

/// Categorization stage: reads the (Term, NLD) CSV produced by the NLD stage
/// and asks the model for one category per definition.
pub fn run(settings: &Settings, backend: &dyn AiBackend) -> Result<()> {
    info!("Starting categorization stage");
    let definitions = match load_definitions(&settings.files.definitions_file) {
        Ok(definitions) => definitions,
        Err(e) => {
            error!(
                "Cannot read definitions file '{}': {e:#}",
                settings.files.definitions_file.display()
            );
            return Ok(());
        }
    };

    let delay = Duration::from_millis(settings.model_config.request_delay_ms);
    let (categorized, failures) = categorize_definitions(&definitions, backend, delay);

    info!("Processing complete. Saving results...");
    output::write_results(
        &settings.files.categorized_file,
        &settings.files.categorization_review_file,
        &categorized,
        &failures,
    )
}

fn load_definitions(path: &Path) -> Result<Vec<DefinitionRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let definitions = reader.deserialize().collect::<Result<Vec<_>, _>>()?;
    Ok(definitions)
}

/// One remote call per definition, same outcome partitioning and pacing as
/// the NLD stage.
pub fn categorize_definitions(
    definitions: &[DefinitionRecord],
    backend: &dyn AiBackend,
    delay: Duration,
) -> (Vec<CategoryRecord>, Vec<FailureRecord>) {
    let mut categorized = Vec::new();
    let mut failures = Vec::new();

    for (index, definition) in definitions.iter().enumerate() {
        info!(
            "Categorizing term {}/{}: '{}'...",
            index + 1,
            definitions.len(),
            definition.term
        );

        let prompt = CATEGORIZATION_PROMPT_TEMPLATE
            .replace("{term}", &definition.term)
            .replace("{nld}", &definition.nld);
        match backend.invoke(CATEGORIZATION_SYSTEM_PROMPT, &prompt) {
            Ok(text) => categorized.push(CategoryRecord {
                term: definition.term.clone(),
                nld: definition.nld.clone(),
                category: text.trim().to_string(),
            }),
            Err(e) => {
                warn!("  -> ERROR categorizing term '{}': {e:#}", definition.term);
                failures.push(FailureRecord {
                    term: definition.term.clone(),
                    error: e.to_string(),
                });
            }
        }

        if index + 1 < definitions.len() {
            std::thread::sleep(delay);
        }
    }

    (categorized, failures)
}
