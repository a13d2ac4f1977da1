use anyhow::Result;
use serde::Serialize;
use tracing::{error, info};

use crate::ai_backend::AiBackend;
use crate::constants::{TERM_EXTRACTION_PROMPT_TEMPLATE, TERM_EXTRACTION_SYSTEM_PROMPT};
use crate::output;
use crate::settings::Settings;

#[derive(Debug, Serialize)]
struct TermRecord {
    #[serde(rename = "Readable_Term")]
    readable_term: String,
}

/// Term generation stage: asks the model for candidate terms found in the
/// source corpus and writes them as the `Readable_Term` CSV the NLD stage
/// reads.
pub fn run(settings: &Settings, backend: &dyn AiBackend) -> Result<()> {
    info!("Starting term generation stage");
    let corpus_path = &settings.files.corpus_file;
    let corpus = match std::fs::read_to_string(corpus_path) {
        Ok(corpus) => corpus,
        Err(e) => {
            error!("Cannot read corpus file '{}': {e}", corpus_path.display());
            return Ok(());
        }
    };

    let prompt = TERM_EXTRACTION_PROMPT_TEMPLATE.replace("{corpus}", &corpus);
    let reply = backend.invoke(TERM_EXTRACTION_SYSTEM_PROMPT, &prompt)?;

    let records: Vec<TermRecord> = parse_term_lines(&reply)
        .into_iter()
        .map(|readable_term| TermRecord { readable_term })
        .collect();

    output::write_csv(&settings.files.terms_file, &records)?;
    info!(
        "{} candidate terms saved to '{}'",
        records.len(),
        settings.files.terms_file.display()
    );
    Ok(())
}

/// One term per reply line; blank lines and surrounding whitespace dropped.
fn parse_term_lines(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
