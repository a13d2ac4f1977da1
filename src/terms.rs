use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::constants::TERM_COLUMN;

#[derive(Debug, Error)]
pub enum TermSourceError {
    #[error("terms file not found: '{0}'")]
    NotFound(PathBuf),
    #[error("column '{column}' not found in '{path}'")]
    MissingColumn { column: &'static str, path: PathBuf },
    #[error("failed to read terms file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Loads the ordered `Readable_Term` column from the aggregator output CSV.
pub fn load_terms(path: &Path) -> Result<Vec<String>, TermSourceError> {
    if !path.exists() {
        return Err(TermSourceError::NotFound(path.to_path_buf()));
    }

    let read_err = |source| TermSourceError::Read {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(read_err)?;

    let term_index = reader
        .headers()
        .map_err(read_err)?
        .iter()
        .position(|header| header == TERM_COLUMN)
        .ok_or_else(|| TermSourceError::MissingColumn {
            column: TERM_COLUMN,
            path: path.to_path_buf(),
        })?;

    let mut terms = Vec::new();
    for record in reader.records() {
        let record = record.map_err(read_err)?;
        terms.push(record.get(term_index).unwrap_or_default().to_string());
    }

    info!("Loaded {} terms from '{}'", terms.len(), path.display());
    Ok(terms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_terms_in_row_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "terms.csv",
            "Readable_Term,Score\nporosity,0.9\nhalite,0.7\nporosity,0.5\n",
        );

        let terms = load_terms(&path).unwrap();
        assert_eq!(terms, vec!["porosity", "halite", "porosity"]);
    }

    #[test]
    fn header_only_file_yields_empty_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "terms.csv", "Readable_Term\n");

        let terms = load_terms(&path).unwrap();
        assert!(terms.is_empty());
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");

        match load_terms(&path) {
            Err(TermSourceError::NotFound(reported)) => assert_eq!(reported, path),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn missing_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "terms.csv", "Term,Score\nporosity,0.9\n");

        match load_terms(&path) {
            Err(TermSourceError::MissingColumn { column, .. }) => {
                assert_eq!(column, "Readable_Term")
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }
}
