use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A term the remote service defined successfully.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DefinitionRecord {
    #[serde(rename = "Term")]
    pub term: String,
    #[serde(rename = "NLD")]
    pub nld: String,
}

/// A term whose remote call failed, kept for manual review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailureRecord {
    #[serde(rename = "Term")]
    pub term: String,
    #[serde(rename = "Error")]
    pub error: String,
}

/// A defined term with its assigned category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRecord {
    #[serde(rename = "Term")]
    pub term: String,
    #[serde(rename = "NLD")]
    pub nld: String,
    #[serde(rename = "Category")]
    pub category: String,
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Serializes `rows` to `path` as UTF-8-with-BOM CSV, creating parent
/// directories as needed. The BOM keeps spreadsheet tools happy.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory '{}'", parent.display()))?;
        }
    }

    let mut file =
        File::create(path).with_context(|| format!("creating '{}'", path.display()))?;
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(file);
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .flush()
        .with_context(|| format!("writing '{}'", path.display()))?;
    Ok(())
}

/// Persists the two outcome partitions of a per-term stage. The review file
/// is only written when at least one failure occurred.
pub fn write_results<S: Serialize>(
    success_path: &Path,
    review_path: &Path,
    successes: &[S],
    failures: &[FailureRecord],
) -> Result<()> {
    write_csv(success_path, successes)?;
    info!(
        "{} rows saved to '{}'",
        successes.len(),
        success_path.display()
    );

    if !failures.is_empty() {
        write_csv(review_path, failures)?;
        info!(
            "{} terms marked for manual review saved to '{}'",
            failures.len(),
            review_path.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(term: &str, nld: &str) -> DefinitionRecord {
        DefinitionRecord {
            term: term.to_string(),
            nld: nld.to_string(),
        }
    }

    #[test]
    fn writes_bom_and_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("definitions.csv");
        write_csv(&path, &[definition("halite", "Halite is a mineral.")]).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], UTF8_BOM);
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert!(text.starts_with("Term,NLD\n"));
        assert!(text.contains("halite,Halite is a mineral."));
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/definitions.csv");
        write_csv(&path, &[definition("porosity", "Porosity is a property.")]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn round_trips_definition_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("definitions.csv");
        let rows = vec![
            definition("porosity", "Porosity is a property that measures void space."),
            definition("halite", "Halite is a mineral that crystallizes from brine."),
        ];
        write_csv(&path, &rows).unwrap();

        // The csv reader strips the leading BOM itself.
        let mut reader = csv::Reader::from_path(&path).unwrap();
        let read_back: Vec<DefinitionRecord> =
            reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(read_back, rows);
    }

    #[test]
    fn review_file_skipped_when_no_failures() {
        let dir = tempfile::tempdir().unwrap();
        let success_path = dir.path().join("definitions.csv");
        let review_path = dir.path().join("review.csv");

        write_results(&success_path, &review_path, &[definition("halite", "x")], &[]).unwrap();

        assert!(success_path.exists());
        assert!(!review_path.exists());
    }

    #[test]
    fn review_file_written_when_failures_present() {
        let dir = tempfile::tempdir().unwrap();
        let success_path = dir.path().join("definitions.csv");
        let review_path = dir.path().join("review.csv");
        let failures = vec![FailureRecord {
            term: "halite".to_string(),
            error: "quota exceeded".to_string(),
        }];

        write_results::<DefinitionRecord>(&success_path, &review_path, &[], &failures).unwrap();

        let text = std::fs::read_to_string(&review_path).unwrap();
        assert!(text.contains("Term,Error"));
        assert!(text.contains("halite,quota exceeded"));
    }
}
