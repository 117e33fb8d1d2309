//! Dataset and artifact I/O: the labeled training corpus (CSV) and the
//! persisted classifier model (JSON). All filesystem access for the
//! screening engine lives here, outside the pure core.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use crate::errors::AppError;
use crate::screening::catalog::Catalog;
use crate::screening::classifier::ClassifierModel;
use crate::screening::trainer::LabeledResume;

/// One row of the training CSV. Extra columns (experience level, source
/// ids, timestamps) are carried by historical datasets and ignored here.
#[derive(Debug, Deserialize)]
struct CorpusRow {
    resume_text: String,
    job_field: String,
}

/// Loads the labeled corpus, validating every label against the catalog.
///
/// A row labeled with an undeclared field is rejected with its line number:
/// silently skipping it would skew the trained model. Rows with empty text
/// are skipped with a warning.
pub fn load_corpus(path: &Path, catalog: &Catalog) -> Result<Vec<LabeledResume>, AppError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        AppError::Validation(format!("cannot read dataset '{}': {e}", path.display()))
    })?;

    let mut corpus = Vec::new();
    for (index, row) in reader.deserialize::<CorpusRow>().enumerate() {
        // +2: one for the header row, one for 1-based numbering.
        let line = index + 2;
        let row = row.map_err(|e| {
            AppError::Validation(format!("dataset row {line} is malformed: {e}"))
        })?;

        if catalog.field(&row.job_field).is_none() {
            return Err(AppError::Validation(format!(
                "dataset row {line} has unknown job_field '{}'",
                row.job_field
            )));
        }

        if row.resume_text.trim().is_empty() {
            warn!("dataset row {line} has empty resume_text, skipping");
            continue;
        }

        corpus.push(LabeledResume {
            text: row.resume_text,
            job_field: row.job_field,
        });
    }

    Ok(corpus)
}

/// Loads a persisted model artifact.
pub fn load_model(path: &Path) -> Result<ClassifierModel> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read model artifact '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("model artifact '{}' is not a valid model", path.display()))
}

/// Persists a model artifact, creating parent directories as needed.
pub fn save_model(path: &Path, model: &ClassifierModel) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create '{}'", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(model).context("cannot serialize model")?;
    std::fs::write(path, json)
        .with_context(|| format!("cannot write model artifact '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::classifier::recommend;
    use crate::screening::normalize::normalize;
    use crate::screening::trainer::train;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_corpus_happy_path() {
        let file = write_csv(
            "resume_text,job_field\n\
             Python and Docker services,Software Engineering\n\
             SQL and Tableau reporting,Data Analyst\n",
        );
        let corpus = load_corpus(file.path(), &Catalog::builtin()).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus[0].job_field, "Software Engineering");
    }

    #[test]
    fn test_load_corpus_tolerates_extra_columns() {
        let file = write_csv(
            "resume_text,job_field,experience_level\n\
             Strategy workshops,Consultant,senior\n",
        );
        let corpus = load_corpus(file.path(), &Catalog::builtin()).unwrap();
        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn test_unknown_label_is_rejected_with_line_number() {
        let file = write_csv(
            "resume_text,job_field\n\
             Python services,Software Engineering\n\
             Flying spacecraft,Astronaut\n",
        );
        let err = load_corpus(file.path(), &Catalog::builtin()).unwrap_err();
        match err {
            AppError::Validation(msg) => {
                assert!(msg.contains("row 3"), "{msg}");
                assert!(msg.contains("Astronaut"), "{msg}");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_text_rows_are_skipped() {
        let file = write_csv(
            "resume_text,job_field\n\
             ,Software Engineering\n\
             Real resume content,Software Engineering\n",
        );
        let corpus = load_corpus(file.path(), &Catalog::builtin()).unwrap();
        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn test_missing_file_is_a_validation_error() {
        let err = load_corpus(Path::new("/nonexistent/corpus.csv"), &Catalog::builtin())
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_model_artifact_round_trip_is_behavior_identical() {
        let corpus = vec![
            LabeledResume {
                text: "Python and Docker microservices".into(),
                job_field: "Software Engineering".into(),
            },
            LabeledResume {
                text: "SQL and Tableau dashboards".into(),
                job_field: "Data Analyst".into(),
            },
            LabeledResume {
                text: "Strategy and stakeholder communication".into(),
                job_field: "Consultant".into(),
            },
        ];
        let model = train(&corpus, &Catalog::builtin()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("model.json");
        save_model(&path, &model).unwrap();
        let restored = load_model(&path).unwrap();

        let text = normalize("Tableau and SQL reporting work");
        let before = recommend(&model, &text);
        let after = recommend(&restored, &text);
        for (x, y) in before.confidences.iter().zip(after.confidences.iter()) {
            assert_eq!(x.field, y.field);
            assert!((x.confidence - y.confidence).abs() < 1e-6);
        }
    }

    #[test]
    fn test_load_model_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "not json at all").unwrap();
        assert!(load_model(&path).is_err());
    }
}
