//! Axum route handlers for the Screening API.

use std::path::PathBuf;

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::dataset;
use crate::errors::AppError;
use crate::extract::extract_text;
use crate::screening::analyzer::{analyze, recommend_fields, ResumeAnalysis};
use crate::screening::catalog::JobField;
use crate::screening::classifier::FieldRecommendations;
use crate::screening::normalize::normalize;
use crate::screening::scorer::{compute_ats, AtsBreakdown};
use crate::screening::trainer;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    pub target_field: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub analysis: ResumeAnalysis,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub resume_text: String,
    pub target_field: String,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub target_field: String,
    pub ats: AtsBreakdown,
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommendations: FieldRecommendations,
    pub best_match: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FieldsResponse {
    pub fields: Vec<JobField>,
}

#[derive(Debug, Serialize)]
pub struct FieldExampleCount {
    pub field: String,
    pub example_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub trained_at: DateTime<Utc>,
    pub vocabulary_size: usize,
    pub fields: Vec<FieldExampleCount>,
}

#[derive(Debug, Deserialize)]
pub struct TrainRequest {
    pub dataset_path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TrainResponse {
    pub trained_at: DateTime<Utc>,
    pub examples: usize,
    pub vocabulary_size: usize,
    pub fields: Vec<FieldExampleCount>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Full analysis of raw résumé text against a target field. Empty text is
/// not an error: it degrades to a zero score with every requirement
/// missing, as the scorer documents.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let model = state.model_snapshot().await;
    let analysis = analyze(
        &request.resume_text,
        &request.target_field,
        &state.catalog,
        state.matcher.as_ref(),
        &model,
        &state.config.scoring,
    )
    .await?;

    Ok(Json(AnalyzeResponse {
        analysis_id: Uuid::new_v4(),
        analyzed_at: Utc::now(),
        analysis,
    }))
}

/// POST /api/v1/analyze/upload
///
/// Multipart variant: extracts text from an uploaded file first, then runs
/// the same pipeline. Extraction failures short-circuit; nothing is scored
/// on an empty extraction.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut file: Option<(String, bytes::Bytes)> = None;
    let mut target_field: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?
    {
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("resume").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
                file = Some((filename, data));
            }
            Some("target_field") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read field: {e}")))?;
                target_field = Some(value);
            }
            _ => {}
        }
    }

    let (filename, data) =
        file.ok_or_else(|| AppError::Validation("multipart field 'file' is required".into()))?;
    let target_field = target_field
        .ok_or_else(|| AppError::Validation("multipart field 'target_field' is required".into()))?;

    let resume_text = extract_text(&filename, &data)?;
    if resume_text.trim().is_empty() {
        return Err(AppError::Extraction(format!(
            "no text could be extracted from '{filename}'"
        )));
    }
    info!("Extracted {} bytes of text from '{filename}'", resume_text.len());

    let model = state.model_snapshot().await;
    let analysis = analyze(
        &resume_text,
        &target_field,
        &state.catalog,
        state.matcher.as_ref(),
        &model,
        &state.config.scoring,
    )
    .await?;

    Ok(Json(AnalyzeResponse {
        analysis_id: Uuid::new_v4(),
        analyzed_at: Utc::now(),
        analysis,
    }))
}

/// POST /api/v1/score
///
/// ATS score only, with the full breakdown for callers that render it.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let field = state
        .catalog
        .field(&request.target_field)
        .ok_or_else(|| AppError::UnknownField(request.target_field.clone()))?;

    let text = normalize(&request.resume_text);
    let match_result = state
        .matcher
        .match_requirements(&text, &field.requirements)
        .await?;
    let ats = compute_ats(&text, &match_result, &state.config.scoring);

    Ok(Json(ScoreResponse {
        target_field: field.name.clone(),
        ats,
    }))
}

/// POST /api/v1/recommend
///
/// Cross-field confidences, independent of any target field.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, AppError> {
    let model = state.model_snapshot().await;
    let recommendations = recommend_fields(&request.resume_text, &model);
    let best_match = recommendations.best_match().map(|b| b.field.clone());

    Ok(Json(RecommendResponse {
        recommendations,
        best_match,
    }))
}

/// GET /api/v1/fields
pub async fn handle_fields(State(state): State<AppState>) -> Json<FieldsResponse> {
    Json(FieldsResponse {
        fields: state.catalog.fields().to_vec(),
    })
}

/// GET /api/v1/model
pub async fn handle_model_info(State(state): State<AppState>) -> Json<ModelInfoResponse> {
    let model = state.model_snapshot().await;
    Json(ModelInfoResponse {
        trained_at: model.trained_at,
        vocabulary_size: model.vocabulary.len(),
        fields: model
            .fields
            .iter()
            .map(|f| FieldExampleCount {
                field: f.field.clone(),
                example_count: f.example_count,
            })
            .collect(),
    })
}

/// POST /api/v1/model/train
///
/// Maintenance endpoint: retrains from the configured (or supplied) CSV,
/// persists the artifact, then atomically swaps the process-wide snapshot.
/// `InsufficientData` aborts with no partial model and no swap.
pub async fn handle_train(
    State(state): State<AppState>,
    request: Option<Json<TrainRequest>>,
) -> Result<Json<TrainResponse>, AppError> {
    let path = request
        .and_then(|Json(r)| r.dataset_path.map(PathBuf::from))
        .unwrap_or_else(|| state.config.dataset_path.clone());

    info!("Retraining classifier from {}", path.display());
    let corpus = dataset::load_corpus(&path, &state.catalog)?;
    let model = trainer::train(&corpus, &state.catalog)?;
    dataset::save_model(&state.config.model_path, &model)?;

    let response = TrainResponse {
        trained_at: model.trained_at,
        examples: corpus.len(),
        vocabulary_size: model.vocabulary.len(),
        fields: model
            .fields
            .iter()
            .map(|f| FieldExampleCount {
                field: f.field.clone(),
                example_count: f.example_count,
            })
            .collect(),
    };

    state.swap_model(model).await;
    info!("Classifier retrained on {} examples and swapped in", response.examples);

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_request_deserialization() {
        let json = serde_json::json!({
            "resume_text": "Python developer",
            "target_field": "Software Engineering"
        });
        let request: AnalyzeRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.target_field, "Software Engineering");
    }

    #[test]
    fn test_train_request_dataset_path_is_optional() {
        let request: TrainRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(request.dataset_path.is_none());

        let request: TrainRequest =
            serde_json::from_value(serde_json::json!({ "dataset_path": "data/alt.csv" })).unwrap();
        assert_eq!(request.dataset_path.as_deref(), Some("data/alt.csv"));
    }

    #[test]
    fn test_recommend_request_requires_resume_text() {
        let result: Result<RecommendRequest, _> =
            serde_json::from_value(serde_json::json!({}));
        assert!(result.is_err());
    }
}
