use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status plus model readiness, so deploys can gate on a
/// trained classifier being loaded.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let model = state.model_snapshot().await;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "screener-api",
        "model": {
            "trained_at": model.trained_at,
            "fields": model.fields.len(),
            "vocabulary_size": model.vocabulary.len(),
        }
    }))
}
