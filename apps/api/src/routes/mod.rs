pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/fields", get(handlers::handle_fields))
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route(
            "/api/v1/analyze/upload",
            post(handlers::handle_analyze_upload),
        )
        .route("/api/v1/score", post(handlers::handle_score))
        .route("/api/v1/recommend", post(handlers::handle_recommend))
        .route("/api/v1/model", get(handlers::handle_model_info))
        .route("/api/v1/model/train", post(handlers::handle_train))
        .with_state(state)
}
