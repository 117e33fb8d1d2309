mod config;
mod dataset;
mod errors;
mod extract;
mod routes;
mod screening;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Result};
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::screening::catalog::Catalog;
use crate::screening::classifier::ClassifierModel;
use crate::screening::matcher::KeywordMatcher;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (env overrides the scoring policy defaults)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screener API v{}", env!("CARGO_PKG_VERSION"));

    // Requirement catalog: immutable, shared read-only by every request
    let catalog = Arc::new(Catalog::builtin());
    info!("Catalog loaded: {} fields", catalog.fields().len());

    // Classifier model: load the persisted artifact, or train a fresh one
    let model = load_or_train_model(&config, &catalog)?;
    info!(
        "Classifier ready: trained at {}, vocabulary of {} terms",
        model.trained_at,
        model.vocabulary.len()
    );

    // Build app state
    let state = AppState {
        catalog,
        matcher: Arc::new(KeywordMatcher),
        model: Arc::new(RwLock::new(Arc::new(model))),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Loads the persisted model artifact, or trains one from the configured
/// dataset when no artifact exists yet. Refuses to start without either:
/// serving recommendations from an untrained classifier would silently
/// return zeros for everything.
fn load_or_train_model(config: &Config, catalog: &Catalog) -> Result<ClassifierModel> {
    if config.model_path.exists() {
        info!("Loading model artifact from {}", config.model_path.display());
        return dataset::load_model(&config.model_path);
    }

    if config.dataset_path.exists() {
        info!(
            "No model artifact found; training from {}",
            config.dataset_path.display()
        );
        let corpus = dataset::load_corpus(&config.dataset_path, catalog)?;
        let model = screening::trainer::train(&corpus, catalog)?;
        dataset::save_model(&config.model_path, &model)?;
        info!(
            "Trained on {} examples, artifact saved to {}",
            corpus.len(),
            config.model_path.display()
        );
        return Ok(model);
    }

    bail!(
        "no model artifact at '{}' and no training dataset at '{}'; supply one of them",
        config.model_path.display(),
        config.dataset_path.display()
    )
}
