use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::screening::catalog::Catalog;
use crate::screening::classifier::ClassifierModel;
use crate::screening::matcher::RequirementMatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    /// Pluggable matcher backend. Default: KeywordMatcher.
    pub matcher: Arc<dyn RequirementMatcher>,
    /// The process-wide model snapshot. Handlers clone the inner `Arc` once
    /// at entry and compute against that snapshot; only the retrain
    /// endpoint takes the write half, to swap in a fresh model atomically.
    pub model: Arc<RwLock<Arc<ClassifierModel>>>,
    pub config: Config,
}

impl AppState {
    /// The current model snapshot. In-flight requests holding a previous
    /// snapshot are unaffected by a concurrent retrain.
    pub async fn model_snapshot(&self) -> Arc<ClassifierModel> {
        self.model.read().await.clone()
    }

    /// Atomically replaces the model snapshot (maintenance path).
    pub async fn swap_model(&self, model: ClassifierModel) {
        *self.model.write().await = Arc::new(model);
    }
}
