//! Field Classifier — scores a résumé against every known field using the
//! trained term-weight tables.
//!
//! Confidences are independent per field (they do not sum to 1): each is a
//! saturating squash of the weighted term-overlap between the résumé's
//! tokens and the field's table, so values are comparable across fields.

use std::collections::BTreeMap;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::screening::normalize::NormalizedText;

/// Steepness of the `1 - e^(-k * overlap)` squash. Chosen so a résumé whose
/// vocabulary substantially overlaps a field's top terms lands near 1.0
/// while unrelated text stays near 0.
const SQUASH_SCALE: f64 = 30.0;

/// Learned per-field term weights. `BTreeMap` keeps serialization and
/// iteration deterministic for identical training runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldWeights {
    pub field: String,
    pub weights: BTreeMap<String, f64>,
    pub example_count: usize,
}

/// The trained model artifact. Immutable once trained; replaced only by
/// re-training and swapping the process-wide snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierModel {
    /// Per-field tables in catalog declaration order.
    pub fields: Vec<FieldWeights>,
    /// Every term the model knows, including catalog-seeded terms that never
    /// appeared in the corpus.
    pub vocabulary: Vec<String>,
    pub trained_at: DateTime<Utc>,
}

/// One field's confidence, in catalog declaration order inside
/// `FieldRecommendations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfidence {
    pub field: String,
    pub confidence: f64,
}

/// Per-field confidences, one entry per known field, catalog order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRecommendations {
    pub confidences: Vec<FieldConfidence>,
}

impl FieldRecommendations {
    /// The best-matching field: an explicit ordered scan with
    /// strict-greater-than comparison, so on ties the first-declared field
    /// wins. Deterministic by construction.
    pub fn best_match(&self) -> Option<&FieldConfidence> {
        let mut best: Option<&FieldConfidence> = None;
        for candidate in &self.confidences {
            match best {
                Some(current) if candidate.confidence > current.confidence => {
                    best = Some(candidate)
                }
                None => best = Some(candidate),
                _ => {}
            }
        }
        best
    }
}

/// Scores the résumé against every field in the model.
///
/// Deterministic for a given (model, text) pair; repeated calls return
/// identical confidences. Empty text yields 0.0 for every field.
pub fn recommend(model: &ClassifierModel, text: &NormalizedText) -> FieldRecommendations {
    let token_counts = count_tokens(text);
    let total_tokens = text.tokens.len();

    let confidences = model
        .fields
        .iter()
        .map(|fw| FieldConfidence {
            field: fw.field.clone(),
            confidence: field_confidence(fw, &token_counts, total_tokens),
        })
        .collect();

    FieldRecommendations { confidences }
}

fn count_tokens(text: &NormalizedText) -> HashMap<&str, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in &text.tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    counts
}

fn field_confidence(
    field: &FieldWeights,
    token_counts: &HashMap<&str, usize>,
    total_tokens: usize,
) -> f64 {
    if total_tokens == 0 {
        return 0.0;
    }

    let overlap: f64 = token_counts
        .iter()
        .filter_map(|(token, count)| {
            field
                .weights
                .get(*token)
                .map(|w| w * (*count as f64 / total_tokens as f64))
        })
        .sum();

    (1.0 - (-SQUASH_SCALE * overlap).exp()).clamp(0.0, 1.0)
}
