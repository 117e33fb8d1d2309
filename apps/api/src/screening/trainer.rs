//! Trainer — builds the classifier's per-field term-weight tables from a
//! labeled corpus.
//!
//! Weighting is TF-IDF shaped: a term's weight inside a field is its
//! frequency across that field's examples, scaled by a smoothed corpus-wide
//! inverse document frequency so generic résumé vocabulary ("responsible",
//! "team") stops dominating.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use chrono::Utc;

use crate::errors::AppError;
use crate::screening::catalog::Catalog;
use crate::screening::classifier::{ClassifierModel, FieldWeights};
use crate::screening::normalize::normalize;

/// One labeled training example, as supplied by the dataset collaborator.
#[derive(Debug, Clone)]
pub struct LabeledResume {
    pub text: String,
    pub job_field: String,
}

/// Trains a model for every field the catalog declares.
///
/// Fails with `InsufficientData` when any declared field has zero labeled
/// examples; no partial model is produced. Examples labeled with fields the
/// catalog does not declare are skipped (the dataset loader rejects them
/// earlier in the normal path). Idempotent: identical corpora produce
/// identical weight tables. The corpus is never mutated.
pub fn train(corpus: &[LabeledResume], catalog: &Catalog) -> Result<ClassifierModel, AppError> {
    let docs: Vec<(&str, Vec<String>)> = corpus
        .iter()
        .map(|example| (example.job_field.as_str(), normalize(&example.text).tokens))
        .collect();

    // Corpus-wide document frequencies, counting each term once per document.
    let corpus_size = docs.len();
    let mut doc_freq: HashMap<&str, usize> = HashMap::new();
    for (_, tokens) in &docs {
        let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        for term in unique {
            *doc_freq.entry(term).or_insert(0) += 1;
        }
    }

    let mut fields = Vec::with_capacity(catalog.fields().len());
    for field in catalog.fields() {
        let field_docs: Vec<&Vec<String>> = docs
            .iter()
            .filter(|(label, _)| *label == field.name)
            .map(|(_, tokens)| tokens)
            .collect();

        if field_docs.is_empty() {
            return Err(AppError::InsufficientData(format!(
                "field '{}' has no labeled examples in the training corpus",
                field.name
            )));
        }

        let mut term_counts: HashMap<&str, usize> = HashMap::new();
        let mut total_terms = 0usize;
        for tokens in &field_docs {
            for token in tokens.iter() {
                *term_counts.entry(token.as_str()).or_insert(0) += 1;
                total_terms += 1;
            }
        }

        let weights: BTreeMap<String, f64> = term_counts
            .into_iter()
            .map(|(term, count)| {
                let tf = count as f64 / total_terms.max(1) as f64;
                let df = *doc_freq.get(term).unwrap_or(&0);
                (term.to_string(), tf * smoothed_idf(df, corpus_size))
            })
            .collect();

        fields.push(FieldWeights {
            field: field.name.clone(),
            weights,
            example_count: field_docs.len(),
        });
    }

    Ok(ClassifierModel {
        vocabulary: build_vocabulary(&docs, catalog),
        fields,
        trained_at: Utc::now(),
    })
}

/// Smoothed IDF: `ln((N + 1) / (df + 1)) + 1`, bounded away from zero so
/// corpus-wide terms still carry some signal.
fn smoothed_idf(doc_freq: usize, corpus_size: usize) -> f64 {
    ((corpus_size as f64 + 1.0) / (doc_freq as f64 + 1.0)).ln() + 1.0
}

/// The vocabulary is every corpus term plus the catalog's requirement names
/// and synonyms (tokenized), so catalog-declared skills are always known to
/// the model even when the corpus never mentions them.
fn build_vocabulary(docs: &[(&str, Vec<String>)], catalog: &Catalog) -> Vec<String> {
    let mut vocabulary: BTreeSet<String> = docs
        .iter()
        .flat_map(|(_, tokens)| tokens.iter().cloned())
        .collect();

    for field in catalog.fields() {
        for req in &field.requirements {
            vocabulary.extend(normalize(&req.name).tokens);
            for synonym in &req.synonyms {
                vocabulary.extend(normalize(synonym).tokens);
            }
        }
    }

    vocabulary.into_iter().collect()
}
