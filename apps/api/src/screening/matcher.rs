//! Requirement Matcher — pluggable, trait-based matching of a normalized
//! résumé against a field's requirement set.
//!
//! Default: `KeywordMatcher` (pure-Rust, deterministic, boundary-checked).
//! The trait seam exists so a fuzzier backend (edit distance, embeddings)
//! can be swapped in without touching the scorer or the analyzer.
//!
//! `AppState` holds an `Arc<dyn RequirementMatcher>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::screening::catalog::{Requirement, RequirementSet};
use crate::screening::normalize::NormalizedText;

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// Result of matching one requirement set against one résumé.
///
/// Invariant: every requirement of the set appears in exactly one of
/// `met` / `missing`, both in declaration order, and `coverage` is in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub met: Vec<Requirement>,
    pub missing: Vec<Requirement>,
    /// Weighted fraction of the set detected: sum(met weights) / sum(all
    /// weights). An empty requirement set is vacuously fully covered (1.0).
    pub coverage: f64,
}

/// How a single requirement was detected in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The requirement name itself appears.
    Name,
    /// Only a synonym appears.
    Synonym,
    Absent,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The matcher seam. Implement this to swap matching strategies without
/// touching endpoint, scorer, or analyzer code.
#[async_trait]
pub trait RequirementMatcher: Send + Sync {
    async fn match_requirements(
        &self,
        text: &NormalizedText,
        requirements: &RequirementSet,
    ) -> Result<MatchResult, AppError>;

    /// Backend label surfaced for transparency in responses and logs.
    fn backend(&self) -> &'static str;
}

/// Default keyword backend: token equality plus boundary-checked substring
/// matching over the lowered text, synonym-tolerant.
pub struct KeywordMatcher;

#[async_trait]
impl RequirementMatcher for KeywordMatcher {
    async fn match_requirements(
        &self,
        text: &NormalizedText,
        requirements: &RequirementSet,
    ) -> Result<MatchResult, AppError> {
        Ok(compute_requirement_match(text, requirements))
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core keyword matching
// ────────────────────────────────────────────────────────────────────────────

/// Matches every requirement of the set independently; evaluation order
/// cannot affect the outcome because nothing is shared between checks.
pub fn compute_requirement_match(
    text: &NormalizedText,
    requirements: &RequirementSet,
) -> MatchResult {
    let total_weight: f64 = requirements.iter().map(|r| r.weight).sum();

    if requirements.is_empty() {
        return MatchResult {
            met: vec![],
            missing: vec![],
            coverage: 1.0,
        };
    }

    let mut met = Vec::new();
    let mut missing = Vec::new();
    let mut met_weight = 0.0;

    for req in requirements {
        if requirement_presence(text, req) != Presence::Absent {
            met_weight += req.weight;
            met.push(req.clone());
        } else {
            missing.push(req.clone());
        }
    }

    MatchResult {
        met,
        missing,
        coverage: (met_weight / total_weight).clamp(0.0, 1.0),
    }
}

/// Detects a single requirement: its name first, then each synonym.
pub fn requirement_presence(text: &NormalizedText, req: &Requirement) -> Presence {
    if term_present(text, &req.name) {
        return Presence::Name;
    }
    if req.synonyms.iter().any(|s| term_present(text, s)) {
        return Presence::Synonym;
    }
    Presence::Absent
}

/// A term is present when it equals a token or appears in the lowered text
/// on whole-word boundaries. Boundary checking is what keeps "java" from
/// matching inside "javascript".
fn term_present(text: &NormalizedText, term: &str) -> bool {
    let term = term.to_lowercase();
    if term.is_empty() {
        return false;
    }
    if text.tokens.iter().any(|t| *t == term) {
        return true;
    }
    phrase_present(&text.lowered, &term)
}

/// Boundary-checked substring search: the match may not be flanked by an
/// alphanumeric character on either side.
fn phrase_present(haystack: &str, phrase: &str) -> bool {
    let mut from = 0;
    while let Some(offset) = haystack[from..].find(phrase) {
        let begin = from + offset;
        let end = begin + phrase.len();

        let before_ok = haystack[..begin]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());

        if before_ok && after_ok {
            return true;
        }

        // Step past the first character of this occurrence and keep looking.
        match haystack[begin..].chars().next() {
            Some(c) => from = begin + c.len_utf8(),
            None => break,
        }
        if from >= haystack.len() {
            break;
        }
    }
    false
}
