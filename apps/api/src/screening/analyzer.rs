//! Resume Analyzer — orchestrates the full screening pipeline.
//!
//! Flow: normalize once -> requirement match for the target field ->
//! ATS breakdown -> field classification -> suggestions + skills analysis,
//! merged into one composite result for the caller.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::screening::catalog::{Catalog, Requirement};
use crate::screening::classifier::{recommend, ClassifierModel, FieldRecommendations};
use crate::screening::matcher::{requirement_presence, Presence, RequirementMatcher};
use crate::screening::normalize::{normalize, NormalizedText};
use crate::screening::scorer::{compute_ats, structural_suggestions, AtsBreakdown, ScoringConfig};

/// Partial credit granted in the skills analysis when a requirement is only
/// detectable through a synonym.
const SYNONYM_CREDIT: f64 = 0.75;

/// Presence score for one catalog requirement, for the skills-gap view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillScore {
    pub skill: String,
    pub score: f64,
}

/// Composite result of a full analysis. Produced fresh per call; nothing in
/// here is shared between requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub target_field: String,
    /// The target field's weighted coverage, as a percentage.
    pub match_percentage: f64,
    /// Catalog declaration order, not discovery order.
    pub requirements_met: Vec<Requirement>,
    pub requirements_missing: Vec<Requirement>,
    pub suggestions: Vec<String>,
    /// Presence score per requirement across the whole catalog, catalog
    /// order, duplicate names collapsed to their best score.
    pub skills_analysis: Vec<SkillScore>,
    pub ats: AtsBreakdown,
    pub field_recommendations: FieldRecommendations,
}

/// Runs the full pipeline for one résumé against one target field.
///
/// Surfaces `UnknownField` unchanged when the target is not declared in the
/// catalog; everything else is total (empty text degrades to a 0 score).
pub async fn analyze(
    raw: &str,
    target_field: &str,
    catalog: &Catalog,
    matcher: &dyn RequirementMatcher,
    model: &ClassifierModel,
    config: &ScoringConfig,
) -> Result<ResumeAnalysis, AppError> {
    let field = catalog
        .field(target_field)
        .ok_or_else(|| AppError::UnknownField(target_field.to_string()))?;

    let text = normalize(raw);
    info!(
        "Analyzing resume against '{}' ({} words, matcher={})",
        field.name,
        text.word_count,
        matcher.backend()
    );

    let match_result = matcher.match_requirements(&text, &field.requirements).await?;
    let ats = compute_ats(&text, &match_result, config);
    let field_recommendations = recommend(model, &text);

    let mut suggestions: Vec<String> = match_result
        .missing
        .iter()
        .filter(|req| req.weight >= config.suggestion_weight_floor)
        .map(|req| format!("Add evidence of {} to your resume", req.name))
        .collect();
    suggestions.extend(structural_suggestions(&ats, config));

    let skills_analysis = skills_analysis(&text, catalog);

    info!(
        "Analysis done: coverage={:.2} ats={} best={}",
        match_result.coverage,
        ats.score,
        field_recommendations
            .best_match()
            .map(|b| b.field.as_str())
            .unwrap_or("-")
    );

    Ok(ResumeAnalysis {
        target_field: field.name.clone(),
        match_percentage: match_result.coverage * 100.0,
        requirements_met: match_result.met,
        requirements_missing: match_result.missing,
        suggestions,
        skills_analysis,
        ats,
        field_recommendations,
    })
}

/// Scores the résumé against every known field, independent of any target.
pub fn recommend_fields(raw: &str, model: &ClassifierModel) -> FieldRecommendations {
    recommend(model, &normalize(raw))
}

/// Presence score for every requirement across the catalog union: 1.0 for a
/// name match, partial credit for a synonym-only match, 0.0 when absent.
/// Requirements sharing a name across fields collapse into one entry
/// keeping the best score.
fn skills_analysis(text: &NormalizedText, catalog: &Catalog) -> Vec<SkillScore> {
    let mut scores: Vec<SkillScore> = Vec::new();

    for field in catalog.fields() {
        for req in &field.requirements {
            let score = match requirement_presence(text, req) {
                Presence::Name => 1.0,
                Presence::Synonym => SYNONYM_CREDIT,
                Presence::Absent => 0.0,
            };
            match scores.iter_mut().find(|s| s.skill == req.name) {
                Some(existing) => existing.score = existing.score.max(score),
                None => scores.push(SkillScore {
                    skill: req.name.clone(),
                    score,
                }),
            }
        }
    }

    scores
}
