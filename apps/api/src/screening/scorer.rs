//! ATS Scorer — collapses requirement coverage and structural signals into
//! a single 0-100 score.
//!
//! score = round(100 * (coverage_weight * coverage
//!                    + structure_weight * structural_quality))
//!
//! Structural quality is section presence (contact / experience / education
//! markers) plus a length-adequacy term. The weights and thresholds are a
//! default policy, not vendor emulation, and are tunable via `ScoringConfig`.

use serde::{Deserialize, Serialize};

use crate::screening::matcher::MatchResult;
use crate::screening::normalize::NormalizedText;

/// Share of structural quality carried by each section check, and by the
/// length-adequacy term. The three sections together carry 0.6.
const SECTION_SHARE: f64 = 0.2;
const LENGTH_SHARE: f64 = 0.4;

/// Bloated résumés decay toward this floor instead of zero: excess length
/// is a weaker signal than a missing section.
const BLOAT_FLOOR: f64 = 0.5;

/// Tunable scoring policy. Defaults follow the documented 60/40 split with
/// a 150-word minimum and a 1200-word bloat bound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub coverage_weight: f64,
    pub structure_weight: f64,
    pub min_word_count: usize,
    pub max_word_count: usize,
    /// Missing requirements below this weight do not generate suggestions.
    pub suggestion_weight_floor: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            coverage_weight: 0.6,
            structure_weight: 0.4,
            min_word_count: 150,
            max_word_count: 1200,
            suggestion_weight_floor: 0.3,
        }
    }
}

impl ScoringConfig {
    /// Rescales the two component weights to sum to 1.0, so overriding one
    /// via env cannot push scores outside [0, 100].
    pub fn normalized(mut self) -> Self {
        let sum = self.coverage_weight + self.structure_weight;
        if sum > 0.0 {
            self.coverage_weight /= sum;
            self.structure_weight /= sum;
        } else {
            let defaults = Self::default();
            self.coverage_weight = defaults.coverage_weight;
            self.structure_weight = defaults.structure_weight;
        }
        self
    }
}

/// One structural section check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionCheck {
    pub section: String,
    pub present: bool,
}

/// Full scoring breakdown. `score` is the only number most callers need;
/// the rest feeds the suggestion generator and the score endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsBreakdown {
    pub score: u8,
    pub coverage: f64,
    pub structural_quality: f64,
    pub sections: Vec<SectionCheck>,
    pub length_score: f64,
    pub word_count: usize,
}

/// Computes the ATS breakdown for already-matched requirements.
///
/// Deterministic: identical text and match result always produce the
/// identical integer. Empty input degrades to a score of 0 rather than an
/// error.
pub fn compute_ats(
    text: &NormalizedText,
    match_result: &MatchResult,
    config: &ScoringConfig,
) -> AtsBreakdown {
    if text.word_count == 0 {
        return AtsBreakdown {
            score: 0,
            coverage: 0.0,
            structural_quality: 0.0,
            sections: section_checks(""),
            length_score: 0.0,
            word_count: 0,
        };
    }

    let sections = section_checks(&text.lowered);
    let length_score = length_adequacy(text.word_count, config);

    let section_score: f64 = sections
        .iter()
        .filter(|c| c.present)
        .map(|_| SECTION_SHARE)
        .sum();
    let structural_quality = (section_score + LENGTH_SHARE * length_score).clamp(0.0, 1.0);

    let combined = config.coverage_weight * match_result.coverage
        + config.structure_weight * structural_quality;
    let score = (combined * 100.0).round().clamp(0.0, 100.0) as u8;

    AtsBreakdown {
        score,
        coverage: match_result.coverage,
        structural_quality,
        sections,
        length_score,
        word_count: text.word_count,
    }
}

/// Suggestions for every failed structural check, phrased for the end user.
pub fn structural_suggestions(breakdown: &AtsBreakdown, config: &ScoringConfig) -> Vec<String> {
    let mut suggestions = Vec::new();

    for check in &breakdown.sections {
        if !check.present {
            suggestions.push(match check.section.as_str() {
                "contact" => "Add contact information (email and phone) near the top".to_string(),
                "experience" => "Add a dedicated work experience section".to_string(),
                "education" => "Add an education section listing degrees or coursework".to_string(),
                other => format!("Add a {} section", other),
            });
        }
    }

    if breakdown.word_count > 0 && breakdown.word_count < config.min_word_count {
        suggestions.push(format!(
            "Resume is shorter than the recommended length ({} words, aim for at least {})",
            breakdown.word_count, config.min_word_count
        ));
    } else if breakdown.word_count > config.max_word_count {
        suggestions.push(format!(
            "Resume is longer than the recommended length ({} words, aim for under {})",
            breakdown.word_count, config.max_word_count
        ));
    }

    suggestions
}

// ────────────────────────────────────────────────────────────────────────────
// Structural signals
// ────────────────────────────────────────────────────────────────────────────

fn section_checks(lowered: &str) -> Vec<SectionCheck> {
    vec![
        SectionCheck {
            section: "contact".to_string(),
            present: has_contact_marker(lowered),
        },
        SectionCheck {
            section: "experience".to_string(),
            present: contains_any(lowered, &["experience", "employment", "work history", "career"]),
        },
        SectionCheck {
            section: "education".to_string(),
            present: contains_any(
                lowered,
                &["education", "university", "college", "degree", "bachelor", "master"],
            ),
        },
    ]
}

/// Contact info marker: an email-shaped token or a 7+ digit run (phone).
fn has_contact_marker(lowered: &str) -> bool {
    let email = lowered.split_whitespace().any(|w| {
        w.contains('@') && w.rsplit('@').next().map_or(false, |d| d.contains('.'))
    });
    if email {
        return true;
    }

    let mut digit_run = 0usize;
    for c in lowered.chars() {
        if c.is_ascii_digit() {
            digit_run += 1;
            if digit_run >= 7 {
                return true;
            }
        } else if !matches!(c, '-' | '(' | ')' | '+' | '.') {
            // Spaces reset the run so year ranges ("2019 - 2023") do not
            // read as phone numbers.
            digit_run = 0;
        }
    }
    false
}

fn contains_any(haystack: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| haystack.contains(m))
}

/// Length adequacy: ramps 0 -> 1 below the minimum, holds 1.0 through the
/// bloat bound, then decays linearly toward `BLOAT_FLOOR`.
fn length_adequacy(word_count: usize, config: &ScoringConfig) -> f64 {
    if word_count == 0 {
        return 0.0;
    }
    let min = config.min_word_count.max(1);
    let max = config.max_word_count.max(min);

    if word_count < min {
        word_count as f64 / min as f64
    } else if word_count <= max {
        1.0
    } else {
        let excess = (word_count - max) as f64 / max as f64;
        (1.0 - excess).max(BLOAT_FLOOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::catalog::Catalog;
    use crate::screening::matcher::compute_requirement_match;
    use crate::screening::normalize::normalize;

    fn score_for(text: &str, field_name: &str) -> AtsBreakdown {
        let catalog = Catalog::builtin();
        let field = catalog.field(field_name).unwrap();
        let normalized = normalize(text);
        let result = compute_requirement_match(&normalized, &field.requirements);
        compute_ats(&normalized, &result, &ScoringConfig::default())
    }

    fn padded(base: &str, words: usize) -> String {
        let mut text = base.to_string();
        for i in 0..words {
            text.push_str(&format!(" filler{}", i));
        }
        text
    }

    #[test]
    fn test_empty_input_scores_zero_without_error() {
        let breakdown = score_for("", "Software Engineering");
        assert_eq!(breakdown.score, 0);
        assert_eq!(breakdown.coverage, 0.0);
        assert_eq!(breakdown.structural_quality, 0.0);
    }

    #[test]
    fn test_score_is_deterministic() {
        let text = "Experienced Python developer, alice@example.com, education: B.S.";
        let a = score_for(text, "Software Engineering");
        let b = score_for(text, "Software Engineering");
        assert_eq!(a.score, b.score);
        assert_eq!(a.structural_quality, b.structural_quality);
    }

    #[test]
    fn test_adding_missing_keyword_never_decreases_score() {
        let base = padded("Python developer with experience, alice@example.com, university degree.", 160);
        let with_docker = format!("{} Docker", base);

        let before = score_for(&base, "Software Engineering");
        let after = score_for(&with_docker, "Software Engineering");
        assert!(
            after.score >= before.score,
            "before={} after={}",
            before.score,
            after.score
        );
        assert!(after.coverage > before.coverage);
    }

    #[test]
    fn test_score_bounded_even_with_full_coverage() {
        let all_skills = padded(
            "experience education alice@example.com Python JavaScript React AWS Docker SQL Git \
             Kubernetes REST API testing",
            200,
        );
        let breakdown = score_for(&all_skills, "Software Engineering");
        assert!(breakdown.score <= 100);
        assert!((breakdown.coverage - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_section_detection() {
        let checks = section_checks("work experience at acme, b.s. from state university, jane@acme.io");
        assert!(checks.iter().all(|c| c.present));

        let checks = section_checks("just some skills listed");
        assert!(checks.iter().all(|c| !c.present));
    }

    #[test]
    fn test_contact_marker_accepts_phone_runs() {
        assert!(has_contact_marker("call 555-123-4567"));
        assert!(has_contact_marker("reach me at jane@acme.io"));
        assert!(!has_contact_marker("shipped 3 products in 2 years"));
        assert!(!has_contact_marker("jane@localhost"));
    }

    #[test]
    fn test_length_adequacy_ramp_and_decay() {
        let config = ScoringConfig::default();
        assert_eq!(length_adequacy(0, &config), 0.0);
        assert!((length_adequacy(75, &config) - 0.5).abs() < 1e-9);
        assert_eq!(length_adequacy(150, &config), 1.0);
        assert_eq!(length_adequacy(1200, &config), 1.0);
        let bloated = length_adequacy(1800, &config);
        assert!(bloated < 1.0 && bloated >= BLOAT_FLOOR);
        assert_eq!(length_adequacy(10_000, &config), BLOAT_FLOOR);
    }

    #[test]
    fn test_structural_suggestions_name_failed_checks() {
        let breakdown = score_for("short text", "Consultant");
        let suggestions = structural_suggestions(&breakdown, &ScoringConfig::default());
        assert!(suggestions.iter().any(|s| s.contains("contact")));
        assert!(suggestions.iter().any(|s| s.contains("experience")));
        assert!(suggestions.iter().any(|s| s.contains("education")));
        assert!(suggestions.iter().any(|s| s.contains("shorter")));
    }

    #[test]
    fn test_no_structural_suggestions_when_everything_passes() {
        let text = padded(
            "Work experience at Acme. Education: university degree. Contact alice@example.com.",
            160,
        );
        let breakdown = score_for(&text, "Consultant");
        let suggestions = structural_suggestions(&breakdown, &ScoringConfig::default());
        assert!(suggestions.is_empty(), "{suggestions:?}");
    }

    #[test]
    fn test_config_normalization_rescales_weights() {
        let config = ScoringConfig {
            coverage_weight: 3.0,
            structure_weight: 1.0,
            ..ScoringConfig::default()
        }
        .normalized();
        assert!((config.coverage_weight - 0.75).abs() < 1e-9);
        assert!((config.structure_weight - 0.25).abs() < 1e-9);
    }
}
