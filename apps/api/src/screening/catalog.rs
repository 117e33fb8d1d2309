//! Requirement Catalog — per-field weighted requirement sets.
//!
//! Declaration order is load-bearing: every downstream output (met/missing
//! lists, field recommendations, skills analysis) reports in the order
//! requirements and fields are declared here.

use serde::{Deserialize, Serialize};

/// A named, weighted skill or keyword a field expects to see in a résumé.
///
/// `weight` must be in (0, 1]. Weights within a set need not sum to 1;
/// coverage computation normalizes over the set's total weight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Requirement {
    pub name: String,
    pub weight: f64,
    pub synonyms: Vec<String>,
}

impl Requirement {
    fn new(name: &str, weight: f64, synonyms: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            weight,
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// An ordered requirement set for one field.
pub type RequirementSet = Vec<Requirement>;

/// One target job field and the requirements it screens for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobField {
    pub name: String,
    pub requirements: RequirementSet,
}

/// The full catalog of known fields. Immutable after construction; shared
/// read-only via `Arc` across all requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    fields: Vec<JobField>,
}

impl Catalog {
    pub fn new(fields: Vec<JobField>) -> Self {
        Self { fields }
    }

    /// All fields in declaration order.
    pub fn fields(&self) -> &[JobField] {
        &self.fields
    }

    /// Looks up a field by exact name. `None` means the caller asked for a
    /// field this catalog does not declare.
    pub fn field(&self, name: &str) -> Option<&JobField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Built-in catalog covering the three screened fields.
    pub fn builtin() -> Self {
        Self::new(vec![
            JobField {
                name: "Software Engineering".to_string(),
                requirements: vec![
                    Requirement::new("Python", 0.9, &["python3"]),
                    Requirement::new("JavaScript", 0.8, &["js", "typescript", "node.js", "nodejs"]),
                    Requirement::new("React", 0.7, &["react.js", "reactjs"]),
                    Requirement::new("AWS", 0.7, &["amazon web services"]),
                    Requirement::new("Docker", 0.6, &["containers", "containerization"]),
                    Requirement::new("SQL", 0.5, &["postgresql", "postgres", "mysql"]),
                    Requirement::new("Git", 0.5, &["github", "gitlab", "version control"]),
                    Requirement::new("Kubernetes", 0.4, &["k8s"]),
                    Requirement::new("REST API", 0.4, &["rest apis", "restful"]),
                    Requirement::new("Testing", 0.3, &["unit testing", "tdd", "integration testing"]),
                ],
            },
            JobField {
                name: "Data Analyst".to_string(),
                requirements: vec![
                    Requirement::new("SQL", 1.0, &["mysql", "postgresql"]),
                    Requirement::new("Python", 0.9, &["pandas", "numpy"]),
                    Requirement::new("Excel", 0.7, &["microsoft excel", "spreadsheets"]),
                    Requirement::new("Tableau", 0.7, &[]),
                    Requirement::new("Statistics", 0.6, &["statistical analysis", "hypothesis testing"]),
                    Requirement::new("Data Analysis", 0.6, &["data analytics"]),
                    Requirement::new("Data Visualization", 0.5, &["dashboards", "dashboarding"]),
                    Requirement::new("Power BI", 0.4, &["powerbi"]),
                ],
            },
            JobField {
                name: "Consultant".to_string(),
                requirements: vec![
                    Requirement::new("Strategy", 0.9, &["strategic planning"]),
                    Requirement::new("Analysis", 0.8, &["analytical", "analytics"]),
                    Requirement::new("Communication", 0.8, &["presentation", "presentations"]),
                    Requirement::new("Leadership", 0.7, &["team leadership"]),
                    Requirement::new("Project Management", 0.6, &["pmp", "project planning"]),
                    Requirement::new("Stakeholder Management", 0.5, &["stakeholders", "stakeholder"]),
                    Requirement::new("Problem Solving", 0.5, &["problem-solving"]),
                    Requirement::new("Market Research", 0.4, &["market analysis"]),
                ],
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_declares_three_fields_in_order() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.field_names(),
            vec!["Software Engineering", "Data Analyst", "Consultant"]
        );
    }

    #[test]
    fn test_field_lookup_is_exact() {
        let catalog = Catalog::builtin();
        assert!(catalog.field("Data Analyst").is_some());
        assert!(catalog.field("data analyst").is_none());
        assert!(catalog.field("Astronaut").is_none());
    }

    #[test]
    fn test_all_weights_in_unit_interval() {
        for field in Catalog::builtin().fields() {
            for req in &field.requirements {
                assert!(
                    req.weight > 0.0 && req.weight <= 1.0,
                    "{}/{} has weight {}",
                    field.name,
                    req.name,
                    req.weight
                );
            }
        }
    }

    #[test]
    fn test_no_duplicate_requirement_names_within_a_field() {
        for field in Catalog::builtin().fields() {
            let mut names: Vec<&str> =
                field.requirements.iter().map(|r| r.name.as_str()).collect();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), field.requirements.len(), "{}", field.name);
        }
    }

    #[test]
    fn test_every_field_has_requirements() {
        for field in Catalog::builtin().fields() {
            assert!(!field.requirements.is_empty(), "{}", field.name);
        }
    }
}
