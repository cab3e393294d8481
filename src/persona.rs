//! Persona and job-to-be-done input
//!
//! Read from a small JSON file next to the PDFs:
//! `{"persona": "HR professional", "job": "Create onboarding forms"}`

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{Result, SiftError};

/// Who is asking and what they need done
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub persona: String,
    #[serde(alias = "job_to_be_done")]
    pub job: String,
}

impl Persona {
    pub fn new(persona: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            job: job.into(),
        }
    }

    /// Load and validate a persona file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SiftError::InputError(format!("Cannot read persona file {}: {}", path.display(), e))
        })?;
        Self::from_json(&contents)
    }

    /// Parse and validate persona JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let parsed: Persona = serde_json::from_str(json)
            .map_err(|e| SiftError::InputError(format!("Malformed persona file: {}", e)))?;

        let persona = Persona::new(parsed.persona.trim(), parsed.job.trim());
        if persona.persona.is_empty() && persona.job.is_empty() {
            return Err(SiftError::InputError(
                "Persona file must give a persona or a job".to_string(),
            ));
        }
        Ok(persona)
    }

    /// Composite query combining persona and job
    pub fn composite_query(&self) -> String {
        format!("{}: {}", self.persona, self.job)
    }

    /// Full query set for a run: subqueries first, then the composite query
    pub fn queries(&self, subqueries: &[String]) -> Vec<String> {
        subqueries
            .iter()
            .cloned()
            .chain(std::iter::once(self.composite_query()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_persona() {
        let persona =
            Persona::from_json(r#"{"persona": "HR professional", "job": "Create onboarding forms"}"#)
                .unwrap();
        assert_eq!(persona.persona, "HR professional");
        assert_eq!(persona.job, "Create onboarding forms");
    }

    #[test]
    fn test_job_to_be_done_alias() {
        let persona =
            Persona::from_json(r#"{"persona": "Travel planner", "job_to_be_done": "Plan a trip"}"#)
                .unwrap();
        assert_eq!(persona.job, "Plan a trip");
    }

    #[test]
    fn test_trims_fields() {
        let persona = Persona::from_json(r#"{"persona": "  Analyst ", "job": " Review "}"#).unwrap();
        assert_eq!(persona.composite_query(), "Analyst: Review");
    }

    #[test]
    fn test_missing_field_is_error() {
        let result = Persona::from_json(r#"{"persona": "HR professional"}"#);
        assert!(matches!(result, Err(SiftError::InputError(_))));
    }

    #[test]
    fn test_blank_fields_are_error() {
        let result = Persona::from_json(r#"{"persona": " ", "job": ""}"#);
        assert!(matches!(result, Err(SiftError::InputError(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Persona::load(&dir.path().join("persona.json"));
        assert!(matches!(result, Err(SiftError::InputError(_))));
    }

    #[test]
    fn test_queries_append_composite() {
        let persona = Persona::new("HR professional", "Create onboarding forms");
        let subqueries = vec!["fillable onboarding forms".to_string(), "HR compliance checklists".to_string()];
        let queries = persona.queries(&subqueries);

        assert_eq!(
            queries,
            vec![
                "fillable onboarding forms",
                "HR compliance checklists",
                "HR professional: Create onboarding forms",
            ]
        );
    }

    #[test]
    fn test_queries_without_subqueries() {
        let persona = Persona::new("Student", "Revise chemistry");
        assert_eq!(persona.queries(&[]), vec!["Student: Revise chemistry"]);
    }
}
