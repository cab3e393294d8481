//! Output report
//!
//! Two parallel views of the same ranking plus a metadata envelope,
//! written as `output.json`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::persona::Persona;
use crate::ranking::RankedSection;

pub const OUTPUT_FILE: &str = "output.json";

/// Run metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    pub processing_timestamp: String,
}

/// Rank and location of a selected section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub section_title: String,
    pub importance_rank: usize,
    pub page_number: usize,
}

/// Refined text of a selected section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub refined_text: String,
    pub page_number: usize,
}

/// Full report for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub metadata: Metadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

impl Report {
    pub fn new(
        input_documents: Vec<String>,
        persona: &Persona,
        ranked: &[RankedSection],
        processed_at: DateTime<Utc>,
    ) -> Self {
        let extracted_sections = ranked
            .iter()
            .map(|r| ExtractedSection {
                document: r.section.document.clone(),
                section_title: r.section.section_title.clone(),
                importance_rank: r.importance_rank,
                page_number: r.section.page_number,
            })
            .collect();

        let subsection_analysis = ranked
            .iter()
            .map(|r| SubsectionAnalysis {
                document: r.section.document.clone(),
                refined_text: r.section.text.clone(),
                page_number: r.section.page_number,
            })
            .collect();

        Self {
            metadata: Metadata {
                input_documents,
                persona: persona.persona.clone(),
                job_to_be_done: persona.job.clone(),
                processing_timestamp: format_timestamp(processed_at),
            },
            extracted_sections,
            subsection_analysis,
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write `output.json` into `dir`, creating it if needed
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(OUTPUT_FILE);
        fs::write(&path, self.to_json()?)?;
        log::info!("Wrote report to {}", path.display());
        Ok(path)
    }
}

/// ISO-8601 UTC without offset, microsecond precision
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
