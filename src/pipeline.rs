//! End-to-end run: extract -> build sections -> rank -> report

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use crate::cli::Config;
use crate::errors::{Result, SiftError};
use crate::extraction::{discover_documents, DocumentRef, PageExtractor};
use crate::persona::Persona;
use crate::ranking::{RankedSection, RelevanceRanker, SimilarityScorer};
use crate::report::Report;
use crate::sections::{Section, SectionBuilder};

/// Sections gathered from a batch of documents
#[derive(Debug, Clone, Default)]
pub struct SectionPool {
    pub sections: Vec<Section>,
    /// Documents that could not be extracted, with the reason
    pub failed: Vec<(String, String)>,
}

/// Batch ranking pipeline
pub struct Pipeline<E, S> {
    extractor: E,
    builder: SectionBuilder,
    ranker: RelevanceRanker<S>,
    subqueries: Vec<String>,
    show_progress: bool,
}

impl<E: PageExtractor, S: SimilarityScorer> Pipeline<E, S> {
    pub fn new(extractor: E, scorer: S, config: &Config) -> Self {
        Self {
            extractor,
            builder: SectionBuilder::new(config.section_limits()),
            ranker: RelevanceRanker::new(scorer, config.keyword_matcher(), config.ranking_params()),
            subqueries: config.queries.subqueries.clone(),
            show_progress: false,
        }
    }

    /// Show a progress bar while extracting documents
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Extract every document and build its sections.
    ///
    /// A document that fails extraction is logged and contributes nothing.
    pub fn collect_sections(&self, documents: &[DocumentRef]) -> SectionPool {
        let pb = self.progress_bar(documents.len() as u64);
        let mut pool = SectionPool::default();

        for doc in documents {
            pb.set_message(doc.name.clone());
            match self.extractor.extract_pages(&doc.path) {
                Ok(pages) => {
                    let sections = self.builder.build(&doc.name, pages);
                    log::debug!("{}: {} sections", doc.name, sections.len());
                    pool.sections.extend(sections);
                }
                Err(e) => {
                    log::warn!("Skipping {}: {}", doc.name, e);
                    pool.failed.push((doc.name.clone(), e.to_string()));
                }
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        log::info!(
            "Built {} sections from {} documents ({} failed)",
            pool.sections.len(),
            documents.len(),
            pool.failed.len()
        );
        pool
    }

    /// Rank sections against the subqueries plus the persona's composite query
    pub fn rank(&self, sections: &[Section], persona: &Persona) -> Result<Vec<RankedSection>> {
        let queries = persona.queries(&self.subqueries);
        log::info!("Ranking {} sections against {} queries", sections.len(), queries.len());
        self.ranker.rank(sections, &queries)
    }

    /// Run over every PDF in `input_dir`
    pub fn run(&self, input_dir: &Path, persona: &Persona) -> Result<Report> {
        let documents = discover_documents(input_dir)?;
        if documents.is_empty() {
            log::warn!("No PDF documents found in {}", input_dir.display());
        }
        self.run_documents(&documents, persona)
    }

    /// Run over an explicit document list
    pub fn run_documents(&self, documents: &[DocumentRef], persona: &Persona) -> Result<Report> {
        let pool = self.collect_sections(documents);
        let ranked = self.rank(&pool.sections, persona)?;

        let names = documents.iter().map(|d| d.name.clone()).collect();
        Ok(Report::new(names, persona, &ranked, Utc::now()))
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("=> "));
        }
        pb
    }
}

/// Load the persona and run the pipeline with the configured paths
pub fn run_with_config<E, S>(pipeline: &Pipeline<E, S>, config: &Config) -> Result<Report>
where
    E: PageExtractor,
    S: SimilarityScorer,
{
    let input_dir = config.input_dir();
    if !input_dir.is_dir() {
        return Err(SiftError::InputError(format!(
            "Input directory not found: {}",
            input_dir.display()
        )));
    }

    let persona = Persona::load(&config.persona_file())?;
    pipeline.run(&input_dir, &persona)
}
