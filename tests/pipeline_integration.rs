//! Integration tests for the docsift pipeline
//!
//! Runs extraction -> sections -> ranking -> report end to end with a stub
//! extractor and a deterministic scorer, so no PDFs or model are needed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use docsift::{
    cli::Config,
    extraction::{DocumentRef, PageExtractor},
    pipeline::{run_with_config, Pipeline},
    persona::Persona,
    report::Report,
    sections::Page,
    Result, SiftError, SimilarityScorer,
};

/// Serves canned pages keyed by file name; unknown files fail extraction
struct StubExtractor {
    documents: HashMap<String, Vec<Page>>,
}

impl StubExtractor {
    fn new(documents: &[(&str, Vec<Page>)]) -> Self {
        Self {
            documents: documents
                .iter()
                .map(|(name, pages)| (name.to_string(), pages.clone()))
                .collect(),
        }
    }
}

impl PageExtractor for StubExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<Page>> {
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        self.documents
            .get(&name)
            .cloned()
            .ok_or(SiftError::Extraction {
                document: name,
                reason: "corrupt xref".to_string(),
            })
    }
}

/// Scores a text by the first marker it contains, regardless of query
struct MarkerScorer {
    markers: Vec<(String, f32)>,
}

impl MarkerScorer {
    fn new(markers: &[(&str, f32)]) -> Self {
        Self {
            markers: markers.iter().map(|(m, s)| (m.to_string(), *s)).collect(),
        }
    }
}

impl SimilarityScorer for MarkerScorer {
    fn score(&self, _query: &str, texts: &[&str]) -> Result<Vec<f32>> {
        Ok(texts
            .iter()
            .map(|text| {
                self.markers
                    .iter()
                    .find(|(marker, _)| text.contains(marker.as_str()))
                    .map(|(_, score)| *score)
                    .unwrap_or(0.0)
            })
            .collect())
    }
}

fn doc(name: &str) -> DocumentRef {
    DocumentRef {
        name: name.to_string(),
        path: PathBuf::from("/virtual").join(name),
    }
}

fn hr_persona() -> Persona {
    Persona::new("HR professional", "Create and manage fillable forms for onboarding")
}

#[test]
fn test_two_documents_boost_order() {
    let extractor = StubExtractor::new(&[
        ("a.pdf", vec![Page::new(0, "ALPHA quarterly overview")]),
        ("b.pdf", vec![Page::new(0, "BETA new hire checklist")]),
    ]);
    let scorer = MarkerScorer::new(&[("ALPHA", 0.9), ("BETA", 0.5)]);
    let pipeline = Pipeline::new(extractor, scorer, &Config::default());

    let report = pipeline
        .run_documents(&[doc("a.pdf"), doc("b.pdf")], &hr_persona())
        .unwrap();

    let order: Vec<&str> = report
        .extracted_sections
        .iter()
        .map(|s| s.document.as_str())
        .collect();
    assert_eq!(order, vec!["a.pdf", "b.pdf"]);
    assert_eq!(report.extracted_sections[0].importance_rank, 1);
    assert_eq!(report.extracted_sections[1].importance_rank, 2);
}

#[test]
fn test_two_documents_scores() {
    let extractor = StubExtractor::new(&[
        ("a.pdf", vec![Page::new(0, "ALPHA quarterly overview")]),
        ("b.pdf", vec![Page::new(0, "BETA new hire checklist")]),
    ]);
    let scorer = MarkerScorer::new(&[("ALPHA", 0.9), ("BETA", 0.5)]);
    let config = Config::default();
    let pipeline = Pipeline::new(extractor, scorer, &config);

    let pool = pipeline.collect_sections(&[doc("a.pdf"), doc("b.pdf")]);
    let ranked = pipeline.rank(&pool.sections, &hr_persona()).unwrap();

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].similarity, 0.9);
    assert_eq!(ranked[1].similarity, 0.65);
}

#[test]
fn test_failed_document_is_skipped() {
    let extractor = StubExtractor::new(&[("good.pdf", vec![Page::new(3, "GOOD direct deposit")])]);
    let scorer = MarkerScorer::new(&[("GOOD", 0.7)]);
    let pipeline = Pipeline::new(extractor, scorer, &Config::default());

    let pool = pipeline.collect_sections(&[doc("broken.pdf"), doc("good.pdf")]);
    assert_eq!(pool.sections.len(), 1);
    assert_eq!(pool.failed.len(), 1);
    assert_eq!(pool.failed[0].0, "broken.pdf");

    let report = pipeline
        .run_documents(&[doc("broken.pdf"), doc("good.pdf")], &hr_persona())
        .unwrap();
    assert_eq!(report.metadata.input_documents, vec!["broken.pdf", "good.pdf"]);
    assert_eq!(report.extracted_sections.len(), 1);
    assert_eq!(report.extracted_sections[0].page_number, 3);
}

#[test]
fn test_blank_pages_never_ranked() {
    let extractor = StubExtractor::new(&[(
        "scan.pdf",
        vec![
            Page::new(0, "   \n\t"),
            Page::new(1, "\u{2022}\u{2022}"),
            Page::new(2, "TEXT policy acknowledgment"),
        ],
    )]);
    let scorer = MarkerScorer::new(&[]);
    let pipeline = Pipeline::new(extractor, scorer, &Config::default());

    let report = pipeline.run_documents(&[doc("scan.pdf")], &hr_persona()).unwrap();
    assert_eq!(report.extracted_sections.len(), 1);
    assert_eq!(report.extracted_sections[0].page_number, 2);
}

#[test]
fn test_top_k_and_parallel_lists() {
    let pages: Vec<Page> = (0..9)
        .map(|i| Page::new(i, format!("P{} contents of page", i)))
        .collect();
    let extractor = StubExtractor::new(&[("manual.pdf", pages)]);
    let scorer = MarkerScorer {
        markers: (0..9).map(|i| (format!("P{} ", i), i as f32 / 10.0)).collect(),
    };
    let pipeline = Pipeline::new(extractor, scorer, &Config::default());

    let report = pipeline.run_documents(&[doc("manual.pdf")], &hr_persona()).unwrap();

    let pages: Vec<usize> = report.extracted_sections.iter().map(|s| s.page_number).collect();
    assert_eq!(pages, vec![8, 7, 6, 5, 4]);
    let refined_pages: Vec<usize> = report.subsection_analysis.iter().map(|s| s.page_number).collect();
    assert_eq!(refined_pages, pages);
    assert_eq!(report.subsection_analysis[0].refined_text, "P8 contents of page");
}

#[test]
fn test_long_page_truncated_in_report() {
    let long = format!("Onboarding\n{}", "word ".repeat(600));
    let extractor = StubExtractor::new(&[("long.pdf", vec![Page::new(0, long)])]);
    let pipeline = Pipeline::new(extractor, MarkerScorer::new(&[]), &Config::default());

    let report = pipeline.run_documents(&[doc("long.pdf")], &hr_persona()).unwrap();
    assert_eq!(report.subsection_analysis[0].refined_text.chars().count(), 1200);
    assert!(report.extracted_sections[0].section_title.chars().count() <= 120);
    assert!(report.extracted_sections[0].section_title.starts_with("Onboarding word"));
}

#[test]
fn test_no_documents_gives_empty_report() {
    let pipeline = Pipeline::new(
        StubExtractor::new(&[]),
        MarkerScorer::new(&[]),
        &Config::default(),
    );
    let report = pipeline.run_documents(&[], &hr_persona()).unwrap();

    assert!(report.metadata.input_documents.is_empty());
    assert!(report.extracted_sections.is_empty());
    assert!(report.subsection_analysis.is_empty());
    assert_eq!(report.metadata.persona, "HR professional");
}

#[test]
fn test_run_with_config_reads_input_dir() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    std::fs::write(input.path().join("b.pdf"), b"").unwrap();
    std::fs::write(input.path().join("a.pdf"), b"").unwrap();
    std::fs::write(input.path().join("readme.txt"), b"").unwrap();
    std::fs::write(
        input.path().join("persona.json"),
        r#"{"persona": "HR professional", "job": "Prepare onboarding packets"}"#,
    )
    .unwrap();

    let mut config = Config::default();
    config.paths.input_dir = input.path().to_string_lossy().into_owned();
    config.paths.output_dir = output.path().join("out").to_string_lossy().into_owned();

    let extractor = StubExtractor::new(&[
        ("a.pdf", vec![Page::new(0, "A employee details form")]),
        ("b.pdf", vec![Page::new(1, "B travel reimbursement")]),
    ]);
    let scorer = MarkerScorer::new(&[("A ", 0.3), ("B ", 0.4)]);
    let pipeline = Pipeline::new(extractor, scorer, &config);

    let report = run_with_config(&pipeline, &config).unwrap();
    assert_eq!(report.metadata.input_documents, vec!["a.pdf", "b.pdf"]);
    assert_eq!(report.metadata.job_to_be_done, "Prepare onboarding packets");
    // a.pdf: 0.3 + 0.15 boost beats b.pdf's 0.4
    assert_eq!(report.extracted_sections[0].document, "a.pdf");

    let path = report.write_to(&config.output_dir()).unwrap();
    let written: Report = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(written.extracted_sections, report.extracted_sections);
}

#[test]
fn test_run_with_config_missing_persona() {
    let input = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.paths.input_dir = input.path().to_string_lossy().into_owned();

    let pipeline = Pipeline::new(
        StubExtractor::new(&[]),
        MarkerScorer::new(&[]),
        &config,
    );
    assert!(matches!(
        run_with_config(&pipeline, &config),
        Err(SiftError::InputError(_))
    ));
}

#[test]
fn test_run_with_config_missing_input_dir() {
    let mut config = Config::default();
    config.paths.input_dir = "/definitely/not/here".to_string();

    let pipeline = Pipeline::new(
        StubExtractor::new(&[]),
        MarkerScorer::new(&[]),
        &config,
    );
    assert!(matches!(
        run_with_config(&pipeline, &config),
        Err(SiftError::InputError(_))
    ));
}
