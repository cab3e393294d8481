// Embedding-backed similarity scorer
use crate::embedding::engine::{EmbeddingEngine, ModelSource};
use crate::errors::{Result, SiftError};
use crate::ranking::scorer::{cosine_similarity, SimilarityScorer};

/// Scores texts by cosine similarity of their embeddings to the query's
pub struct EmbeddingScorer {
    engine: EmbeddingEngine,
}

impl EmbeddingScorer {
    pub fn new(engine: EmbeddingEngine) -> Self {
        Self { engine }
    }

    /// Load the embedding model and wrap it as a scorer
    pub fn load(source: &ModelSource) -> Result<Self> {
        let engine = EmbeddingEngine::load(source)
            .map_err(|e| SiftError::ModelError(format!("{:#}", e)))?;
        Ok(Self::new(engine))
    }
}

impl SimilarityScorer for EmbeddingScorer {
    fn score(&self, query: &str, texts: &[&str]) -> Result<Vec<f32>> {
        let query_embedding = self
            .engine
            .embed(query)
            .map_err(|e| SiftError::Scoring(format!("query {:?}: {:#}", query, e)))?;

        // Blank texts cannot be embedded meaningfully; they score 0
        let (positions, batch): (Vec<usize>, Vec<&str>) = texts
            .iter()
            .enumerate()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(i, text)| (i, *text))
            .unzip();

        if positions.len() < texts.len() {
            log::warn!(
                "{} of {} texts are blank and will score 0",
                texts.len() - positions.len(),
                texts.len()
            );
        }

        let embeddings = self
            .engine
            .embed_batch(&batch)
            .map_err(|e| SiftError::Scoring(format!("{:#}", e)))?;

        if embeddings.len() != batch.len() {
            return Err(SiftError::ScoreCountMismatch {
                expected: batch.len(),
                actual: embeddings.len(),
            });
        }

        let mut scores = vec![0.0f32; texts.len()];
        for (pos, embedding) in positions.into_iter().zip(embeddings.iter()) {
            scores[pos] = cosine_similarity(&query_embedding, embedding);
        }

        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_model_is_model_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = EmbeddingScorer::load(&ModelSource::Local(dir.path().to_path_buf()));

        match result {
            Err(SiftError::ModelError(msg)) => assert!(msg.contains("config.json")),
            Err(other) => panic!("unexpected error {:?}", other),
            Ok(_) => panic!("loaded a model from an empty directory"),
        }
    }

    #[test]
    #[ignore]  // Integration test - requires model download
    fn test_scores_related_text_higher() {
        let engine = EmbeddingEngine::load(&ModelSource::default()).expect("Failed to load engine");
        let scorer = EmbeddingScorer::new(engine);

        let scores = scorer
            .score(
                "fillable onboarding forms",
                &["New hire onboarding form, please fill out", "Volcanic rock formations", ""],
            )
            .expect("Failed to score");

        assert_eq!(scores.len(), 3);
        assert!(scores[0] > scores[1]);
        assert_eq!(scores[2], 0.0);
    }
}
