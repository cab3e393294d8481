// Similarity scorer abstraction
use crate::errors::Result;

/// Scores one query against a batch of texts.
///
/// Implementations must return exactly one score per input text, in input
/// order. Scores are cosine similarities in [-1, 1]. A text that cannot be
/// scored individually should get 0.0; `Err` is reserved for failures of the
/// whole batch (model not loaded, inference error).
pub trait SimilarityScorer {
    fn score(&self, query: &str, texts: &[&str]) -> Result<Vec<f32>>;
}

impl<S: SimilarityScorer + ?Sized> SimilarityScorer for &S {
    fn score(&self, query: &str, texts: &[&str]) -> Result<Vec<f32>> {
        (**self).score(query, texts)
    }
}

impl<S: SimilarityScorer + ?Sized> SimilarityScorer for Box<S> {
    fn score(&self, query: &str, texts: &[&str]) -> Result<Vec<f32>> {
        (**self).score(query, texts)
    }
}

/// Cosine similarity: dot(a,b) / (||a|| * ||b||)
///
/// Range: [-1, 1], higher = more similar.
/// Returns 0.0 if either vector has zero norm or the lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }
}

fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}
