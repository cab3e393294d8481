// Relevance ranker: multi-query similarity + keyword boost, deduplicated top-k
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::errors::{Result, SiftError};
use crate::ranking::keywords::KeywordMatcher;
use crate::ranking::scorer::SimilarityScorer;
use crate::sections::{Section, SectionId};

/// Ranking configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingParams {
    /// Added to the similarity of any section matching the vocabulary
    pub keyword_boost: f64,
    /// Maximum number of distinct sections returned
    pub top_k: usize,
}

impl Default for RankingParams {
    fn default() -> Self {
        Self {
            keyword_boost: 0.15,
            top_k: 5,
        }
    }
}

/// Section selected by the ranker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSection {
    pub section: Section,
    /// Fused score, rounded to 4 decimals
    pub similarity: f64,
    /// 1-based position in the ranking
    pub importance_rank: usize,
}

impl RankedSection {
    pub fn id(&self) -> SectionId {
        self.section.id()
    }
}

/// One (query, section) scoring
#[derive(Debug, Clone, Copy)]
struct Observation {
    section_idx: usize,
    score: f64,
}

/// Ranks sections against a set of queries.
///
/// Every section is scored once per query; each (query, section) pair is an
/// independent observation, so one strong query is enough to promote a
/// section. Observations are sorted by fused score (stable, so equal scores
/// keep query-major then section order) and the first observation of each
/// `(document, page_number)` wins.
pub struct RelevanceRanker<S> {
    scorer: S,
    matcher: KeywordMatcher,
    params: RankingParams,
}

impl<S: SimilarityScorer> RelevanceRanker<S> {
    pub fn new(scorer: S, matcher: KeywordMatcher, params: RankingParams) -> Self {
        Self {
            scorer,
            matcher,
            params,
        }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Rank `sections` against `queries` and return at most `top_k` results.
    ///
    /// An empty pool or empty query list yields an empty ranking. Fails only
    /// if the scorer fails a whole batch or breaks its length contract.
    pub fn rank<Q: AsRef<str>>(
        &self,
        sections: &[Section],
        queries: &[Q],
    ) -> Result<Vec<RankedSection>> {
        if sections.is_empty() || queries.is_empty() || self.params.top_k == 0 {
            return Ok(Vec::new());
        }

        let observations = self.observe(sections, queries)?;
        Ok(self.select(sections, observations))
    }

    /// Score every section against every query, query-major
    fn observe<Q: AsRef<str>>(
        &self,
        sections: &[Section],
        queries: &[Q],
    ) -> Result<Vec<Observation>> {
        let texts: Vec<&str> = sections.iter().map(|s| s.text.as_str()).collect();

        // Boost depends only on the text, so one pass serves every query
        let boosts: Vec<f64> = texts
            .iter()
            .map(|text| {
                if self.matcher.matches(text) {
                    self.params.keyword_boost
                } else {
                    0.0
                }
            })
            .collect();

        let mut observations = Vec::with_capacity(queries.len() * sections.len());

        for query in queries {
            let query = query.as_ref();
            let scores = self.scorer.score(query, &texts)?;
            if scores.len() != texts.len() {
                return Err(SiftError::ScoreCountMismatch {
                    expected: texts.len(),
                    actual: scores.len(),
                });
            }

            for (idx, raw) in scores.into_iter().enumerate() {
                let similarity = if raw.is_finite() {
                    f64::from(raw)
                } else {
                    log::warn!(
                        "Non-finite similarity for {} page {} (query {:?}); scoring as 0",
                        sections[idx].document,
                        sections[idx].page_number,
                        query
                    );
                    0.0
                };

                observations.push(Observation {
                    section_idx: idx,
                    score: similarity + boosts[idx],
                });
            }

            log::debug!("Scored {} sections for query {:?}", texts.len(), query);
        }

        Ok(observations)
    }

    /// Sort observations and keep the best one per section identity
    fn select(&self, sections: &[Section], mut observations: Vec<Observation>) -> Vec<RankedSection> {
        // sort_by is stable: ties keep query-major, section-index order.
        // Scores are finite here, and -0.0 must tie with 0.0.
        observations.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        let mut seen: HashSet<SectionId> = HashSet::new();
        let mut ranked = Vec::with_capacity(self.params.top_k.min(sections.len()));

        for obs in observations {
            if ranked.len() == self.params.top_k {
                break;
            }

            let section = &sections[obs.section_idx];
            if !seen.insert(section.id()) {
                continue;
            }

            ranked.push(RankedSection {
                section: section.clone(),
                similarity: round4(obs.score),
                importance_rank: ranked.len() + 1,
            });
        }

        ranked
    }
}

/// Round to 4 decimal places
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
