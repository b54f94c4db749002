//! Candidate aggregation: concurrent fan-out, scoring, dedup, ranking.

pub mod scoring;

use std::sync::Arc;

use futures::future::join_all;
use log::{debug, warn};

use crate::models::{RankedCandidates, TokenCandidate};
use crate::source::TokenSource;

/// Aggregates candidates from every registered source.
///
/// Sources run concurrently and are joined with partial-failure tolerance:
/// a failed source contributes nothing and its failure is logged, never
/// propagated. Results are sorted by confidence, deduplicated on
/// case-insensitive (symbol, name) identity, and truncated to the top
/// [`scoring::MAX_CANDIDATES`].
pub struct CandidateAggregator {
    sources: Vec<Arc<dyn TokenSource>>,
}

impl CandidateAggregator {
    pub fn new(sources: Vec<Arc<dyn TokenSource>>) -> Self {
        Self { sources }
    }

    /// Run the search across all sources and rank the merged results.
    pub async fn search(&self, query: &str) -> RankedCandidates {
        let results = join_all(self.sources.iter().map(|source| source.search(query))).await;

        let mut candidates: Vec<TokenCandidate> = Vec::new();
        for (source, result) in self.sources.iter().zip(results) {
            match result {
                Ok(found) => {
                    debug!("Source '{}' returned {} candidates", source.id(), found.len());
                    candidates.extend(found);
                }
                Err(e) => {
                    warn!("Source '{}' failed for '{}': {}", source.id(), query, e);
                }
            }
        }

        rank(candidates)
    }

    /// The registered sources, in fan-out order.
    pub fn sources(&self) -> &[Arc<dyn TokenSource>] {
        &self.sources
    }
}

/// Sort, deduplicate and truncate a merged candidate list.
fn rank(mut candidates: Vec<TokenCandidate>) -> RankedCandidates {
    candidates.sort_by(|a, b| b.confidence.cmp(&a.confidence));

    // Two candidates are the same identity when symbol and name match
    // case-insensitively; the higher-confidence instance wins. A linear
    // scan is fine at a handful of candidates per source.
    let mut unique: Vec<TokenCandidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let key = candidate.identity_key();
        match unique.iter_mut().find(|c| c.identity_key() == key) {
            Some(existing) => {
                if candidate.confidence > existing.confidence {
                    *existing = candidate;
                }
            }
            None => unique.push(candidate),
        }
    }

    unique.truncate(scoring::MAX_CANDIDATES);

    let auto_select = unique.len() == 1
        && unique[0].confidence > scoring::AUTO_SELECT_THRESHOLD;

    RankedCandidates {
        candidates: unique,
        auto_select,
    }
}
