//! Comprehensive ranking: relevance, business components, weights, adjustment.

use super::adjust::adjust;
use super::classical::{Bm25, TfIdf};
use super::query::Intent;
use super::relevance::{MultiFactorRelevance, RelevanceEstimator};
use super::scoring::{MAX_SCORE, ScoreBreakdown, cap, score_components};
use crate::catalog::Product;
use crate::config::RankingConfig;
use chrono::{DateTime, Utc};
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the relevance term of the comprehensive score is computed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Multi-factor lexical relevance
    #[default]
    Comprehensive,
    /// Okapi BM25 over the candidate titles and descriptions
    Bm25,
    /// TF-IDF over the candidate titles and descriptions
    Tfidf,
}

impl Algorithm {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comprehensive => "comprehensive",
            Self::Bm25 => "bm25",
            Self::Tfidf => "tfidf",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product with its final score and the components that produced it.
#[derive(Debug, Clone)]
pub struct ScoredResult<'p> {
    pub product: &'p Product,
    /// Weighted score after boosts and penalties, in [0, 100].
    pub score: f64,
    /// Weighted score before boosts and penalties.
    pub base_score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Scores and orders candidate products under one configuration.
///
/// The reference time is fixed at construction so repeated calls with the
/// same inputs give identical output.
#[derive(Debug, Clone, Copy)]
pub struct Ranker<'a> {
    config: &'a RankingConfig,
    now: DateTime<Utc>,
}

impl<'a> Ranker<'a> {
    /// # Panics
    ///
    /// Panics if any weight profile in `config` does not sum to 1.0. Configs
    /// from [`RankingConfig::load`] are already validated.
    pub fn new(config: &'a RankingConfig, now: DateTime<Utc>) -> Self {
        if let Some((intent, sum)) = config.weights.first_invalid() {
            panic!("weight profile for intent '{intent}' sums to {sum}, expected 1.0");
        }
        Self { config, now }
    }

    pub const fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Weighted score of one product before adjustment.
    pub fn comprehensive_score(
        &self,
        product: &Product,
        query: &str,
        intent: Intent,
    ) -> (f64, ScoreBreakdown) {
        let relevance = MultiFactorRelevance.score(product, query);
        self.combine(product, relevance, intent)
    }

    fn combine(&self, product: &Product, relevance: f64, intent: Intent) -> (f64, ScoreBreakdown) {
        let components = score_components(product, intent, self.now);
        let breakdown = ScoreBreakdown::new(relevance, components);
        let score = self.config.weights.for_intent(intent).combine(&breakdown);
        (score, breakdown)
    }

    /// Score every product and return them best first. Ties keep input order.
    pub fn rank<'p, I>(
        &self,
        products: I,
        query: &str,
        intent: Intent,
        algorithm: Algorithm,
    ) -> Vec<ScoredResult<'p>>
    where
        I: IntoIterator<Item = &'p Product>,
    {
        let products: Vec<&'p Product> = products.into_iter().collect();
        if products.is_empty() {
            return Vec::new();
        }

        let relevance: Vec<f64> = match algorithm {
            Algorithm::Comprehensive => products
                .iter()
                .map(|p| MultiFactorRelevance.score(p, query))
                .collect(),
            Algorithm::Bm25 | Algorithm::Tfidf => classical_relevance(&products, query, algorithm),
        };

        let mut results: Vec<ScoredResult<'p>> = products
            .into_iter()
            .zip(relevance)
            .map(|(product, relevance)| {
                let (base_score, breakdown) = self.combine(product, relevance, intent);
                let score = cap(adjust(base_score, product, &self.config.boosts, self.now));
                ScoredResult {
                    product,
                    score,
                    base_score,
                    breakdown,
                }
            })
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));

        tracing::debug!(
            "Ranked {} candidates for {:?} (intent {}, algorithm {})",
            results.len(),
            query,
            intent,
            algorithm
        );
        results
    }
}

/// Classical scores over the candidate set, scaled so the best candidate gets 100.
fn classical_relevance(products: &[&Product], query: &str, algorithm: Algorithm) -> Vec<f64> {
    let corpus: Vec<String> = products
        .iter()
        .map(|p| format!("{} {}", p.title, p.description))
        .collect();

    let raw: Vec<f64> = match algorithm {
        Algorithm::Bm25 => {
            let bm25 = Bm25::new(&corpus);
            corpus.iter().map(|doc| bm25.score(query, doc)).collect()
        }
        _ => {
            let tfidf = TfIdf::new(&corpus);
            corpus.iter().map(|doc| tfidf.score(query, doc)).collect()
        }
    };

    let best = raw.iter().copied().fold(0.0_f64, f64::max);
    if best <= 0.0 {
        return vec![0.0; raw.len()];
    }
    raw.into_iter()
        .map(|score| cap(score.max(0.0) / best * MAX_SCORE))
        .collect()
}
