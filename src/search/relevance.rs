//! Lexical relevance of a product to a query.
//!
//! Two strategies sit behind [`RelevanceEstimator`]. They answer the same
//! question with different formulas and are not expected to agree:
//!
//! - [`SimpleRelevance`]: fuzzy title similarity plus keyword coverage.
//! - [`MultiFactorRelevance`]: substring matches across title, description,
//!   keywords and metadata. This one feeds the comprehensive ranker.

use super::normalize::{similarity, text_matches};
use super::query::extract_keywords;
use super::scoring::cap;
use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// Scores how well a product matches a query, in [0, 100].
pub trait RelevanceEstimator: Send + Sync {
    fn score(&self, product: &Product, query: &str) -> f64;
}

/// Selects one of the built-in estimators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Estimator {
    Simple,
    #[default]
    MultiFactor,
}

impl Estimator {
    pub fn estimator(self) -> &'static dyn RelevanceEstimator {
        match self {
            Self::Simple => &SimpleRelevance,
            Self::MultiFactor => &MultiFactorRelevance,
        }
    }
}

/// Score `product` against `query` with the chosen estimator.
pub fn score_relevance(product: &Product, query: &str, estimator: Estimator) -> f64 {
    estimator.estimator().score(product, query)
}

/// Title similarity (40) + keyword coverage (30) + brand-in-title (15) + flat category bonus (15).
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRelevance;

impl SimpleRelevance {
    const CATEGORY_BONUS: f64 = 15.0;
}

impl RelevanceEstimator for SimpleRelevance {
    fn score(&self, product: &Product, query: &str) -> f64 {
        let title = similarity(&product.title, query) * 40.0;

        let keywords = extract_keywords(query);
        let coverage = if keywords.is_empty() {
            0.0
        } else {
            let full_text = format!("{} {}", product.title, product.description).to_lowercase();
            let matched = keywords
                .iter()
                .filter(|kw| full_text.contains(kw.as_str()))
                .count();
            matched as f64 / keywords.len() as f64 * 30.0
        };

        let brand = if text_matches(&product.title, &product.brand) {
            15.0
        } else {
            0.0
        };

        cap(title + coverage + brand + Self::CATEGORY_BONUS)
    }
}

/// Title (40) + description (20) + keyword overlap (20) + metadata (15).
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiFactorRelevance;

impl MultiFactorRelevance {
    /// Keywords must be longer than this many chars to count toward overlap.
    const MIN_KEYWORD_LEN: usize = 2;

    /// Full-phrase match scores `exact`, otherwise `partial` times the share of
    /// query words found individually.
    fn field_score(field: &str, query: &str, words: &[&str], exact: f64, partial: f64) -> f64 {
        if field.contains(query) {
            exact
        } else if words.is_empty() {
            0.0
        } else {
            let matched = words.iter().filter(|w| field.contains(**w)).count();
            matched as f64 / words.len() as f64 * partial
        }
    }

    /// Flat JSON rendering of the metadata map, e.g. `{"color":"red"}`.
    fn flatten_metadata(product: &Product) -> String {
        serde_json::to_string(&product.metadata)
            .unwrap_or_default()
            .to_lowercase()
    }
}

impl RelevanceEstimator for MultiFactorRelevance {
    fn score(&self, product: &Product, query: &str) -> f64 {
        let query = query.to_lowercase();
        let title = product.title.to_lowercase();
        let description = product.description.to_lowercase();
        let words: Vec<&str> = query.split_whitespace().collect();

        let title_score = Self::field_score(&title, &query, &words, 40.0, 30.0);
        let description_score = Self::field_score(&description, &query, &words, 20.0, 15.0);

        let keywords: Vec<&str> = words
            .iter()
            .copied()
            .filter(|w| w.chars().count() > Self::MIN_KEYWORD_LEN)
            .collect();
        let keyword_matches = keywords
            .iter()
            .filter(|kw| title.contains(**kw) || description.contains(**kw))
            .count();
        let keyword_score = keyword_matches as f64 / keywords.len().max(1) as f64 * 20.0;

        let metadata_score = if Self::flatten_metadata(product).contains(&query) {
            15.0
        } else {
            0.0
        };

        cap(title_score + description_score + keyword_score + metadata_score)
    }
}
