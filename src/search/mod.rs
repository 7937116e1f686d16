//! Query understanding and multi-factor product ranking.
//!
//! A search runs through these stages in order: interpret the query
//! ([`query`]), score relevance ([`relevance`], [`classical`]) and business
//! components ([`scoring`]), combine them per intent ([`weights`]), apply
//! boosts and penalties ([`adjust`]), sort ([`rank`]), and optionally cap
//! brand and category repetition ([`diversify`]).

// Module declarations
pub mod adjust;
pub mod classical;
pub mod diversify;
pub mod normalize;
pub mod query;
pub mod rank;
pub mod relevance;
pub mod scoring;
pub mod weights;

// Public re-exports (used via lib.rs)
pub use adjust::{BoostTables, FreshnessRules, StockRules, adjust};
pub use classical::{Bm25, TfIdf};
pub use diversify::{DiversityCaps, diversify};
pub use normalize::{levenshtein, normalize, similarity, text_matches};
pub use query::{
    Intent, PriceRange, QueryContext, detect_intent, extract_keywords, extract_price_range,
    interpret_query,
};
pub use rank::{Algorithm, Ranker, ScoredResult};
pub use relevance::{
    Estimator, MultiFactorRelevance, RelevanceEstimator, SimpleRelevance, score_relevance,
};
pub use scoring::{ComponentScores, ScoreBreakdown, score_components};
pub use weights::{WeightProfile, WeightProfiles};
