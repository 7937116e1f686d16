//! Per-intent weighting of the five component scores.

use super::query::Intent;
use super::scoring::ScoreBreakdown;
use serde::{Deserialize, Serialize};

/// Allowed drift from 1.0 when checking that a profile's weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weights for relevance, popularity, quality, value, and recency. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightProfile {
    pub relevance: f64,
    pub popularity: f64,
    pub quality: f64,
    pub value: f64,
    pub recency: f64,
}

impl WeightProfile {
    pub const DEFAULT: Self = Self::new(0.35, 0.25, 0.20, 0.15, 0.05);
    pub const BUDGET: Self = Self::new(0.30, 0.15, 0.20, 0.30, 0.05);
    pub const PREMIUM: Self = Self::new(0.30, 0.20, 0.30, 0.15, 0.05);
    pub const LATEST: Self = Self::new(0.35, 0.20, 0.15, 0.05, 0.25);
    pub const QUALITY: Self = Self::new(0.30, 0.15, 0.40, 0.10, 0.05);

    pub const fn new(
        relevance: f64,
        popularity: f64,
        quality: f64,
        value: f64,
        recency: f64,
    ) -> Self {
        Self {
            relevance,
            popularity,
            quality,
            value,
            recency,
        }
    }

    pub fn sum(&self) -> f64 {
        self.relevance + self.popularity + self.quality + self.value + self.recency
    }

    /// Whether the weights sum to 1.0 and none is negative.
    pub fn is_valid(&self) -> bool {
        let parts = [
            self.relevance,
            self.popularity,
            self.quality,
            self.value,
            self.recency,
        ];
        parts.iter().all(|w| w.is_finite() && *w >= 0.0)
            && (self.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }

    /// Weighted sum of a score breakdown.
    pub fn combine(&self, scores: &ScoreBreakdown) -> f64 {
        scores.relevance * self.relevance
            + scores.popularity * self.popularity
            + scores.quality * self.quality
            + scores.value * self.value
            + scores.recency * self.recency
    }
}

impl Default for WeightProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One weight profile per intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeightProfiles {
    pub general: WeightProfile,
    pub budget: WeightProfile,
    pub premium: WeightProfile,
    pub latest: WeightProfile,
    pub quality: WeightProfile,
}

impl Default for WeightProfiles {
    fn default() -> Self {
        Self {
            general: WeightProfile::DEFAULT,
            budget: WeightProfile::BUDGET,
            premium: WeightProfile::PREMIUM,
            latest: WeightProfile::LATEST,
            quality: WeightProfile::QUALITY,
        }
    }
}

impl WeightProfiles {
    pub const fn for_intent(&self, intent: Intent) -> &WeightProfile {
        match intent {
            Intent::General => &self.general,
            Intent::Budget => &self.budget,
            Intent::Premium => &self.premium,
            Intent::Latest => &self.latest,
            Intent::Quality => &self.quality,
        }
    }

    /// The first intent whose profile is malformed, with its weight sum.
    pub fn first_invalid(&self) -> Option<(Intent, f64)> {
        Intent::ALL
            .into_iter()
            .map(|intent| (intent, self.for_intent(intent)))
            .find(|(_, profile)| !profile.is_valid())
            .map(|(intent, profile)| (intent, profile.sum()))
    }
}
