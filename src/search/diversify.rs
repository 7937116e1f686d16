//! Brand/category diversification of a ranked list.

use super::rank::ScoredResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-brand and per-category caps for [`diversify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiversityCaps {
    pub max_per_brand: usize,
    pub max_per_category: usize,
}

impl Default for DiversityCaps {
    fn default() -> Self {
        Self {
            max_per_brand: 3,
            max_per_category: 5,
        }
    }
}

/// Walk a score-ordered list once, keeping an item only while its brand and
/// category are both under their caps. Skipped items are dropped, not deferred.
pub fn diversify<'p>(
    results: &[ScoredResult<'p>],
    limit: usize,
    caps: DiversityCaps,
) -> Vec<ScoredResult<'p>> {
    let mut kept = Vec::with_capacity(limit.min(results.len()));
    let mut brand_counts: HashMap<&str, usize> = HashMap::new();
    let mut category_counts: HashMap<&str, usize> = HashMap::new();

    for result in results {
        if kept.len() >= limit {
            break;
        }
        let brand = result.product.brand.as_str();
        let category = result.product.category.as_str();
        let brand_count = brand_counts.entry(brand).or_insert(0);
        let category_count = category_counts.entry(category).or_insert(0);

        if *brand_count < caps.max_per_brand && *category_count < caps.max_per_category {
            *brand_count += 1;
            *category_count += 1;
            kept.push(result.clone());
        }
    }

    tracing::debug!(
        "Diversified {} results down to {} (limit {})",
        results.len(),
        kept.len(),
        limit
    );
    kept
}
