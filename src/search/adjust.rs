//! Business boosts and penalties applied after the comprehensive score.
//!
//! Multipliers come from [`BoostTables`] so they can be tuned in config
//! without touching scoring code. Steps run in a fixed order: category,
//! brand, stock, freshness.

use super::scoring::MAX_SCORE;
use crate::catalog::Product;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stock-level multipliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StockRules {
    pub out_of_stock: f64,
    /// Stock strictly below this is "low".
    pub low_threshold: u32,
    pub low: f64,
    /// Stock strictly above this is "high".
    pub high_threshold: u32,
    pub high: f64,
}

impl Default for StockRules {
    fn default() -> Self {
        Self {
            out_of_stock: 0.5,
            low_threshold: 10,
            low: 0.75,
            high_threshold: 500,
            high: 1.05,
        }
    }
}

impl StockRules {
    pub const fn multiplier(&self, stock: u32) -> f64 {
        if stock == 0 {
            self.out_of_stock
        } else if stock < self.low_threshold {
            self.low
        } else if stock > self.high_threshold {
            self.high
        } else {
            1.0
        }
    }
}

/// Penalty for old listings that never sold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FreshnessRules {
    /// Age strictly above this many days counts as stale.
    pub max_age_days: i64,
    /// Sales strictly below this count as unpopular.
    pub min_sales: u64,
    pub penalty: f64,
}

impl Default for FreshnessRules {
    fn default() -> Self {
        Self {
            max_age_days: 730,
            min_sales: 100,
            penalty: 0.7,
        }
    }
}

impl FreshnessRules {
    pub fn multiplier(&self, product: &Product, now: DateTime<Utc>) -> f64 {
        if product.age_days(now) > self.max_age_days && product.sales_count < self.min_sales {
            self.penalty
        } else {
            1.0
        }
    }
}

/// Lookup tables driving [`adjust`]. Unlisted categories and brands get 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoostTables {
    pub category: HashMap<String, f64>,
    pub brand: HashMap<String, f64>,
    pub stock: StockRules,
    pub freshness: FreshnessRules,
}

impl Default for BoostTables {
    fn default() -> Self {
        let table = |entries: &[(&str, f64)]| {
            entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), *v))
                .collect::<HashMap<_, _>>()
        };
        Self {
            category: table(&[
                ("Mobile Phones", 1.10),
                ("Laptops", 1.05),
                ("Headphones", 1.00),
                ("Tablets", 0.95),
                ("Smart Watches", 0.95),
                ("Phone Accessories", 0.90),
            ]),
            brand: table(&[
                ("Apple", 1.15),
                ("Samsung", 1.10),
                ("Sony", 1.08),
                ("Lenovo", 1.05),
                ("Dell", 1.05),
                ("Xiaomi", 0.95),
                ("Boat", 0.90),
            ]),
            stock: StockRules::default(),
            freshness: FreshnessRules::default(),
        }
    }
}

impl BoostTables {
    pub fn category_multiplier(&self, category: &str) -> f64 {
        self.category.get(category).copied().unwrap_or(1.0)
    }

    pub fn brand_multiplier(&self, brand: &str) -> f64 {
        self.brand.get(brand).copied().unwrap_or(1.0)
    }

    /// Every configured multiplier, labelled by table, for validation.
    pub(crate) fn multipliers(&self) -> impl Iterator<Item = (&'static str, String, f64)> + '_ {
        let category = self
            .category
            .iter()
            .map(|(k, v)| ("boosts.category", k.clone(), *v));
        let brand = self
            .brand
            .iter()
            .map(|(k, v)| ("boosts.brand", k.clone(), *v));
        let stock = [
            ("out_of_stock", self.stock.out_of_stock),
            ("low", self.stock.low),
            ("high", self.stock.high),
        ]
        .into_iter()
        .map(|(k, v)| ("boosts.stock", k.to_string(), v));
        let freshness = std::iter::once((
            "boosts.freshness",
            "penalty".to_string(),
            self.freshness.penalty,
        ));
        category.chain(brand).chain(stock).chain(freshness)
    }
}

/// Apply category, brand, stock and freshness multipliers in that order,
/// capping the result at 100.
pub fn adjust(score: f64, product: &Product, tables: &BoostTables, now: DateTime<Utc>) -> f64 {
    let adjusted = score
        * tables.category_multiplier(&product.category)
        * tables.brand_multiplier(&product.brand)
        * tables.stock.multiplier(product.stock)
        * tables.freshness.multiplier(product, now);
    adjusted.min(MAX_SCORE)
}
