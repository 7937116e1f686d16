//! Product records and the read-only catalog snapshot the rankers score.
//!
//! A [`Catalog`] is built once (from memory or a JSON file) and then shared
//! behind an `Arc`; nothing in the ranking pipeline mutates it.

use crate::error::{CatalogError, SearchError};
use crate::path::resolve;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rapidfuzz::distance::jaro_winkler;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Maximum number of suggestions returned for an unknown name.
const MAX_SUGGESTIONS: usize = 5;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

fn default_currency() -> String {
    "INR".to_string()
}

fn default_category() -> String {
    "Electronics".to_string()
}

fn default_brand() -> String {
    "Unknown".to_string()
}

/// A product listing. Field names follow the camelCase JSON of the catalog files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "productId")]
    pub id: u64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub mrp: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_brand")]
    pub brand: String,
    #[serde(default)]
    pub sales_count: u64,
    /// Percentage of orders returned, 0-100.
    #[serde(default)]
    pub return_rate: f64,
    #[serde(default)]
    pub complaint_count: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Attribute pairs in file order.
    #[serde(default)]
    pub metadata: IndexMap<String, String>,
}

impl Product {
    /// Create a product with neutral defaults for every business signal.
    pub fn new(
        id: u64,
        title: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        mrp: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            price,
            mrp,
            currency: default_currency(),
            rating: 0.0,
            stock: 0,
            category: default_category(),
            brand: default_brand(),
            sales_count: 0,
            return_rate: 0.0,
            complaint_count: 0,
            created_at,
            updated_at: None,
            metadata: IndexMap::new(),
        }
    }

    /// Discount off the MRP as a whole percentage; 0 when the MRP is 0.
    pub fn discount_percentage(&self) -> f64 {
        if self.mrp <= 0.0 {
            return 0.0;
        }
        ((self.mrp - self.price) / self.mrp * 100.0).round()
    }

    pub const fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Whole days elapsed between `created_at` and `now`. Negative for future dates.
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_seconds().div_euclid(SECONDS_PER_DAY)
    }

    /// Clamp fields to their documented ranges, rejecting values that cannot be repaired.
    fn sanitize(mut self) -> Result<Self, CatalogError> {
        let id = self.id;
        let invalid = |reason: &str| CatalogError::InvalidProduct {
            id,
            reason: reason.to_string(),
        };
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(invalid("price must be a non-negative number"));
        }
        if !self.mrp.is_finite() || self.mrp < 0.0 {
            return Err(invalid("mrp must be a non-negative number"));
        }
        if !self.rating.is_finite() || !self.return_rate.is_finite() {
            return Err(invalid("rating and returnRate must be finite"));
        }
        self.rating = self.rating.clamp(0.0, 5.0);
        self.return_rate = self.return_rate.clamp(0.0, 100.0);
        Ok(self)
    }
}

/// Optional constraints applied before ranking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    pub in_stock_only: bool,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        self.category.as_ref().is_none_or(|c| product.category == *c)
            && self.brand.as_ref().is_none_or(|b| product.brand == *b)
            && self.min_price.is_none_or(|min| product.price >= min)
            && self.max_price.is_none_or(|max| product.price <= max)
            && self.min_rating.is_none_or(|min| product.rating >= min)
            && (!self.in_stock_only || product.is_in_stock())
    }
}

/// Aggregate figures over a catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_products: usize,
    pub total_categories: usize,
    pub total_brands: usize,
    /// Mean rating rounded to 2 decimals; 0 for an empty catalog.
    pub avg_rating: f64,
    pub in_stock_products: usize,
    /// Sum of `price * stock`.
    pub total_value: f64,
    pub categories: Vec<String>,
    pub brands: Vec<String>,
}

/// Immutable product snapshot with id lookup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    by_id: HashMap<u64, usize>,
}

impl Catalog {
    /// Build a catalog, clamping ratings and rejecting duplicate ids.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(products.len());
        let mut sanitized = Vec::with_capacity(products.len());

        for product in products {
            let product = product.sanitize()?;
            if by_id.insert(product.id, sanitized.len()).is_some() {
                return Err(CatalogError::DuplicateId(product.id));
            }
            sanitized.push(product);
        }

        Ok(Self {
            products: sanitized,
            by_id,
        })
    }

    /// Load a JSON array of products. `~` in the path is expanded.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = resolve(path);
        let path = path.as_path();

        let start = std::time::Instant::now();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let products: Vec<Product> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let catalog = Self::new(products)?;

        tracing::info!(
            "Loaded catalog from {}: {} products, {} brands, {} categories in {:?}",
            path.display(),
            catalog.len(),
            catalog.brands().len(),
            catalog.categories().len(),
            start.elapsed()
        );

        Ok(catalog)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: u64) -> Option<&Product> {
        self.by_id.get(&id).map(|&idx| &self.products[idx])
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<String> {
        self.distinct(|p| &p.category)
    }

    /// Distinct brands, sorted.
    pub fn brands(&self) -> Vec<String> {
        self.distinct(|p| &p.brand)
    }

    fn distinct<'a>(&'a self, field: impl Fn(&'a Product) -> &'a String) -> Vec<String> {
        self.products
            .iter()
            .map(field)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Products matching `filter`, in catalog order.
    pub fn filter<'a>(&'a self, filter: &'a ProductFilter) -> impl Iterator<Item = &'a Product> {
        self.products.iter().filter(move |p| filter.matches(p))
    }

    /// Reject brand/category filter values the catalog has never seen,
    /// offering close matches instead.
    pub fn check_filter(&self, filter: &ProductFilter) -> Result<(), SearchError> {
        if let Some(brand) = &filter.brand {
            let brands = self.brands();
            if !brands.contains(brand) {
                return Err(SearchError::UnknownBrand {
                    brand: brand.clone(),
                    suggestions: suggest(brand, &brands),
                });
            }
        }
        if let Some(category) = &filter.category {
            let categories = self.categories();
            if !categories.contains(category) {
                return Err(SearchError::UnknownCategory {
                    category: category.clone(),
                    suggestions: suggest(category, &categories),
                });
            }
        }
        Ok(())
    }

    pub fn stats(&self) -> CatalogStats {
        let total = self.products.len();
        let avg_rating = if total == 0 {
            0.0
        } else {
            let mean = self.products.iter().map(|p| p.rating).sum::<f64>() / total as f64;
            (mean * 100.0).round() / 100.0
        };
        let categories = self.categories();
        let brands = self.brands();

        CatalogStats {
            total_products: total,
            total_categories: categories.len(),
            total_brands: brands.len(),
            avg_rating,
            in_stock_products: self.products.iter().filter(|p| p.is_in_stock()).count(),
            total_value: self
                .products
                .iter()
                .map(|p| p.price * f64::from(p.stock))
                .sum(),
            categories,
            brands,
        }
    }
}

/// Case-insensitive fuzzy matches of `name` among `candidates`, best first.
fn suggest(name: &str, candidates: &[String]) -> Vec<String> {
    let needle = name.to_lowercase();
    let mut scored: Vec<(f64, &String)> = candidates
        .iter()
        .map(|candidate| {
            let score =
                jaro_winkler::similarity(needle.chars(), candidate.to_lowercase().chars());
            (score, candidate)
        })
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .collect();
    scored.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}
