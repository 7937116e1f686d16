//! Product search handler: validate, filter, rank, diversify, sort, paginate.

use crate::catalog::{Catalog, ProductFilter};
use crate::config::RankingConfig;
use crate::error::SearchError;
use crate::search::{
    Algorithm, Intent, PriceRange, Ranker, ScoreBreakdown, ScoredResult, diversify,
    interpret_query,
};
use crate::state::CatalogState;
use chrono::{DateTime, Utc};
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Free-text query, e.g. "sasta wala iPhone" or "laptop under 50k"
    pub query: String,
    /// Maximum number of results to return (default: 10)
    #[serde(default)]
    pub limit: Option<usize>,
    /// Number of ranked results to skip
    #[serde(default)]
    pub offset: usize,
    /// Only products in this category
    #[serde(default)]
    pub category: Option<String>,
    /// Only products of this brand
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub min_rating: Option<f64>,
    /// Drop products with zero stock
    #[serde(default)]
    pub in_stock_only: bool,
    /// Relevance algorithm: comprehensive (default), bm25, or tfidf
    #[serde(default)]
    pub algorithm: Algorithm,
    /// Limit repeats of one brand or category in the results
    #[serde(default)]
    pub diversify: bool,
    /// Order results by a single field instead of by score
    #[serde(default)]
    pub sort_by: SortField,
    #[serde(default)]
    pub order: SortOrder,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// Keep ranking order
    #[default]
    Relevance,
    Price,
    Rating,
    Sales,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub limit: usize,
    pub offset: usize,
}

/// One ranked product as returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub product_id: u64,
    pub title: String,
    pub brand: String,
    pub category: String,
    pub price: f64,
    pub mrp: f64,
    pub rating: f64,
    pub stock: u32,
    pub discount_percentage: f64,
    /// Final score rounded to 2 decimals
    pub relevance_score: f64,
    pub breakdown: ScoreBreakdown,
}

impl From<&ScoredResult<'_>> for SearchHit {
    fn from(result: &ScoredResult<'_>) -> Self {
        let p = result.product;
        Self {
            product_id: p.id,
            title: p.title.clone(),
            brand: p.brand.clone(),
            category: p.category.clone(),
            price: p.price,
            mrp: p.mrp,
            rating: p.rating,
            stock: p.stock,
            discount_percentage: p.discount_percentage(),
            relevance_score: round2(result.score),
            breakdown: result.breakdown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    pub detected_intent: Intent,
    /// Price range read from the query text; reported, not applied.
    pub price_range: Option<PriceRange>,
    pub algorithm: Algorithm,
    pub total_results: usize,
    pub returned_results: usize,
    pub pagination: Pagination,
    pub data: Vec<SearchHit>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Check request bounds against `config`, returning the effective limit.
fn validate(request: &SearchRequest, config: &RankingConfig) -> Result<usize, SearchError> {
    config.limits.check_query(&request.query)?;

    let limit = request.limit.unwrap_or(config.limits.default_limit);
    if limit == 0 || limit > config.limits.max_limit {
        return Err(SearchError::InvalidLimit {
            limit,
            max: config.limits.max_limit,
        });
    }

    if let (Some(min), Some(max)) = (request.min_price, request.max_price)
        && min > max
    {
        return Err(SearchError::InvalidPriceBounds { min, max });
    }

    Ok(limit)
}

/// Reorder by one product field. Stable, so equal values keep rank order.
fn sort_results(results: &mut [ScoredResult<'_>], field: SortField, order: SortOrder) {
    let key = |r: &ScoredResult<'_>| -> f64 {
        match field {
            SortField::Relevance => r.score,
            SortField::Price => r.product.price,
            SortField::Rating => r.product.rating,
            SortField::Sales => r.product.sales_count as f64,
        }
    };
    if field == SortField::Relevance && order == SortOrder::Desc {
        return;
    }
    results.sort_by(|a, b| {
        let ordering: Ordering = key(a).total_cmp(&key(b));
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Run one search against a catalog snapshot.
///
/// Pipeline: validate, interpret the query, filter, rank, optionally
/// diversify to `offset + limit`, optionally re-sort, then paginate.
pub fn execute_search(
    catalog: &Catalog,
    config: &RankingConfig,
    request: &SearchRequest,
    now: DateTime<Utc>,
) -> Result<SearchResponse, SearchError> {
    let limit = validate(request, config)?;

    let filter = ProductFilter {
        category: request.category.clone(),
        brand: request.brand.clone(),
        min_price: request.min_price,
        max_price: request.max_price,
        min_rating: request.min_rating,
        in_stock_only: request.in_stock_only,
    };
    catalog.check_filter(&filter)?;

    let query = request.query.trim();
    let context = interpret_query(query);
    let ranker = Ranker::new(config, now);
    let mut results = ranker.rank(
        catalog.filter(&filter),
        query,
        context.intent,
        request.algorithm,
    );

    if request.diversify {
        let window = request.offset.saturating_add(limit);
        results = diversify(&results, window, config.diversity);
    }
    sort_results(&mut results, request.sort_by, request.order);

    let total_results = results.len();
    let data: Vec<SearchHit> = results
        .iter()
        .skip(request.offset)
        .take(limit)
        .map(SearchHit::from)
        .collect();

    tracing::debug!(
        "Search {:?}: {} matches, returning {} from offset {}",
        query,
        total_results,
        data.len(),
        request.offset
    );

    Ok(SearchResponse {
        query: query.to_string(),
        detected_intent: context.intent,
        price_range: context.price_range,
        algorithm: request.algorithm,
        total_results,
        returned_results: data.len(),
        pagination: Pagination {
            limit,
            offset: request.offset,
        },
        data,
    })
}

/// Search the loaded catalog and render the response as pretty JSON.
pub async fn handle_search(
    state: &Arc<CatalogState>,
    request: SearchRequest,
) -> Result<String, String> {
    let catalog = state
        .catalog()
        .await
        .ok_or_else(|| "No catalog loaded. Use load_catalog first.".to_string())?;

    let response = execute_search(&catalog, state.config(), &request, Utc::now())
        .map_err(|e| e.to_string())?;
    serde_json::to_string_pretty(&response).map_err(|e| e.to_string())
}
