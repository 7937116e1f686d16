//! Business-signal component scores.
//!
//! Each scorer is a pure function of a [`Product`] (plus intent and the
//! reference time for recency) and returns a value in [0, 100].

use super::query::Intent;
use crate::catalog::Product;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Upper bound for every component score.
pub const MAX_SCORE: f64 = 100.0;

/// Floor for the `log10(price + 1)` divisor in the value score, so free or
/// near-free items do not divide by zero.
pub const MIN_PRICE_LOG: f64 = 1.0;

/// Clamp a score to [0, 100].
pub(crate) fn cap(score: f64) -> f64 {
    score.clamp(0.0, MAX_SCORE)
}

/// The four business components, independent of the query text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentScores {
    pub popularity: f64,
    pub quality: f64,
    pub value: f64,
    pub recency: f64,
}

/// All five components that feed the comprehensive score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub relevance: f64,
    pub popularity: f64,
    pub quality: f64,
    pub value: f64,
    pub recency: f64,
}

impl ScoreBreakdown {
    pub const fn new(relevance: f64, components: ComponentScores) -> Self {
        Self {
            relevance,
            popularity: components.popularity,
            quality: components.quality,
            value: components.value,
            recency: components.recency,
        }
    }
}

/// Sales volume (log scale, 40) + rating (40) + stock depth (20).
pub fn popularity_score(product: &Product) -> f64 {
    let sales = ((product.sales_count as f64 + 1.0).log10() * 10.0).min(40.0);
    let rating = product.rating / 5.0 * 40.0;
    let stock = if product.stock > 0 {
        (f64::from(product.stock) / 500.0 * 20.0).min(20.0)
    } else {
        0.0
    };
    cap(sales + rating + stock)
}

/// Rating (50) + return-rate allowance (30) + complaint allowance (20).
pub fn quality_score(product: &Product) -> f64 {
    let rating = product.rating / 5.0 * 50.0;
    let returns = (30.0 - product.return_rate * 3.0).max(0.0);
    let complaints = (20.0 - (f64::from(product.complaint_count) * 2.0).min(20.0)).max(0.0);
    cap(rating + returns + complaints)
}

/// Discount depth (30) + rating per log-price (40) + price tier (30).
///
/// A negative discount (price above MRP) contributes nothing rather than
/// subtracting.
pub fn value_score(product: &Product) -> f64 {
    let discount_percent = if product.mrp > 0.0 {
        ((product.mrp - product.price) / product.mrp * 100.0).max(0.0)
    } else {
        0.0
    };
    let discount = (discount_percent / 50.0 * 30.0).min(30.0);

    let price_log = (product.price + 1.0).log10().max(MIN_PRICE_LOG);
    let value_for_money = (product.rating / price_log * 10.0).min(40.0);

    let tier = match product.price {
        p if p < 10_000.0 => 30.0,
        p if p < 50_000.0 => 20.0,
        p if p < 150_000.0 => 10.0,
        _ => 5.0,
    };

    cap(discount + value_for_money + tier)
}

/// Base 50 + newness bonus, with an extra 20 for recent products on "latest" queries.
pub fn recency_score(product: &Product, intent: Intent, now: DateTime<Utc>) -> f64 {
    let age = product.age_days(now);
    let newness = match age {
        a if a < 30 => 25.0,
        a if a < 90 => 15.0,
        a if a < 365 => 5.0,
        _ => 0.0,
    };
    let latest_bonus = if intent == Intent::Latest && age < 180 {
        20.0
    } else {
        0.0
    };
    cap(50.0 + newness + latest_bonus)
}

/// Compute all four business components at once.
pub fn score_components(product: &Product, intent: Intent, now: DateTime<Utc>) -> ComponentScores {
    ComponentScores {
        popularity: popularity_score(product),
        quality: quality_score(product),
        value: value_score(product),
        recency: recency_score(product, intent, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap()
    }

    fn base() -> Product {
        let mut p = Product::new(1, "Phone", "A phone", 20_000.0, 25_000.0, now());
        p.rating = 4.0;
        p.stock = 100;
        p.sales_count = 999;
        p
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_popularity_components() {
        // log10(1000) * 10 = 30; 4/5*40 = 32; 100/500*20 = 4
        check!(close(popularity_score(&base()), 66.0));
    }

    #[test]
    fn test_popularity_caps_sales_and_stock() {
        let mut p = base();
        p.sales_count = 10_000_000;
        p.stock = 5_000;
        p.rating = 5.0;
        check!(close(popularity_score(&p), 100.0));
    }

    #[test]
    fn test_popularity_out_of_stock_gets_no_stock_points() {
        let mut p = base();
        p.stock = 0;
        check!(close(popularity_score(&p), 62.0));
    }

    #[test]
    fn test_quality_components() {
        let mut p = base();
        p.return_rate = 2.0;
        p.complaint_count = 3;
        // 40 + (30 - 6) + (20 - 6)
        check!(close(quality_score(&p), 78.0));
    }

    #[test]
    fn test_quality_penalties_floor_at_zero() {
        let mut p = base();
        p.rating = 0.0;
        p.return_rate = 40.0;
        p.complaint_count = 50;
        check!(quality_score(&p) == 0.0);
    }

    #[test]
    fn test_value_components() {
        let p = base();
        // discount 20% -> 12; 4 / log10(20001) * 10; tier 20
        let expected = 12.0 + 4.0 / 20_001f64.log10() * 10.0 + 20.0;
        check!(close(value_score(&p), expected));
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    #[case(5.0)]
    fn test_value_is_defined_for_tiny_prices(#[case] price: f64) {
        let mut p = base();
        p.price = price;
        p.mrp = 0.0;
        p.rating = 5.0;
        let score = value_score(&p);
        check!(score.is_finite());
        // no discount (mrp 0), 5 / 1 * 10 = 50 capped at 40, tier 30
        check!(close(score, 70.0));
    }

    #[test]
    fn test_value_ignores_negative_discount() {
        let mut p = base();
        p.price = 30_000.0;
        p.mrp = 25_000.0;
        let expected = 4.0 / 30_001f64.log10() * 10.0 + 20.0;
        check!(close(value_score(&p), expected));
    }

    #[rstest]
    #[case(5.0, 9_999.0, 30.0)]
    #[case(5.0, 10_000.0, 20.0)]
    #[case(5.0, 49_999.0, 20.0)]
    #[case(5.0, 50_000.0, 10.0)]
    #[case(5.0, 149_999.0, 10.0)]
    #[case(5.0, 150_000.0, 5.0)]
    fn test_value_price_tiers(#[case] rating: f64, #[case] price: f64, #[case] tier: f64) {
        let mut p = base();
        p.rating = rating;
        p.price = price;
        p.mrp = price;
        let expected = (rating / (price + 1.0).log10() * 10.0).min(40.0) + tier;
        check!(close(value_score(&p), expected));
    }

    #[rstest]
    #[case(0, Intent::General, 75.0)]
    #[case(29, Intent::General, 75.0)]
    #[case(30, Intent::General, 65.0)]
    #[case(89, Intent::General, 65.0)]
    #[case(90, Intent::General, 55.0)]
    #[case(364, Intent::General, 55.0)]
    #[case(365, Intent::General, 50.0)]
    #[case(10, Intent::Latest, 95.0)]
    #[case(179, Intent::Latest, 75.0)]
    #[case(180, Intent::Latest, 55.0)]
    #[case(1000, Intent::Latest, 50.0)]
    fn test_recency(#[case] age_days: i64, #[case] intent: Intent, #[case] expected: f64) {
        let mut p = base();
        p.created_at = now() - Duration::days(age_days);
        check!(recency_score(&p, intent, now()) == expected);
    }

    #[test]
    fn test_score_components_matches_individual_scorers() {
        let p = base();
        let scores = score_components(&p, Intent::General, now());
        check!(scores.popularity == popularity_score(&p));
        check!(scores.quality == quality_score(&p));
        check!(scores.value == value_score(&p));
        check!(scores.recency == recency_score(&p, Intent::General, now()));
    }

    #[test]
    fn test_popularity_monotone_in_sales() {
        let mut previous = -1.0;
        for sales in [0, 1, 10, 100, 1_000, 10_000, 100_000, 1_000_000] {
            let mut p = base();
            p.sales_count = sales;
            let score = popularity_score(&p);
            check!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn test_quality_monotone_in_returns_and_complaints() {
        let mut previous = f64::INFINITY;
        for step in 0..20 {
            let mut p = base();
            p.return_rate = f64::from(step);
            p.complaint_count = step;
            let score = quality_score(&p);
            check!(score <= previous);
            previous = score;
        }
    }

    #[test]
    fn test_value_monotone_in_discount() {
        let mut previous = -1.0;
        for mrp in [20_000.0, 22_000.0, 25_000.0, 30_000.0, 40_000.0, 80_000.0] {
            let mut p = base();
            p.mrp = mrp;
            let score = value_score(&p);
            check!(score >= previous);
            previous = score;
        }
    }
}
