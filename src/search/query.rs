//! Query interpretation: keywords, shopping intent, and price hints.
//!
//! [`interpret_query`] turns a raw query string into a [`QueryContext`] that the
//! rankers consume. Intent detection runs an ordered rule list where the first
//! match wins, so "cheap premium phone" is a budget query.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Function words plus the Hinglish particles "wala"/"waali" ("the one that").
pub(crate) const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "is",
    "are", "was", "were", "be", "been", "by", "from", "wala", "waali",
];

/// Coarse purpose of a query, used to pick a weight profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    #[default]
    General,
    Budget,
    Premium,
    Latest,
    Quality,
}

impl Intent {
    pub const ALL: [Self; 5] = [
        Self::General,
        Self::Budget,
        Self::Premium,
        Self::Latest,
        Self::Quality,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Budget => "budget",
            Self::Premium => "premium",
            Self::Latest => "latest",
            Self::Quality => "quality",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive price bounds mentioned in a query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Everything derived from a raw query string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryContext {
    pub raw: String,
    pub keywords: Vec<String>,
    pub intent: Intent,
    pub price_range: Option<PriceRange>,
}

/// Intent rules, evaluated top to bottom. The order is part of the contract.
static INTENT_RULES: LazyLock<Vec<(Regex, Intent)>> = LazyLock::new(|| {
    [
        (r"sasta|cheap|budget|affordable|under|less", Intent::Budget),
        (r"premium|pro|max|high|expensive|costly", Intent::Premium),
        (r"latest|new|2024|2025|2026", Intent::Latest),
        (r"strong|durable|tough|good quality", Intent::Quality),
    ]
    .into_iter()
    .map(|(pattern, intent)| {
        let regex = Regex::new(pattern).expect("intent pattern is valid");
        (regex, intent)
    })
    .collect()
});

/// A numeral with optional thousands separator, optionally followed by a
/// `k` multiplier or a currency word.
static PRICE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:,\d+)?)\s*(k|rupees?|rs\.?)?").expect("price pattern is valid")
});

/// Split on whitespace after lowercasing, dropping single characters and stop words.
pub fn extract_keywords(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() > 1 && !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}

/// Classify a query. The first matching rule wins; otherwise [`Intent::General`].
pub fn detect_intent(query: &str) -> Intent {
    let lower = query.to_lowercase();
    INTENT_RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(&lower))
        .map_or(Intent::General, |(_, intent)| *intent)
}

/// Collect every price-like numeral in the query.
///
/// - none: `None`
/// - one: `0..=value`
/// - several: `min..=max` of all values, regardless of their order in the text
pub fn extract_price_range(query: &str) -> Option<PriceRange> {
    let prices: Vec<f64> = PRICE_PATTERN
        .captures_iter(query)
        .filter_map(|caps| {
            let digits = caps[1].replace(',', "");
            let value: u64 = match digits.parse() {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!("Ignoring unparseable price numeral '{}': {}", &caps[1], e);
                    return None;
                }
            };
            let is_thousands = caps
                .get(2)
                .is_some_and(|marker| marker.as_str().eq_ignore_ascii_case("k"));
            let value = value as f64;
            Some(if is_thousands { value * 1000.0 } else { value })
        })
        .collect();

    match prices.as_slice() {
        [] => None,
        [only] => Some(PriceRange {
            min: 0.0,
            max: *only,
        }),
        _ => Some(PriceRange {
            min: prices.iter().copied().fold(f64::INFINITY, f64::min),
            max: prices.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }),
    }
}

/// Derive keywords, intent, and price range from a raw query.
pub fn interpret_query(query: &str) -> QueryContext {
    let context = QueryContext {
        raw: query.to_string(),
        keywords: extract_keywords(query),
        intent: detect_intent(query),
        price_range: extract_price_range(query),
    };
    tracing::debug!(
        "Interpreted query '{}': intent={}, keywords={:?}, price_range={:?}",
        query,
        context.intent,
        context.keywords,
        context.price_range
    );
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("sasta wala iPhone", vec!["sasta", "iphone"])]
    #[case("the best phone for a student", vec!["best", "phone", "student"])]
    #[case("a b c", vec![])]
    #[case("", vec![])]
    #[case("  iPhone   16  ", vec!["iphone", "16"])]
    fn test_extract_keywords(#[case] query: &str, #[case] expected: Vec<&str>) {
        check!(extract_keywords(query) == expected);
    }

    #[test]
    fn test_extract_keywords_keeps_duplicates_in_order() {
        check!(extract_keywords("red phone red case") == vec!["red", "phone", "red", "case"]);
    }

    #[rstest]
    #[case("cheap premium phone", Intent::Budget)]
    #[case("phone under 20000", Intent::Budget)]
    #[case("premium headphones", Intent::Premium)]
    #[case("iPhone 16 Pro Max", Intent::Premium)]
    #[case("latest samsung", Intent::Latest)]
    #[case("best phone 2025", Intent::Latest)]
    #[case("iphone2025", Intent::Latest)]
    #[case("phone 2020", Intent::General)]
    #[case("galaxy 2099", Intent::General)]
    #[case("durable phone case", Intent::Quality)]
    #[case("good quality earbuds", Intent::Quality)]
    #[case("iPhone", Intent::General)]
    #[case("", Intent::General)]
    fn test_detect_intent(#[case] query: &str, #[case] expected: Intent) {
        check!(detect_intent(query) == expected);
    }

    #[test]
    fn test_intent_priority_latest_before_quality() {
        check!(detect_intent("new durable case") == Intent::Latest);
    }

    #[rstest]
    #[case("iPhone under 50k rupees", Some((0.0, 50_000.0)))]
    #[case("between 20k and 50k", Some((20_000.0, 50_000.0)))]
    #[case("between 50k and 20k", Some((20_000.0, 50_000.0)))]
    #[case("phone for 15,000 rs", Some((0.0, 15_000.0)))]
    #[case("laptop 40000 to 60K", Some((40_000.0, 60_000.0)))]
    #[case("iPhone", None)]
    #[case("", None)]
    fn test_extract_price_range(#[case] query: &str, #[case] expected: Option<(f64, f64)>) {
        let range = extract_price_range(query).map(|r| (r.min, r.max));
        check!(range == expected);
    }

    #[test]
    fn test_extract_price_range_skips_overflowing_numerals() {
        check!(extract_price_range("99999999999999999999999 phone").is_none());
    }

    #[test]
    fn test_interpret_query_combines_all_parts() {
        let context = interpret_query("cheap iPhone under 50k");
        check!(context.raw == "cheap iPhone under 50k");
        check!(context.intent == Intent::Budget);
        check!(context.keywords == vec!["cheap", "iphone", "under", "50k"]);
        check!(
            context.price_range
                == Some(PriceRange {
                    min: 0.0,
                    max: 50_000.0
                })
        );
    }

    #[test]
    fn test_intent_display_matches_serde() {
        for intent in Intent::ALL {
            let json = serde_json::to_string(&intent).unwrap();
            check!(json == format!("\"{}\"", intent));
        }
    }
}
