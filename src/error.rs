//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for catalog-rank glue code.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` at the binary and server boundaries.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when a search request cannot be served.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error("Search query cannot be empty")]
    EmptyQuery,
    #[error("Search query cannot exceed {max} characters (got {len})")]
    QueryTooLong { len: usize, max: usize },
    #[error("Limit must be a number between 1 and {max} (got {limit})")]
    InvalidLimit { limit: usize, max: usize },
    #[error("min_price ({min}) must not exceed max_price ({max})")]
    InvalidPriceBounds { min: f64, max: f64 },
    #[error("Unknown brand '{brand}'{}", format_suggestions(.suggestions))]
    UnknownBrand {
        brand: String,
        suggestions: Vec<String>,
    },
    #[error("Unknown category '{category}'{}", format_suggestions(.suggestions))]
    UnknownCategory {
        category: String,
        suggestions: Vec<String>,
    },
    #[error("Product with ID {0} not found")]
    ProductNotFound(u64),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(". Did you mean: {}?", suggestions.join(", "))
    }
}

/// Error returned when loading a product catalog fails.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse catalog at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Duplicate product ID {0} in catalog")]
    DuplicateId(u64),
    #[error("Invalid product {id}: {reason}")]
    InvalidProduct { id: u64, reason: String },
}

/// Error returned when loading or validating ranking configuration fails.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Weights for intent '{intent}' sum to {sum}, expected 1.0")]
    InvalidWeights { intent: String, sum: f64 },
    #[error("default_limit ({default_limit}) must be between 1 and max_limit ({max_limit})")]
    InvalidLimits {
        default_limit: usize,
        max_limit: usize,
    },
    #[error("Multiplier {value} for '{key}' in [{table}] must be a finite non-negative number")]
    InvalidMultiplier {
        table: &'static str,
        key: String,
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_unknown_brand_lists_suggestions() {
        let err = SearchError::UnknownBrand {
            brand: "Aple".to_string(),
            suggestions: vec!["Apple".to_string()],
        };
        check!(err.to_string() == "Unknown brand 'Aple'. Did you mean: Apple?");
    }

    #[test]
    fn test_unknown_category_without_suggestions() {
        let err = SearchError::UnknownCategory {
            category: "Groceries".to_string(),
            suggestions: vec![],
        };
        check!(err.to_string() == "Unknown category 'Groceries'");
    }
}
