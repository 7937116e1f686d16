//! Ranking configuration: weight profiles, boost tables, diversity caps and
//! request limits.
//!
//! Every field has a default, so an empty TOML file (or no file at all) gives
//! the stock behaviour. A file only needs the tables it overrides:
//!
//! ```toml
//! [weights.budget]
//! relevance = 0.25
//! popularity = 0.15
//! quality = 0.20
//! value = 0.35
//! recency = 0.05
//!
//! [boosts.brand]
//! Nokia = 1.05
//!
//! [diversity]
//! max_per_brand = 2
//! ```

use crate::error::{ConfigError, SearchError};
use crate::path::resolve;
use crate::search::{BoostTables, DiversityCaps, WeightProfiles};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming the config file read by [`RankingConfig::from_env`].
pub const CONFIG_ENV: &str = "CATALOG_RANK_CONFIG";

/// Bounds on search requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    /// Longest accepted query, in characters.
    pub max_query_len: usize,
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_query_len: 500,
            default_limit: 10,
            max_limit: 100,
        }
    }
}

impl Limits {
    /// Reject blank queries and queries longer than `max_query_len`.
    pub fn check_query(&self, query: &str) -> Result<(), SearchError> {
        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        let len = query.chars().count();
        if len > self.max_query_len {
            return Err(SearchError::QueryTooLong {
                len,
                max: self.max_query_len,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankingConfig {
    pub weights: WeightProfiles,
    pub boosts: BoostTables,
    pub diversity: DiversityCaps,
    pub limits: Limits,
}

impl RankingConfig {
    /// Parse and validate a TOML document.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file. `~` in the path is expanded.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = resolve(path);
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::parse(&content)?;
        tracing::info!("Loaded ranking config from {}", path.display());
        Ok(config)
    }

    /// Load the file named by `CATALOG_RANK_CONFIG`, or fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load_or_default(std::env::var_os(CONFIG_ENV))
    }

    pub fn load_or_default(path: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                tracing::debug!("No {} set, using default ranking config", CONFIG_ENV);
                Ok(Self::default())
            }
        }
    }

    /// Check the invariants the ranker relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some((intent, sum)) = self.weights.first_invalid() {
            return Err(ConfigError::InvalidWeights {
                intent: intent.to_string(),
                sum,
            });
        }

        if let Some((table, key, value)) = self
            .boosts
            .multipliers()
            .find(|(_, _, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(ConfigError::InvalidMultiplier { table, key, value });
        }

        let Limits {
            default_limit,
            max_limit,
            ..
        } = self.limits;
        if default_limit == 0 || default_limit > max_limit {
            return Err(ConfigError::InvalidLimits {
                default_limit,
                max_limit,
            });
        }

        Ok(())
    }
}
