pub mod catalog;
pub mod config;
pub mod error;
pub mod path;
pub mod schema;
pub mod search;
pub mod server;
pub mod state;
pub mod tools;
pub mod tracing;

pub use catalog::{Catalog, CatalogStats, Product, ProductFilter};
pub use config::{Limits, RankingConfig};
pub use error::{CatalogError, ConfigError, SearchError};
pub use search::{Algorithm, Intent, QueryContext, Ranker, ScoredResult};
pub use server::RankServer;
pub use state::{CatalogState, LoadedCatalog};
