//! Shared session state: the active catalog snapshot and ranking config.
//!
//! Readers clone the `Arc<Catalog>` out of the lock and rank against that
//! snapshot, so replacing the catalog never disturbs a search in progress.

use crate::catalog::Catalog;
use crate::config::RankingConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A catalog together with the file it was read from.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Arc<Catalog>,
    pub source: Option<PathBuf>,
}

/// Central state shared by every tool handler.
pub struct CatalogState {
    /// Current catalog and its source (if one has been loaded)
    loaded: RwLock<Option<LoadedCatalog>>,

    /// Ranking configuration, fixed for the life of the server
    config: Arc<RankingConfig>,
}

impl std::fmt::Debug for CatalogState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogState")
            .field(
                "products",
                &self
                    .loaded
                    .try_read()
                    .ok()
                    .and_then(|l| l.as_ref().map(|l| l.catalog.len())),
            )
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CatalogState {
    pub fn new(config: RankingConfig) -> Self {
        Self {
            loaded: RwLock::new(None),
            config: Arc::new(config),
        }
    }

    /// State with a catalog already in place.
    pub fn with_catalog(config: RankingConfig, catalog: Catalog) -> Self {
        Self {
            loaded: RwLock::new(Some(LoadedCatalog {
                catalog: Arc::new(catalog),
                source: None,
            })),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Arc<RankingConfig> {
        &self.config
    }

    /// Catalog and source as one consistent pair.
    pub async fn loaded(&self) -> Option<LoadedCatalog> {
        self.loaded.read().await.clone()
    }

    /// Snapshot of the current catalog.
    pub async fn catalog(&self) -> Option<Arc<Catalog>> {
        self.loaded.read().await.as_ref().map(|l| Arc::clone(&l.catalog))
    }

    pub async fn source(&self) -> Option<PathBuf> {
        self.loaded.read().await.as_ref().and_then(|l| l.source.clone())
    }

    /// Swap in a new catalog and its source under a single write lock,
    /// returning the previous catalog.
    pub async fn replace_catalog(
        &self,
        catalog: Catalog,
        source: Option<PathBuf>,
    ) -> Option<Arc<Catalog>> {
        let next = LoadedCatalog {
            catalog: Arc::new(catalog),
            source,
        };
        self.loaded.write().await.replace(next).map(|l| l.catalog)
    }
}
