//! Load (or replace) the active product catalog from a JSON file.

use crate::catalog::Catalog;
use crate::path::resolve;
use crate::state::CatalogState;
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct LoadCatalogRequest {
    /// Path to a JSON array of products (`~` is expanded)
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadCatalogResponse {
    pub path: PathBuf,
    pub products: usize,
    pub brands: usize,
    pub categories: usize,
    /// Size of the catalog this one replaced, if any
    pub replaced: Option<usize>,
}

/// Parse the catalog off the async runtime, then swap it into `state`.
pub async fn handle_load_catalog(
    state: &Arc<CatalogState>,
    request: LoadCatalogRequest,
) -> Result<LoadCatalogResponse, String> {
    let path = resolve(&request.path);
    let load_path = path.clone();
    let catalog = tokio::task::spawn_blocking(move || Catalog::load(load_path))
        .await
        .map_err(|e| format!("Catalog loading task failed: {}", e))?
        .map_err(|e| e.to_string())?;

    let response = LoadCatalogResponse {
        path: path.clone(),
        products: catalog.len(),
        brands: catalog.brands().len(),
        categories: catalog.categories().len(),
        replaced: None,
    };
    let previous = state.replace_catalog(catalog, Some(path)).await;

    Ok(LoadCatalogResponse {
        replaced: previous.map(|c| c.len()),
        ..response
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RankingConfig;
    use assert2::{check, let_assert};
    use std::io::Write as _;

    const CATALOG: &str = r#"[
        {"id": 1, "title": "Phone", "description": "A phone", "price": 100, "mrp": 120,
         "brand": "Apple", "category": "Mobile Phones", "createdAt": "2026-01-01T00:00:00Z"},
        {"id": 2, "title": "Case", "description": "A case", "price": 10, "mrp": 10,
         "category": "Phone Accessories", "createdAt": "2026-01-01T00:00:00Z"}
    ]"#;

    fn catalog_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_then_reload() {
        let state = Arc::new(CatalogState::new(RankingConfig::default()));
        let file = catalog_file();
        let request = LoadCatalogRequest {
            path: file.path().display().to_string(),
        };

        let first = handle_load_catalog(&state, request.clone()).await.unwrap();
        check!(first.products == 2);
        check!(first.brands == 2);
        check!(first.categories == 2);
        check!(first.replaced.is_none());

        let second = handle_load_catalog(&state, request).await.unwrap();
        check!(second.replaced == Some(2));
        check!(state.source().await == Some(file.path().to_path_buf()));
    }

    #[tokio::test]
    async fn test_missing_file_keeps_state() {
        let state = Arc::new(CatalogState::new(RankingConfig::default()));
        let dir = tempfile::tempdir().unwrap();
        let request = LoadCatalogRequest {
            path: dir.path().join("nope.json").display().to_string(),
        };
        let_assert!(Err(message) = handle_load_catalog(&state, request).await);
        check!(message.contains("Failed to read catalog"));
        check!(state.catalog().await.is_none());
    }
}
