//! MCP server exposing catalog search over stdio.

use crate::catalog::Catalog;
use crate::config::RankingConfig;
use crate::schema::inline_schema_for_type;
use crate::state::CatalogState;
use crate::tools::catalog_stats::handle_catalog_stats;
use crate::tools::get_product::{GetProductRequest, handle_get_product};
use crate::tools::interpret_query::{InterpretQueryRequest, handle_interpret_query};
use crate::tools::load_catalog::{LoadCatalogRequest, handle_load_catalog};
use crate::tools::search::{SearchRequest, handle_search};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use std::sync::Arc;

/// Render a tool response as pretty JSON.
fn to_json<T: Serialize>(value: &T) -> std::result::Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Failed to serialize response: {}", e))
}

/// MCP Server for product search and ranking
#[derive(Clone)]
pub struct RankServer {
    /// Shared catalog and ranking configuration
    state: Arc<CatalogState>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for RankServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankServer")
            .field("state", &self.state)
            .finish()
    }
}

#[tool_router]
impl RankServer {
    /// Create a server with no catalog loaded.
    pub fn new(config: RankingConfig) -> Self {
        Self::from_state(CatalogState::new(config))
    }

    /// Create a server that starts with `catalog` already loaded.
    pub fn with_catalog(config: RankingConfig, catalog: Catalog) -> Self {
        Self::from_state(CatalogState::with_catalog(config, catalog))
    }

    fn from_state(state: CatalogState) -> Self {
        Self {
            state: Arc::new(state),
            tool_router: Self::tool_router(),
        }
    }

    pub fn state(&self) -> &Arc<CatalogState> {
        &self.state
    }

    async fn loaded_catalog(&self) -> std::result::Result<Arc<Catalog>, String> {
        self.state
            .catalog()
            .await
            .ok_or_else(|| "No catalog loaded. Use load_catalog first.".to_string())
    }

    #[tool(
        description = "Load a product catalog from a JSON file (an array of products with camelCase fields). Replaces any catalog already loaded.",
        input_schema = inline_schema_for_type::<LoadCatalogRequest>()
    )]
    async fn load_catalog(
        &self,
        Parameters(request): Parameters<LoadCatalogRequest>,
    ) -> std::result::Result<String, String> {
        let response = handle_load_catalog(&self.state, request)
            .await
            .map_err(|e| format!("Failed to load catalog: {}", e))?;
        to_json(&response)
    }

    #[tool(
        description = "Search products with a free-text query. Understands budget/premium/latest/quality intent (including Hinglish like 'sasta wala') and prices like '50k'. Results are ranked by relevance, popularity, quality, value and recency, with optional filters, diversification, sorting and pagination.",
        input_schema = inline_schema_for_type::<SearchRequest>()
    )]
    async fn search_products(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> std::result::Result<String, String> {
        handle_search(&self.state, request).await
    }

    #[tool(
        description = "Explain how a query is understood: extracted keywords, detected intent and any price range.",
        input_schema = inline_schema_for_type::<InterpretQueryRequest>()
    )]
    async fn interpret_query(
        &self,
        Parameters(request): Parameters<InterpretQueryRequest>,
    ) -> std::result::Result<String, String> {
        let context = handle_interpret_query(&self.state.config().limits, &request)?;
        to_json(&context)
    }

    #[tool(
        description = "Get the full record of one product by ID.",
        input_schema = inline_schema_for_type::<GetProductRequest>()
    )]
    async fn get_product(
        &self,
        Parameters(request): Parameters<GetProductRequest>,
    ) -> std::result::Result<String, String> {
        let catalog = self.loaded_catalog().await?;
        let product = handle_get_product(&catalog, &request).map_err(|e| e.to_string())?;
        to_json(product)
    }

    #[tool(
        description = "Summary statistics for the loaded catalog: counts, average rating, stock and inventory value."
    )]
    async fn catalog_stats(&self) -> std::result::Result<String, String> {
        let catalog = self.loaded_catalog().await?;
        to_json(&handle_catalog_stats(&catalog))
    }
}

#[tool_handler]
impl ServerHandler for RankServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "catalog-rank: product search with query understanding and multi-factor ranking. \
                 Load a catalog with load_catalog (or start the server with a catalog path), \
                 then use search_products. interpret_query shows how a query is read.",
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use assert2::check;
    use chrono::Utc;

    fn server() -> RankServer {
        let mut phone =
            Product::new(1, "iPhone 16", "Apple phone", 79_999.0, 89_999.0, Utc::now());
        phone.brand = "Apple".to_string();
        let catalog = Catalog::new(vec![phone]).unwrap();
        RankServer::with_catalog(RankingConfig::default(), catalog)
    }

    #[tokio::test]
    async fn test_search_products_returns_json() {
        let request = SearchRequest {
            query: "iphone".to_string(),
            ..SearchRequest::default()
        };
        let output = server().search_products(Parameters(request)).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        check!(json["totalResults"] == 1);
        check!(json["data"][0]["title"] == "iPhone 16");
    }

    #[tokio::test]
    async fn test_get_product_and_stats() {
        let server = server();
        let product = server
            .get_product(Parameters(GetProductRequest { id: 1 }))
            .await
            .unwrap();
        check!(product.contains("\"title\": \"iPhone 16\""));

        let missing = server
            .get_product(Parameters(GetProductRequest { id: 2 }))
            .await;
        check!(missing == Err("Product with ID 2 not found".to_string()));

        let stats = server.catalog_stats().await.unwrap();
        check!(stats.contains("\"totalProducts\": 1"));
    }

    #[tokio::test]
    async fn test_tools_without_catalog() {
        let server = RankServer::new(RankingConfig::default());
        let err = server.catalog_stats().await.unwrap_err();
        check!(err.contains("load_catalog"));
    }

    #[test]
    fn test_server_lists_all_tools() {
        let names: Vec<String> = server()
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        for tool in [
            "load_catalog",
            "search_products",
            "interpret_query",
            "get_product",
            "catalog_stats",
        ] {
            check!(names.contains(&tool.to_string()));
        }
    }
}
