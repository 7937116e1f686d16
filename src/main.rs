use anyhow::Context as _;
use catalog_rank::{Catalog, RankServer, RankingConfig};
use rmcp::{ServiceExt, transport::stdio};

/// Environment variable naming a catalog to load at startup.
const CATALOG_ENV: &str = "CATALOG_RANK_CATALOG";

#[tokio::main]
async fn main() -> catalog_rank::error::Result<()> {
    catalog_rank::tracing::init();

    tracing::info!("Starting catalog-rank MCP server");

    let config = RankingConfig::from_env().context("Failed to load ranking config")?;

    // First argument wins over the environment
    let catalog_path = std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os(CATALOG_ENV));

    let server = match catalog_path {
        Some(path) => {
            let catalog = Catalog::load(&path).with_context(|| {
                format!("Failed to load catalog from {}", path.to_string_lossy())
            })?;
            RankServer::with_catalog(config, catalog)
        }
        None => {
            tracing::info!("No catalog given; waiting for load_catalog");
            RankServer::new(config)
        }
    };

    // Create and serve the MCP server over stdio
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    // Wait for the service to complete
    service.waiting().await?;

    Ok(())
}
