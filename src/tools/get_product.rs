use crate::catalog::{Catalog, Product};
use crate::error::SearchError;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct GetProductRequest {
    /// Product ID
    pub id: u64,
}

/// Look up one product by id.
pub fn handle_get_product<'c>(
    catalog: &'c Catalog,
    request: &GetProductRequest,
) -> Result<&'c Product, SearchError> {
    catalog
        .get(request.id)
        .ok_or(SearchError::ProductNotFound(request.id))
}
