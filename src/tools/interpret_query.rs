use crate::config::Limits;
use crate::search::{QueryContext, interpret_query};
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct InterpretQueryRequest {
    /// Free-text query to analyse
    pub query: String,
}

/// Show how a query would be understood: keywords, intent, price range.
pub fn handle_interpret_query(
    limits: &Limits,
    request: &InterpretQueryRequest,
) -> Result<QueryContext, String> {
    limits.check_query(&request.query).map_err(|e| e.to_string())?;
    Ok(interpret_query(&request.query))
}
