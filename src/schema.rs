//! JSON schemas for tool inputs.

use rmcp::model::JsonObject;
use rmcp::schemars::{self, JsonSchema, generate::SchemaSettings};
use std::sync::Arc;

/// Draft-07 schema for `T` with every subschema inlined.
///
/// rmcp's default generator emits `$ref` definitions; inlining keeps enum
/// fields like `algorithm` and `sort_by` rendered as choice lists in MCP
/// clients.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let schema = settings.into_generator().into_root_schema_for::<T>();
    match serde_json::to_value(schema) {
        Ok(serde_json::Value::Object(object)) => Arc::new(object),
        Ok(other) => panic!("schema for tool input is not an object: {other}"),
        Err(e) => panic!("schema for tool input failed to serialize: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::search::SearchRequest;
    use assert2::check;

    #[test]
    fn test_search_schema_inlines_enums() {
        let schema = inline_schema_for_type::<SearchRequest>();
        check!(!schema.contains_key("definitions"));
        check!(!schema.contains_key("$defs"));

        let algorithm = &schema["properties"]["algorithm"];
        let rendered = algorithm.to_string();
        check!(rendered.contains("bm25"));
        check!(rendered.contains("tfidf"));
    }

    #[test]
    fn test_query_is_required() {
        let schema = inline_schema_for_type::<SearchRequest>();
        let required = schema["required"].as_array().unwrap();
        check!(required.iter().any(|v| v == "query"));
    }
}
