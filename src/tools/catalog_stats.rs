use crate::catalog::{Catalog, CatalogStats};

/// Aggregate counts and values for the loaded catalog.
pub fn handle_catalog_stats(catalog: &Catalog) -> CatalogStats {
    let stats = catalog.stats();
    tracing::debug!(
        "Catalog stats: {} products, {} in stock",
        stats.total_products,
        stats.in_stock_products
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use assert2::check;
    use chrono::Utc;

    #[test]
    fn test_stats_serialize_camel_case() {
        let mut p = Product::new(1, "Laptop", "A laptop", 1_000.0, 1_000.0, Utc::now());
        p.stock = 3;
        p.rating = 4.25;
        let catalog = Catalog::new(vec![p]).unwrap();

        let json = serde_json::to_value(handle_catalog_stats(&catalog)).unwrap();
        check!(json["totalProducts"] == 1);
        check!(json["inStockProducts"] == 1);
        check!(json["avgRating"] == 4.25);
        check!(json["totalValue"] == 3_000.0);
    }
}
