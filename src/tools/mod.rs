pub mod catalog_stats;
pub mod get_product;
pub mod interpret_query;
pub mod load_catalog;
pub mod search;

pub use catalog_stats::*;
pub use get_product::*;
pub use interpret_query::*;
pub use load_catalog::*;
pub use search::*;
