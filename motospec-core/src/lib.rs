// Public modules
pub mod catalog;
pub mod dataset;
pub mod error;
pub mod facets;
pub mod filtering;
pub mod io;
pub mod models;
pub mod query;
pub mod schema_validation;
pub mod sorting;

// Re-export commonly used types for convenience
pub use catalog::{catalog_schema, parse_catalog, parse_catalog_value, SchemaMode};
pub use dataset::{Dataset, DatasetStore, LoadState, LoadTicket};
pub use error::CatalogError;
pub use facets::{extract_facet, extract_facets, Facets};
pub use filtering::{apply_filters, matches_filters, parse_filter_selection, FilterSelection, SearchTerm};
pub use io::load_catalog;
pub use models::{FieldValue, Item};
pub use query::{run_query, QueryCache, QueryState, View};
pub use schema_validation::validate_against_schema;
pub use sorting::{compare_items, normalize_for_sorting, sort_items, SortOrder, SortSpec};
