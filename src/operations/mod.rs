pub mod fetch;

pub use fetch::CatalogSource;
