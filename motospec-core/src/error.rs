use thiserror::Error;

/// Failures at the catalog boundary (loading, decoding, validating a payload)
///
/// The query engine itself never fails; these errors stop a load before a
/// [`Dataset`](crate::Dataset) exists.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation failed:\n{}", .0.join("\n"))]
    Schema(Vec<String>),

    #[error("Fetch failed: {0}")]
    Fetch(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
