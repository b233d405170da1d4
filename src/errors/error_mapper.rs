use motospec_core::CatalogError;

use crate::operations::CatalogSource;

/// Static message shown whenever the catalog cannot be loaded
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch motorcycles";

/// Map catalog loading errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_load_error(error: &CatalogError, source: &CatalogSource) -> (String, String, String) {
    match error {
        CatalogError::Fetch(reason) => (
            "Network Error".to_string(),
            FETCH_FAILED_MESSAGE.to_string(),
            format!(
                "Endpoint: {}\n{}\n\nCheck that the catalog service is running.",
                source, reason
            ),
        ),
        CatalogError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => (
            "File Not Found".to_string(),
            FETCH_FAILED_MESSAGE.to_string(),
            format!(
                "Path: {}\n\nPlease verify the file exists and you have permission to read it.",
                source
            ),
        ),
        CatalogError::Io(io) if io.kind() == std::io::ErrorKind::PermissionDenied => (
            "Permission Denied".to_string(),
            FETCH_FAILED_MESSAGE.to_string(),
            format!("You don't have permission to read:\n{}", source),
        ),
        CatalogError::Json(_) | CatalogError::Schema(_) => (
            "Invalid Catalog".to_string(),
            FETCH_FAILED_MESSAGE.to_string(),
            error.to_string(),
        ),
        CatalogError::Io(_) => (
            "Error Loading Catalog".to_string(),
            FETCH_FAILED_MESSAGE.to_string(),
            error.to_string(),
        ),
    }
}
