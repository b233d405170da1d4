use motospec_core::{load_catalog, parse_catalog_value, CatalogError, Dataset, SchemaMode};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Where the catalog comes from
#[derive(Debug, Clone)]
pub enum CatalogSource {
    Http {
        client: reqwest::Client,
        url: String,
    },
    File(PathBuf),
}

impl CatalogSource {
    pub fn http(url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Fetch(e.to_string()))?;

        Ok(CatalogSource::Http {
            client,
            url: url.to_string(),
        })
    }

    pub fn file(path: PathBuf) -> Self {
        CatalogSource::File(path)
    }

    /// Fetch and decode the whole catalog
    /// Transport details stay here; callers only see a dataset or an error
    pub async fn load(&self, mode: SchemaMode) -> Result<Dataset, CatalogError> {
        info!(source = %self, "loading catalog");

        match self {
            CatalogSource::Http { client, url } => fetch_catalog(client, url, mode).await,
            CatalogSource::File(path) => {
                let path = path.clone();
                tokio::task::spawn_blocking(move || load_catalog(path, mode))
                    .await
                    .map_err(|e| CatalogError::Io(std::io::Error::other(e)))?
            }
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Http { url, .. } => write!(f, "{}", url),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

async fn fetch_catalog(
    client: &reqwest::Client,
    url: &str,
    mode: SchemaMode,
) -> Result<Dataset, CatalogError> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| CatalogError::Fetch(e.to_string()))?;

    debug!(status = %response.status(), "catalog response received");

    let payload: serde_json::Value = response
        .json()
        .await
        .map_err(|e| CatalogError::Fetch(e.to_string()))?;

    parse_catalog_value(&payload, mode)
}
