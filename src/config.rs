use anyhow::{Context, Result};
use motospec_core::{SchemaMode, SortOrder, SortSpec};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/motorcycles";
pub const DEFAULT_CONFIG_FILE: &str = "motospec.toml";

/// Settings read from `motospec.toml`; every key is optional
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub timeout_secs: u64,
    pub default_sort: String,
    pub default_order: String,
    pub strict_schema: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 10,
            default_sort: "name".to_string(),
            default_order: "asc".to_string(),
            strict_schema: false,
        }
    }
}

impl Config {
    /// Load from an explicit path (must exist) or from the default file if present
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn schema_mode(&self) -> SchemaMode {
        if self.strict_schema {
            SchemaMode::Strict
        } else {
            SchemaMode::Lenient
        }
    }

    pub fn sort_spec(&self) -> Result<SortSpec> {
        let order: SortOrder = self
            .default_order
            .parse()
            .map_err(|e: String| anyhow::anyhow!("invalid default_order in config: {e}"))?;
        Ok(SortSpec::new(&self.default_sort, order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.schema_mode(), SchemaMode::Lenient);
        assert_eq!(config.sort_spec().unwrap(), SortSpec::default());
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_sort = \"year\"\ndefault_order = \"desc\"\nstrict_schema = true").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.sort_spec().unwrap(), SortSpec::descending("year"));
        assert_eq!(config.schema_mode(), SchemaMode::Strict);
    }

    #[test]
    fn test_invalid_order_is_reported() {
        let config = Config {
            default_order: "up".to_string(),
            ..Config::default()
        };
        assert!(config.sort_spec().is_err());
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Config::load(Some(missing.as_path())).is_err());
    }
}
