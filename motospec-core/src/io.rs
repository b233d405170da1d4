use crate::catalog::{parse_catalog, SchemaMode};
use crate::dataset::Dataset;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Load a catalog from a JSON file
pub fn load_catalog<P: AsRef<Path>>(path: P, mode: SchemaMode) -> Result<Dataset> {
    let contents = fs::read_to_string(path)?;
    parse_catalog(&contents, mode)
}
