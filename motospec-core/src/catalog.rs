use crate::dataset::Dataset;
use crate::error::{CatalogError, Result};
use crate::models::{Item, KNOWN_FIELDS};
use crate::schema_validation::validate_against_schema;
use regex::Regex;
use serde_json::{json, Map, Value};
use std::sync::OnceLock;
use tracing::{debug, warn};

/// How strictly a catalog payload is checked against [`catalog_schema`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemaMode {
    /// Any schema violation rejects the whole payload
    Strict,
    /// Violations are logged; offending fields are dropped to "absent"
    #[default]
    Lenient,
}

/// JSON Schema describing the payload served by the catalog endpoint
pub fn catalog_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Motorcycle catalog",
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "brand": {"type": "string"},
                "type": {"type": "string"},
                "year": {"type": "integer"},
                "engine": {"type": "string"},
                "image": {"type": ["string", "null"]}
            },
            "required": ["name", "brand", "type", "year", "engine"]
        }
    })
}

/// Parse a raw catalog payload into a [`Dataset`]
pub fn parse_catalog(payload: &str, mode: SchemaMode) -> Result<Dataset> {
    let value: Value = serde_json::from_str(payload)?;
    parse_catalog_value(&value, mode)
}

/// Build a [`Dataset`] from an already decoded payload
///
/// The payload must be a JSON array. In lenient mode entries that are not
/// objects are skipped and fields of the wrong type become `None`.
pub fn parse_catalog_value(value: &Value, mode: SchemaMode) -> Result<Dataset> {
    let entries = value.as_array().ok_or_else(|| {
        CatalogError::Schema(vec![format!(
            "expected an array of items, found {}",
            kind_of(value)
        )])
    })?;

    if let Err(errors) = validate_against_schema(&catalog_schema(), value) {
        match mode {
            SchemaMode::Strict => return Err(CatalogError::Schema(errors)),
            SchemaMode::Lenient => {
                for error in &errors {
                    warn!(%error, "catalog entry does not match schema");
                }
            }
        }
    }

    let items: Vec<Item> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match entry.as_object() {
            Some(fields) => Some(item_from_fields(index, fields)),
            None => {
                warn!(index, found = kind_of(entry), "skipping non-object catalog entry");
                None
            }
        })
        .collect();

    debug!(count = items.len(), "catalog parsed");
    Ok(Dataset::new(items))
}

fn item_from_fields(index: usize, fields: &Map<String, Value>) -> Item {
    let image = text(index, fields, "image").and_then(|url| {
        if image_url_pattern().is_match(&url) {
            Some(url)
        } else {
            warn!(index, %url, "dropping image that is not a URL");
            None
        }
    });

    Item {
        name: text(index, fields, "name"),
        brand: text(index, fields, "brand"),
        kind: text(index, fields, "type"),
        year: integer(index, fields, "year"),
        engine: text(index, fields, "engine"),
        image,
        extra: fields
            .iter()
            .filter(|(key, _)| !KNOWN_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
    }
}

fn text(index: usize, fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => {
            warn!(index, field = key, found = kind_of(other), "expected text, treating as absent");
            None
        }
    }
}

fn integer(index: usize, fields: &Map<String, Value>, key: &str) -> Option<i64> {
    match fields.get(key)? {
        Value::Number(n) => n.as_i64().or_else(|| {
            warn!(index, field = key, %n, "expected an integer, treating as absent");
            None
        }),
        Value::String(s) => s.trim().parse().ok().or_else(|| {
            warn!(index, field = key, value = %s, "unparsable integer, treating as absent");
            None
        }),
        Value::Null => None,
        other => {
            warn!(index, field = key, found = kind_of(other), "expected an integer, treating as absent");
            None
        }
    }
}

fn image_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?i)(https?://|data:image/|/)\S+$").expect("image URL pattern is valid")
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
