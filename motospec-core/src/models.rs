use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attributes with a dedicated field on [`Item`]
pub const KNOWN_FIELDS: [&str; 6] = ["name", "brand", "type", "year", "engine", "image"];

/// A single catalog entry (one motorcycle)
///
/// Every field is optional: the catalog boundary turns missing or wrongly typed
/// values into `None` so the engine never has to trust raw payload data.
/// Keys outside the fixed schema are kept in `extra` and remain usable as sort keys.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// A borrowed, typed view of one attribute value, used for comparisons
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Bool(bool),
    Number(f64),
    Text(&'a str),
}

impl Item {
    /// Convenience constructor for the common fields
    pub fn new(name: &str, brand: &str, kind: &str, year: i64) -> Self {
        Self {
            name: Some(name.to_string()),
            brand: Some(brand.to_string()),
            kind: Some(kind.to_string()),
            year: Some(year),
            ..Self::default()
        }
    }

    pub fn with_engine(mut self, engine: &str) -> Self {
        self.engine = Some(engine.to_string());
        self
    }

    pub fn with_image(mut self, image: &str) -> Self {
        self.image = Some(image.to_string());
        self
    }

    /// Look up a text attribute by name
    /// Returns None when the attribute is absent or not textual
    pub fn text_field(&self, attribute: &str) -> Option<&str> {
        match attribute {
            "name" => self.name.as_deref(),
            "brand" => self.brand.as_deref(),
            "type" => self.kind.as_deref(),
            "engine" => self.engine.as_deref(),
            "image" => self.image.as_deref(),
            "year" => None,
            other => self.extra.get(other).and_then(|v| v.as_str()),
        }
    }

    /// Look up any attribute by name as a comparable value
    pub fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "year" => self.year.map(|y| FieldValue::Number(y as f64)),
            "name" | "brand" | "type" | "engine" | "image" => {
                self.text_field(key).map(FieldValue::Text)
            }
            other => match self.extra.get(other)? {
                serde_json::Value::String(s) => Some(FieldValue::Text(s)),
                serde_json::Value::Number(n) => n.as_f64().map(FieldValue::Number),
                serde_json::Value::Bool(b) => Some(FieldValue::Bool(*b)),
                _ => None,
            },
        }
    }

    /// Name to show for the item, falling back to a placeholder
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed)")
    }
}
