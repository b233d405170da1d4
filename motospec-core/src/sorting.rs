use crate::models::{FieldValue, Item};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Apply the direction to an ascending comparison result
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "asc"),
            SortOrder::Descending => write!(f, "desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(format!("unknown sort order '{}' (expected asc or desc)", other)),
        }
    }
}

/// Sort key and direction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub key: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(key: &str, order: SortOrder) -> Self {
        Self {
            key: key.to_string(),
            order,
        }
    }

    pub fn ascending(key: &str) -> Self {
        Self::new(key, SortOrder::Ascending)
    }

    pub fn descending(key: &str) -> Self {
        Self::new(key, SortOrder::Descending)
    }

    pub fn toggled(&self) -> Self {
        Self::new(&self.key, self.order.toggle())
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::ascending("name")
    }
}

/// Owned comparison key, computed once per item before sorting
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl SortKey {
    fn of(item: &Item, key: &str) -> Option<Self> {
        item.field(key).map(|value| match value {
            FieldValue::Bool(b) => SortKey::Bool(b),
            FieldValue::Number(n) => SortKey::Number(n),
            FieldValue::Text(s) => SortKey::Text(normalize_for_sorting(s)),
        })
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Bool(_) => 0,
            SortKey::Number(_) => 1,
            SortKey::Text(_) => 2,
        }
    }

    fn cmp_ascending(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Compare two optional keys under a direction
/// Absent keys sort after present ones in both directions
fn compare_keys(a: Option<&SortKey>, b: Option<&SortKey>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => order.apply(a.cmp_ascending(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Compare two items under a sort spec
pub fn compare_items(a: &Item, b: &Item, spec: &SortSpec) -> Ordering {
    compare_keys(
        SortKey::of(a, &spec.key).as_ref(),
        SortKey::of(b, &spec.key).as_ref(),
        spec.order,
    )
}

/// Stable sort of item references by the given spec
pub fn sort_items(items: &mut [&Item], spec: &SortSpec) {
    let mut keyed: Vec<(Option<SortKey>, &Item)> = items
        .iter()
        .map(|item| (SortKey::of(item, &spec.key), *item))
        .collect();

    // slice::sort_by is stable, so equal keys keep their input order
    keyed.sort_by(|(a, _), (b, _)| compare_keys(a.as_ref(), b.as_ref(), spec.order));

    for (slot, (_, item)) in items.iter_mut().zip(keyed) {
        *slot = item;
    }
}

/// Normalize a string value for comparison
pub fn normalize_for_sorting(s: &str) -> String {
    s.to_lowercase()
}
