use crate::models::Item;
use std::collections::BTreeMap;

/// Case-insensitive free-text search over item name and brand
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchTerm {
    raw: String,
    needle: String,
}

impl SearchTerm {
    pub fn new(term: &str) -> Self {
        Self {
            raw: term.to_string(),
            needle: term.to_lowercase(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Substring match on the lower-cased name OR brand
    /// An empty term matches everything; absent fields never match
    pub fn matches(&self, item: &Item) -> bool {
        if self.needle.is_empty() {
            return true;
        }

        [item.name.as_deref(), item.brand.as_deref()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

/// Selected value per attribute; an attribute without a value is unconstrained
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterSelection {
    selected: BTreeMap<String, String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FilterSelection::set`]
    pub fn with(mut self, attribute: &str, value: &str) -> Self {
        self.set(attribute, value);
        self
    }

    /// Select a value; an empty value removes the constraint
    pub fn set(&mut self, attribute: &str, value: &str) {
        if value.is_empty() {
            self.selected.remove(attribute);
        } else {
            self.selected.insert(attribute.to_string(), value.to_string());
        }
    }

    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.selected.get(attribute).map(String::as_str)
    }

    pub fn brand(&self) -> Option<&str> {
        self.get("brand")
    }

    pub fn kind(&self) -> Option<&str> {
        self.get("type")
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.selected.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Parse filter strings in the format "attribute=value" into a selection
/// Later entries for the same attribute replace earlier ones; entries
/// without '=' are ignored
pub fn parse_filter_selection(filter_strings: &[String]) -> FilterSelection {
    let mut selection = FilterSelection::new();

    for filter_str in filter_strings {
        if let Some((key, value)) = filter_str.split_once('=') {
            selection.set(key.trim(), value.trim());
        }
    }

    selection
}

/// Check if an item satisfies every selected attribute (exact, case-sensitive)
pub fn matches_filters(item: &Item, filters: &FilterSelection) -> bool {
    filters
        .iter()
        .all(|(attribute, wanted)| item.text_field(attribute) == Some(wanted))
}

/// Keep the items matching both the filters and the search term, in input order
pub fn apply_filters<'a, I>(items: I, filters: &FilterSelection, search: &SearchTerm) -> Vec<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    items
        .into_iter()
        .filter(|item| matches_filters(item, filters) && search.matches(item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn catalog() -> Vec<Item> {
        vec![
            Item::new("CBR600", "Honda", "Sport", 2020),
            Item::new("MT07", "Yamaha", "Naked", 2019),
            Item::new("CBR500", "Honda", "Sport", 2021),
        ]
    }

    fn names(items: &[&Item]) -> Vec<String> {
        items.iter().map(|i| i.display_name().to_string()).collect()
    }

    #[test]
    fn test_parse_filter_selection() {
        let selection = parse_filter_selection(&[
            "brand = Honda".to_string(),
            "type=Sport".to_string(),
            "nonsense".to_string(),
            "brand=Yamaha".to_string(),
        ]);

        assert_eq!(selection.brand(), Some("Yamaha"));
        assert_eq!(selection.kind(), Some("Sport"));
        assert_eq!(selection.iter().count(), 2);
    }

    #[test]
    fn test_empty_value_clears_constraint() {
        let mut selection = FilterSelection::new().with("brand", "Honda");
        selection.set("brand", "");
        assert!(selection.is_empty());

        let parsed = parse_filter_selection(&["type=".to_string()]);
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_brand_filter() {
        let items = catalog();
        let filters = FilterSelection::new().with("brand", "Honda");
        let result = apply_filters(&items, &filters, &SearchTerm::default());

        assert_eq!(names(&result), vec!["CBR600", "CBR500"]);
    }

    #[test]
    fn test_filters_are_exact_and_case_sensitive() {
        let items = catalog();
        let filters = FilterSelection::new().with("brand", "honda");
        assert!(apply_filters(&items, &filters, &SearchTerm::default()).is_empty());

        let filters = FilterSelection::new().with("brand", "Hond");
        assert!(apply_filters(&items, &filters, &SearchTerm::default()).is_empty());
    }

    #[test]
    fn test_filters_combine_with_and() {
        let items = catalog();
        let filters = FilterSelection::new().with("brand", "Honda").with("type", "Naked");
        assert!(apply_filters(&items, &filters, &SearchTerm::default()).is_empty());

        let filters = FilterSelection::new().with("brand", "Yamaha").with("type", "Naked");
        let result = apply_filters(&items, &filters, &SearchTerm::default());
        assert_eq!(names(&result), vec!["MT07"]);
    }

    #[test]
    fn test_search_name_or_brand() {
        let items = catalog();

        let result = apply_filters(&items, &FilterSelection::new(), &SearchTerm::new("mt"));
        assert_eq!(names(&result), vec!["MT07"]);

        let result = apply_filters(&items, &FilterSelection::new(), &SearchTerm::new("yam"));
        assert_eq!(names(&result), vec!["MT07"]);

        let result = apply_filters(&items, &FilterSelection::new(), &SearchTerm::new("cbr5"));
        assert_eq!(names(&result), vec!["CBR500"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let items = vec![Item::new("Fireblade", "Honda CBR", "Sport", 2020)];
        let result = apply_filters(&items, &FilterSelection::new(), &SearchTerm::new("HONDA"));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_search_ignores_type() {
        let items = catalog();
        let result = apply_filters(&items, &FilterSelection::new(), &SearchTerm::new("sport"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_missing_fields_never_match() {
        let mut anonymous = Item::new("", "", "", 2020);
        anonymous.name = None;
        anonymous.brand = None;
        anonymous.kind = None;
        let items = vec![anonymous];

        let brand = FilterSelection::new().with("brand", "Honda");
        assert!(apply_filters(&items, &brand, &SearchTerm::default()).is_empty());
        assert!(apply_filters(&items, &FilterSelection::new(), &SearchTerm::new("a")).is_empty());

        // no constraints still matches the item
        assert_eq!(apply_filters(&items, &FilterSelection::new(), &SearchTerm::new("")).len(), 1);
    }

    #[test]
    fn test_other_text_attributes_can_be_filtered() {
        let items = vec![
            Item::new("MT07", "Yamaha", "Naked", 2019).with_engine("689cc"),
            Item::new("MT09", "Yamaha", "Naked", 2021).with_engine("890cc"),
        ];
        let filters = FilterSelection::new().with("engine", "890cc");
        assert_eq!(names(&apply_filters(&items, &filters, &SearchTerm::default())), vec!["MT09"]);
    }

    fn item_strategy() -> impl Strategy<Value = Item> {
        (
            "[a-cA-C]{0,4}",
            prop_oneof![Just("Honda"), Just("Yamaha"), Just("Ducati")],
            prop_oneof![Just("Sport"), Just("Naked")],
            1990i64..2025,
        )
            .prop_map(|(name, brand, kind, year)| Item::new(&name, brand, kind, year))
    }

    proptest! {
        #[test]
        fn test_filter_is_ordered_subset_and_idempotent(
            items in prop::collection::vec(item_strategy(), 0..30),
            brand in prop_oneof![Just(""), Just("Honda"), Just("Yamaha")],
            search in "[a-cA-C]{0,2}",
        ) {
            let filters = FilterSelection::new().with("brand", brand);
            let search = SearchTerm::new(&search);
            let once = apply_filters(&items, &filters, &search);

            // ordered subset: positions in the source strictly increase
            let positions: Vec<usize> = once
                .iter()
                .map(|hit| items.iter().position(|i| std::ptr::eq(i, *hit)).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));

            let twice = apply_filters(once.iter().copied(), &filters, &search);
            prop_assert_eq!(once, twice);
        }
    }
}
