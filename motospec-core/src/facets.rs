use crate::models::Item;
use std::collections::HashSet;

/// Option lists for the filterable attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub brands: Vec<String>,
    pub types: Vec<String>,
}

/// Distinct values of `attribute` across all items, in first-seen order
/// Items without the attribute contribute nothing
pub fn extract_facet(items: &[Item], attribute: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    items
        .iter()
        .filter_map(|item| item.text_field(attribute))
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

/// Brand and type option lists, always taken from the whole dataset
pub fn extract_facets(items: &[Item]) -> Facets {
    Facets {
        brands: extract_facet(items, "brand"),
        types: extract_facet(items, "type"),
    }
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
            Item::new("Tenere 700", "Yamaha", "Adventure", 2022),
        ]
    }

    #[test]
    fn test_first_seen_order_without_duplicates() {
        let facets = extract_facets(&catalog());

        assert_eq!(facets.brands, vec!["Honda", "Yamaha"]);
        assert_eq!(facets.types, vec!["Sport", "Naked", "Adventure"]);
    }

    #[test]
    fn test_empty_dataset() {
        assert_eq!(extract_facets(&[]), Facets::default());
    }

    #[test]
    fn test_missing_attribute_is_skipped() {
        let mut items = catalog();
        items[0].brand = None;

        assert_eq!(extract_facet(&items, "brand"), vec!["Yamaha", "Honda"]);
        assert!(extract_facet(&items, "engine").is_empty());
    }

    #[test]
    fn test_values_are_case_sensitive() {
        let items = vec![
            Item::new("a", "honda", "Sport", 2020),
            Item::new("b", "Honda", "Sport", 2020),
        ];

        assert_eq!(extract_facet(&items, "brand"), vec!["honda", "Honda"]);
    }

    proptest! {
        #[test]
        fn test_facet_is_distinct_and_ordered(brands in prop::collection::vec("[A-C]{1,2}", 0..20)) {
            let items: Vec<Item> = brands
                .iter()
                .map(|b| Item::new("x", b, "t", 2000))
                .collect();
            let facet = extract_facet(&items, "brand");

            let unique: HashSet<_> = facet.iter().collect();
            prop_assert_eq!(unique.len(), facet.len());

            // each value appears at the position of its first occurrence
            let mut expected: Vec<String> = Vec::new();
            for b in &brands {
                if !expected.contains(b) {
                    expected.push(b.clone());
                }
            }
            prop_assert_eq!(facet, expected);
        }
    }
}
