use colored::Colorize;
use motospec_core::{Item, QueryState};

const MISSING: &str = "n/a";

/// Format one item as a multi-line card
pub fn format_item_card(item: &Item) -> String {
    let year = item
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| MISSING.to_string());

    let mut lines = vec![
        item.display_name().bold().to_string(),
        format!("  Brand:  {}", item.brand.as_deref().unwrap_or(MISSING)),
        format!("  Type:   {}", item.kind.as_deref().unwrap_or(MISSING)),
        format!("  Year:   {}", year),
        format!("  Engine: {}", item.engine.as_deref().unwrap_or(MISSING)),
    ];

    if let Some(image) = &item.image {
        lines.push(format!("  Image:  {}", image.dimmed()));
    }

    lines.join("\n")
}

/// Format a facet option list, marking the selected value
pub fn format_facet_line(label: &str, values: &[String], selected: Option<&str>) -> String {
    let options: Vec<String> = values
        .iter()
        .map(|value| {
            if Some(value.as_str()) == selected {
                format!("[{}]", value).green().bold().to_string()
            } else {
                value.clone()
            }
        })
        .collect();

    let all = if selected.is_none() {
        "[All]".green().bold().to_string()
    } else {
        "All".to_string()
    };

    format!("{}: {} {}", label.bold(), all, options.join(" "))
}

/// One-line summary of the active query
pub fn format_query_summary(query: &QueryState, shown: usize, total: usize) -> String {
    let mut parts = vec![format!("{} of {} motorcycles", shown, total)];

    if !query.search.is_empty() {
        parts.push(format!("search: \"{}\"", query.search.as_str()));
    }
    for (attribute, value) in query.filters.iter() {
        parts.push(format!("{}: {}", attribute, value));
    }
    parts.push(format!("sorted by {} {}", query.sort.key, query.sort.order));

    parts.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_card() {
        let item = Item::new("MT07", "Yamaha", "Naked", 2019)
            .with_engine("689cc")
            .with_image("https://example.com/mt07.jpg");
        let card = format_item_card(&item);

        assert!(card.contains("MT07"));
        assert!(card.contains("Brand:  Yamaha"));
        assert!(card.contains("Type:   Naked"));
        assert!(card.contains("Year:   2019"));
        assert!(card.contains("Engine: 689cc"));
        assert!(card.contains("https://example.com/mt07.jpg"));
    }

    #[test]
    fn test_item_card_with_missing_fields() {
        let card = format_item_card(&Item::default());

        assert!(card.contains("(unnamed)"));
        assert!(card.contains("Year:   n/a"));
        assert!(!card.contains("Image:"));
    }

    #[test]
    fn test_facet_line_marks_selection() {
        let values = vec!["Honda".to_string(), "Yamaha".to_string()];

        let line = format_facet_line("Brands", &values, Some("Yamaha"));
        assert!(line.contains("[Yamaha]"));
        assert!(!line.contains("[Honda]"));
        assert!(!line.contains("[All]"));

        let line = format_facet_line("Brands", &values, None);
        assert!(line.contains("[All]"));
    }

    #[test]
    fn test_query_summary() {
        let query = QueryState::new()
            .with_search("cbr")
            .with_filter("brand", "Honda")
            .with_sort_key("year")
            .toggled_order();

        let summary = format_query_summary(&query, 2, 3);
        assert_eq!(
            summary,
            "2 of 3 motorcycles | search: \"cbr\" | brand: Honda | sorted by year desc"
        );
    }
}
