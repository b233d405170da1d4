use colored::Colorize;
use motospec_core::{Facets, FilterSelection, Item, QueryState};
use std::io::{self, Write};

use super::formatting::{format_facet_line, format_item_card, format_query_summary};

/// Write the current view, either as cards or as a JSON array
pub fn render_view<W: Write>(
    out: &mut W,
    items: &[&Item],
    query: &QueryState,
    total: usize,
    json: bool,
) -> io::Result<()> {
    if json {
        let payload = serde_json::to_string_pretty(items).map_err(io::Error::other)?;
        return writeln!(out, "{}", payload);
    }

    writeln!(out, "{}\n", format_query_summary(query, items.len(), total).cyan())?;

    if items.is_empty() {
        writeln!(out, "{}", "No motorcycles match the current search and filters.".italic())?;
        return Ok(());
    }

    for item in items {
        writeln!(out, "{}\n", format_item_card(item))?;
    }

    Ok(())
}

/// Write the brand and type option lists
pub fn render_facets<W: Write>(out: &mut W, facets: &Facets, filters: &FilterSelection) -> io::Result<()> {
    writeln!(out, "{}", format_facet_line("Brands", &facets.brands, filters.brand()))?;
    writeln!(out, "{}", format_facet_line("Types", &facets.types, filters.kind()))
}

/// Write a load failure as the user sees it
pub fn render_error<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{}", message.red().bold())
}
