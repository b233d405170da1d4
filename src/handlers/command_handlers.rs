use motospec_core::{SortOrder, SortSpec};
use regex::Regex;
use std::sync::OnceLock;

use crate::state::AppState;

/// One line of input in the interactive browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set (or with no text, clear) the search term
    Search(String),
    /// Select a value for an attribute; an empty value clears it
    Filter { attribute: String, value: String },
    /// Drop every filter and the search term
    Clear,
    /// Sort by a key, optionally forcing the direction
    Sort { key: String, order: Option<SortOrder> },
    /// Flip the sort direction
    Toggle,
    Facets,
    Show,
    Reload,
    Help,
    Quit,
}

/// What the loop should do after a command ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Render,
    ShowFacets,
    ShowHelp,
    Reload,
    Quit,
}

fn command_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(?P<verb>\S+)(?:\s+(?P<rest>.*?))?\s*$").expect("command pattern is valid")
    })
}

/// Parse a line typed at the prompt
pub fn parse_command(line: &str) -> Result<Command, String> {
    let captures = command_pattern()
        .captures(line)
        .ok_or_else(|| "empty command (try 'help')".to_string())?;

    let verb = captures["verb"].to_lowercase();
    let rest = captures.name("rest").map(|m| m.as_str()).unwrap_or("");

    let command = match verb.as_str() {
        "search" | "s" => Command::Search(rest.to_string()),
        "brand" | "b" => Command::Filter {
            attribute: "brand".to_string(),
            value: rest.to_string(),
        },
        "type" | "t" => Command::Filter {
            attribute: "type".to_string(),
            value: rest.to_string(),
        },
        "filter" | "f" => {
            let (attribute, value) = rest
                .split_once('=')
                .ok_or_else(|| format!("invalid filter '{}'. Expected 'name=value'", rest))?;
            Command::Filter {
                attribute: attribute.trim().to_string(),
                value: value.trim().to_string(),
            }
        }
        "clear" | "c" => Command::Clear,
        "sort" => {
            let mut parts = rest.split_whitespace();
            let key = parts
                .next()
                .ok_or_else(|| "sort needs a field, e.g. 'sort year'".to_string())?;
            let order = parts.next().map(str::parse::<SortOrder>).transpose()?;
            Command::Sort {
                key: key.to_string(),
                order,
            }
        }
        "toggle" | "o" => Command::Toggle,
        "facets" => Command::Facets,
        "show" | "ls" => Command::Show,
        "reload" | "r" => Command::Reload,
        "help" | "h" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{}' (try 'help')", other)),
    };

    Ok(command)
}

/// Apply a command to the state; every query change produces a new QueryState
pub fn handle_command(state: &mut AppState, command: Command) -> Outcome {
    let next = match command {
        Command::Search(term) => state.query.with_search(&term),
        Command::Filter { attribute, value } => state.query.with_filter(&attribute, &value),
        Command::Clear => state.query.without_filters().with_search(""),
        Command::Sort { key, order } => {
            let order = order.unwrap_or(state.query.sort.order);
            let mut next = state.query.clone();
            next.sort = SortSpec::new(&key, order);
            next
        }
        Command::Toggle => state.query.toggled_order(),
        Command::Show => return Outcome::Render,
        Command::Facets => return Outcome::ShowFacets,
        Command::Reload => return Outcome::Reload,
        Command::Help => return Outcome::ShowHelp,
        Command::Quit => return Outcome::Quit,
    };

    state.update_query(next);
    Outcome::Render
}

pub const HELP_TEXT: &str = "\
Commands:
  search <text>        match name or brand (no text clears)
  brand <value>        filter by brand (no value clears)
  type <value>         filter by type (no value clears)
  filter <name=value>  filter by any text field
  clear                drop all filters and the search
  sort <field> [asc|desc]
  toggle               flip sort direction
  facets               list brands and types
  show                 print the current view
  reload               fetch the catalog again
  quit";
