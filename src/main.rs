mod config;
mod errors;
mod handlers;
mod operations;
mod state;
mod ui;

use anyhow::{bail, Result};
use clap::Parser;
use motospec_core::*;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::handlers::{handle_command, parse_command, Outcome, HELP_TEXT};
use crate::operations::CatalogSource;
use crate::state::AppState;
use crate::ui::{render_error, render_facets, render_view};

/// Motorcycle catalog browser - search, filter and sort a remote catalog
///
/// Examples:
///   # Show every motorcycle, sorted by name
///   motospec
///
///   # Honda sport bikes, newest first
///   motospec --brand Honda --type Sport --sort year --desc
///
///   # Search name or brand (case-insensitive substring)
///   motospec --search cbr
///
///   # Read a local file instead of the endpoint
///   motospec --file motorcycles.json --facets
///
///   # Browse interactively
///   motospec --interactive
#[derive(Parser, Debug)]
#[command(name = "motospec")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Filtering Logic:\n  \
    - --brand, --type and --filter values must match exactly (case-sensitive)\n  \
    - --search matches name OR brand, ignoring case\n  \
    - All constraints are combined with AND\n\n\
Sorting Options:\n  \
    - Any field (name, brand, type, year, engine, ...)\n  \
    - Text compares case-insensitively, year numerically\n  \
    - Items missing the field are listed last")]
struct Cli {
    /// Catalog endpoint (overrides the config file; ignored when --file is given)
    #[arg(short, long, env = "MOTOSPEC_ENDPOINT", value_name = "URL")]
    url: Option<String>,

    /// Load the catalog from a local JSON file instead of the endpoint
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Case-insensitive text matched against name and brand
    #[arg(short, long, value_name = "TEXT", default_value = "")]
    search: String,

    /// Show only this brand
    #[arg(short, long, value_name = "BRAND")]
    brand: Option<String>,

    /// Show only this type
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    kind: Option<String>,

    /// Filter by any text field (format: name=value, can be repeated)
    #[arg(short, long = "filter", value_name = "NAME=VALUE")]
    filters: Vec<String>,

    /// Sort field (defaults to the config file, then "name")
    #[arg(short = 'S', long = "sort", value_name = "FIELD")]
    sort_by: Option<String>,

    /// Sort descending
    #[arg(short, long)]
    desc: bool,

    /// Print the brand and type option lists
    #[arg(long)]
    facets: bool,

    /// Print the view as JSON
    #[arg(long)]
    json: bool,

    /// Browse interactively
    #[arg(short, long)]
    interactive: bool,

    /// Config file (defaults to ./motospec.toml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Reject payloads that do not match the catalog schema
    #[arg(long)]
    strict: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

/// Build the starting query from flags, falling back to config defaults
fn initial_query(cli: &Cli, config: &Config) -> Result<QueryState> {
    for filter_str in &cli.filters {
        if !filter_str.contains('=') {
            bail!("invalid filter '{}'. Expected 'name=value'", filter_str);
        }
    }

    let mut filters = parse_filter_selection(&cli.filters);
    if let Some(brand) = &cli.brand {
        filters.set("brand", brand);
    }
    if let Some(kind) = &cli.kind {
        filters.set("type", kind);
    }

    let mut sort = config.sort_spec()?;
    if let Some(key) = &cli.sort_by {
        sort.key = key.clone();
    }
    if cli.desc {
        sort.order = SortOrder::Descending;
    }

    Ok(QueryState {
        search: SearchTerm::new(&cli.search),
        filters,
        sort,
    })
}

fn catalog_source(cli: &Cli, config: &Config) -> Result<CatalogSource> {
    if let Some(path) = &cli.file {
        return Ok(CatalogSource::file(path.clone()));
    }
    let url = cli.url.as_deref().unwrap_or(&config.endpoint);
    Ok(CatalogSource::http(url, config.timeout())?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    debug!(?config, "configuration resolved");

    let schema_mode = if cli.strict {
        SchemaMode::Strict
    } else {
        config.schema_mode()
    };
    let source = catalog_source(&cli, &config)?;
    let query = initial_query(&cli, &config)?;
    let mut state = AppState::new(source, schema_mode, query);

    if cli.interactive {
        return browse(&mut state, cli.json).await;
    }

    let ticket = state.begin_load();
    let outcome = state.source.load(state.schema_mode).await;
    state.finish_load(ticket, outcome);

    let mut stdout = std::io::stdout().lock();
    if let Some(message) = state.store.error() {
        render_error(&mut std::io::stderr(), message)?;
        std::process::exit(1);
    }

    if cli.facets {
        render_facets(&mut stdout, &state.facets(), &state.query.filters)?;
        writeln!(stdout)?;
    }
    print_view(&mut state, &mut stdout, cli.json)?;

    Ok(())
}

fn print_view<W: Write>(state: &mut AppState, out: &mut W, json: bool) -> Result<()> {
    match state.store.state() {
        LoadState::Loading => {
            writeln!(out, "Loading...")?;
            return Ok(());
        }
        LoadState::Failed(message) => {
            render_error(out, message)?;
            return Ok(());
        }
        LoadState::Idle | LoadState::Loaded(_) => {}
    }

    let total = state.total_items();
    let query = state.query.clone();
    if let Some(view) = state.view() {
        render_view(out, &view, &query, total, json)?;
    }
    Ok(())
}

type LoadResult = (LoadTicket, std::result::Result<Dataset, CatalogError>);

/// Start a background load; its result comes back through the channel
fn spawn_load(state: &mut AppState, results: &mpsc::UnboundedSender<LoadResult>) {
    let ticket = state.begin_load();
    let source = state.source.clone();
    let mode = state.schema_mode;
    let results = results.clone();

    tokio::spawn(async move {
        let outcome = source.load(mode).await;
        // the receiver is gone only when the browser has quit
        let _ = results.send((ticket, outcome));
    });
}

/// Interactive loop: input lines and load completions are handled as they arrive
async fn browse(state: &mut AppState, json: bool) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<LoadResult>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    info!(source = %state.source, "starting interactive browser");
    writeln!(stdout, "Loading...  (type 'help' for commands)")?;
    spawn_load(state, &tx);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }

                let command = match parse_command(&line) {
                    Ok(command) => command,
                    Err(message) => {
                        render_error(&mut stdout, &message)?;
                        continue;
                    }
                };

                match handle_command(state, command) {
                    Outcome::Render => print_view(state, &mut stdout, json)?,
                    Outcome::ShowFacets => render_facets(&mut stdout, &state.facets(), &state.query.filters)?,
                    Outcome::ShowHelp => writeln!(stdout, "{}", HELP_TEXT)?,
                    Outcome::Reload => {
                        spawn_load(state, &tx);
                        writeln!(stdout, "Loading...")?;
                    }
                    Outcome::Quit => break,
                }
            }
            Some((ticket, outcome)) = rx.recv() => {
                if state.finish_load(ticket, outcome) {
                    print_view(state, &mut stdout, json)?;
                }
            }
        }
    }

    Ok(())
}
