use motospec_core::*;
use tracing::error;

use crate::errors::map_load_error;
use crate::operations::CatalogSource;

/// Application state: the loaded catalog plus everything the user controls
#[derive(Debug)]
pub struct AppState {
    /// Where the catalog is (re)loaded from
    pub source: CatalogSource,
    /// How strictly payloads are validated
    pub schema_mode: SchemaMode,
    /// Load lifecycle and the current dataset
    pub store: DatasetStore,
    /// Current search, filters and sort
    pub query: QueryState,
    cache: QueryCache,
}

impl AppState {
    pub fn new(source: CatalogSource, schema_mode: SchemaMode, query: QueryState) -> Self {
        Self {
            source,
            schema_mode,
            store: DatasetStore::new(),
            query,
            cache: QueryCache::new(),
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.store.begin_load()
    }

    /// Record the outcome of a load; stale tickets are ignored
    /// Failures are logged with details and stored as the static user message
    pub fn finish_load(&mut self, ticket: LoadTicket, outcome: Result<Dataset, CatalogError>) -> bool {
        let outcome = outcome.map_err(|err| {
            let (title, message, details) = map_load_error(&err, &self.source);
            error!(%title, %details, "catalog load failed");
            message
        });

        let applied = self.store.resolve(ticket, outcome);
        if applied {
            self.cache.invalidate();
        }
        applied
    }

    /// Replace the query state with a derived one
    pub fn update_query(&mut self, next: QueryState) {
        self.query = next;
    }

    /// The current view, or None while nothing is loaded
    pub fn view(&mut self) -> Option<View<'_>> {
        let dataset = self.store.dataset()?;
        Some(self.cache.view(dataset, &self.query))
    }

    /// Facet option lists from the whole dataset, regardless of filters
    pub fn facets(&self) -> Facets {
        self.store
            .dataset()
            .map(|dataset| extract_facets(dataset))
            .unwrap_or_default()
    }

    pub fn total_items(&self) -> usize {
        self.store.dataset().map(|d| d.len()).unwrap_or(0)
    }
}
