use crate::models::Item;
use std::ops::Deref;
use std::sync::Arc;
use tracing::{info, warn};

/// Immutable snapshot of the loaded catalog
///
/// Cloning is cheap: clones share the same items, which is also how
/// [`Dataset::same_snapshot`] tells two handles apart from two loads.
#[derive(Debug, Clone)]
pub struct Dataset {
    items: Arc<[Item]>,
}

impl Dataset {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items: items.into(),
        }
    }

    /// True when both handles point at the same loaded snapshot
    pub fn same_snapshot(&self, other: &Dataset) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Deref for Dataset {
    type Target = [Item];

    fn deref(&self) -> &[Item] {
        &self.items
    }
}

impl From<Vec<Item>> for Dataset {
    fn from(items: Vec<Item>) -> Self {
        Self::new(items)
    }
}

impl FromIterator<Item> for Dataset {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Identifies one load request issued by a [`DatasetStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

/// Lifecycle of the catalog as seen by the caller of the query engine
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded(Dataset),
    Failed(String),
}

/// Holds the current dataset and discards results of superseded loads
#[derive(Debug, Default)]
pub struct DatasetStore {
    state: LoadState,
    latest: u64,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load; any ticket issued earlier becomes stale
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest += 1;
        self.state = LoadState::Loading;
        LoadTicket(self.latest)
    }

    /// Apply the outcome of a load
    /// Returns false (and changes nothing) when the ticket has been superseded
    pub fn resolve(&mut self, ticket: LoadTicket, outcome: Result<Dataset, String>) -> bool {
        if ticket.0 != self.latest {
            warn!(
                ticket = ticket.0,
                latest = self.latest,
                "discarding result of superseded load"
            );
            return false;
        }

        self.state = match outcome {
            Ok(dataset) => {
                info!(items = dataset.len(), "catalog loaded");
                LoadState::Loaded(dataset)
            }
            Err(message) => {
                warn!(%message, "catalog load failed");
                LoadState::Failed(message)
            }
        };
        true
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// The loaded dataset, only available after a successful load
    pub fn dataset(&self) -> Option<&Dataset> {
        match &self.state {
            LoadState::Loaded(dataset) => Some(dataset),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
