//! The query engine: `(Dataset, QueryState) -> View`.
//!
//! [`run_query`] is a pure function of its inputs. [`QueryCache`] layers
//! memoization on top and returns exactly what a fresh run would.

use crate::dataset::Dataset;
use crate::filtering::{apply_filters, FilterSelection, SearchTerm};
use crate::models::Item;
use crate::sorting::{sort_items, SortOrder, SortSpec};
use std::collections::HashMap;
use std::ops::Deref;
use tracing::debug;

/// Everything the user controls about the current view
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QueryState {
    pub search: SearchTerm,
    pub filters: FilterSelection,
    pub sort: SortSpec,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(&self, term: &str) -> Self {
        Self {
            search: SearchTerm::new(term),
            ..self.clone()
        }
    }

    /// Select a value for an attribute; an empty value clears it
    pub fn with_filter(&self, attribute: &str, value: &str) -> Self {
        let mut next = self.clone();
        next.filters.set(attribute, value);
        next
    }

    pub fn without_filters(&self) -> Self {
        Self {
            filters: FilterSelection::new(),
            ..self.clone()
        }
    }

    pub fn with_sort_key(&self, key: &str) -> Self {
        Self {
            sort: SortSpec::new(key, self.sort.order),
            ..self.clone()
        }
    }

    pub fn with_sort_order(&self, order: SortOrder) -> Self {
        Self {
            sort: SortSpec::new(&self.sort.key, order),
            ..self.clone()
        }
    }

    pub fn toggled_order(&self) -> Self {
        self.with_sort_order(self.sort.order.toggle())
    }
}

/// Filtered and sorted items borrowed from a dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View<'a> {
    items: Vec<&'a Item>,
}

impl<'a> Deref for View<'a> {
    type Target = [&'a Item];

    fn deref(&self) -> &[&'a Item] {
        &self.items
    }
}

impl<'a> IntoIterator for View<'a> {
    type Item = &'a Item;
    type IntoIter = std::vec::IntoIter<&'a Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Filter then sort the dataset; the dataset is never modified
pub fn run_query<'a>(dataset: &'a [Item], state: &QueryState) -> View<'a> {
    let mut items = apply_filters(dataset, &state.filters, &state.search);
    sort_items(&mut items, &state.sort);

    debug!(
        total = dataset.len(),
        matched = items.len(),
        sort_key = %state.sort.key,
        order = %state.sort.order,
        "query recomputed"
    );

    View { items }
}

/// Positions in the dataset of the items making up a view, in view order
fn positions_of(dataset: &[Item], view: &View<'_>) -> Vec<usize> {
    let index: HashMap<*const Item, usize> = dataset
        .iter()
        .enumerate()
        .map(|(position, item)| (item as *const Item, position))
        .collect();

    view.iter()
        .filter_map(|item| index.get(&(*item as *const Item)).copied())
        .collect()
}

fn view_from_positions<'a>(dataset: &'a [Item], positions: &[usize]) -> View<'a> {
    View {
        items: positions.iter().filter_map(|&p| dataset.get(p)).collect(),
    }
}

/// Memoizes the last query on its full input tuple
#[derive(Debug, Default)]
pub struct QueryCache {
    last: Option<(Dataset, QueryState, Vec<usize>)>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same result as [`run_query`]; reuses the previous answer when both the
    /// dataset snapshot and the state are unchanged
    pub fn view<'a>(&mut self, dataset: &'a Dataset, state: &QueryState) -> View<'a> {
        if let Some((cached_dataset, cached_state, positions)) = &self.last {
            if cached_dataset.same_snapshot(dataset) && cached_state == state {
                return view_from_positions(dataset, positions);
            }
        }

        let view = run_query(dataset, state);
        self.last = Some((dataset.clone(), state.clone(), positions_of(dataset, &view)));
        view
    }

    pub fn invalidate(&mut self) {
        self.last = None;
    }
}
