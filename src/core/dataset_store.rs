use indexmap::IndexMap;
use tracing::debug;

use crate::core::Dataset;
use crate::error::{PlotError, PlotResult};

/// Loaded datasets keyed by name, in first-load order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetStore {
    datasets: IndexMap<String, Dataset>,
}

impl DatasetStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `dataset`, replacing wholesale any prior version under the same name.
    ///
    /// A replacement keeps the name's original slot in the load order.
    pub fn insert(&mut self, dataset: Dataset) -> Option<Dataset> {
        let name = dataset.name().to_owned();
        let previous = self.datasets.insert(name.clone(), dataset);
        debug!(
            name = %name,
            replaced = previous.is_some(),
            count = self.datasets.len(),
            "stored dataset"
        );
        previous
    }

    /// Drops `name` from the store. Bound series must be revalidated by the caller.
    pub fn remove(&mut self, name: &str) -> Option<Dataset> {
        self.datasets.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> PlotResult<&Dataset> {
        self.datasets
            .get(name)
            .ok_or_else(|| PlotError::DatasetNotFound {
                name: name.to_owned(),
            })
    }

    pub fn columns(&self, name: &str) -> PlotResult<Vec<&str>> {
        self.get(name).map(Dataset::column_names)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.datasets.contains_key(name)
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.datasets.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.datasets.keys().next().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}
