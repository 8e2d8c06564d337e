use tracing::warn;

use crate::core::{DatasetStore, SeriesConfig};

/// Which automatic selections apply while resolving a series's bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct AutoSelect {
    pub(super) first_dataset: bool,
    pub(super) first_column: bool,
}

/// Brings dataset and column bindings in line with the loaded datasets.
///
/// An unset dataset picks the first loaded one when enabled, and the columns
/// are then checked against the bound dataset (see [`resolve_columns`]).
/// Returns `true` when the config changed.
pub(super) fn resolve_bindings(
    datasets: &DatasetStore,
    auto: AutoSelect,
    config: &mut SeriesConfig,
) -> bool {
    let mut changed = false;
    if config.dataset.is_none() && auto.first_dataset {
        if let Some(first) = datasets.first_name() {
            config.dataset = Some(first.to_owned());
            changed = true;
        }
    }
    resolve_columns(datasets, auto.first_column, config) || changed
}

/// Reverts columns missing from the bound dataset to unset, then fills an
/// unset x column with the dataset's first column when enabled.
///
/// A dataset that is not loaded yet leaves the columns alone; they are
/// checked again once the load completes.
pub(super) fn resolve_columns(
    datasets: &DatasetStore,
    auto_first_column: bool,
    config: &mut SeriesConfig,
) -> bool {
    let Some(dataset) = config
        .dataset
        .as_deref()
        .and_then(|name| datasets.get(name).ok())
    else {
        return false;
    };

    let mut changed = false;
    for (axis, column) in [("x", &mut config.x_column), ("y", &mut config.y_column)] {
        let missing = column
            .as_deref()
            .is_some_and(|name| !dataset.has_column(name));
        if missing {
            warn!(
                dataset = dataset.name(),
                axis,
                column = column.as_deref().unwrap_or_default(),
                "column not present in dataset, reverting to unset"
            );
            *column = None;
            changed = true;
        }
    }
    if config.x_column.is_none() && auto_first_column {
        if let Some(first) = dataset.first_column() {
            config.x_column = Some(first.to_owned());
            changed = true;
        }
    }
    changed
}
