use std::collections::BTreeSet;

use crate::core::{AxisAllocation, DatasetStore, SeriesRegistry};

/// Owned mutable session state.
///
/// Lives for one session; nothing here is global. Only the session's
/// state-transition handlers mutate it, and only those handlers emit
/// index-addressed trace commands.
#[derive(Debug, Clone, Default)]
pub(super) struct SessionModel {
    pub(super) datasets: DatasetStore,
    pub(super) series: SeriesRegistry,
    pub(super) axes: AxisAllocation,
    /// Plot groups whose axis definition was already sent to the chart.
    pub(super) defined_axes: BTreeSet<u32>,
}

impl SessionModel {
    pub(super) fn new() -> Self {
        Self {
            defined_axes: BTreeSet::from([1]),
            ..Self::default()
        }
    }
}
