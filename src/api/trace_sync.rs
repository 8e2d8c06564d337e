use tracing::{debug, trace};

use crate::core::{
    AxisAllocation, AxisId, DatasetStore, Series, SeriesId, SeriesState, TraceData,
    compute_trace,
};
use crate::error::PlotResult;
use crate::render::{LayoutPatch, SyncBatch, TraceCommand, TracePatch, TraceSpec};

use super::PlotSession;
use super::binding_resolver::AutoSelect;

/// Which part of a trace a restyle carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum RestyleScope {
    Data,
    Mode,
    Axis,
    Full,
}

/// Runs the pipeline for `series` against the current datasets.
///
/// A dataset name that is not loaded renders as an empty trace.
pub(super) fn trace_data(datasets: &DatasetStore, series: &Series) -> TraceData {
    let config = series.config();
    let dataset = config
        .dataset
        .as_deref()
        .and_then(|name| datasets.get(name).ok());
    compute_trace(
        dataset,
        config.x_column.as_deref(),
        config.y_column.as_deref(),
        &config.transform,
    )
}

pub(super) fn trace_spec(datasets: &DatasetStore, series: &Series) -> TraceSpec {
    TraceSpec::new(
        trace_data(datasets, series),
        series.config().mode,
        AxisId::for_group(series.config().plot_group),
    )
}

impl PlotSession {
    pub(super) fn auto_select(&self) -> AutoSelect {
        AutoSelect {
            first_dataset: self.config.auto_select_first_dataset,
            first_column: self.config.auto_select_first_column,
        }
    }

    /// Builds a restyle for `id` addressed at its current position.
    pub(super) fn restyle_command(
        &self,
        id: SeriesId,
        scope: RestyleScope,
    ) -> PlotResult<TraceCommand> {
        let series = self.model.series.get(id)?;
        let config = series.config();
        let patch = match scope {
            RestyleScope::Data => TracePatch::data(trace_data(&self.model.datasets, series)),
            RestyleScope::Mode => TracePatch::default().with_mode(config.mode),
            RestyleScope::Axis => TracePatch::axis(AxisId::for_group(config.plot_group)),
            RestyleScope::Full => TracePatch::full(trace_spec(&self.model.datasets, series)),
        };
        trace!(
            %id,
            index = series.position(),
            ?scope,
            points = patch.x.as_ref().map_or(0, Vec::len),
            "restyle series"
        );
        Ok(TraceCommand::Restyle {
            index: series.position(),
            patch,
        })
    }

    /// Recomputes the axis allocation and defines axes the chart has not seen yet.
    pub(super) fn sync_axes(&mut self, batch: &mut SyncBatch) {
        let allocation = AxisAllocation::recompute(
            self.model
                .series
                .iter()
                .map(|series| series.config().plot_group),
        );

        let mut patch = LayoutPatch::default();
        for axis in allocation.axes() {
            if self.model.defined_axes.insert(axis.group().raw()) {
                patch = patch.with_axis(axis);
            }
        }
        if !patch.is_empty() {
            debug!(axes = patch.axes.len(), "defining new axes");
            batch.push(TraceCommand::Relayout { patch });
        }
        if allocation.axis_count != self.model.axes.axis_count {
            debug!(
                previous = self.model.axes.axis_count,
                axis_count = allocation.axis_count,
                "axis count changed"
            );
        }
        self.model.axes = allocation;
    }

    /// Advances the instruction title after a transition.
    pub(super) fn refresh_title(&mut self, batch: &mut SyncBatch) {
        if !self.model.datasets.is_empty() {
            if let Some(patch) = self.title.on_file_loaded() {
                batch.push(TraceCommand::Relayout { patch });
            }
        }
        let any_configured = self.model.series.iter().any(|series| {
            series.state() == SeriesState::Configured
                && series
                    .config()
                    .dataset
                    .as_deref()
                    .is_some_and(|name| self.model.datasets.contains(name))
        });
        if any_configured {
            if let Some(patch) = self.title.on_series_configured() {
                batch.push(TraceCommand::Relayout { patch });
            }
        }
    }
}
