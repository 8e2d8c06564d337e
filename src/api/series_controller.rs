use tracing::debug;

use crate::core::{SeriesConfig, SeriesId};
use crate::error::PlotResult;
use crate::render::{SyncBatch, TraceCommand};

use super::PlotSession;
use super::binding_resolver::resolve_bindings;
use super::trace_sync::{RestyleScope, trace_spec};

impl PlotSession {
    /// Appends a series, copying the default template when one is marked.
    pub fn on_add_series(&mut self) -> SyncBatch {
        let config = self
            .template_config()
            .unwrap_or_else(|| SeriesConfig::default().with_mode(self.config.default_mode));
        self.add_series_with(config)
    }

    /// Appends a series copying every configurable field of `source`.
    pub fn on_add_series_from(&mut self, source: SeriesId) -> PlotResult<SyncBatch> {
        let config = self.model.series.get(source)?.config().clone();
        Ok(self.add_series_with(config))
    }

    fn add_series_with(&mut self, mut config: SeriesConfig) -> SyncBatch {
        resolve_bindings(&self.model.datasets, self.auto_select(), &mut config);
        config.transform = config.transform.normalized();
        config.transform.downsample = self.config.clamp_downsample(config.transform.downsample);

        let mut batch = SyncBatch::new();
        let series = self.model.series.add(config);
        let trace = trace_spec(&self.model.datasets, series);
        debug!(
            id = %series.id(),
            index = series.position(),
            points = trace.x.len(),
            "add trace"
        );
        batch.push(TraceCommand::AddTrace { trace });
        self.sync_axes(&mut batch);
        self.refresh_title(&mut batch);
        batch
    }

    /// Removes `id` and its trace.
    ///
    /// The trace at the series's position is deleted first; every series that
    /// moved down is then re-addressed at its new index, so later commands in
    /// the batch already target shifted indices.
    pub fn on_remove_series(&mut self, id: SeriesId) -> PlotResult<SyncBatch> {
        let removed = self.model.series.remove(id)?;

        let mut batch = SyncBatch::new();
        batch.push(TraceCommand::RemoveTrace {
            index: removed.former_position,
        });
        for &shifted in &removed.shifted {
            batch.push(self.restyle_command(shifted, RestyleScope::Full)?);
        }
        self.sync_axes(&mut batch);
        debug!(
            %id,
            index = removed.former_position,
            shifted = removed.shifted.len(),
            remaining = self.model.series.len(),
            "remove trace"
        );
        Ok(batch)
    }
}
