use tracing::debug;

use crate::core::{Dataset, SeriesId};
use crate::error::{PlotError, PlotResult};
use crate::ingest::{ParseFailure, parse_csv};
use crate::render::SyncBatch;

use super::PlotSession;
use super::binding_resolver::resolve_bindings;
use super::load_tracker::LoadTicket;
use super::trace_sync::RestyleScope;

impl PlotSession {
    /// Stores `dataset` and re-synchronizes every series that depends on it.
    ///
    /// A dataset under an existing name replaces the old version wholesale.
    /// Unset series pick up the first dataset when auto-selection is on, and
    /// bound series drop column choices the new version no longer has. A
    /// pending load of the same name is superseded and its completion will be
    /// discarded.
    pub fn on_dataset_loaded(&mut self, dataset: Dataset) -> SyncBatch {
        if self.loads.cancel(dataset.name()) {
            debug!(name = dataset.name(), "pending load superseded by direct load");
        }
        self.store_dataset(dataset)
    }

    fn store_dataset(&mut self, dataset: Dataset) -> SyncBatch {
        let name = dataset.name().to_owned();
        let rows = dataset.row_count();
        let replaced = self.model.datasets.insert(dataset).is_some();

        let auto = self.auto_select();
        let mut affected: Vec<SeriesId> = Vec::new();
        for id in self.model.series.ids() {
            let Ok(config) = self.model.series.config_mut(id) else {
                continue;
            };
            let changed = resolve_bindings(&self.model.datasets, auto, config);
            if changed || config.dataset.as_deref() == Some(name.as_str()) {
                affected.push(id);
            }
        }

        let mut batch = SyncBatch::new();
        for &id in &affected {
            if let Ok(command) = self.restyle_command(id, RestyleScope::Data) {
                batch.push(command);
            }
        }
        self.refresh_title(&mut batch);
        debug!(
            %name,
            rows,
            replaced,
            restyled = affected.len(),
            "dataset loaded"
        );
        batch
    }

    /// Removes `name` and clears every series bound to it.
    ///
    /// Bound series lose their dataset and column choices; they are not moved
    /// to another dataset. A pending load of the same name is cancelled.
    pub fn remove_dataset(&mut self, name: &str) -> PlotResult<SyncBatch> {
        self.model
            .datasets
            .remove(name)
            .ok_or_else(|| PlotError::DatasetNotFound {
                name: name.to_owned(),
            })?;
        self.loads.cancel(name);

        let bound = self.model.series.ids_bound_to(name);
        let mut batch = SyncBatch::new();
        for &id in &bound {
            let config = self.model.series.config_mut(id)?;
            config.dataset = None;
            config.x_column = None;
            config.y_column = None;
            batch.push(self.restyle_command(id, RestyleScope::Data)?);
        }
        debug!(%name, unbound = bound.len(), "dataset removed");
        Ok(batch)
    }

    /// Starts an asynchronous load of `name`, superseding any earlier one.
    pub fn begin_load(&mut self, name: &str) -> LoadTicket {
        let ticket = self.loads.begin(name);
        debug!(name, generation = ticket.generation(), "load started");
        ticket
    }

    /// Abandons the pending load of `name`, if any.
    pub fn cancel_load(&mut self, name: &str) -> bool {
        let cancelled = self.loads.cancel(name);
        if cancelled {
            debug!(name, "load cancelled");
        }
        cancelled
    }

    #[must_use]
    pub fn is_loading(&self, name: &str) -> bool {
        self.loads.is_pending(name)
    }

    /// Finishes the load behind `ticket`.
    ///
    /// Superseded, cancelled, and already-finished tickets are discarded and
    /// yield an empty batch. A parse failure leaves the store untouched and is
    /// returned as [`PlotError::Parse`].
    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        outcome: Result<Dataset, ParseFailure>,
    ) -> PlotResult<SyncBatch> {
        if !self.loads.finish(ticket) {
            debug!(
                name = ticket.name(),
                generation = ticket.generation(),
                "discarding stale load completion"
            );
            return Ok(SyncBatch::new());
        }
        match outcome {
            Ok(dataset) => Ok(self.store_dataset(dataset.renamed(ticket.name()))),
            Err(failure) => {
                debug!(
                    name = ticket.name(),
                    issues = failure.issues.len(),
                    "load failed"
                );
                Err(failure.into())
            }
        }
    }

    /// Parses `bytes` as CSV and completes `ticket` with the result.
    pub fn ingest_csv(&mut self, ticket: &LoadTicket, bytes: &[u8]) -> PlotResult<SyncBatch> {
        let outcome = parse_csv(ticket.name(), bytes);
        self.complete_load(ticket, outcome)
    }
}
