use tracing::debug;

use crate::core::{
    AxisAllocation, AxisId, DatasetStore, Series, SeriesId, SeriesRegistry, TraceData,
};
use crate::error::PlotResult;

use super::trace_sync::trace_data;
use super::{PlotSession, TitleStage};

impl PlotSession {
    #[must_use]
    pub fn datasets(&self) -> &DatasetStore {
        &self.model.datasets
    }

    #[must_use]
    pub fn series(&self) -> &SeriesRegistry {
        &self.model.series
    }

    pub fn series_by_id(&self, id: SeriesId) -> PlotResult<&Series> {
        self.model.series.get(id)
    }

    /// Series at chart trace index `position`.
    #[must_use]
    pub fn series_at(&self, position: usize) -> Option<&Series> {
        self.model.series.at(position)
    }

    #[must_use]
    pub fn axis_allocation(&self) -> &AxisAllocation {
        &self.model.axes
    }

    #[must_use]
    pub fn axis_count(&self) -> u32 {
        self.model.axes.axis_count
    }

    pub fn axis_of(&self, id: SeriesId) -> PlotResult<AxisId> {
        Ok(AxisId::for_group(self.model.series.get(id)?.config().plot_group))
    }

    /// Pipeline output currently shown for `id`.
    pub fn trace_of(&self, id: SeriesId) -> PlotResult<TraceData> {
        let series = self.model.series.get(id)?;
        Ok(trace_data(&self.model.datasets, series))
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.current()
    }

    #[must_use]
    pub fn title_stage(&self) -> TitleStage {
        self.title.stage()
    }

    /// Records a title typed at the chart.
    ///
    /// Returns `true` when the text is user-authored; the instruction guide
    /// then stops for the rest of the session.
    pub fn on_title_edited(&mut self, text: &str) -> bool {
        let authored = self.title.on_title_edited(text);
        if authored {
            debug!(title = text, "title authored by user");
        }
        authored
    }
}
