use tracing::debug;

use crate::core::{Series, SeriesConfig, SeriesId};
use crate::error::PlotResult;

use super::PlotSession;

impl PlotSession {
    /// Marks `id` as the template new series copy from.
    pub fn set_default(&mut self, id: SeriesId) -> PlotResult<()> {
        self.model.series.set_default(id)?;
        debug!(%id, "default template set");
        Ok(())
    }

    pub fn clear_default(&mut self) -> bool {
        let cleared = self.model.series.clear_default();
        if cleared {
            debug!("default template cleared");
        }
        cleared
    }

    #[must_use]
    pub fn default_series(&self) -> Option<&Series> {
        self.model
            .series
            .default_id()
            .and_then(|id| self.model.series.get(id).ok())
    }

    /// Configuration copied into new series, if a default is marked.
    #[must_use]
    pub fn template_config(&self) -> Option<SeriesConfig> {
        self.default_series().map(|series| series.config().clone())
    }
}
