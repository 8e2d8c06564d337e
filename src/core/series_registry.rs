use smallvec::SmallVec;
use tracing::debug;

use crate::core::{Series, SeriesConfig, SeriesId};
use crate::error::{PlotError, PlotResult};

/// Outcome of a removal: the retired series plus every series whose position
/// shifted down, listed in their new position order.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedSeries {
    pub series: Series,
    pub former_position: usize,
    pub shifted: SmallVec<[SeriesId; 8]>,
}

/// Ordered, positionally indexed collection of series.
///
/// Invariant: `series[i].position == i` for every `i` after each completed
/// mutation, so positions are always the dense range `0..len`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesRegistry {
    series: Vec<Series>,
    next_id: u64,
    default_id: Option<SeriesId>,
}

impl SeriesRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a series at position `len()` and returns it.
    pub fn add(&mut self, config: SeriesConfig) -> &Series {
        let id = SeriesId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        let position = self.series.len();
        self.series.push(Series {
            id,
            position,
            config,
        });
        debug!(%id, position, "added series");
        self.debug_assert_dense();
        &self.series[position]
    }

    /// Removes `id` and closes the gap it leaves.
    ///
    /// Every series after the removed one moves down by exactly one position,
    /// keeping relative order; earlier positions are untouched.
    pub fn remove(&mut self, id: SeriesId) -> PlotResult<RemovedSeries> {
        let former_position = self.position_of(id)?;
        let series = self.series.remove(former_position);
        let mut shifted = SmallVec::new();
        for (position, entry) in self.series.iter_mut().enumerate().skip(former_position) {
            entry.position = position;
            shifted.push(entry.id);
        }
        if self.default_id == Some(id) {
            self.default_id = None;
        }
        debug!(
            %id,
            former_position,
            shifted = shifted.len(),
            remaining = self.series.len(),
            "removed series"
        );
        self.debug_assert_dense();
        Ok(RemovedSeries {
            series,
            former_position,
            shifted,
        })
    }

    pub fn get(&self, id: SeriesId) -> PlotResult<&Series> {
        self.series
            .iter()
            .find(|series| series.id == id)
            .ok_or(PlotError::SeriesNotFound { id })
    }

    pub fn config_mut(&mut self, id: SeriesId) -> PlotResult<&mut SeriesConfig> {
        self.series
            .iter_mut()
            .find(|series| series.id == id)
            .map(|series| &mut series.config)
            .ok_or(PlotError::SeriesNotFound { id })
    }

    pub fn position_of(&self, id: SeriesId) -> PlotResult<usize> {
        self.series
            .iter()
            .position(|series| series.id == id)
            .ok_or(PlotError::SeriesNotFound { id })
    }

    #[must_use]
    pub fn at(&self, position: usize) -> Option<&Series> {
        self.series.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.iter()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<SeriesId> {
        self.series.iter().map(|series| series.id).collect()
    }

    #[must_use]
    pub fn ids_bound_to(&self, dataset: &str) -> Vec<SeriesId> {
        self.series
            .iter()
            .filter(|series| series.is_bound_to(dataset))
            .map(|series| series.id)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Marks `id` as the template source, clearing any previous mark.
    pub fn set_default(&mut self, id: SeriesId) -> PlotResult<()> {
        self.get(id)?;
        if let Some(previous) = self.default_id.replace(id) {
            if previous != id {
                debug!(%previous, %id, "moved default template");
            }
        }
        Ok(())
    }

    /// Returns `true` when a default mark was removed.
    pub fn clear_default(&mut self) -> bool {
        self.default_id.take().is_some()
    }

    #[must_use]
    pub fn default_id(&self) -> Option<SeriesId> {
        self.default_id
    }

    #[must_use]
    pub fn is_default(&self, id: SeriesId) -> bool {
        self.default_id == Some(id)
    }

    fn debug_assert_dense(&self) {
        debug_assert!(
            self.series
                .iter()
                .enumerate()
                .all(|(index, series)| series.position == index),
            "series positions must stay dense"
        );
    }
}
