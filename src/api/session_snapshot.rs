use serde::{Deserialize, Serialize};

use crate::core::{AxisId, SeriesConfig, SeriesId, SeriesState};
use crate::error::{PlotError, PlotResult};

use super::trace_sync::trace_data;
use super::{PlotSession, TitleStage};

/// Serializable deterministic session state used by regression tests and
/// the replay tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub datasets: Vec<DatasetSnapshot>,
    pub series: Vec<SeriesSnapshot>,
    pub default_series: Option<SeriesId>,
    pub axis_count: u32,
    pub title: Option<String>,
    pub title_stage: TitleStage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSnapshot {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSnapshot {
    pub id: SeriesId,
    pub position: usize,
    pub state: SeriesState,
    pub axis: AxisId,
    pub points: usize,
    pub config: SeriesConfig,
}

impl PlotSession {
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let datasets = self
            .model
            .datasets
            .names()
            .into_iter()
            .filter_map(|name| self.model.datasets.get(name).ok())
            .map(|dataset| DatasetSnapshot {
                name: dataset.name().to_owned(),
                columns: dataset
                    .column_names()
                    .into_iter()
                    .map(str::to_owned)
                    .collect(),
                rows: dataset.row_count(),
            })
            .collect();

        let series = self
            .model
            .series
            .iter()
            .map(|series| SeriesSnapshot {
                id: series.id(),
                position: series.position(),
                state: series.state(),
                axis: AxisId::for_group(series.config().plot_group),
                points: trace_data(&self.model.datasets, series).len(),
                config: series.config().clone(),
            })
            .collect();

        SessionSnapshot {
            datasets,
            series,
            default_series: self.model.series.default_id(),
            axis_count: self.model.axes.axis_count,
            title: self.title.current().map(str::to_owned),
            title_stage: self.title.stage(),
        }
    }

    /// Serializes the snapshot as pretty JSON for fixture-based checks.
    pub fn snapshot_json_pretty(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| PlotError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
