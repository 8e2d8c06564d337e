pub mod axis;
pub mod dataset;
pub mod dataset_store;
pub mod series;
pub mod series_registry;
pub mod transform;
pub mod value;

pub use axis::{AxisAllocation, AxisId, AxisLayout, AxisSide};
pub use dataset::Dataset;
pub use dataset_store::DatasetStore;
pub use series::{
    DisplayMode, PlotGroup, Series, SeriesConfig, SeriesId, SeriesState, TransformParams,
    normalize_offset, normalize_scale,
};
pub use series_registry::{RemovedSeries, SeriesRegistry};
pub use transform::{TraceData, compute_trace};
pub use value::CellValue;
