//! series-plot: keeps a chart's traces in sync with tabular datasets.
//!
//! Datasets are loaded into a store, series bind a dataset and two columns,
//! and every state transition yields an ordered batch of index-addressed
//! trace commands for the chart collaborator to apply.

pub mod api;
pub mod core;
pub mod error;
pub mod ingest;
pub mod render;
pub mod telemetry;

pub use api::{PlotSession, PlotSessionConfig};
pub use error::{PlotError, PlotResult};
