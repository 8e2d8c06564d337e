//! Session facade driving a chart collaborator through index-addressed commands.
//!
//! [`PlotSession`] owns every piece of mutable state. Its handlers are split
//! across controller files by concern; each one mutates the session in place
//! and returns the [`SyncBatch`](crate::render::SyncBatch) to apply.

mod binding_resolver;
mod dataset_controller;
mod default_template;
mod field_update;
mod json_contract;
mod load_tracker;
mod series_controller;
mod session;
mod session_accessors;
mod session_config;
mod session_model;
mod session_snapshot;
mod title_guide;
mod trace_sync;

pub use field_update::{FieldKind, SeriesField};
pub use json_contract::{SESSION_SNAPSHOT_JSON_SCHEMA_V1, SessionSnapshotJsonContractV1};
pub use load_tracker::LoadTicket;
pub use session::PlotSession;
pub use session_config::{MAX_INITIAL_SERIES, PlotSessionConfig};
pub use session_snapshot::{DatasetSnapshot, SeriesSnapshot, SessionSnapshot};
pub use title_guide::{FILE_INSTRUCTION, TRACE_INSTRUCTION, TitleStage};
