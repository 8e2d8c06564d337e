use tracing::debug;

use crate::core::{AxisId, PlotGroup};
use crate::error::PlotResult;
use crate::render::{LayoutPatch, SyncBatch, TraceCommand};

use super::load_tracker::LoadTracker;
use super::session_model::SessionModel;
use super::title_guide::TitleGuide;
use super::PlotSessionConfig;

/// Main orchestration facade consumed by the UI layer.
///
/// `PlotSession` owns the dataset store, the series registry and the derived
/// axis allocation. Every entry point runs to completion and returns the
/// ordered `SyncBatch` the chart collaborator must apply.
#[derive(Debug)]
pub struct PlotSession {
    pub(super) config: PlotSessionConfig,
    pub(super) model: SessionModel,
    pub(super) loads: LoadTracker,
    pub(super) title: TitleGuide,
}

impl PlotSession {
    /// Creates a session and the batch that creates the chart.
    ///
    /// The batch starts with `Create` and then adds `initial_series` traces.
    pub fn new(config: PlotSessionConfig) -> PlotResult<(Self, SyncBatch)> {
        config.validate()?;
        let mut session = Self {
            title: TitleGuide::new(config.title_guide),
            config,
            model: SessionModel::new(),
            loads: LoadTracker::default(),
        };

        let mut layout = LayoutPatch::default().with_axis(AxisId::for_group(PlotGroup::PRIMARY));
        layout.title = session.title.current().map(str::to_owned);

        let mut batch = SyncBatch::new();
        batch.push(TraceCommand::Create {
            traces: Vec::new(),
            layout,
            options: session.config.plot_options.clone(),
        });
        for _ in 0..session.config.initial_series {
            batch.append(session.on_add_series());
        }
        debug!(
            initial_series = session.config.initial_series,
            commands = batch.len(),
            "created plot session"
        );
        Ok((session, batch))
    }

    #[must_use]
    pub fn config(&self) -> &PlotSessionConfig {
        &self.config
    }
}
