mod commands;
mod null_chart;
mod recording_chart;

pub use commands::{LayoutPatch, PlotOptions, SyncBatch, TraceCommand, TracePatch, TraceSpec};
pub use null_chart::NullChart;
pub use recording_chart::RecordingChart;

use crate::error::PlotResult;

/// Contract implemented by the chart collaborator.
///
/// Traces are addressed purely by integer index. The session guarantees that
/// index `i` always refers to the series currently at position `i`, as long
/// as every emitted `SyncBatch` is applied in order.
pub trait ChartBackend {
    fn create(
        &mut self,
        traces: &[TraceSpec],
        layout: &LayoutPatch,
        options: &PlotOptions,
    ) -> PlotResult<()>;

    fn add_trace(&mut self, trace: &TraceSpec) -> PlotResult<()>;

    fn remove_trace(&mut self, index: usize) -> PlotResult<()>;

    fn restyle(&mut self, index: usize, patch: &TracePatch) -> PlotResult<()>;

    fn relayout(&mut self, patch: &LayoutPatch) -> PlotResult<()>;

    fn apply(&mut self, command: &TraceCommand) -> PlotResult<()> {
        match command {
            TraceCommand::Create {
                traces,
                layout,
                options,
            } => self.create(traces, layout, options),
            TraceCommand::AddTrace { trace } => self.add_trace(trace),
            TraceCommand::RemoveTrace { index } => self.remove_trace(*index),
            TraceCommand::Restyle { index, patch } => self.restyle(*index, patch),
            TraceCommand::Relayout { patch } => self.relayout(patch),
        }
    }
}
