use crate::error::{PlotError, PlotResult};
use crate::render::{ChartBackend, LayoutPatch, PlotOptions, TraceCommand, TracePatch, TraceSpec};

/// In-memory chart that materializes the trace list and keeps a command log.
///
/// Integration tests compare `traces()[i]` against the series at position `i`.
#[derive(Debug, Default)]
pub struct RecordingChart {
    traces: Vec<TraceSpec>,
    layout: LayoutPatch,
    options: Option<PlotOptions>,
    log: Vec<TraceCommand>,
}

impl RecordingChart {
    #[must_use]
    pub fn traces(&self) -> &[TraceSpec] {
        &self.traces
    }

    #[must_use]
    pub fn layout(&self) -> &LayoutPatch {
        &self.layout
    }

    #[must_use]
    pub fn options(&self) -> Option<&PlotOptions> {
        self.options.as_ref()
    }

    #[must_use]
    pub fn log(&self) -> &[TraceCommand] {
        &self.log
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    fn ensure_created(&self) -> PlotResult<()> {
        if self.options.is_some() {
            Ok(())
        } else {
            Err(PlotError::InvalidData(
                "chart must be created before it is updated".to_owned(),
            ))
        }
    }

    fn trace_mut(&mut self, index: usize) -> PlotResult<&mut TraceSpec> {
        let len = self.traces.len();
        self.traces
            .get_mut(index)
            .ok_or(PlotError::InvalidTraceIndex { index, len })
    }
}

impl ChartBackend for RecordingChart {
    fn create(
        &mut self,
        traces: &[TraceSpec],
        layout: &LayoutPatch,
        options: &PlotOptions,
    ) -> PlotResult<()> {
        self.traces = traces.to_vec();
        self.layout = layout.clone();
        self.options = Some(options.clone());
        self.log.push(TraceCommand::Create {
            traces: traces.to_vec(),
            layout: layout.clone(),
            options: options.clone(),
        });
        Ok(())
    }

    fn add_trace(&mut self, trace: &TraceSpec) -> PlotResult<()> {
        self.ensure_created()?;
        self.traces.push(trace.clone());
        self.log.push(TraceCommand::AddTrace {
            trace: trace.clone(),
        });
        Ok(())
    }

    fn remove_trace(&mut self, index: usize) -> PlotResult<()> {
        self.ensure_created()?;
        let len = self.traces.len();
        if index >= len {
            return Err(PlotError::InvalidTraceIndex { index, len });
        }
        self.traces.remove(index);
        self.log.push(TraceCommand::RemoveTrace { index });
        Ok(())
    }

    fn restyle(&mut self, index: usize, patch: &TracePatch) -> PlotResult<()> {
        self.ensure_created()?;
        patch.apply_to(self.trace_mut(index)?);
        self.log.push(TraceCommand::Restyle {
            index,
            patch: patch.clone(),
        });
        Ok(())
    }

    fn relayout(&mut self, patch: &LayoutPatch) -> PlotResult<()> {
        self.ensure_created()?;
        self.layout.merge(patch);
        self.log.push(TraceCommand::Relayout {
            patch: patch.clone(),
        });
        Ok(())
    }
}
