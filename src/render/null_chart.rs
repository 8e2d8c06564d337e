use crate::error::{PlotError, PlotResult};
use crate::render::{ChartBackend, LayoutPatch, PlotOptions, TracePatch, TraceSpec};

/// No-op chart used by headless sessions and tests.
///
/// It only tracks the trace count, but still rejects out-of-range indices and
/// calls made before `create` so command streams are checked for addressing
/// errors.
#[derive(Debug, Default)]
pub struct NullChart {
    pub created: bool,
    pub trace_count: usize,
    pub applied_commands: usize,
}

impl NullChart {
    fn ensure_created(&self) -> PlotResult<()> {
        if self.created {
            Ok(())
        } else {
            Err(PlotError::InvalidData(
                "chart must be created before it is updated".to_owned(),
            ))
        }
    }

    fn ensure_index(&self, index: usize) -> PlotResult<()> {
        self.ensure_created()?;
        if index < self.trace_count {
            Ok(())
        } else {
            Err(PlotError::InvalidTraceIndex {
                index,
                len: self.trace_count,
            })
        }
    }
}

impl ChartBackend for NullChart {
    fn create(
        &mut self,
        traces: &[TraceSpec],
        _layout: &LayoutPatch,
        _options: &PlotOptions,
    ) -> PlotResult<()> {
        self.created = true;
        self.trace_count = traces.len();
        self.applied_commands += 1;
        Ok(())
    }

    fn add_trace(&mut self, _trace: &TraceSpec) -> PlotResult<()> {
        self.ensure_created()?;
        self.trace_count += 1;
        self.applied_commands += 1;
        Ok(())
    }

    fn remove_trace(&mut self, index: usize) -> PlotResult<()> {
        self.ensure_index(index)?;
        self.trace_count -= 1;
        self.applied_commands += 1;
        Ok(())
    }

    fn restyle(&mut self, index: usize, _patch: &TracePatch) -> PlotResult<()> {
        self.ensure_index(index)?;
        self.applied_commands += 1;
        Ok(())
    }

    fn relayout(&mut self, _patch: &LayoutPatch) -> PlotResult<()> {
        self.ensure_created()?;
        self.applied_commands += 1;
        Ok(())
    }
}
