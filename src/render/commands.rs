use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{AxisId, AxisLayout, CellValue, DisplayMode, PlotGroup, TraceData};
use crate::error::PlotResult;

use super::ChartBackend;

/// Full description of one trace, as sent when a trace is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSpec {
    pub x: Vec<CellValue>,
    pub y: Vec<CellValue>,
    pub mode: DisplayMode,
    pub yaxis: AxisId,
}

impl TraceSpec {
    #[must_use]
    pub fn new(data: TraceData, mode: DisplayMode, yaxis: AxisId) -> Self {
        Self {
            x: data.x,
            y: data.y,
            mode,
            yaxis,
        }
    }

    #[must_use]
    pub fn empty(mode: DisplayMode) -> Self {
        Self::new(
            TraceData::empty(),
            mode,
            AxisId::for_group(PlotGroup::PRIMARY),
        )
    }
}

/// Partial trace update; absent fields are left as they are.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TracePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<CellValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<CellValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<DisplayMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<AxisId>,
}

impl TracePatch {
    #[must_use]
    pub fn data(data: TraceData) -> Self {
        Self {
            x: Some(data.x),
            y: Some(data.y),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn full(spec: TraceSpec) -> Self {
        Self {
            x: Some(spec.x),
            y: Some(spec.y),
            mode: Some(spec.mode),
            yaxis: Some(spec.yaxis),
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: DisplayMode) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use]
    pub fn axis(yaxis: AxisId) -> Self {
        Self {
            yaxis: Some(yaxis),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.mode.is_none() && self.yaxis.is_none()
    }

    pub fn apply_to(&self, spec: &mut TraceSpec) {
        if let Some(x) = &self.x {
            spec.x.clone_from(x);
        }
        if let Some(y) = &self.y {
            spec.y.clone_from(y);
        }
        if let Some(mode) = self.mode {
            spec.mode = mode;
        }
        if let Some(yaxis) = self.yaxis {
            spec.yaxis = yaxis;
        }
    }
}

/// Partial layout update. Axis definitions are keyed by layout key (`yaxis2`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub axes: BTreeMap<String, AxisLayout>,
}

impl LayoutPatch {
    #[must_use]
    pub fn title(text: impl Into<String>) -> Self {
        Self {
            title: Some(text.into()),
            axes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_axis(mut self, axis: AxisId) -> Self {
        self.axes
            .insert(axis.layout_key(), AxisLayout::for_group(axis.group()));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.axes.is_empty()
    }

    pub fn merge(&mut self, other: &Self) {
        if let Some(title) = &other.title {
            self.title = Some(title.clone());
        }
        for (key, axis) in &other.axes {
            self.axes.insert(key.clone(), axis.clone());
        }
    }
}

/// Chart-level interaction options passed once at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotOptions {
    #[serde(default = "default_true")]
    pub scroll_zoom: bool,
    #[serde(default = "default_true")]
    pub editable: bool,
    #[serde(default = "default_mode_bar_buttons_to_remove")]
    pub mode_bar_buttons_to_remove: Vec<String>,
    #[serde(default = "default_true")]
    pub responsive: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            scroll_zoom: true,
            editable: true,
            mode_bar_buttons_to_remove: default_mode_bar_buttons_to_remove(),
            responsive: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_mode_bar_buttons_to_remove() -> Vec<String> {
    vec!["lasso2d".to_owned()]
}

/// One index-addressed instruction for the chart collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceCommand {
    Create {
        traces: Vec<TraceSpec>,
        layout: LayoutPatch,
        options: PlotOptions,
    },
    AddTrace {
        trace: TraceSpec,
    },
    RemoveTrace {
        index: usize,
    },
    Restyle {
        index: usize,
        patch: TracePatch,
    },
    Relayout {
        patch: LayoutPatch,
    },
}

/// Ordered commands produced by one state transition.
///
/// Commands must be applied in order: index-addressed calls after a
/// `RemoveTrace` already use the shifted indices.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncBatch {
    commands: Vec<TraceCommand>,
}

impl SyncBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: TraceCommand) {
        self.commands.push(command);
    }

    pub fn append(&mut self, other: Self) {
        self.commands.extend(other.commands);
    }

    #[must_use]
    pub fn commands(&self) -> &[TraceCommand] {
        &self.commands
    }

    #[must_use]
    pub fn into_commands(self) -> Vec<TraceCommand> {
        self.commands
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Applies every command in order, stopping at the first backend error.
    pub fn apply_to<B: ChartBackend + ?Sized>(&self, backend: &mut B) -> PlotResult<()> {
        for command in &self.commands {
            backend.apply(command)?;
        }
        Ok(())
    }
}

impl Extend<TraceCommand> for SyncBatch {
    fn extend<T: IntoIterator<Item = TraceCommand>>(&mut self, iter: T) {
        self.commands.extend(iter);
    }
}

impl IntoIterator for SyncBatch {
    type Item = TraceCommand;
    type IntoIter = std::vec::IntoIter<TraceCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}
