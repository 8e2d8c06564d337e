use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable series identity. Assigned once at creation and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(u64);

impl SeriesId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a trace draws its points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DisplayMode {
    #[serde(rename = "none")]
    None,
    #[default]
    #[serde(rename = "markers")]
    Markers,
    #[serde(rename = "lines")]
    Lines,
    #[serde(rename = "lines+markers")]
    LinesMarkers,
}

impl DisplayMode {
    /// Maps the marker/line toggle pair onto a mode.
    #[must_use]
    pub fn from_toggles(markers: bool, lines: bool) -> Self {
        match (markers, lines) {
            (true, true) => Self::LinesMarkers,
            (true, false) => Self::Markers,
            (false, true) => Self::Lines,
            (false, false) => Self::None,
        }
    }

    #[must_use]
    pub fn shows_markers(self) -> bool {
        matches!(self, Self::Markers | Self::LinesMarkers)
    }

    #[must_use]
    pub fn shows_lines(self) -> bool {
        matches!(self, Self::Lines | Self::LinesMarkers)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Markers => "markers",
            Self::Lines => "lines",
            Self::LinesMarkers => "lines+markers",
        }
    }

    /// Parses the wire name. Unknown names yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "none" => Some(Self::None),
            "markers" => Some(Self::Markers),
            "lines" => Some(Self::Lines),
            "lines+markers" | "markers+lines" => Some(Self::LinesMarkers),
            _ => None,
        }
    }
}

/// User-assigned subplot/axis grouping number, always `>= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct PlotGroup(u32);

impl PlotGroup {
    pub const PRIMARY: Self = Self(1);

    /// Clamps `raw` to the valid range; `0` becomes the primary group.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        if raw == 0 { Self::PRIMARY } else { Self(raw) }
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl Default for PlotGroup {
    fn default() -> Self {
        Self::PRIMARY
    }
}

impl From<u32> for PlotGroup {
    fn from(raw: u32) -> Self {
        Self::new(raw)
    }
}

impl From<PlotGroup> for u32 {
    fn from(group: PlotGroup) -> Self {
        group.0
    }
}

/// Per-series affine/downsample parameters fed to the transform pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformParams {
    pub x_scale: f64,
    pub x_offset: f64,
    pub x_zero: bool,
    pub y_scale: f64,
    pub y_offset: f64,
    pub downsample: usize,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            x_scale: 1.0,
            x_offset: 0.0,
            x_zero: false,
            y_scale: 1.0,
            y_offset: 0.0,
            downsample: 1,
        }
    }
}

impl TransformParams {
    /// Replaces invalid values with the identity: non-finite scale -> 1,
    /// non-finite offset -> 0, zero downsample -> 1.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            x_scale: normalize_scale(self.x_scale),
            x_offset: normalize_offset(self.x_offset),
            x_zero: self.x_zero,
            y_scale: normalize_scale(self.y_scale),
            y_offset: normalize_offset(self.y_offset),
            downsample: self.downsample.max(1),
        }
    }
}

#[must_use]
pub fn normalize_scale(value: f64) -> f64 {
    if value.is_finite() { value } else { 1.0 }
}

#[must_use]
pub fn normalize_offset(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Everything a user can configure on a series; the unit the default template copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SeriesConfig {
    #[serde(default)]
    pub dataset: Option<String>,
    #[serde(default)]
    pub x_column: Option<String>,
    #[serde(default)]
    pub y_column: Option<String>,
    #[serde(default)]
    pub mode: DisplayMode,
    #[serde(default)]
    pub plot_group: PlotGroup,
    #[serde(default)]
    pub transform: TransformParams,
}

impl SeriesConfig {
    #[must_use]
    pub fn with_mode(mut self, mode: DisplayMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_columns(
        mut self,
        dataset: impl Into<String>,
        x_column: impl Into<String>,
        y_column: impl Into<String>,
    ) -> Self {
        self.dataset = Some(dataset.into());
        self.x_column = Some(x_column.into());
        self.y_column = Some(y_column.into());
        self
    }

    #[must_use]
    pub fn state(&self) -> SeriesState {
        if self.dataset.is_some() && self.x_column.is_some() && self.y_column.is_some() {
            SeriesState::Configured
        } else {
            SeriesState::Unconfigured
        }
    }
}

/// Render state derived from a series's bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesState {
    /// Dataset, x or y still unset; the trace renders empty.
    Unconfigured,
    /// All three bindings set; the trace renders data.
    Configured,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub(crate) id: SeriesId,
    pub(crate) position: usize,
    pub(crate) config: SeriesConfig,
}

impl Series {
    #[must_use]
    pub fn id(&self) -> SeriesId {
        self.id
    }

    /// Dense position, which is also the trace index at the chart collaborator.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> SeriesState {
        self.config.state()
    }

    #[must_use]
    pub fn is_bound_to(&self, dataset: &str) -> bool {
        self.config.dataset.as_deref() == Some(dataset)
    }
}
