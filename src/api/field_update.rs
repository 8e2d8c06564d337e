use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{
    DatasetStore, DisplayMode, PlotGroup, SeriesConfig, SeriesId, normalize_offset,
    normalize_scale,
};
use crate::error::{PlotError, PlotResult};
use crate::render::SyncBatch;

use super::{PlotSession, PlotSessionConfig};
use super::binding_resolver::resolve_columns;
use super::trace_sync::RestyleScope;

/// Names of the editable series fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Dataset,
    XColumn,
    YColumn,
    Mode,
    Markers,
    Lines,
    PlotGroup,
    XScale,
    XOffset,
    XZero,
    YScale,
    YOffset,
    Downsample,
}

/// A typed field edit. Values are normalized when applied, never rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesField {
    Dataset(Option<String>),
    XColumn(Option<String>),
    YColumn(Option<String>),
    Mode(DisplayMode),
    Markers(bool),
    Lines(bool),
    PlotGroup(u32),
    XScale(f64),
    XOffset(f64),
    XZero(bool),
    YScale(f64),
    YOffset(f64),
    Downsample(i64),
}

impl SeriesField {
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Dataset(_) => FieldKind::Dataset,
            Self::XColumn(_) => FieldKind::XColumn,
            Self::YColumn(_) => FieldKind::YColumn,
            Self::Mode(_) => FieldKind::Mode,
            Self::Markers(_) => FieldKind::Markers,
            Self::Lines(_) => FieldKind::Lines,
            Self::PlotGroup(_) => FieldKind::PlotGroup,
            Self::XScale(_) => FieldKind::XScale,
            Self::XOffset(_) => FieldKind::XOffset,
            Self::XZero(_) => FieldKind::XZero,
            Self::YScale(_) => FieldKind::YScale,
            Self::YOffset(_) => FieldKind::YOffset,
            Self::Downsample(_) => FieldKind::Downsample,
        }
    }

    /// Parses raw UI input for `kind`.
    ///
    /// Empty text unsets a binding. Unparseable floats become NaN and
    /// unparseable integers become 0; both are normalized when applied. Only
    /// an unknown mode name or an unrecognized flag value is an error.
    pub fn parse(kind: FieldKind, raw: &str) -> PlotResult<Self> {
        let field = match kind {
            FieldKind::Dataset => Self::Dataset(parse_binding(raw)),
            FieldKind::XColumn => Self::XColumn(parse_binding(raw)),
            FieldKind::YColumn => Self::YColumn(parse_binding(raw)),
            FieldKind::Mode => Self::Mode(DisplayMode::parse(raw).ok_or_else(|| {
                PlotError::InvalidData(format!("unknown display mode `{}`", raw.trim()))
            })?),
            FieldKind::Markers => Self::Markers(parse_flag(raw)?),
            FieldKind::Lines => Self::Lines(parse_flag(raw)?),
            FieldKind::XZero => Self::XZero(parse_flag(raw)?),
            FieldKind::PlotGroup => {
                let group = parse_integer(raw).clamp(1, i64::from(u32::MAX));
                Self::PlotGroup(u32::try_from(group).unwrap_or(1))
            }
            FieldKind::XScale => Self::XScale(parse_float(raw)),
            FieldKind::XOffset => Self::XOffset(parse_float(raw)),
            FieldKind::YScale => Self::YScale(parse_float(raw)),
            FieldKind::YOffset => Self::YOffset(parse_float(raw)),
            FieldKind::Downsample => Self::Downsample(parse_integer(raw)),
        };
        Ok(field)
    }

    fn scope(&self) -> RestyleScope {
        match self {
            Self::Mode(_) | Self::Markers(_) | Self::Lines(_) => RestyleScope::Mode,
            Self::PlotGroup(_) => RestyleScope::Axis,
            Self::Dataset(_)
            | Self::XColumn(_)
            | Self::YColumn(_)
            | Self::XScale(_)
            | Self::XOffset(_)
            | Self::XZero(_)
            | Self::YScale(_)
            | Self::YOffset(_)
            | Self::Downsample(_) => RestyleScope::Data,
        }
    }
}

fn parse_binding(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_owned())
    }
}

fn parse_float(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Integer prefix semantics: `"2.7"` reads as 2, garbage reads as 0.
fn parse_integer(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return value;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value.trunc() as i64,
        _ => 0,
    }
}

fn parse_flag(raw: &str) -> PlotResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "1" | "yes" | "checked" => Ok(true),
        "false" | "off" | "0" | "no" | "" => Ok(false),
        other => Err(PlotError::InvalidData(format!(
            "unrecognized flag value `{other}`"
        ))),
    }
}

/// Applies one normalized edit to `config`.
fn apply_field(
    config: &mut SeriesConfig,
    field: SeriesField,
    datasets: &DatasetStore,
    session: &PlotSessionConfig,
) {
    match field {
        SeriesField::Dataset(name) => {
            if let Some(name) = name.as_deref() {
                if !datasets.contains(name) {
                    debug!(dataset = name, "series bound to dataset that is not loaded yet");
                }
            }
            config.dataset = name;
            resolve_columns(datasets, session.auto_select_first_column, config);
        }
        SeriesField::XColumn(column) => {
            config.x_column = column;
            resolve_columns(datasets, false, config);
        }
        SeriesField::YColumn(column) => {
            config.y_column = column;
            resolve_columns(datasets, false, config);
        }
        SeriesField::Mode(mode) => config.mode = mode,
        SeriesField::Markers(markers) => {
            config.mode = DisplayMode::from_toggles(markers, config.mode.shows_lines());
        }
        SeriesField::Lines(lines) => {
            config.mode = DisplayMode::from_toggles(config.mode.shows_markers(), lines);
        }
        SeriesField::PlotGroup(raw) => config.plot_group = PlotGroup::new(raw),
        SeriesField::XScale(value) => config.transform.x_scale = logged_scale("x_scale", value),
        SeriesField::XOffset(value) => {
            config.transform.x_offset = logged_offset("x_offset", value);
        }
        SeriesField::XZero(flag) => config.transform.x_zero = flag,
        SeriesField::YScale(value) => config.transform.y_scale = logged_scale("y_scale", value),
        SeriesField::YOffset(value) => {
            config.transform.y_offset = logged_offset("y_offset", value);
        }
        SeriesField::Downsample(raw) => {
            if raw < 1 {
                warn!(value = raw, "downsample below 1, clamping to 1");
            }
            let factor = usize::try_from(raw.max(1)).unwrap_or(usize::MAX);
            config.transform.downsample = session.clamp_downsample(factor);
        }
    }
}

fn logged_scale(field: &str, value: f64) -> f64 {
    let normalized = normalize_scale(value);
    if normalized.to_bits() != value.to_bits() {
        warn!(field, value, normalized, "invalid scale, using 1");
    }
    normalized
}

fn logged_offset(field: &str, value: f64) -> f64 {
    let normalized = normalize_offset(value);
    if normalized.to_bits() != value.to_bits() {
        warn!(field, value, normalized, "invalid offset, using 0");
    }
    normalized
}

impl PlotSession {
    /// Applies one field edit to `id` and returns the minimal restyle set.
    ///
    /// Data, column and transform edits re-run the pipeline; mode edits only
    /// restyle the mode; plot-group edits restyle the axis reference and then
    /// define any newly required axes. An edit that normalizes to the current
    /// value emits nothing.
    pub fn on_field_update(&mut self, id: SeriesId, field: SeriesField) -> PlotResult<SyncBatch> {
        let scope = field.scope();
        let kind = field.kind();

        let config = self.model.series.config_mut(id)?;
        let before = config.clone();
        apply_field(config, field, &self.model.datasets, &self.config);
        let changed = *config != before;

        let mut batch = SyncBatch::new();
        if !changed {
            debug!(%id, ?kind, "field update left series unchanged");
            return Ok(batch);
        }

        batch.push(self.restyle_command(id, scope)?);
        if scope == RestyleScope::Axis {
            self.sync_axes(&mut batch);
        }
        self.refresh_title(&mut batch);
        debug!(%id, ?kind, commands = batch.len(), "field updated");
        Ok(batch)
    }
}
