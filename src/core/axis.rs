use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::PlotGroup;

/// Axis identifier derived from the plot-group number itself.
///
/// Group 1 maps to `y`, group `n` to `y{n}`, so an identifier never moves to
/// another group no matter in which order groups appear or disappear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxisId(PlotGroup);

impl AxisId {
    #[must_use]
    pub const fn for_group(group: PlotGroup) -> Self {
        Self(group)
    }

    #[must_use]
    pub const fn group(self) -> PlotGroup {
        self.0
    }

    /// Trace-side reference (`y`, `y2`, ...).
    #[must_use]
    pub fn trace_ref(self) -> String {
        match self.0.raw() {
            1 => "y".to_owned(),
            n => format!("y{n}"),
        }
    }

    /// Layout-side key (`yaxis`, `yaxis2`, ...).
    #[must_use]
    pub fn layout_key(self) -> String {
        match self.0.raw() {
            1 => "yaxis".to_owned(),
            n => format!("yaxis{n}"),
        }
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.trace_ref())
    }
}

impl Serialize for AxisId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.trace_ref())
    }
}

impl<'de> Deserialize<'de> for AxisId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let group = match raw.strip_prefix('y') {
            Some("") => 1,
            Some(digits) => digits.parse::<u32>().map_err(serde::de::Error::custom)?,
            None => {
                return Err(serde::de::Error::custom(format!(
                    "axis id must start with `y`, got `{raw}`"
                )));
            }
        };
        Ok(Self(PlotGroup::new(group)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisSide {
    Left,
    Right,
}

/// Layout definition the chart collaborator needs for one axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLayout {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlaying: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<AxisSide>,
}

impl AxisLayout {
    /// Group 1 is the primary axis; later groups overlay it, alternating
    /// right (even groups) and left (odd groups).
    #[must_use]
    pub fn for_group(group: PlotGroup) -> Self {
        match group.raw() {
            1 => Self {
                title: String::new(),
                overlaying: None,
                side: None,
            },
            n => Self {
                title: String::new(),
                overlaying: Some("y".to_owned()),
                side: Some(if n % 2 == 0 {
                    AxisSide::Right
                } else {
                    AxisSide::Left
                }),
            },
        }
    }
}

/// Derived axis assignment for the current series list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisAllocation {
    /// Axis per series, aligned with the input order (series positions).
    pub axis_for_series: Vec<AxisId>,
    /// `max(plot groups in use, 1)`.
    pub axis_count: u32,
    pub groups_in_use: BTreeSet<u32>,
}

impl Default for AxisAllocation {
    fn default() -> Self {
        Self {
            axis_for_series: Vec::new(),
            axis_count: 1,
            groups_in_use: BTreeSet::new(),
        }
    }
}

impl AxisAllocation {
    #[must_use]
    pub fn recompute(groups: impl IntoIterator<Item = PlotGroup>) -> Self {
        let axis_for_series: Vec<AxisId> = groups.into_iter().map(AxisId::for_group).collect();
        let groups_in_use: BTreeSet<u32> = axis_for_series
            .iter()
            .map(|axis| axis.group().raw())
            .collect();
        let axis_count = groups_in_use.last().copied().unwrap_or(1).max(1);
        Self {
            axis_for_series,
            axis_count,
            groups_in_use,
        }
    }

    #[must_use]
    pub fn axis_at(&self, position: usize) -> AxisId {
        self.axis_for_series
            .get(position)
            .copied()
            .unwrap_or(AxisId::for_group(PlotGroup::PRIMARY))
    }

    /// Axes in use, primary first.
    pub fn axes(&self) -> impl Iterator<Item = AxisId> + '_ {
        self.groups_in_use
            .iter()
            .map(|&group| AxisId::for_group(PlotGroup::new(group)))
    }
}
