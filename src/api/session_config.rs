use serde::{Deserialize, Serialize};

use crate::core::DisplayMode;
use crate::error::{PlotError, PlotResult};
use crate::render::PlotOptions;

/// Upper bound on series created at session start.
pub const MAX_INITIAL_SERIES: usize = 64;

/// Public session bootstrap configuration.
///
/// Serializable so hosts can ship the setup alongside their page without
/// inventing an ad-hoc format. Every field has a default, so `{}` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotSessionConfig {
    #[serde(default = "default_mode")]
    pub default_mode: DisplayMode,
    #[serde(default = "default_initial_series")]
    pub initial_series: usize,
    #[serde(default = "default_true")]
    pub auto_select_first_dataset: bool,
    #[serde(default = "default_true")]
    pub auto_select_first_column: bool,
    #[serde(default = "default_true")]
    pub title_guide: bool,
    #[serde(default)]
    pub plot_options: PlotOptions,
    #[serde(default)]
    pub max_downsample: Option<usize>,
}

impl Default for PlotSessionConfig {
    fn default() -> Self {
        Self {
            default_mode: default_mode(),
            initial_series: default_initial_series(),
            auto_select_first_dataset: true,
            auto_select_first_column: true,
            title_guide: true,
            plot_options: PlotOptions::default(),
            max_downsample: None,
        }
    }
}

impl PlotSessionConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display mode given to series created without a template.
    #[must_use]
    pub fn with_default_mode(mut self, mode: DisplayMode) -> Self {
        self.default_mode = mode;
        self
    }

    /// Sets how many empty series exist right after creation.
    #[must_use]
    pub fn with_initial_series(mut self, count: usize) -> Self {
        self.initial_series = count;
        self
    }

    #[must_use]
    pub fn with_auto_select_first_dataset(mut self, enabled: bool) -> Self {
        self.auto_select_first_dataset = enabled;
        self
    }

    #[must_use]
    pub fn with_auto_select_first_column(mut self, enabled: bool) -> Self {
        self.auto_select_first_column = enabled;
        self
    }

    #[must_use]
    pub fn with_title_guide(mut self, enabled: bool) -> Self {
        self.title_guide = enabled;
        self
    }

    #[must_use]
    pub fn with_plot_options(mut self, options: PlotOptions) -> Self {
        self.plot_options = options;
        self
    }

    /// Caps the downsample factor a user can request.
    #[must_use]
    pub fn with_max_downsample(mut self, max: Option<usize>) -> Self {
        self.max_downsample = max;
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        if self.max_downsample == Some(0) {
            return Err(PlotError::InvalidConfig(
                "max_downsample must be >= 1 when set".to_owned(),
            ));
        }
        if self.initial_series > MAX_INITIAL_SERIES {
            return Err(PlotError::InvalidConfig(format!(
                "initial_series must be <= {MAX_INITIAL_SERIES}"
            )));
        }
        if self
            .plot_options
            .mode_bar_buttons_to_remove
            .iter()
            .any(|button| button.trim().is_empty())
        {
            return Err(PlotError::InvalidConfig(
                "mode bar button names must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PlotError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Parses and validates a config document.
    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| PlotError::InvalidConfig(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub(super) fn clamp_downsample(&self, factor: usize) -> usize {
        let factor = factor.max(1);
        match self.max_downsample {
            Some(max) => factor.min(max),
            None => factor,
        }
    }
}

fn default_mode() -> DisplayMode {
    DisplayMode::Markers
}

fn default_initial_series() -> usize {
    1
}

fn default_true() -> bool {
    true
}
