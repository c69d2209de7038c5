// File: crates/misp-plot/src/config.rs
// Summary: Plot configuration: output-path policy, resolution and fixed chart presentation.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chart_core::types::{DEFAULT_DPI, FIGURE_HEIGHT_IN, FIGURE_WIDTH_IN};
use chart_core::{RenderOptions, Theme};

use crate::error::{PlotError, Result};

pub const IMAGE_EXTENSION: &str = "png";
/// Upper bound on resolution; 12x8 inches at this dpi is already 28800x19200 px.
pub const MAX_DPI: u32 = 2400;

/// Input and output names used by the bimodal test sweep.
pub const BIMODAL_INPUT: &str = "bimodal_test_results.csv";
pub const BIMODAL_OUTPUT: &str = "bimodal_test_results.png";

/// Where the rendered image goes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Input path with its extension swapped for `.png`.
    #[default]
    Derived,
    /// Always this path, whatever the input.
    Fixed(PathBuf),
}

impl OutputMode {
    pub fn resolve(&self, input: &Path) -> PathBuf {
        match self {
            OutputMode::Derived => input.with_extension(IMAGE_EXTENSION),
            OutputMode::Fixed(path) => path.clone(),
        }
    }
}

impl FromStr for OutputMode {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "derived" {
            return Ok(OutputMode::Derived);
        }
        match s.strip_prefix("fixed:") {
            Some("") => Err(PlotError::InvalidConfig("`fixed:` needs a path".into())),
            Some(path) => Ok(OutputMode::Fixed(PathBuf::from(path))),
            None => Err(PlotError::InvalidConfig(format!(
                "unknown output mode `{s}` (expected `derived` or `fixed:<path>`)"
            ))),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Derived => f.write_str("derived"),
            OutputMode::Fixed(path) => write!(f, "fixed:{}", path.display()),
        }
    }
}

/// Text and geometry of the chart. Defaults reproduce the published figure.
#[derive(Clone, Debug)]
pub struct ChartStyle {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub width_in: f32,
    pub height_in: f32,
    pub theme: Theme,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            title: "Misprediction Rate vs. Num of History Bits".into(),
            x_label: "History Bits Length".into(),
            y_label: "Misprediction Rate (%)".into(),
            legend_title: "Testcase".into(),
            width_in: FIGURE_WIDTH_IN,
            height_in: FIGURE_HEIGHT_IN,
            theme: Theme::light(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PlotConfig {
    pub output: OutputMode,
    pub dpi: u32,
    pub style: ChartStyle,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self { output: OutputMode::Derived, dpi: DEFAULT_DPI, style: ChartStyle::default() }
    }
}

impl PlotConfig {
    /// Default configuration writing to a constant path.
    pub fn fixed(output: impl Into<PathBuf>) -> Self {
        Self { output: OutputMode::Fixed(output.into()), ..Self::default() }
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 || self.dpi > MAX_DPI {
            return Err(PlotError::InvalidConfig(format!(
                "dpi must be between 1 and {MAX_DPI}, got {}",
                self.dpi
            )));
        }
        if !(self.style.width_in > 0.0 && self.style.height_in > 0.0) {
            return Err(PlotError::InvalidConfig("figure size must be positive".into()));
        }
        Ok(())
    }

    pub fn render_options(&self) -> RenderOptions {
        let (width_in, height_in) = (self.style.width_in, self.style.height_in);
        let mut opts = RenderOptions::for_figure(width_in, height_in, self.dpi);
        opts.theme = self.style.theme;
        opts
    }
}
