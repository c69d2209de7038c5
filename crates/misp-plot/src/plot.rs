// File: crates/misp-plot/src/plot.rs
// Summary: Load -> group by testcase -> draw one line per group -> write PNG.

use std::fs;
use std::path::{Path, PathBuf};

use chart_core::{Axis, Chart, Series};
use tracing::{debug, info, warn};

use crate::config::{ChartStyle, PlotConfig};
use crate::dataset::Dataset;
use crate::error::{PlotError, Result};

/// Fraction of the data span left empty on each side of both axes.
pub const AXIS_MARGIN: f64 = 0.05;

/// One labelled line per testcase, in first-appearance order, on autoscaled axes.
pub fn build_chart(dataset: &Dataset, style: &ChartStyle) -> Chart {
    let mut chart = Chart::new();
    chart.x_axis = Axis::new(&style.x_label, 0.0, 1.0);
    chart.y_axis = Axis::new(&style.y_label, 0.0, 1.0);
    chart.title = Some(style.title.clone());
    chart.legend_title = Some(style.legend_title.clone());
    for group in dataset.group_by_testcase() {
        debug!(testcase = %group.testcase, points = group.points.len(), "adding series");
        chart.add_series(Series::line(group.testcase, group.points));
    }
    chart.autoscale_axes(AXIS_MARGIN);
    chart
}

/// Render `input` to `output` with the default configuration.
pub fn render(input: &Path, output: &Path) -> Result<()> {
    render_with(&PlotConfig::default(), input, output)
}

/// Render `input` to `output`. The output file only appears if every step succeeds.
pub fn render_with(config: &PlotConfig, input: &Path, output: &Path) -> Result<()> {
    config.validate()?;

    info!("Loading {}", input.display());
    let dataset = Dataset::from_path(input)?;
    let chart = build_chart(&dataset, &config.style);
    if chart.series.is_empty() {
        warn!("{} has no rows; rendering an empty chart", input.display());
    }
    info!(
        rows = dataset.len(),
        testcases = chart.series.len(),
        "Rendering at {} dpi",
        config.dpi
    );

    let bytes = chart
        .render_to_png_bytes(&config.render_options())
        .map_err(PlotError::Render)?;
    write_atomically(output, &bytes)?;
    Ok(())
}

/// Resolve the output path from the configured policy, render, and return the written path.
pub fn run(config: &PlotConfig, input: &Path) -> Result<PathBuf> {
    let output = config.output.resolve(input);
    debug!(mode = %config.output, "output path {}", output.display());
    render_with(config, input, &output)?;
    Ok(output)
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = temp_sibling(path);
    let written = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, path));
    if let Err(source) = written {
        // the temp file may not exist; nothing else to clean up
        let _ = fs::remove_file(&tmp);
        return Err(PlotError::OutputWrite { path: path.to_path_buf(), source });
    }
    debug!(bytes = bytes.len(), "wrote {}", path.display());
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "chart".into(), |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;

    fn record(testcase: &str, history_bits: f64, misp_rate: f64) -> Record {
        Record { testcase: testcase.into(), history_bits, misp_rate }
    }

    #[test]
    fn chart_carries_fixed_presentation() {
        let dataset = Dataset::from_records(vec![record("gcc", 4.0, 12.5)]);
        let chart = build_chart(&dataset, &ChartStyle::default());
        assert_eq!(chart.x_axis.label, "History Bits Length");
        assert_eq!(chart.y_axis.label, "Misprediction Rate (%)");
        assert_eq!(chart.title.as_deref(), Some("Misprediction Rate vs. Num of History Bits"));
        assert_eq!(chart.legend_title.as_deref(), Some("Testcase"));
        assert_eq!(chart.legend_anchor, (1.05, 1.0));
        assert!(chart.show_grid);
    }

    #[test]
    fn temp_file_is_hidden_sibling() {
        let tmp = temp_sibling(Path::new("out/plot.png"));
        assert_eq!(tmp.parent(), Some(Path::new("out")));
        let name = tmp.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".plot.png.") && name.ends_with(".tmp"));
    }
}
