// File: crates/misp-plot/src/lib.rs
// Summary: Renders branch-predictor misprediction rate vs. history length charts from CSV results.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod plot;

pub use config::{ChartStyle, OutputMode, PlotConfig};
pub use dataset::{Dataset, Record, TestcaseSeries};
pub use error::PlotError;
pub use plot::{build_chart, render, render_with, run};
