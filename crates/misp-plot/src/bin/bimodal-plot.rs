// File: crates/misp-plot/src/bin/bimodal-plot.rs
// Summary: Fixed-path variant: bimodal_test_results.csv -> bimodal_test_results.png
// in the working directory.

use std::path::Path;
use std::process::ExitCode;

use misp_plot::cli::{self, BimodalCli};
use misp_plot::config::{BIMODAL_INPUT, BIMODAL_OUTPUT};
use misp_plot::PlotConfig;

fn main() -> ExitCode {
    let cli: BimodalCli = cli::parse_or_exit();
    cli::init_tracing(cli.verbose);
    let config = PlotConfig::fixed(BIMODAL_OUTPUT);
    cli::finish(misp_plot::run(&config, Path::new(BIMODAL_INPUT)))
}
