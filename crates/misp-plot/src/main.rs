// File: crates/misp-plot/src/main.rs
// Summary: `misp-plot <INPUT>`; writes the chart next to the input unless told otherwise.

use std::process::ExitCode;

use misp_plot::cli::{self, Cli};

fn main() -> ExitCode {
    let cli: Cli = cli::parse_or_exit();
    cli::init_tracing(cli.verbose);
    cli::finish(cli.config().and_then(|config| misp_plot::run(&config, &cli.input)))
}
