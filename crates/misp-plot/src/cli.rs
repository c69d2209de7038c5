// File: crates/misp-plot/src/cli.rs
// Summary: Command-line surfaces, logging setup and exit-status mapping for both binaries.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use chart_core::theme;
use chart_core::types::DEFAULT_DPI;
use clap::{ArgAction, Parser, ValueHint};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{OutputMode, PlotConfig, MAX_DPI};
use crate::error::{PlotError, Result};

/// Plot misprediction rate against history length for every testcase in a CSV.
#[derive(Parser, Debug)]
#[command(name = "misp-plot", version, long_about = None)]
pub struct Cli {
    /// CSV with TESTCASE, history_bits and misp_rate columns
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output path policy: `derived` (input path with a .png extension) or `fixed:<path>`
    #[arg(short, long, default_value = "derived")]
    pub output: OutputMode,

    /// Image resolution in dots per inch
    #[arg(
        long,
        default_value_t = DEFAULT_DPI,
        value_parser = clap::value_parser!(u32).range(1..=MAX_DPI as i64)
    )]
    pub dpi: u32,

    /// Color theme (light or dark)
    #[arg(long, default_value = "light")]
    pub theme: String,

    /// Enable debug logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub verbose: bool,
}

impl Cli {
    pub fn config(&self) -> Result<PlotConfig> {
        let mut config = PlotConfig { output: self.output.clone(), ..PlotConfig::default() }
            .with_dpi(self.dpi);
        config.style.theme = theme::find(&self.theme);
        config.validate()?;
        Ok(config)
    }
}

/// Plot the bimodal test sweep from the working directory. Takes no positional arguments.
#[derive(Parser, Debug)]
#[command(name = "bimodal-plot", version, long_about = None)]
pub struct BimodalCli {
    /// Enable debug logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub verbose: bool,
}

/// Parse `args` (program name first) into `P`, turning any clap failure into a usage error.
pub fn parse_args<P, I, T>(args: I) -> Result<P>
where
    P: Parser,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    P::try_parse_from(args).map_err(PlotError::Usage)
}

/// Parse the process arguments; help, version and usage errors print and exit here.
pub fn parse_or_exit<P: Parser>() -> P {
    match parse_args(std::env::args_os()) {
        Ok(parsed) => parsed,
        Err(PlotError::Usage(err)) => err.exit(),
        Err(other) => {
            eprintln!("error: {other}");
            std::process::exit(i32::from(other.exit_code()));
        }
    }
}

pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Log the outcome and map it to the process exit status.
pub fn finish(result: Result<PathBuf>) -> ExitCode {
    match result {
        Ok(path) => {
            info!("Wrote {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            let code = err.exit_code();
            error!("{:#}", anyhow::Error::new(err));
            ExitCode::from(code)
        }
    }
}
