//! `spm_normalize`: resolve normalizer settings from the command line.

use std::process::ExitCode;

use spm_tools::logging;
use spm_tools::normalize::NormalizeFlags;
use spm_tools::runner::run_os;

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    logging::init()?;
    run_os::<NormalizeFlags, _>(std::env::args_os()).map_err(color_eyre::eyre::Report::from)
}
