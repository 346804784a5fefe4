//! `spm_train`: resolve trainer settings from the command line.

use std::process::ExitCode;

use spm_tools::logging;
use spm_tools::runner::run_os;
use spm_tools::train::TrainFlags;

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    logging::init()?;
    run_os::<TrainFlags, _>(std::env::args_os()).map_err(color_eyre::eyre::Report::from)
}
