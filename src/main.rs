//! pl - pasteline command-line entry point

use std::process::ExitCode;

use pasteline::ui::output;

fn main() -> ExitCode {
    match pasteline::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
