use std::process::ExitCode;

mod cli;
mod commands;
mod config;
mod display;
mod io;
mod logging;
mod util;

fn main() -> ExitCode {
    let cli = cli::parse();

    let _logger = match logging::init(cli.global.verbose) {
        Ok(handle) => handle,
        Err(e) => {
            display::print_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let ctx = display::Context::detect().with_quiet(cli.global.quiet);

    if ctx.interactive {
        display::print_banner();
    }

    match commands::dispatch(cli.command, ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("command failed: {e:#}");
            display::print_error(&e);
            ExitCode::FAILURE
        }
    }
}
