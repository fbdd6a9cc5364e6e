//! Builder CLI
//!
//! Usage: builder [-check] [-build] [-install [-skipbuild]] [-publish] [-show]
//!
//! Flags may be written with one dash (`-build`) or two (`--build`).

use std::process::ExitCode;

use remote_builder::presentation::{app, logging, BuildInfo, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if cli.version {
        println!("{}", BuildInfo::current().banner());
        return ExitCode::SUCCESS;
    }

    logging::init(cli.verbose, cli.debug);

    match app::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            app::report_error(&err, cli.panic);
            ExitCode::from(app::exit_status(&err))
        }
    }
}
