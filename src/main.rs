use std::process::ExitCode;

use clap::Parser;

mod cli;
mod config;
mod instance;
mod ipc;
mod launch;
mod library;
mod logging;
mod metadata;
mod runtime;
mod session;
mod track;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    logging::init(&cli.log);

    match runtime::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("cadenza: {e}");
            ExitCode::FAILURE
        }
    }
}
